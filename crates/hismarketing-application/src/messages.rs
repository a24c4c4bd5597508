//! Localized (Turkish) user-facing texts.

use hismarketing_core::analytics::ReportFormat;

pub const LOGIN_SUCCESS: &str = "Giriş başarılı! Yönlendiriliyorsunuz...";
pub const LOGIN_FAILED: &str = "Giriş başarısız. E-posta veya şifre hatalı.";
pub const REGISTER_SUCCESS: &str = "Kayıt başarılı! Giriş yapılıyor...";
pub const REGISTER_FAILED: &str =
    "Kayıt başarısız. Bu e-posta adresi zaten kullanılıyor olabilir.";
pub const PASSWORD_MISMATCH: &str = "Şifreler eşleşmiyor!";
pub const PASSWORD_TOO_SHORT: &str = "Şifre en az 6 karakter olmalıdır!";
pub const GENERIC_ERROR: &str = "Bir hata oluştu. Lütfen tekrar deneyin.";

pub const UNSUPPORTED_FILE: &str = "Lütfen Excel (.xlsx) veya CSV (.csv) dosyası yükleyin!";
pub const UPLOAD_COMPLETE: &str = "Yükleme tamamlandı!";
pub const UPLOAD_FAILED: &str = "Yükleme başarısız";
pub const UPLOAD_ERROR_PREFIX: &str = "Dosya yüklenirken bir hata oluştu: ";

pub const UPLOAD_REQUIRED: &str = "Lütfen önce bir dosya yükleyin!";
pub const ANALYSIS_FAILED: &str = "Analiz başarısız";
pub const ANALYSIS_ERROR_PREFIX: &str = "Veri analizi sırasında bir hata oluştu: ";

pub const ANALYSIS_REQUIRED: &str = "Lütfen önce veri yükleyin ve analiz edin!";
pub const PREDICTION_FAILED: &str = "Tahmin oluşturulamadı";
pub const PREDICTION_ERROR_PREFIX: &str = "Tahmin oluşturulurken bir hata oluştu: ";
pub const PREDICTION_IDLE: &str = "Tahmin Oluştur";
pub const PREDICTION_DONE: &str = "Tamamlandı!";

/// Status labels cycled while a prediction is pending.
pub const PREDICTION_STATUSES: [&str; 4] = [
    "Veriler analiz ediliyor...",
    "AI modeli hazırlanıyor...",
    "Tahminler hesaplanıyor...",
    "Öneriler oluşturuluyor...",
];

pub fn upload_progress(percent: u8) -> String {
    format!("Yükleniyor... {percent}%")
}

pub fn file_read_failed(detail: &str) -> String {
    format!("{UPLOAD_ERROR_PREFIX}{detail}")
}

pub fn report_failed(format: ReportFormat) -> &'static str {
    match format {
        ReportFormat::Pdf => "PDF indirilirken bir hata oluştu",
        ReportFormat::Excel => "Excel indirilirken bir hata oluştu",
    }
}
