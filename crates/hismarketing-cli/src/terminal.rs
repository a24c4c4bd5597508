//! Terminal implementation of the presentation contract.

use std::io::{self, Write};
use std::sync::Mutex;

use colored::{ColoredString, Colorize};
use hismarketing_core::analytics::format::{
    chart_series, format_currency, format_quantity, month_labels,
};
use hismarketing_core::analytics::{
    AnalysisResult, PredictionResult, Priority, ProductForecast, UploadResult,
};
use hismarketing_core::presentation::{Notice, NoticeLevel, NoticeStyle, Presenter, View};
use hismarketing_core::session::Session;

const PROGRESS_WIDTH: usize = 20;
const TABLE_ROWS: usize = 10;
const BAR_WIDTH: usize = 30;

/// Prints workflow events to stdout.
///
/// Progress lines are redrawn in place with `\r`; any other output first
/// terminates a pending progress line.
#[derive(Default)]
pub struct TerminalPresenter {
    progress_open: Mutex<bool>,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    fn line(&self, text: impl std::fmt::Display) {
        self.close_progress();
        println!("{text}");
    }

    fn close_progress(&self) {
        if let Ok(mut open) = self.progress_open.lock() {
            if *open {
                println!();
                *open = false;
            }
        }
    }

    fn redraw(&self, text: &str) {
        let mut stdout = io::stdout().lock();
        let _ = write!(stdout, "\r\x1b[2K{text}");
        let _ = stdout.flush();
        if let Ok(mut open) = self.progress_open.lock() {
            *open = true;
        }
    }
}

impl Presenter for TerminalPresenter {
    fn notice(&self, notice: Notice) {
        let marker = match (notice.level, notice.style) {
            (NoticeLevel::Success, _) => "✓".green().bold(),
            (NoticeLevel::Error, NoticeStyle::Blocking) => "✗".red().bold(),
            (NoticeLevel::Error, NoticeStyle::Transient(_)) => "!".red().bold(),
        };
        let message = match notice.level {
            NoticeLevel::Success => notice.message.green(),
            NoticeLevel::Error => notice.message.red(),
        };
        self.line(format!("{marker} {message}"));
    }

    fn redirect(&self, view: View) {
        tracing::debug!(?view, "[Terminal] Redirect");
        let hint = match view {
            View::Login => Some("Oturum bulunamadı. `hismarketing login` ile giriş yapın."),
            View::Landing => Some("Çıkış yapıldı."),
            View::Dashboard | View::Analysis | View::Prediction => None,
        };
        if let Some(hint) = hint {
            self.line(hint.bright_black());
        }
    }

    fn show_user(&self, session: &Session) {
        self.line(format!(
            "{} {}",
            session.display_name().bright_magenta().bold(),
            format!("<{}>", session.display_email()).bright_black()
        ));
    }

    fn upload_progress(&self, percent: u8, label: &str) {
        let filled = PROGRESS_WIDTH * usize::from(percent.min(100)) / 100;
        let bar = format!(
            "[{}{}]",
            "#".repeat(filled),
            "-".repeat(PROGRESS_WIDTH - filled)
        );
        self.redraw(&format!("{} {}", bar.cyan(), label));
    }

    fn reset_upload(&self) {
        self.close_progress();
    }

    fn show_upload(&self, result: &UploadResult) {
        self.line(heading("Dosya Yüklendi"));
        if let Some(name) = &result.filename {
            self.line(field("Dosya", name));
        }
        self.line(field("Satır", &result.row_count.to_string()));
        self.line(field("Sütun", &result.column_count.to_string()));
        if !result.detected_columns.is_empty() {
            self.line(field("Kolonlar", &result.detected_columns.join(", ")));
        }
    }

    fn show_analysis(&self, result: &AnalysisResult) {
        self.line(heading("Veri Analizi"));
        self.line(field("Toplam Gelir", &format_currency(Some(result.total_revenue))));
        self.line(field("Toplam Gider", &format_currency(Some(result.total_expense))));
        self.line(field("Net Kâr", &format_currency(Some(result.net_profit))));
        self.line(field("Ürün Sayısı", &result.product_count.to_string()));

        if !result.monthly_sales.is_empty() {
            self.line(subheading("Aylık Satışlar"));
            for sale in &result.monthly_sales {
                self.line(format!("  {:<10} {:>12}", sale.month, format_quantity(sale.sales)));
            }
        }

        if !result.top_products.is_empty() {
            self.line(subheading("En Çok Satan Ürünler"));
            self.line(
                format!(
                    "  {:<24} {:>8} {:>16} {:>16}",
                    "Ürün", "Adet", "Gelir", "Kâr"
                )
                .bold(),
            );
            for product in result.top_products.iter().take(TABLE_ROWS) {
                self.line(format!(
                    "  {:<24} {:>8} {:>16} {:>16}",
                    truncate(&product.product, 24),
                    product.quantity,
                    format_currency(Some(product.revenue)),
                    format_currency(Some(product.profit))
                ));
            }
        }

        if !result.product_profits.is_empty() {
            self.line(subheading("Ürün Bazında Kâr"));
            for row in result.product_profits.iter().take(TABLE_ROWS) {
                let profit = format_currency(Some(row.profit));
                let profit = if row.profit < 0.0 {
                    profit.red()
                } else {
                    profit.green()
                };
                self.line(format!("  {:<24} {:>16}", truncate(&row.product, 24), profit));
            }
        }
    }

    fn prediction_status(&self, label: &str) {
        self.redraw(&format!("{} {}", "⏳".yellow(), label.yellow()));
    }

    fn prediction_action_enabled(&self, enabled: bool) {
        tracing::trace!(enabled, "[Terminal] Prediction action");
        if enabled {
            self.close_progress();
        }
    }

    fn show_prediction(&self, result: &PredictionResult) {
        self.line(heading("6 Aylık Satış Tahmini"));
        if let Some(summary) = &result.data_summary {
            self.line(field("Veri Aralığı", &summary.date_range));
            self.line(field("Toplam Satır", &summary.total_rows.to_string()));
            self.line(field("Ürün Sayısı", &summary.unique_products.to_string()));
        }
        if !result.last_data_date.is_empty() {
            self.line(field("Son Veri", &result.last_data_date));
        }
        self.line(field("Doğruluk", &format!("%{:.1}", result.accuracy)));

        let labels = month_labels(result);
        let mut header = format!("  {:<20}", "Ürün");
        for label in &labels {
            header.push_str(&format!(" {:>9}", truncate(label, 9)));
        }
        header.push_str(&format!(" {:>10}", "Toplam"));
        self.line(subheading("Tahminler"));
        self.line(header.bold());

        for row in forecast_rows(result) {
            self.line(row);
        }

        let series = chart_series(result);
        if !series.is_empty() {
            self.line(subheading("Tahmin Grafiği"));
            let peak = series.iter().map(forecast_total).fold(0.0_f64, f64::max);
            for forecast in series {
                let total = forecast_total(forecast);
                self.line(format!(
                    "  {:<20} {} {}",
                    truncate(&forecast.product, 20),
                    bar(total, peak, BAR_WIDTH).bright_blue(),
                    format_quantity(total)
                ));
            }
        }

        if !result.recommendations.is_empty() {
            self.line(subheading("Öneriler"));
            for rec in &result.recommendations {
                let change = rec
                    .change_percentage
                    .map(|pct| format!(" ({pct:+.1}%)"))
                    .unwrap_or_default();
                self.line(format!(
                    "  {} {}{}: {}",
                    priority_marker(rec.priority),
                    rec.product.bold(),
                    change,
                    rec.recommendation
                ));
            }
        }
    }

    fn report_saved(&self, file_name: &str, location: &str) {
        self.line(format!(
            "{} {} {}",
            "✓".green().bold(),
            file_name.green(),
            format!("→ {location}").bright_black()
        ));
    }
}

fn heading(title: &str) -> ColoredString {
    format!("\n== {title} ==").bright_magenta().bold()
}

fn subheading(title: &str) -> ColoredString {
    format!("\n{title}").bold()
}

fn field(name: &str, value: &str) -> String {
    format!("  {:<14} {}", format!("{name}:").bright_black(), value)
}

fn priority_marker(priority: Option<Priority>) -> ColoredString {
    match priority {
        Some(Priority::High) => "●".red(),
        Some(Priority::Medium) => "●".yellow(),
        Some(Priority::Low) => "●".green(),
        None => "●".normal(),
    }
}

/// One table row per forecast product.
fn forecast_rows(result: &PredictionResult) -> Vec<String> {
    result
        .predictions
        .iter()
        .map(|forecast| {
            let mut row = format!("  {:<20}", truncate(&forecast.product, 20));
            for value in forecast.monthly_predictions {
                row.push_str(&format!(" {:>9}", format_quantity(value)));
            }
            row.push_str(&format!(" {:>10}", format_quantity(forecast_total(forecast))));
            row
        })
        .collect()
}

fn forecast_total(forecast: &ProductForecast) -> f64 {
    forecast.total_predicted.unwrap_or_else(|| forecast.total())
}

/// Horizontal bar for `value`, scaled so `peak` fills `width` cells.
fn bar(value: f64, peak: f64, width: usize) -> String {
    if !peak.is_finite() || peak <= 0.0 || value.is_nan() || value <= 0.0 {
        return String::new();
    }
    let cells = ((value / peak) * width as f64).round() as usize;
    "█".repeat(cells.clamp(1, width))
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
