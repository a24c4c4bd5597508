//! Display helpers shared by presenters.
//!
//! Amounts follow Turkish number formatting: `.` groups thousands and `,`
//! separates decimals.

use super::prediction::{FORECAST_MONTHS, PredictionResult, ProductForecast};

/// Maximum number of products drawn in the forecast chart.
pub const CHART_SERIES_LIMIT: usize = 5;

const CURRENCY_SYMBOL: &str = "₺";

/// Formats an amount as `₺1.234,50`; a missing amount is `₺0`.
pub fn format_currency(value: Option<f64>) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return format!("{CURRENCY_SYMBOL}0");
    };

    let cents = (value.abs() * 100.0).round() as u128;
    let sign = if value < 0.0 && cents != 0 { "-" } else { "" };

    format!(
        "{CURRENCY_SYMBOL}{sign}{},{:02}",
        group_thousands(cents / 100),
        cents % 100
    )
}

/// Rounds to the nearest integer and groups thousands: `12345.6` -> `12.346`.
pub fn format_quantity(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}{}", group_thousands(rounded.abs() as u128))
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    grouped
}

/// Column labels for the six forecast months.
///
/// Uses the server's month names when present, `Ay 1` … `Ay 6` otherwise.
pub fn month_labels(prediction: &PredictionResult) -> Vec<String> {
    if prediction.future_months.is_empty() {
        (1..=FORECAST_MONTHS).map(|n| format!("Ay {n}")).collect()
    } else {
        prediction
            .future_months
            .iter()
            .map(|month| month.month_name.clone())
            .collect()
    }
}

/// Products shown in the forecast chart, in server order.
pub fn chart_series(prediction: &PredictionResult) -> &[ProductForecast] {
    let end = prediction.predictions.len().min(CHART_SERIES_LIMIT);
    &prediction.predictions[..end]
}
