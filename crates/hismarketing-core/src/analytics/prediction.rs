use serde::{Deserialize, Serialize};

/// Number of months covered by every forecast.
pub const FORECAST_MONTHS: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSummary {
    pub total_rows: u64,
    pub unique_products: u64,
    pub total_quantity: i64,
    /// `YYYY-MM-DD - YYYY-MM-DD`
    pub date_range: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FutureMonth {
    pub month_name: String,
    /// `YYYY-MM`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Six-month forecast for a single product.
///
/// `monthly_predictions` is a fixed-size array, so payloads with any other
/// length fail to decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductForecast {
    pub product: String,
    pub monthly_predictions: [f64; FORECAST_MONTHS],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_predicted: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

impl ProductForecast {
    /// Sum of the six monthly predictions.
    pub fn total(&self) -> f64 {
        self.monthly_predictions.iter().sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub product: String,
    pub recommendation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

/// Server response to `POST /api/prediction/generate`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_summary: Option<DataSummary>,
    #[serde(default)]
    pub last_data_date: String,
    /// Average model accuracy, in percent
    #[serde(default)]
    pub accuracy: f64,
    #[serde(default)]
    pub future_months: Vec<FutureMonth>,
    #[serde(default)]
    pub predictions: Vec<ProductForecast>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_products: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction_months: Option<u32>,
}
