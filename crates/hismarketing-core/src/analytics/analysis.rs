use serde::{Deserialize, Serialize};

/// Quantity sold in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySale {
    /// Month label as sent by the server (`YYYY-MM`)
    pub month: String,
    pub sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductProfit {
    pub product: String,
    pub profit: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopProduct {
    pub product: String,
    /// Net of returns, so it can be negative
    pub quantity: i64,
    pub revenue: f64,
    pub profit: f64,
}

/// Server response to `POST /api/data/analyze`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub total_revenue: f64,
    #[serde(default)]
    pub total_expense: f64,
    #[serde(default)]
    pub net_profit: f64,
    #[serde(default)]
    pub product_count: u64,
    #[serde(default)]
    pub monthly_sales: Vec<MonthlySale>,
    #[serde(default)]
    pub product_profits: Vec<ProductProfit>,
    #[serde(default)]
    pub top_products: Vec<TopProduct>,
}
