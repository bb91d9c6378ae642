//! Report Models (read-only view data)

use serde::{Deserialize, Serialize};

/// Top-selling product row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopProduct {
    pub product_name: String,
    pub quantity_sold: i64,
    pub revenue: f64,
}

/// Daily sales summary (`GET reports/daily/`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySummary {
    /// Business date (YYYY-MM-DD format)
    pub date: String,
    pub total_orders: i64,
    pub total_revenue: f64,
    #[serde(default)]
    pub cash_revenue: f64,
    #[serde(default)]
    pub upi_revenue: f64,
    #[serde(default)]
    pub top_products: Vec<TopProduct>,
}
