//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity (catalog entry)
///
/// Availability is not stored on the product; it is derived from the
/// low-stock set returned by the inventory endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Unit price (non-negative, 2 decimal places)
    pub price: f64,
    pub category: String,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub price: f64,
    pub category: String,
}

/// Low-stock entry returned by `GET inventory/low-stock/`
///
/// Only the id is meaningful to the billing screen; the rest of the record
/// belongs to the inventory view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LowStockEntry {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}
