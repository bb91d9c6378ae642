//! Ingredient Model (inventory rows)

use serde::{Deserialize, Serialize};

/// Ingredient entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    pub current_stock: f64,
    pub minimum_stock: f64,
    #[serde(default)]
    pub unit: Option<String>,
}

/// Update stock payload (`PUT ingredients/{id}/`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockUpdate {
    pub current_stock: f64,
}
