//! Bill Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payment method (closed set)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Upi,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cash => write!(f, "CASH"),
            Self::Upi => write!(f, "UPI"),
        }
    }
}

/// One (product, quantity) pair in a bill creation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BillItemInput {
    pub product_id: i64,
    pub quantity: i32,
}

/// Create bill payload (`POST bills/`)
///
/// The whole cart goes up in one atomic request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BillCreate {
    pub payment_method: PaymentMethod,
    pub items: Vec<BillItemInput>,
}

/// Bill line as returned by the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillItem {
    pub product_name: String,
    pub quantity: i32,
    /// Unit price at the time of sale
    pub price: f64,
}

/// Bill entity (`POST bills/` response, `GET bills/{id}/`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    pub id: i64,
    pub bill_number: String,
    pub total_amount: f64,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub cashier_name: Option<String>,
    #[serde(default)]
    pub items: Vec<BillItem>,
}

/// History row (`GET bills/history/`) — items omitted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillSummary {
    pub id: i64,
    pub bill_number: String,
    pub total_amount: f64,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub cashier_name: Option<String>,
}

/// Date filter for bill history
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HistoryFilter {
    /// No filter, server default window
    #[default]
    All,
    /// Bills created today
    Today,
    /// Inclusive date range (YYYY-MM-DD)
    Range { from: String, to: String },
}

impl HistoryFilter {
    /// Render the query-string suffix for `GET bills/history/`
    pub fn query(&self) -> String {
        match self {
            Self::All => String::new(),
            Self::Today => "?today=1".to_string(),
            Self::Range { from, to } => format!("?from={}&to={}", from, to),
        }
    }
}
