//! Staff Model

use serde::{Deserialize, Serialize};

/// Staff response (without password)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffResponse {
    pub id: i64,
    pub username: String,
    /// Role string ("STAFF" | "ADMIN")
    pub role: String,
    pub is_active: bool,
}

/// Create staff payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffCreate {
    pub username: String,
    pub password: String,
    pub role: String,
}

/// Update staff payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
