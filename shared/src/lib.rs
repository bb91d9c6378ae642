//! Shared types for Espresso POS
//!
//! Wire/data models and monetary helpers used by both the API client and
//! the application core.

pub mod client;
pub mod models;
pub mod money;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
