//! Espresso Client - HTTP client for the POS API
//!
//! Provides network-based HTTP calls to the point-of-sale REST API.

pub mod api;
pub mod config;
pub mod error;
pub mod http;

pub use api::PosApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::ApiClient;

// Re-export shared types for convenience
pub use shared::client::{LoginRequest, LoginResponse, UserInfo};
