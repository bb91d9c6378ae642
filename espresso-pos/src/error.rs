//! Application error taxonomy
//!
//! Every network-originating error is caught at the call site and converted
//! into one of these variants; none propagate as unhandled faults. Retries
//! are always user-triggered.

use thiserror::Error;

/// Application error type
#[derive(Debug, Error)]
pub enum PosError {
    /// Bad credentials - recoverable, re-prompt
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Local validation failure - blocks the action, no network call made
    #[error("{0}")]
    Validation(String),

    /// Bill creation rejected or failed in transit - cart preserved, retry allowed
    #[error("Payment failed: {0}")]
    Submission(String),

    /// Catalog/availability/history fetch failed - degraded state, manual retry
    #[error("Load failed: {0}")]
    Load(String),

    /// Session role outside the known set - treated as logged out
    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

impl PosError {
    pub fn auth(err: espresso_client::ClientError) -> Self {
        Self::Auth(err.detail())
    }

    pub fn submission(err: espresso_client::ClientError) -> Self {
        Self::Submission(err.detail())
    }

    pub fn load(err: espresso_client::ClientError) -> Self {
        Self::Load(err.detail())
    }
}

/// Result type for application operations
pub type PosResult<T> = Result<T, PosError>;
