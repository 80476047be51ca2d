//! Unified error type exposed by **`mealpick-core`**.
//!
//! Provider crates convert their internal errors into one of these variants
//! before bubbling them up to the [`MealpickClient`](crate::MealpickClient).

use thiserror::Error;

/// Convenient alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, MealpickError>;

#[derive(Debug, Error)]
pub enum MealpickError {
    /// Forwarding of any backend-specific failure (transport, auth, payload).
    #[error("backend returned an error: {0}")]
    Backend(Box<dyn std::error::Error + Send + Sync + 'static>),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid: {0}")]
    Invalid(String),
}
