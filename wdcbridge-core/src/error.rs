//! Core error types for WDC Bridge.

use thiserror::Error;

/// Core error type for WDC Bridge operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Unknown lifecycle phase name.
    #[error("Unknown phase: {0}")]
    UnknownPhase(String),

    /// Credential text could not be interpreted.
    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    /// Column schema violates an invariant.
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// URL could not be parsed or has no authority.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
