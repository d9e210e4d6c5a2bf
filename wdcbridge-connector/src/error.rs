//! Connector error types.

use thiserror::Error;
use wdcbridge_core::CoreError;
use wdcbridge_fetch::{Endpoint, ErrorCategory, TransportError};

/// Errors raised by the connector's protocols.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// The host has not stored a credential yet.
    #[error("No credential stored")]
    MissingCredential,

    /// The host has not selected a report yet.
    #[error("No report selected")]
    MissingReport,

    /// Credential, URL, or schema data could not be interpreted.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The backend request failed.
    #[error("Request failed: {0}")]
    Transport(#[from] TransportError),

    /// The backend answered with an unexpected shape.
    #[error("Unexpected {endpoint} response: {message}")]
    Decode {
        /// Endpoint that produced the response.
        endpoint: Endpoint,
        /// Decoder error.
        message: String,
    },

    /// The interactive flow was started outside a Tokio runtime.
    #[error("No async runtime available to run the authentication flow")]
    NoRuntime,
}

impl ConnectorError {
    /// Creates a decode error for `endpoint`.
    pub fn decode(endpoint: Endpoint, err: &serde_json::Error) -> Self {
        Self::Decode {
            endpoint,
            message: err.to_string(),
        }
    }

    /// Returns `[status_text, category, detail]` for a fatal host abort.
    pub fn diagnostic(&self) -> [String; 3] {
        match self {
            Self::Transport(err) => err.diagnostic(),
            Self::Decode { .. } => [
                "invalid response".to_string(),
                ErrorCategory::ParseError.as_str().to_string(),
                self.to_string(),
            ],
            _ => [
                "connector error".to_string(),
                ErrorCategory::Abort.as_str().to_string(),
                self.to_string(),
            ],
        }
    }

    /// Returns the diagnostic as the JSON array text hosts expect.
    pub fn diagnostic_json(&self) -> String {
        serde_json::to_string(&self.diagnostic()).unwrap_or_else(|_| self.to_string())
    }
}
