//! Transport error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// Error Category
// ============================================================================

/// Coarse classification of a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    /// Network failure or non-success HTTP status.
    Error,
    /// The request timed out (only with an explicit timeout configured).
    Timeout,
    /// The response body was not the expected JSON.
    #[serde(rename = "parsererror")]
    ParseError,
    /// The request could not be built or was abandoned.
    Abort,
}

impl ErrorCategory {
    /// Returns the wire name used in abort diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Timeout => "timeout",
            Self::ParseError => "parsererror",
            Self::Abort => "abort",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Transport Error
// ============================================================================

/// A failed backend request.
///
/// Carries the three pieces of status detail hosts receive on a fatal
/// abort: status text, error category, and the underlying error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{category} ({status_text}): {detail}")]
pub struct TransportError {
    /// HTTP status code, when a response was received.
    pub status: Option<u16>,
    /// Status line text, e.g. `"404 Not Found"`.
    pub status_text: String,
    /// Error category.
    pub category: ErrorCategory,
    /// Underlying error or response body.
    pub detail: String,
}

impl TransportError {
    /// Creates an error for a non-success HTTP response.
    pub fn http_status(status: u16, reason: Option<&str>, body: impl Into<String>) -> Self {
        let status_text = match reason {
            Some(reason) => format!("{status} {reason}"),
            None => status.to_string(),
        };
        Self {
            status: Some(status),
            status_text,
            category: ErrorCategory::Error,
            detail: body.into(),
        }
    }

    /// Creates an error for a request that never produced a response.
    pub fn network(detail: impl Into<String>) -> Self {
        Self {
            status: None,
            status_text: "network error".to_string(),
            category: ErrorCategory::Error,
            detail: detail.into(),
        }
    }

    /// Creates an error for a timed-out request.
    pub fn timeout(detail: impl Into<String>) -> Self {
        Self {
            status: None,
            status_text: "timeout".to_string(),
            category: ErrorCategory::Timeout,
            detail: detail.into(),
        }
    }

    /// Creates an error for an undecodable response body.
    pub fn parse(status: Option<u16>, detail: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status.map_or_else(|| "invalid response".to_string(), |s| s.to_string()),
            category: ErrorCategory::ParseError,
            detail: detail.into(),
        }
    }

    /// Creates an error for a request that could not be built.
    pub fn aborted(detail: impl Into<String>) -> Self {
        Self {
            status: None,
            status_text: "aborted".to_string(),
            category: ErrorCategory::Abort,
            detail: detail.into(),
        }
    }

    /// Returns `[status_text, category, detail]`, the payload of a fatal
    /// host abort.
    pub fn diagnostic(&self) -> [String; 3] {
        [
            self.status_text.clone(),
            self.category.as_str().to_string(),
            self.detail.clone(),
        ]
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::timeout(err.to_string())
        } else if err.is_decode() {
            TransportError::parse(err.status().map(|s| s.as_u16()), err.to_string())
        } else if err.is_builder() {
            TransportError::aborted(err.to_string())
        } else if err.is_connect() {
            TransportError::network(format!("Connection failed: {err}"))
        } else {
            TransportError::network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_text() {
        let err = TransportError::http_status(404, Some("Not Found"), "no such report");
        assert_eq!(err.status_text, "404 Not Found");
        assert_eq!(err.category, ErrorCategory::Error);
        assert_eq!(
            err.diagnostic(),
            [
                "404 Not Found".to_string(),
                "error".to_string(),
                "no such report".to_string()
            ]
        );
    }

    #[test]
    fn test_parse_error_category_name() {
        let err = TransportError::parse(Some(200), "expected value at line 1 column 1");
        assert_eq!(err.diagnostic()[1], "parsererror");
        assert_eq!(err.status_text, "200");
    }

    #[test]
    fn test_display() {
        let err = TransportError::network("connection refused");
        assert_eq!(err.to_string(), "error (network error): connection refused");
    }
}
