//! Backend endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of backend endpoints the connector depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    /// Starts the OAuth redirect. Reached by navigation, never POSTed.
    Authorize,
    /// Exchanges an authorization code for a token.
    Tokenize,
    /// Lists reports available to a credential.
    Reports,
    /// Returns the column schema of a report.
    Headers,
    /// Returns the rows of a report.
    Data,
}

impl Endpoint {
    /// Returns the request path, relative to the backend root.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Authorize => "authorize",
            Self::Tokenize => "tokenize",
            Self::Reports => "reports",
            Self::Headers => "headers",
            Self::Data => "data",
        }
    }

    /// Returns true if this endpoint is a full browser navigation rather
    /// than a JSON request.
    pub fn is_navigation(&self) -> bool {
        matches!(self, Self::Authorize)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.path())
    }
}
