//! Authentication flow states.

use serde::Serialize;
use std::fmt;

/// Where the interactive authentication flow currently stands.
///
/// ```text
///                 credential stored
///  NoCredential ─────────────────────▶ FetchingInitialSchema ──▶ Ready
///       │                                      ▲          │
///       ▼                                      │          ▼
///  AwaitingUserSignIn ──code──▶ ExchangingToken ─────────▶ Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthState {
    /// Flow not started or no credential found yet.
    NoCredential,
    /// Sign-in control bound; waiting for the user or an OAuth callback.
    AwaitingUserSignIn,
    /// Exchanging an authorization code at `/tokenize`.
    ExchangingToken,
    /// Fetching the report list for a usable credential.
    FetchingInitialSchema,
    /// Report list shown; configuration can proceed.
    Ready,
    /// A request failed. Terminal until the user signs in again.
    Failed,
}

impl AuthState {
    /// Returns true if the flow will make no further progress on its own.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::AwaitingUserSignIn | Self::Ready | Self::Failed)
    }

    /// Returns a short display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoCredential => "no credential",
            Self::AwaitingUserSignIn => "awaiting sign-in",
            Self::ExchangingToken => "exchanging token",
            Self::FetchingInitialSchema => "fetching reports",
            Self::Ready => "ready",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settled_states() {
        assert!(AuthState::Ready.is_settled());
        assert!(AuthState::Failed.is_settled());
        assert!(AuthState::AwaitingUserSignIn.is_settled());
        assert!(!AuthState::NoCredential.is_settled());
        assert!(!AuthState::ExchangingToken.is_settled());
    }
}
