//! Credentials and OAuth callback handling.
//!
//! A credential is an opaque token string as far as the connector is
//! concerned. The token returned by `/tokenize` is stored as its JSON text,
//! so most credentials parse back into a JSON object, but hosts may also
//! hold a raw token.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::{PoisonError, RwLock};
use url::Url;

use crate::error::CoreError;
use crate::models::report::ConnectionConfig;
use crate::traits::CredentialStore;

// ============================================================================
// Credential
// ============================================================================

/// Opaque authentication token plus the profile identifier it belongs to.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Serialized token text.
    pub token: String,
    /// Profile identifier reported by `/reports`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl Credential {
    /// Creates a credential from token text and an optional username.
    pub fn new(token: impl Into<String>, username: Option<String>) -> Self {
        Self {
            token: token.into(),
            username,
        }
    }

    /// Serializes a token-exchange response into credential text.
    pub fn from_token_response(response: &Value) -> Result<Self, CoreError> {
        Ok(Self::new(serde_json::to_string(response)?, None))
    }

    /// Parses the token text as JSON, for request payloads that embed the
    /// credential as structured `auth`.
    pub fn auth_value(&self) -> Result<Value, CoreError> {
        serde_json::from_str(&self.token)
            .map_err(|e| CoreError::InvalidCredential(format!("token is not JSON: {e}")))
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("username", &self.username)
            .finish()
    }
}

// ============================================================================
// OAuth Callback
// ============================================================================

/// Query parameters carried by the OAuth provider's redirect back to the
/// connector page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OAuthCallbackParams {
    /// Authorization code to exchange at `/tokenize`.
    pub code: Option<String>,
    /// Opaque state echoed by the provider.
    pub state: Option<String>,
    /// Provider error code, when the user declined or the request failed.
    pub error: Option<String>,
}

impl OAuthCallbackParams {
    /// Extracts callback parameters from a page URL.
    ///
    /// Parameters that are present but empty are treated as absent.
    pub fn from_url(location: &str) -> Result<Self, CoreError> {
        let url = Url::parse(location).map_err(|e| CoreError::InvalidUrl(e.to_string()))?;

        let mut params = Self::default();
        for (key, value) in url.query_pairs() {
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "code" => params.code = Some(value.into_owned()),
                "state" => params.state = Some(value.into_owned()),
                "error" => params.error = Some(value.into_owned()),
                _ => {}
            }
        }
        Ok(params)
    }

    /// Returns true if the URL carried an authorization code.
    pub fn has_code(&self) -> bool {
        self.code.is_some()
    }

    /// Returns `scheme://authority` for a page URL, dropping path, query,
    /// and fragment so a reload cannot replay the callback.
    pub fn bare_location(location: &str) -> Result<String, CoreError> {
        let url = Url::parse(location).map_err(|e| CoreError::InvalidUrl(e.to_string()))?;
        let authority = url.authority();
        if authority.is_empty() {
            return Err(CoreError::InvalidUrl(format!("{location} has no authority")));
        }
        Ok(format!("{}://{}", url.scheme(), authority))
    }
}

// ============================================================================
// In-memory Store
// ============================================================================

#[derive(Debug, Default)]
struct StoreState {
    password: Option<String>,
    username: Option<String>,
    connection: ConnectionConfig,
}

/// Process-local [`CredentialStore`].
///
/// Suitable for tests and for hosts that re-authenticate on every start.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    state: RwLock<StoreState>,
}

impl MemoryCredentialStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with a credential.
    pub fn with_credential(credential: Credential) -> Self {
        let store = Self::new();
        store.set_password(credential.token);
        if let Some(username) = credential.username {
            store.set_username(username);
        }
        store
    }

    /// Builder-style setter for the selected report.
    pub fn with_report(self, report: impl Into<String>) -> Self {
        self.set_connection_data(ConnectionConfig::for_report(report));
        self
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn password(&self) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .password
            .clone()
    }

    fn set_password(&self, password: String) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .password = Some(password);
    }

    fn username(&self) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .username
            .clone()
    }

    fn set_username(&self, username: String) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .username = Some(username);
    }

    fn connection_data(&self) -> ConnectionConfig {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .connection
            .clone()
    }

    fn set_connection_data(&self, config: ConnectionConfig) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .connection = config;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_credential_debug_redacts_token() {
        let cred = Credential::new("secret-token", Some("p1".to_string()));
        let debug = format!("{cred:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("p1"));
    }

    #[test]
    fn test_from_token_response_serializes_json() {
        let response = json!({"access_token": "ya29", "expires_in": 3600});
        let cred = Credential::from_token_response(&response).unwrap();
        assert_eq!(cred.auth_value().unwrap(), response);
        assert!(cred.username.is_none());
    }

    #[test]
    fn test_raw_token_is_not_json() {
        let cred = Credential::new("tok123", None);
        assert!(matches!(
            cred.auth_value(),
            Err(CoreError::InvalidCredential(_))
        ));
    }

    #[test]
    fn test_callback_params_with_code() {
        let params =
            OAuthCallbackParams::from_url("http://localhost:9001/?code=4/abc&state=xyz").unwrap();
        assert_eq!(params.code.as_deref(), Some("4/abc"));
        assert_eq!(params.state.as_deref(), Some("xyz"));
        assert!(params.has_code());
    }

    #[test]
    fn test_callback_params_decodes_percent_encoding() {
        let params = OAuthCallbackParams::from_url("http://localhost/?code=4%2Fabc").unwrap();
        assert_eq!(params.code.as_deref(), Some("4/abc"));
    }

    #[test]
    fn test_callback_params_without_code() {
        let params = OAuthCallbackParams::from_url("http://localhost:9001/").unwrap();
        assert!(!params.has_code());

        let params = OAuthCallbackParams::from_url("http://localhost:9001/?code=").unwrap();
        assert!(!params.has_code());
    }

    #[test]
    fn test_callback_params_error() {
        let params =
            OAuthCallbackParams::from_url("http://localhost/?error=access_denied").unwrap();
        assert_eq!(params.error.as_deref(), Some("access_denied"));
        assert!(!params.has_code());
    }

    #[test]
    fn test_bare_location_strips_query() {
        let bare =
            OAuthCallbackParams::bare_location("https://wdc.example.com:8443/index.html?code=x#top")
                .unwrap();
        assert_eq!(bare, "https://wdc.example.com:8443");
    }

    #[test]
    fn test_bare_location_rejects_garbage() {
        assert!(OAuthCallbackParams::bare_location("not a url").is_err());
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryCredentialStore::new();
        assert!(store.credential().is_none());

        store.set_password("tok".to_string());
        store.set_username("p1".to_string());

        let cred = store.credential().unwrap();
        assert_eq!(cred.token, "tok");
        assert_eq!(cred.username.as_deref(), Some("p1"));
    }

    #[test]
    fn test_memory_store_empty_password_is_absent() {
        let store = MemoryCredentialStore::new();
        store.set_password(String::new());
        assert!(store.credential().is_none());
    }

    #[test]
    fn test_memory_store_with_report() {
        let store = MemoryCredentialStore::new().with_report("r1");
        assert_eq!(store.connection_data().report(), Some("r1"));
    }
}
