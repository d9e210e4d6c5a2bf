//! Request bodies for the report endpoints.

use serde::Serialize;
use serde_json::Value;
use wdcbridge_core::CredentialStore;

use crate::error::ConnectorError;

/// Body of `/tokenize`.
#[derive(Debug, Serialize)]
pub struct TokenizeRequest<'a> {
    /// Authorization code from the OAuth callback.
    pub code: &'a str,
}

/// Body shared by `/headers` and `/data`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    /// The stored credential, parsed back into JSON.
    pub auth: Value,
    /// Selected report.
    pub report_id: String,
    /// Profile identifier, `null` if the host never stored one.
    pub profile_id: Option<String>,
}

impl ReportRequest {
    /// Builds the request from host state.
    ///
    /// Fails if no credential is stored, the credential is not JSON, or no
    /// report is selected.
    pub fn from_store(store: &dyn CredentialStore) -> Result<Self, ConnectorError> {
        let credential = store.credential().ok_or(ConnectorError::MissingCredential)?;
        let auth = credential.auth_value()?;

        let report_id = store
            .connection_data()
            .report()
            .map(str::to_string)
            .ok_or(ConnectorError::MissingReport)?;

        Ok(Self {
            auth,
            report_id,
            profile_id: credential.username,
        })
    }
}
