//! Trait definitions for WDC Bridge.
//!
//! The host application owns credential and connection state. The connector
//! reads and writes it through [`CredentialStore`] and never persists it
//! itself.

use crate::models::{ConnectionConfig, Credential};

/// Host-owned storage for the connector's credential and connection data.
///
/// Implementors are responsible for:
/// - Holding the opaque token ("password") and the profile identifier
///   ("username") across lifecycle phases
/// - Holding the connection data chosen in the interactive phase
/// - Persisting any of it across process restarts, if at all
pub trait CredentialStore: Send + Sync {
    /// Returns the stored token text, if any.
    fn password(&self) -> Option<String>;

    /// Replaces the stored token text.
    fn set_password(&self, password: String);

    /// Returns the stored profile identifier, if any.
    fn username(&self) -> Option<String>;

    /// Replaces the stored profile identifier.
    fn set_username(&self, username: String);

    /// Returns the current connection data.
    fn connection_data(&self) -> ConnectionConfig;

    /// Replaces the connection data.
    fn set_connection_data(&self, config: ConnectionConfig);

    /// Returns the full credential, or `None` when no token is stored.
    ///
    /// Empty token text counts as absent.
    fn credential(&self) -> Option<Credential> {
        let token = self.password().filter(|p| !p.is_empty())?;
        Some(Credential::new(token, self.username()))
    }
}
