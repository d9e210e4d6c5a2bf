//! Credential storage in the system keychain.
//!
//! - macOS: Keychain Services
//! - Linux: Secret Service (GNOME Keyring, KDE Wallet)
//!
//! ## Caching
//!
//! Each keychain account is read at most once per store, so a host running
//! several lifecycle phases triggers at most one unlock prompt. Writes go
//! to the cache first; a keychain failure is logged and the value stays
//! usable for the rest of the process.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use keyring::Entry;
use tracing::{debug, trace, warn};
use wdcbridge_core::{ConnectionConfig, CredentialStore};

use crate::error::StoreError;

/// Keychain service name for WDC Bridge credentials.
pub const SERVICE_NAME: &str = "wdcbridge";

const TOKEN_ACCOUNT: &str = "token";
const USERNAME_ACCOUNT: &str = "username";

// ============================================================================
// Keychain Access
// ============================================================================

fn read_entry(service: &str, account: &str) -> Result<Option<String>, StoreError> {
    let entry = Entry::new(service, account)?;
    match entry.get_password() {
        Ok(value) if value.is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn write_entry(service: &str, account: &str, value: &str) -> Result<(), StoreError> {
    Entry::new(service, account)?.set_password(value)?;
    Ok(())
}

fn delete_entry(service: &str, account: &str) -> Result<(), StoreError> {
    match Entry::new(service, account)?.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

// ============================================================================
// Keychain Credential Store
// ============================================================================

/// [`CredentialStore`] persisting the token and profile id in the system
/// keychain.
///
/// Connection data (the selected report) is per-run and stays in memory.
#[derive(Debug)]
pub struct KeychainCredentialStore {
    service: String,
    cache: RwLock<HashMap<&'static str, Option<String>>>,
    connection: RwLock<ConnectionConfig>,
}

impl Default for KeychainCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeychainCredentialStore {
    /// Creates a store under [`SERVICE_NAME`].
    pub fn new() -> Self {
        Self::with_service(SERVICE_NAME)
    }

    /// Creates a store under a custom keychain service, e.g. one per
    /// backend.
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            cache: RwLock::new(HashMap::new()),
            connection: RwLock::new(ConnectionConfig::default()),
        }
    }

    /// Returns the keychain service name.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Removes the stored token and profile id.
    ///
    /// # Errors
    ///
    /// Returns an error if the keychain refuses the deletion. Missing
    /// entries are not an error.
    pub fn clear(&self) -> Result<(), StoreError> {
        {
            let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
            cache.insert(TOKEN_ACCOUNT, None);
            cache.insert(USERNAME_ACCOUNT, None);
        }
        delete_entry(&self.service, TOKEN_ACCOUNT)?;
        delete_entry(&self.service, USERNAME_ACCOUNT)?;
        debug!(service = %self.service, "Credential cleared");
        Ok(())
    }

    fn get(&self, account: &'static str) -> Option<String> {
        if let Some(cached) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(account)
        {
            trace!(account, hit = true, "Keychain cache lookup");
            return cached.clone();
        }

        trace!(account, hit = false, "Keychain cache miss, reading from keychain");
        let value = read_entry(&self.service, account).unwrap_or_else(|e| {
            warn!(account, error = %e, "Keychain read failed");
            None
        });
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(account, value.clone());
        value
    }

    fn set(&self, account: &'static str, value: String) {
        if let Err(e) = write_entry(&self.service, account, &value) {
            warn!(account, error = %e, "Keychain write failed, keeping value in memory");
        } else {
            debug!(account, "Stored in keychain");
        }
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(account, Some(value));
    }
}

impl CredentialStore for KeychainCredentialStore {
    fn password(&self) -> Option<String> {
        self.get(TOKEN_ACCOUNT)
    }

    fn set_password(&self, password: String) {
        self.set(TOKEN_ACCOUNT, password);
    }

    fn username(&self) -> Option<String> {
        self.get(USERNAME_ACCOUNT)
    }

    fn set_username(&self, username: String) {
        self.set(USERNAME_ACCOUNT, username);
    }

    fn connection_data(&self) -> ConnectionConfig {
        self.connection
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_connection_data(&self, config: ConnectionConfig) {
        *self
            .connection
            .write()
            .unwrap_or_else(PoisonError::into_inner) = config;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn use_mock_keychain() {
        keyring::set_default_credential_builder(keyring::mock::default_credential_builder());
    }

    #[test]
    fn test_set_then_read_uses_cache() {
        use_mock_keychain();
        let store = KeychainCredentialStore::with_service("wdcbridge-test-cache");

        store.set_password(r#"{"access_token":"ya29"}"#.to_string());
        store.set_username("p1".to_string());

        let credential = store.credential().unwrap();
        assert_eq!(credential.token, r#"{"access_token":"ya29"}"#);
        assert_eq!(credential.username.as_deref(), Some("p1"));
    }

    #[test]
    fn test_clear_removes_credential() {
        use_mock_keychain();
        let store = KeychainCredentialStore::with_service("wdcbridge-test-clear");
        store.set_password("tok123".to_string());

        store.clear().unwrap();

        assert!(store.credential().is_none());
        assert_eq!(store.username(), None);
    }

    #[test]
    fn test_connection_data_stays_in_memory() {
        use_mock_keychain();
        let store = KeychainCredentialStore::with_service("wdcbridge-test-connection");
        assert_eq!(store.connection_data().report(), None);

        store.set_connection_data(ConnectionConfig::for_report("r1"));
        assert_eq!(store.connection_data().report(), Some("r1"));
    }
}
