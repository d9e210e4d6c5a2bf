// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # WDC Bridge Store
//!
//! Host-side persistence for WDC Bridge.
//!
//! The connector itself never persists anything. Hosts that want state to
//! survive a restart use this crate:
//!
//! - **SettingsStore**: host preferences (backend URL, timeouts) as JSON
//! - **KeychainCredentialStore**: token and profile id in the system keychain
//! - **Persistence**: file I/O helpers for JSON data
//!
//! ## Usage
//!
//! ```ignore
//! use wdcbridge_store::{KeychainCredentialStore, SettingsStore};
//!
//! let settings = SettingsStore::load_default().await?.get().await;
//! let credentials = KeychainCredentialStore::new();
//! ```

pub mod error;
pub mod keychain;
pub mod persistence;
pub mod settings_store;

pub use error::StoreError;
pub use keychain::{KeychainCredentialStore, SERVICE_NAME};
pub use persistence::{
    default_config_dir, default_settings_path, load_json, load_json_or_default, save_json,
};
pub use settings_store::{DEFAULT_BASE_URL, LogLevel, Settings, SettingsStore};
