//! Host preferences.
//!
//! Settings are plain JSON with every field defaulted, so an empty or
//! partial file is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::persistence::{default_settings_path, load_json_or_default, save_json};

/// Backend root used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:9001";

const DEFAULT_ERROR_DISMISS_DELAY_MS: u64 = 2000;

// ============================================================================
// Settings Types
// ============================================================================

/// Host preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root URL of the reporting backend.
    pub base_url: String,

    /// How long an authentication failure message stays up.
    pub error_dismiss_delay_ms: u64,

    /// Per-request timeout. `None` waits indefinitely.
    pub request_timeout_secs: Option<u64>,

    /// Level of the CLI's own log output.
    pub log_level: LogLevel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            error_dismiss_delay_ms: DEFAULT_ERROR_DISMISS_DELAY_MS,
            request_timeout_secs: None,
            log_level: LogLevel::default(),
        }
    }
}

impl Settings {
    /// Returns the failure message dismissal delay.
    pub fn error_dismiss_delay(&self) -> Duration {
        Duration::from_millis(self.error_dismiss_delay_ms)
    }

    /// Returns the request timeout, if one is configured.
    ///
    /// A zero timeout is treated as unset.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Checks that the settings are usable.
    pub fn validate(&self) -> Result<(), StoreError> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(StoreError::Config("base_url is empty".to_string()));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(StoreError::Config(format!(
                "base_url must be an http(s) URL, got {base}"
            )));
        }
        Ok(())
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// Error level logging.
    Error,
    /// Warning level logging.
    #[default]
    Warn,
    /// Info level logging.
    Info,
    /// Debug level logging.
    Debug,
    /// Trace level logging.
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

// ============================================================================
// Settings Store
// ============================================================================

/// Settings bound to a file.
pub struct SettingsStore {
    settings: RwLock<Settings>,
    path: PathBuf,
}

impl SettingsStore {
    /// Creates a store holding defaults for `path`, without reading it.
    pub fn new(path: PathBuf) -> Self {
        Self {
            settings: RwLock::new(Settings::default()),
            path,
        }
    }

    /// Loads settings from the default path.
    ///
    /// # Errors
    ///
    /// Currently infallible; an unreadable file falls back to defaults.
    pub async fn load_default() -> Result<Self, StoreError> {
        Self::load(default_settings_path()).await
    }

    /// Loads settings from a path.
    ///
    /// # Errors
    ///
    /// Currently infallible; an unreadable file falls back to defaults.
    pub async fn load(path: PathBuf) -> Result<Self, StoreError> {
        let settings = if path.exists() {
            info!(path = %path.display(), "Loading settings");
            load_json_or_default(&path).await
        } else {
            debug!(path = %path.display(), "Settings file not found, using defaults");
            Settings::default()
        };

        Ok(Self {
            settings: RwLock::new(settings),
            path,
        })
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets a copy of the current settings.
    pub async fn get(&self) -> Settings {
        self.settings.read().await.clone()
    }

    /// Updates settings in memory.
    pub async fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut Settings),
    {
        let mut settings = self.settings.write().await;
        f(&mut settings);
    }

    /// Saves settings to disk.
    ///
    /// # Errors
    ///
    /// Returns error if the settings are invalid or cannot be written.
    pub async fn save(&self) -> Result<(), StoreError> {
        let settings = self.settings.read().await;
        settings.validate()?;
        save_json(&self.path, &*settings).await?;
        info!(path = %self.path.display(), "Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.base_url, "http://localhost:9001");
        assert_eq!(settings.error_dismiss_delay(), Duration::from_millis(2000));
        assert_eq!(settings.request_timeout(), None);
        assert_eq!(settings.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"base_url": "https://reports.example.com"}"#).unwrap();
        assert_eq!(settings.base_url, "https://reports.example.com");
        assert_eq!(settings.error_dismiss_delay_ms, 2000);
    }

    #[test]
    fn test_zero_timeout_is_unset() {
        let settings = Settings {
            request_timeout_secs: Some(0),
            ..Settings::default()
        };
        assert_eq!(settings.request_timeout(), None);

        let settings = Settings {
            request_timeout_secs: Some(30),
            ..Settings::default()
        };
        assert_eq!(settings.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_validate_rejects_non_http_base() {
        let settings = Settings {
            base_url: "ftp://example.com".to_string(),
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(StoreError::Config(_))));
        assert!(Settings::default().validate().is_ok());
    }
}
