//! Settings file I/O.
//!
//! The settings file names the backend a connector talks to. It is written
//! through a temp file that is owner-only from the moment it exists, then
//! renamed into place.

use serde::{Serialize, de::DeserializeOwned};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::error::StoreError;

/// Mode of the settings file.
#[cfg(unix)]
const FILE_MODE: u32 = 0o600;

/// Mode of a config directory the store creates.
#[cfg(unix)]
const DIR_MODE: u32 = 0o700;

// ============================================================================
// Default Paths
// ============================================================================

/// Returns the default configuration directory.
///
/// - macOS: `~/Library/Application Support/WDCBridge`
/// - elsewhere: the platform config dir joined with `wdcbridge`
pub fn default_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    let dir = dirs::home_dir().map(|h| h.join("Library/Application Support/WDCBridge"));

    #[cfg(not(target_os = "macos"))]
    let dir = dirs::config_dir().map(|c| c.join("wdcbridge"));

    dir.unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the default settings file path.
pub fn default_settings_path() -> PathBuf {
    default_config_dir().join("settings.json")
}

// ============================================================================
// Writing
// ============================================================================

/// Creates the parent directory of `path` if missing, owner-only.
async fn create_parent(path: &Path) -> Result<(), StoreError> {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    if parent.exists() {
        return Ok(());
    }

    debug!(path = %parent.display(), "Creating config directory");
    tokio::fs::create_dir_all(parent).await?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(parent, std::fs::Permissions::from_mode(DIR_MODE)).await?;
    }
    Ok(())
}

async fn write_private(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(FILE_MODE);

    let mut file = options.open(path).await?;
    file.write_all(contents).await?;
    file.sync_all().await?;
    Ok(())
}

/// Serializes `data` as pretty JSON and replaces the file at `path`.
pub async fn save_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(data)?;
    create_parent(path).await?;

    let temp_path = path.with_extension("json.tmp");
    if let Err(e) = write_private(&temp_path, json.as_bytes()).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(e);
    }
    tokio::fs::rename(&temp_path, path).await?;

    debug!(path = %path.display(), bytes = json.len(), "Saved");
    Ok(())
}

// ============================================================================
// Reading
// ============================================================================

/// Loads and decodes a JSON file.
pub async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

/// Loads a JSON file, falling back to `T::default()`.
///
/// A missing file is silent; an unreadable or corrupt one is logged.
pub async fn load_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match load_json(path).await {
        Ok(data) => data,
        Err(e) if e.is_not_found() => T::default(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Ignoring unreadable file, using defaults");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_path() {
        let path = default_settings_path();
        assert!(path.ends_with("settings.json"));
        assert!(!default_config_dir().as_os_str().is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_saved_file_and_new_dir_are_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path().join("wdcbridge");
        let path = dir.join("settings.json");

        save_json(&path, &serde_json::json!({"base_url": "http://localhost:9001"}))
            .await
            .unwrap();

        let mode = |p: &Path| std::fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&path), FILE_MODE);
        assert_eq!(mode(&dir), DIR_MODE);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_overwrite_tightens_existing_file() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "{}").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        save_json(&path, &serde_json::json!({"log_level": "debug"}))
            .await
            .unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, FILE_MODE);
    }
}
