//! CLI command implementations.

pub mod authorize;
pub mod config;
pub mod data;
pub mod headers;
pub mod login;
pub mod logout;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;
use wdcbridge_fetch::HttpTransport;
use wdcbridge_store::{Settings, SettingsStore};

use crate::Cli;

/// Loads settings, applying the `--base-url` override.
pub(crate) async fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = SettingsStore::load_default().await?.get().await;
    if let Some(base_url) = &cli.base_url {
        settings.base_url.clone_from(base_url);
    }
    settings.validate()?;
    debug!(base_url = %settings.base_url, "Settings loaded");
    Ok(settings)
}

/// Builds the backend transport from settings.
pub(crate) fn build_transport(settings: &Settings) -> Result<Arc<HttpTransport>> {
    let transport = HttpTransport::builder(settings.base_url.clone())
        .maybe_timeout(settings.request_timeout())
        .build()
        .with_context(|| format!("Invalid backend URL: {}", settings.base_url))?;
    Ok(Arc::new(transport))
}
