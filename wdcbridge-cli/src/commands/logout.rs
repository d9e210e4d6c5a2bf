//! Logout command - forget the stored credential.

use anyhow::Result;
use tracing::info;
use wdcbridge_store::KeychainCredentialStore;

use crate::{Cli, ExitCode};

/// Runs the logout command.
pub fn run(cli: &Cli) -> Result<ExitCode> {
    let store = KeychainCredentialStore::new();
    store.clear()?;

    info!(service = %store.service(), "Credential removed");
    if !cli.quiet {
        println!("Signed out");
    }

    Ok(ExitCode::Success)
}
