//! Headers command - fetch a report's column schema.

use std::sync::Arc;

use anyhow::{Result, anyhow};
use clap::Args;
use tracing::{debug, warn};
use wdcbridge_connector::Connector;
use wdcbridge_core::{ColumnDescriptor, ConnectionConfig, CredentialStore, Phase, validate_schema};
use wdcbridge_store::{KeychainCredentialStore, Settings};

use super::{build_transport, load_settings};
use crate::host::CliHost;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the headers command.
#[derive(Args)]
pub struct HeadersArgs {
    /// Report identifier, as listed by `login`.
    #[arg(long, short)]
    pub report: String,
}

/// Builds a gather-data connector for `report` on a keychain-backed store.
///
/// Returns `None` when no credential is stored.
pub(crate) fn gather_connector(
    settings: &Settings,
    report: &str,
    host: Arc<CliHost>,
) -> Result<Option<Connector>> {
    let store = Arc::new(KeychainCredentialStore::new());
    if store.credential().is_none() {
        return Ok(None);
    }
    store.set_connection_data(ConnectionConfig::for_report(report));

    let connector = Connector::builder(build_transport(settings)?)
        .store(store)
        .host(host)
        .build();
    connector.setup(Phase::GatherData, || debug!("Gather-data setup complete"));
    Ok(Some(connector))
}

/// Runs the headers command.
pub async fn run(args: &HeadersArgs, cli: &Cli) -> Result<ExitCode> {
    let settings = load_settings(cli).await?;
    let host = Arc::new(CliHost::new());

    let Some(connector) = gather_connector(&settings, &args.report, host.clone())? else {
        if !cli.quiet {
            eprintln!("Not signed in. Run `wdcbridge login` first.");
        }
        return Ok(ExitCode::AuthRequired);
    };

    let mut registered: Option<Vec<ColumnDescriptor>> = None;
    connector
        .column_headers(|headers| registered = Some(headers))
        .await;
    connector.teardown(|| debug!("Teardown complete"));

    let headers = registered.ok_or_else(|| {
        anyhow!(
            host.first_failure()
                .unwrap_or_else(|| "Column headers were not registered".to_string())
        )
    })?;

    if let Err(e) = validate_schema(&headers) {
        warn!(error = %e, "Schema breaks incremental refresh rules");
    }

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(cli.use_colors());
            println!("{}", formatter.format_headers(&headers));
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&headers)?);
        }
    }

    Ok(ExitCode::Success)
}
