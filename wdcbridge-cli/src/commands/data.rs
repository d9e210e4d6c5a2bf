//! Data command - fetch a report's rows.
//!
//! Drives `table_data` the way a host does: keep calling with the last
//! continuation token until the connector hands back none.

use std::sync::Arc;

use anyhow::{Result, anyhow};
use clap::Args;
use tracing::{debug, warn};
use wdcbridge_core::Row;

use super::headers::gather_connector;
use super::load_settings;
use crate::host::CliHost;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the data command.
#[derive(Args)]
pub struct DataArgs {
    /// Report identifier, as listed by `login`.
    #[arg(long, short)]
    pub report: String,

    /// Resume after this record.
    #[arg(long)]
    pub last_record: Option<String>,
}

/// Runs the data command.
pub async fn run(args: &DataArgs, cli: &Cli) -> Result<ExitCode> {
    let settings = load_settings(cli).await?;
    let host = Arc::new(CliHost::new());

    let Some(connector) = gather_connector(&settings, &args.report, host.clone())? else {
        if !cli.quiet {
            eprintln!("Not signed in. Run `wdcbridge login` first.");
        }
        return Ok(ExitCode::AuthRequired);
    };

    let mut rows: Vec<Row> = Vec::new();
    let mut last_record = args.last_record.clone().filter(|t| !t.is_empty());

    loop {
        let mut page: Option<(Vec<Row>, Option<String>)> = None;
        connector
            .table_data(
                |batch, token| page = Some((batch, token)),
                last_record.as_deref(),
            )
            .await;

        let (batch, token) = page.ok_or_else(|| {
            anyhow!(
                host.first_failure()
                    .unwrap_or_else(|| "Data was not registered".to_string())
            )
        })?;
        debug!(rows = batch.len(), "Page received");
        rows.extend(batch);

        match token.filter(|t| !t.is_empty()) {
            None => break,
            Some(next) if last_record.as_deref() == Some(next.as_str()) => {
                warn!(token = %next, "Continuation token did not advance, stopping");
                break;
            }
            Some(next) => last_record = Some(next),
        }
    }
    connector.teardown(|| debug!("Teardown complete"));

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(cli.use_colors());
            println!("{}", formatter.format_rows(&rows));
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&rows)?);
        }
    }

    Ok(ExitCode::Success)
}
