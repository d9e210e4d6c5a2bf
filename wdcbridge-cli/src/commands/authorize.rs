//! Authorize command - print the sign-in URL.

use anyhow::Result;
use wdcbridge_fetch::{Endpoint, Transport};

use super::{build_transport, load_settings};
use crate::output::JsonFormatter;
use crate::{Cli, ExitCode, OutputFormat};

/// Runs the authorize command.
pub async fn run(cli: &Cli) -> Result<ExitCode> {
    let settings = load_settings(cli).await?;
    let transport = build_transport(&settings)?;
    let url = transport.endpoint_url(Endpoint::Authorize);

    match cli.format {
        OutputFormat::Text => {
            if !cli.quiet {
                println!("Open this URL in a browser to sign in:");
            }
            println!("{url}");
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&serde_json::json!({ "authorizeUrl": url }))?);
        }
    }

    Ok(ExitCode::Success)
}
