//! Login command - run the interactive phase.
//!
//! Without `--callback-url` the command resumes a stored credential, or
//! prints the sign-in URL when there is none. After signing in, the
//! provider redirects the browser to the connector page with a `code`;
//! pasting that URL into `--callback-url` completes the exchange.

use std::sync::Arc;

use anyhow::{Result, bail};
use clap::Args;
use serde::Serialize;
use tracing::debug;
use wdcbridge_connector::{AUTH_ERROR_MESSAGE, AuthState, BLANK_PAGE, Connector};
use wdcbridge_core::{Phase, ReportItem};
use wdcbridge_store::KeychainCredentialStore;

use super::{build_transport, load_settings};
use crate::host::{TerminalBrowser, TerminalUi};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// URL the OAuth provider redirected to, including its `code`.
    #[arg(long)]
    pub callback_url: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginOutput<'a> {
    state: AuthState,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    reports: Vec<ReportItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    authorize_url: Option<&'a str>,
}

/// Runs the login command.
pub async fn run(args: &LoginArgs, cli: &Cli) -> Result<ExitCode> {
    let settings = load_settings(cli).await?;
    let transport = build_transport(&settings)?;

    let ui = Arc::new(TerminalUi::new(cli.quiet || cli.format == OutputFormat::Json));
    let browser = Arc::new(TerminalBrowser::new(
        args.callback_url.as_deref().unwrap_or(BLANK_PAGE),
    ));

    let connector = Connector::builder(transport)
        .store(Arc::new(KeychainCredentialStore::new()))
        .ui(ui.clone())
        .browser(browser.clone())
        .error_dismiss_delay(settings.error_dismiss_delay())
        .build();

    connector.setup(Phase::Interactive, || debug!("Interactive setup complete"));
    let state = connector
        .wait_for_auth()
        .await
        .unwrap_or_else(|| connector.auth_state());

    let form = ui.form();
    let authorize_url = if state == AuthState::AwaitingUserSignIn {
        // The terminal stands in for the user clicking "sign in".
        if let Some(handler) = ui.sign_in_handler() {
            handler.activate();
        }
        browser.navigations().pop()
    } else {
        None
    };

    if !state.is_settled() {
        bail!("Authentication did not finish (state: {state})");
    }
    if state == AuthState::Failed {
        bail!(AUTH_ERROR_MESSAGE);
    }

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(cli.use_colors());
            if let Some(url) = &authorize_url {
                println!("{}", formatter.format_sign_in(url));
            } else {
                println!(
                    "{}",
                    formatter.format_reports(form.profile_id.as_deref(), &form.reports)
                );
            }
        }
        OutputFormat::Json => {
            let output = LoginOutput {
                state,
                profile_id: form.profile_id.as_deref(),
                reports: form.reports.clone(),
                authorize_url: authorize_url.as_deref(),
            };
            println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
        }
    }

    if state == AuthState::Ready {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::AuthRequired)
    }
}
