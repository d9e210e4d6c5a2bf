// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! WDC Bridge CLI - drive the connector lifecycle from a terminal.
//!
//! # Examples
//!
//! ```bash
//! # Print the sign-in URL
//! wdcbridge authorize
//!
//! # Finish sign-in with the URL the provider redirected to
//! wdcbridge login --callback-url 'http://localhost:9001/?code=4/abc'
//!
//! # Inspect a report
//! wdcbridge headers --report r1
//! wdcbridge data --report r1 --format json --pretty
//! ```

mod commands;
mod host;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use wdcbridge_store::{LogLevel, SettingsStore};

use commands::{authorize, config, data, headers, login, logout};

// ============================================================================
// CLI Definition
// ============================================================================

/// WDC Bridge CLI - a terminal host for the reporting connector.
#[derive(Parser)]
#[command(name = "wdcbridge")]
#[command(about = "Terminal host for the WDC Bridge connector")]
#[command(long_about = r"
WDC Bridge connects a BI host to an OAuth-protected reporting backend.
This CLI plays the host: it signs in, lists reports, and pulls schemas
and rows exactly as a BI tool would.

Examples:
  wdcbridge authorize                        # URL to open in a browser
  wdcbridge login --callback-url URL         # Exchange the OAuth code
  wdcbridge headers --report r1              # Column schema
  wdcbridge data --report r1 --format json   # Rows
")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Backend root URL, overriding the settings file.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Print the sign-in URL.
    Authorize,

    /// Run the interactive phase and list available reports.
    #[command(visible_alias = "l")]
    Login(login::LoginArgs),

    /// Fetch the column schema of a report.
    #[command(visible_alias = "h")]
    Headers(headers::HeadersArgs),

    /// Fetch the rows of a report.
    #[command(visible_alias = "d")]
    Data(data::DataArgs),

    /// Forget the stored credential.
    Logout,

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Sign-in is required before this command can run.
    AuthRequired = 2,
}

impl Cli {
    /// Returns true if text output may use ANSI colors.
    pub fn use_colors(&self) -> bool {
        !self.no_color && self.format == OutputFormat::Text
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

/// Filter directives: `--verbose` wins over the configured level.
fn log_directives(verbose: bool, level: LogLevel) -> String {
    if verbose {
        "wdcbridge=debug,info".to_string()
    } else {
        format!("wdcbridge={level}")
    }
}

/// Reads the configured log level. Runs before logging exists, so a bad
/// settings file only surfaces later through `load_settings`.
async fn configured_log_level() -> LogLevel {
    match SettingsStore::load_default().await {
        Ok(store) => store.get().await.log_level,
        Err(_) => LogLevel::default(),
    }
}

fn setup_logging(verbose: bool, quiet: bool, level: LogLevel) {
    if quiet {
        return;
    }

    let filter = EnvFilter::new(log_directives(verbose, level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = configured_log_level().await;
    setup_logging(cli.verbose, cli.quiet, level);

    let result = match &cli.command {
        Commands::Authorize => authorize::run(&cli).await,
        Commands::Login(args) => login::run(args, &cli).await,
        Commands::Headers(args) => headers::run(args, &cli).await,
        Commands::Data(args) => data::run(args, &cli).await,
        Commands::Logout => logout::run(&cli),
        Commands::Config(args) => config::run(args, &cli).await,
    };

    match result {
        Ok(ExitCode::Success) => Ok(()),
        Ok(code) => std::process::exit(code as i32),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e:#}");
            }
            std::process::exit(ExitCode::Error as i32);
        }
    }
}
