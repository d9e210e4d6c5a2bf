//! Config command - manage configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use tracing::info;
use wdcbridge_store::{SettingsStore, default_config_dir, default_settings_path};

use crate::output::JsonFormatter;
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration.
    Show,

    /// Show configuration paths.
    Path,

    /// Write a settings file with defaults.
    Init {
        /// Overwrite an existing settings file.
        #[arg(long)]
        force: bool,
    },
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli) -> Result<ExitCode> {
    match &args.action {
        ConfigAction::Show => show_config(cli).await,
        ConfigAction::Path => show_paths(cli),
        ConfigAction::Init { force } => init_config(*force, cli).await,
    }
}

async fn show_config(cli: &Cli) -> Result<ExitCode> {
    let store = SettingsStore::load_default().await?;
    let settings = store.get().await;

    match cli.format {
        OutputFormat::Text => {
            println!("WDC Bridge Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!("Backend URL:         {}", settings.base_url);
            println!("Error dismiss delay: {} ms", settings.error_dismiss_delay_ms);
            match settings.request_timeout() {
                Some(timeout) => println!("Request timeout:     {} s", timeout.as_secs()),
                None => println!("Request timeout:     none"),
            }
            println!("Log level:           {}", settings.log_level);
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&settings)?);
        }
    }

    Ok(ExitCode::Success)
}

fn show_paths(cli: &Cli) -> Result<ExitCode> {
    let config_dir = default_config_dir();
    let settings_path = default_settings_path();

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config dir:    {}", config_dir.display());
            println!("Settings file: {}", settings_path.display());
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "config_dir": config_dir.display().to_string(),
                "settings_file": settings_path.display().to_string(),
            });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }

    Ok(ExitCode::Success)
}

async fn init_config(force: bool, cli: &Cli) -> Result<ExitCode> {
    let path = default_settings_path();

    if path.exists() && !force {
        println!(
            "Settings file already exists: {} (use --force to overwrite)",
            path.display()
        );
        return Ok(ExitCode::Success);
    }

    let store = SettingsStore::new(path.clone());
    if let Some(base_url) = &cli.base_url {
        store.update(|s| s.base_url.clone_from(base_url)).await;
    }
    store.save().await?;

    info!(path = %path.display(), "Settings initialized");
    if !cli.quiet {
        println!("Wrote {}", path.display());
    }

    Ok(ExitCode::Success)
}
