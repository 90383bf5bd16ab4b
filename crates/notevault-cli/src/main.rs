//! NoteVault CLI entry point.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use notevault_core::config::AppConfig;
use notevault_core::config::logging::LoggingConfig;
use notevault_core::config::vault::ViewMode;
use notevault_core::error::AppError;
use notevault_remote::HttpRemoteStore;
use notevault_service::{Vault, VaultContext};

mod commands;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match AppConfig::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };
    if cli.student {
        config.vault.view = ViewMode::Student;
    }

    init_logging(&config.logging);

    let result = match build_vault(&config) {
        Ok(vault) => cli.execute(&vault).await,
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        tracing::error!(error = %e, "Command failed");
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

/// Wire the HTTP remote store into the vault services.
fn build_vault(config: &AppConfig) -> Result<Vault, AppError> {
    let remote = HttpRemoteStore::new(&config.remote)?;
    tracing::debug!(base_url = %config.remote.base_url, "Remote store configured");
    let context = VaultContext::from_config(Arc::new(remote), config)?;
    Ok(Vault::new(context))
}
