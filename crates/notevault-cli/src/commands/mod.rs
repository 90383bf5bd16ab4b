//! CLI command definitions and dispatch.

pub mod note;
pub mod publish;
pub mod tree;

use clap::{Parser, Subcommand};

use notevault_core::error::AppError;
use notevault_service::Vault;

use crate::output::OutputFormat;

/// NoteVault: markdown note vault client
#[derive(Debug, Parser)]
#[command(name = "notevault", version, about, long_about = None)]
pub struct Cli {
    /// Path to an additional configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Show the student (published-only) view
    #[arg(long)]
    pub student: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Browse and restructure the vault tree
    Tree(tree::TreeArgs),
    /// Read and edit notes
    Note(note::NoteArgs),
    /// Manage published notes
    Publish(publish::PublishArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, vault: &Vault) -> Result<(), AppError> {
        vault.tree.refresh().await?;
        match &self.command {
            Commands::Tree(args) => tree::execute(args, vault, self.format).await,
            Commands::Note(args) => note::execute(args, vault).await,
            Commands::Publish(args) => publish::execute(args, vault, self.format).await,
        }
    }
}

/// Ask before a destructive action unless `assume_yes` is set.
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool, AppError> {
    if assume_yes {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}
