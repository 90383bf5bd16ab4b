//! Publish management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use notevault_core::error::AppError;
use notevault_service::Vault;

use crate::output::{self, OutputFormat};

/// Arguments for publish commands
#[derive(Debug, Args)]
pub struct PublishArgs {
    /// Publish subcommand
    #[command(subcommand)]
    pub command: PublishCommand,
}

/// Publish subcommands
#[derive(Debug, Subcommand)]
pub enum PublishCommand {
    /// List published notes
    List,
    /// Publish notes
    Add {
        /// Note paths
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Unpublish notes
    Remove {
        /// Note paths
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Make exactly the given notes published
    Deploy {
        /// Note paths to leave published
        paths: Vec<String>,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Print the public page URL of a note
    Url {
        /// Note path
        path: String,
    },
}

/// Published note row
#[derive(Debug, Serialize, Tabled)]
struct PublishedRow {
    /// Path
    path: String,
    /// Change
    change: String,
}

/// Execute publish commands
pub async fn execute(args: &PublishArgs, vault: &Vault, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        PublishCommand::List => {
            let rows: Vec<PublishedRow> = vault
                .publish
                .published_files()
                .await?
                .into_iter()
                .map(|path| PublishedRow {
                    path,
                    change: "published".to_string(),
                })
                .collect();
            output::print_list(&rows, format);
        }
        PublishCommand::Add { paths } => {
            vault.publish.publish(paths).await?;
            output::print_success(&format!("Published {} note(s)", paths.len()));
        }
        PublishCommand::Remove { paths } => {
            vault.publish.unpublish(paths).await?;
            output::print_success(&format!("Unpublished {} note(s)", paths.len()));
        }
        PublishCommand::Deploy { paths, yes } => {
            let prompt = format!("Unpublish every note except the {} given?", paths.len());
            if !super::confirm(&prompt, *yes)? {
                output::print_warning("Cancelled.");
                return Ok(());
            }
            let plan = vault.publish.deploy(paths).await?;
            let rows: Vec<PublishedRow> = plan
                .to_publish
                .into_iter()
                .map(|path| PublishedRow {
                    path,
                    change: "published".to_string(),
                })
                .chain(plan.to_unpublish.into_iter().map(|path| PublishedRow {
                    path,
                    change: "unpublished".to_string(),
                }))
                .collect();
            output::print_list(&rows, format);
        }
        PublishCommand::Url { path } => {
            output::print_text(&vault.publish.page_url(path)?);
        }
    }

    Ok(())
}
