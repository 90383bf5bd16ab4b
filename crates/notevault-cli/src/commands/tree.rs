//! Vault tree CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use notevault_core::error::AppError;
use notevault_core::types::NodeKind;
use notevault_service::{Vault, search};

use crate::output::{self, OutputFormat};

/// Arguments for tree commands
#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Tree subcommand
    #[command(subcommand)]
    pub command: TreeCommand,
}

/// Tree subcommands
#[derive(Debug, Subcommand)]
pub enum TreeCommand {
    /// Print the vault tree
    Show,
    /// Create a note or folder
    Create {
        /// Parent folder path (omit for the vault root)
        #[arg(short, long, default_value = "")]
        parent: String,
        /// Name of the new node
        name: String,
        /// Create a folder instead of a note
        #[arg(long)]
        folder: bool,
    },
    /// Move a node into another folder
    Mv {
        /// Path of the node to move
        path: String,
        /// Destination folder path ("" for the vault root)
        target: String,
    },
    /// Rename a node
    Rename {
        /// Path of the node to rename
        path: String,
        /// New final path segment
        new_name: String,
    },
    /// Delete a note or folder
    Rm {
        /// Path of the node to delete
        path: String,
        /// Delete a folder and everything beneath it
        #[arg(long)]
        folder: bool,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Find nodes by name
    Search {
        /// Case-insensitive search term
        term: String,
    },
}

/// Search result row
#[derive(Debug, Serialize, Tabled)]
struct MatchRow {
    /// Path
    path: String,
    /// Kind
    kind: String,
}

/// Execute tree commands
pub async fn execute(args: &TreeArgs, vault: &Vault, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        TreeCommand::Show => {
            let tree = vault.tree.snapshot().await;
            output::print_tree(&tree, format);
        }
        TreeCommand::Create {
            parent,
            name,
            folder,
        } => {
            let kind = if *folder {
                NodeKind::Folder
            } else {
                NodeKind::File
            };
            let path = vault.tree.create(parent, name, kind).await?;
            output::print_success(&format!("Created {kind} '{path}'"));
        }
        TreeCommand::Mv { path, target } => {
            let new_path = vault.tree.move_node(path, target).await?;
            output::print_success(&format!("Moved '{path}' to '{new_path}'"));
        }
        TreeCommand::Rename { path, new_name } => {
            let new_path = vault.tree.rename(path, new_name).await?;
            output::print_success(&format!("Renamed '{path}' to '{new_path}'"));
        }
        TreeCommand::Rm { path, folder, yes } => {
            let kind = if *folder {
                NodeKind::Folder
            } else {
                NodeKind::File
            };
            let prompt = match kind {
                NodeKind::Folder => format!("Delete folder '{path}' and everything in it?"),
                NodeKind::File => format!("Delete '{path}'?"),
            };
            if !super::confirm(&prompt, *yes)? {
                output::print_warning("Cancelled.");
                return Ok(());
            }
            vault.tree.delete(path, kind).await?;
            output::print_success(&format!("Deleted '{path}'"));
        }
        TreeCommand::Search { term } => {
            let tree = vault.tree.snapshot().await;
            let rows: Vec<MatchRow> = search::search(&tree, term)
                .into_iter()
                .map(|m| MatchRow {
                    path: m.path,
                    kind: m.kind.to_string(),
                })
                .collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
