//! Note content CLI commands.

use std::path::Path;

use bytes::Bytes;
use clap::{Args, Subcommand};

use notevault_core::error::AppError;
use notevault_core::traits::ImageUpload;
use notevault_service::{SaveOutcome, Vault};

use crate::output;

/// Arguments for note commands
#[derive(Debug, Args)]
pub struct NoteArgs {
    /// Note subcommand
    #[command(subcommand)]
    pub command: NoteCommand,
}

/// Note subcommands
#[derive(Debug, Subcommand)]
pub enum NoteCommand {
    /// Print a note
    Cat {
        /// Note path
        path: String,
    },
    /// Replace a note's content
    Write {
        /// Note path
        path: String,
        /// New content
        #[arg(short, long, conflicts_with = "from_file")]
        content: Option<String>,
        /// Read the new content from a local file
        #[arg(long)]
        from_file: Option<String>,
    },
    /// Upload images and reference them at the end of a note
    Images {
        /// Note path
        path: String,
        /// Local image files
        #[arg(required = true)]
        files: Vec<String>,
    },
}

/// Execute note commands
pub async fn execute(args: &NoteArgs, vault: &Vault) -> Result<(), AppError> {
    match &args.command {
        NoteCommand::Cat { path } => {
            let content = vault.documents.read(path).await?;
            output::print_text(&content);
        }
        NoteCommand::Write {
            path,
            content,
            from_file,
        } => {
            let content = match (content, from_file) {
                (Some(content), _) => content.clone(),
                (None, Some(file)) => tokio::fs::read_to_string(file).await?,
                (None, None) => {
                    return Err(AppError::validation("pass --content or --from-file"));
                }
            };
            vault.documents.open(path).await?;
            vault.documents.change_content(content).await?;
            report_save(path, vault.documents.save_path(path).await?);
        }
        NoteCommand::Images { path, files } => {
            let mut uploads = Vec::with_capacity(files.len());
            for file in files {
                uploads.push(read_image(file).await?);
            }
            vault.documents.open(path).await?;
            let stored = vault.documents.insert_images(uploads).await?;
            report_save(path, vault.documents.save_path(path).await?);
            for location in stored {
                output::print_text(&location);
            }
        }
    }

    Ok(())
}

fn report_save(path: &str, outcome: SaveOutcome) {
    match outcome {
        SaveOutcome::Saved => output::print_success(&format!("Saved '{path}'")),
        SaveOutcome::Superseded => {
            output::print_warning(&format!("A newer save of '{path}' took precedence"))
        }
    }
}

async fn read_image(file: &str) -> Result<ImageUpload, AppError> {
    let data = tokio::fs::read(file).await?;
    let local = Path::new(file);
    let file_name = local
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| AppError::validation(format!("'{file}' has no file name")))?
        .to_string();
    let mime_type = match local.extension().and_then(|ext| ext.to_str()) {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    };
    Ok(ImageUpload {
        file_name,
        mime_type: mime_type.to_string(),
        data: Bytes::from(data),
    })
}
