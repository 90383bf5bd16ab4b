//! Opening, editing, and saving notes.

use std::sync::Arc;

use tracing::{debug, info, warn};

use notevault_core::error::AppError;
use notevault_core::result::AppResult;
use notevault_core::traits::ImageUpload;
use notevault_entity::tree::{lookup, mutation};

use crate::context::VaultContext;

/// How an open request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// The file is now the active tab.
    Opened,
    /// Another selection was made, or the file left the tree, while the
    /// content was loading.
    Discarded,
}

/// How a save request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The content was written and is the latest save for the file.
    Saved,
    /// A later save of the same file was issued meanwhile.
    Superseded,
}

/// Tabs and buffer edits backed by remote content reads and writes.
#[derive(Debug, Clone)]
pub struct DocumentService {
    ctx: Arc<VaultContext>,
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(ctx: Arc<VaultContext>) -> Self {
        Self { ctx }
    }

    /// Open the file at `file_path` and make it the active tab.
    ///
    /// Inline tree content is used directly. Otherwise the content is read
    /// from the remote; an already-open dirty tab keeps its buffer and a
    /// clean one is refreshed.
    pub async fn open(&self, file_path: &str) -> AppResult<OpenOutcome> {
        let (ticket, was_open) = {
            let mut state = self.ctx.state.write().await;
            if lookup::find_file(file_path, &state.tree).is_none() {
                return Err(AppError::not_found(format!("no file at '{file_path}'")));
            }
            let ticket = state.issue_selection();

            if let Some(inline) = lookup::file_content(file_path, &state.tree).map(String::from) {
                state.session.open(file_path, inline);
                debug!(path = %file_path, "Opened from inline content");
                return Ok(OpenOutcome::Opened);
            }

            let dirty = state.session.tab(file_path).map(|tab| tab.dirty);
            match dirty {
                Some(true) => {
                    state.session.activate(file_path);
                    return Ok(OpenOutcome::Opened);
                }
                Some(false) => {
                    state.session.activate(file_path);
                    (ticket, true)
                }
                None => (ticket, false),
            }
        };

        let fetched = self.ctx.remote.read_content(file_path).await;
        let content = match fetched {
            Ok(content) => content,
            Err(e) if was_open => {
                warn!(path = %file_path, error = %e, "Content refresh failed, using cached tab");
                return Ok(OpenOutcome::Opened);
            }
            Err(e) => {
                warn!(path = %file_path, error = %e, "Content fetch failed");
                return Err(e);
            }
        };

        let mut state = self.ctx.state.write().await;
        let still_in_tree = lookup::find_file(file_path, &state.tree).is_some();
        if !state.is_current_selection(ticket) {
            if !was_open && still_in_tree {
                state.session.add_inactive(file_path, content);
            }
            debug!(path = %file_path, "Discarded stale content response");
            return Ok(OpenOutcome::Discarded);
        }
        // Deleted, renamed, or moved while the read was in flight.
        if !still_in_tree {
            debug!(path = %file_path, "Discarded content for a path no longer in the tree");
            return Ok(OpenOutcome::Discarded);
        }

        if was_open {
            if state.session.is_active(file_path) {
                state.session.refresh_content(file_path, content);
            }
        } else {
            state.session.open(file_path, content);
        }
        debug!(path = %file_path, "Opened");
        Ok(OpenOutcome::Opened)
    }

    /// Activate an already-open tab without touching the remote.
    pub async fn select(&self, file_path: &str) -> AppResult<()> {
        let mut state = self.ctx.state.write().await;
        if !state.session.activate(file_path) {
            return Err(AppError::not_found(format!("'{file_path}' is not open")));
        }
        state.issue_selection();
        Ok(())
    }

    /// Close the tab for `file_path`.
    pub async fn close(&self, file_path: &str) -> AppResult<()> {
        let mut state = self.ctx.state.write().await;
        if state.session.close_tab(file_path) {
            Ok(())
        } else {
            Err(AppError::not_found(format!("'{file_path}' is not open")))
        }
    }

    /// Replace the active buffer. Nothing is written until [`save`](Self::save).
    pub async fn change_content(&self, content: impl Into<String>) -> AppResult<()> {
        let mut state = self.ctx.state.write().await;
        if state.session.change_content(content.into()) {
            Ok(())
        } else {
            Err(AppError::validation("no file is active"))
        }
    }

    /// Write the active buffer to the remote store.
    pub async fn save(&self) -> AppResult<SaveOutcome> {
        let active = {
            let state = self.ctx.state.read().await;
            state.session.active_file_path().map(String::from)
        };
        match active {
            Some(file_path) => self.save_path(&file_path).await,
            None => Err(AppError::validation("no file is active")),
        }
    }

    /// Write the tab content of `file_path` to the remote store.
    pub async fn save_path(&self, file_path: &str) -> AppResult<SaveOutcome> {
        let (ticket, content) = {
            let mut state = self.ctx.state.write().await;
            let content = state
                .session
                .tab(file_path)
                .map(|tab| tab.content.clone())
                .ok_or_else(|| AppError::not_found(format!("'{file_path}' is not open")))?;
            (state.issue_save(file_path), content)
        };

        self.ctx
            .remote
            .write_content(file_path, &content)
            .await
            .map_err(|e| {
                warn!(path = %file_path, error = %e, "Remote save failed");
                e
            })?;

        let mut state = self.ctx.state.write().await;
        if !state.is_latest_save(file_path, ticket) {
            debug!(path = %file_path, "Save superseded by a later one");
            return Ok(SaveOutcome::Superseded);
        }
        state.session.mark_saved(file_path, &content);
        if lookup::file_content(file_path, &state.tree).is_some() {
            if let Err(e) = mutation::update_file_content(file_path, content.as_str(), &mut state.tree) {
                warn!(path = %file_path, error = %e, "Inline content not updated");
            }
        }
        info!(path = %file_path, bytes = content.len(), "Note saved");
        Ok(SaveOutcome::Saved)
    }

    /// Read the stored content of any file without opening a tab.
    pub async fn read(&self, file_path: &str) -> AppResult<String> {
        {
            let state = self.ctx.state.read().await;
            if let Some(inline) = lookup::file_content(file_path, &state.tree) {
                return Ok(inline.to_string());
            }
        }
        self.ctx.remote.read_content(file_path).await
    }

    /// Upload images and append a markdown reference for each to the
    /// active buffer; returns the stored image locations.
    pub async fn insert_images(&self, uploads: Vec<ImageUpload>) -> AppResult<Vec<String>> {
        let target = {
            let state = self.ctx.state.read().await;
            state
                .session
                .active_file_path()
                .map(String::from)
                .ok_or_else(|| AppError::validation("no file is active"))?
        };
        let names: Vec<String> = uploads.iter().map(|u| u.file_name.clone()).collect();

        let stored = self.ctx.remote.upload_images(uploads).await.map_err(|e| {
            warn!(path = %target, error = %e, "Image upload failed");
            e
        })?;

        let mut state = self.ctx.state.write().await;
        if state.session.is_active(&target) {
            let mut buffer = state.session.file_content().to_string();
            for (name, url) in names.iter().zip(&stored) {
                if !buffer.is_empty() && !buffer.ends_with('\n') {
                    buffer.push('\n');
                }
                buffer.push_str(&image_markdown(name, url));
                buffer.push('\n');
            }
            state.session.change_content(buffer);
        }
        info!(path = %target, count = stored.len(), "Images inserted");
        Ok(stored)
    }

    /// Folder of the active file, if any.
    pub async fn active_directory(&self) -> Option<String> {
        let state = self.ctx.state.read().await;
        state.session.active_directory().map(String::from)
    }
}

/// Markdown image reference for an uploaded file.
pub fn image_markdown(file_name: &str, url: &str) -> String {
    format!("![{file_name}]({url})")
}
