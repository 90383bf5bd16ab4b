//! Tree operations confirmed by the remote store.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use notevault_core::error::{AppError, ErrorKind};
use notevault_core::result::AppResult;
use notevault_core::types::NodeKind;
use notevault_core::types::path;
use notevault_entity::FolderNode;
use notevault_entity::tree::{TreeResult, listing, lookup, mutation};

use crate::context::VaultContext;
use crate::publish::projection;

/// Whether a completed refresh replaced the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The listing was the newest and is now the tree.
    Applied,
    /// A newer listing or local edit landed first; the response was dropped.
    Stale,
}

/// Structural edits against the remote store, mirrored into the local tree.
///
/// Every edit is validated against a clone of the local tree before the
/// remote call; a remote failure leaves the local tree as it was (rename
/// is applied optimistically and reverted).
#[derive(Debug, Clone)]
pub struct TreeService {
    ctx: Arc<VaultContext>,
}

impl TreeService {
    /// Creates a new tree service.
    pub fn new(ctx: Arc<VaultContext>) -> Self {
        Self { ctx }
    }

    /// Clone of the current tree.
    pub async fn snapshot(&self) -> FolderNode {
        self.ctx.state.read().await.tree.clone()
    }

    /// Rebuild the tree from a fresh listing.
    pub async fn refresh(&self) -> AppResult<RefreshOutcome> {
        let (ticket, view) = {
            let mut state = self.ctx.state.write().await;
            (state.issue_listing_ticket(), state.view)
        };

        let listed = self.ctx.remote.list().await.map_err(|e| {
            warn!(error = %e, "Listing fetch failed");
            e
        })?;
        let projected = projection::project(&listed, view, &self.ctx.rules);
        let tree = listing::build_tree(&projected, &self.ctx.root);

        let mut state = self.ctx.state.write().await;
        if state.apply_listing(ticket, tree) {
            debug!(nodes = state.tree.descendant_count(), "Listing applied");
            Ok(RefreshOutcome::Applied)
        } else {
            debug!("Discarded stale listing");
            Ok(RefreshOutcome::Stale)
        }
    }

    /// Create a file or folder named `name` inside `parent_path`.
    ///
    /// New files are seeded with a heading and placeholder body. If that
    /// write fails the node still exists and a `Remote` error is returned.
    pub async fn create(&self, parent_path: &str, name: &str, kind: NodeKind) -> AppResult<String> {
        let new_path = {
            let state = self.ctx.state.read().await;
            let mut draft = state.tree.clone();
            add_node(parent_path, name, kind, &mut draft)?
        };

        self.ctx.remote.create(&new_path, kind).await.map_err(|e| {
            error!(path = %new_path, kind = %kind, error = %e, "Remote create failed");
            e
        })?;

        let seeded = match kind {
            NodeKind::File => {
                let content = mutation::default_note_content(name);
                self.ctx.remote.write_content(&new_path, &content).await
            }
            NodeKind::Folder => Ok(()),
        };

        info!(path = %new_path, kind = %kind, "Node created");

        self.refresh_or_apply(|tree| {
            add_node(parent_path, name, kind, tree)?;
            if let Some(file) = lookup::find_file_mut(&path::join(parent_path, name), tree) {
                file.content = None;
            }
            Ok(())
        })
        .await;

        if let Err(e) = seeded {
            error!(path = %new_path, error = %e, "Failed to write initial note content");
            return Err(AppError::with_source(
                ErrorKind::Remote,
                format!("'{new_path}' was created but its initial content was not written"),
                e,
            ));
        }
        Ok(new_path)
    }

    /// Move the node at `node_path` into the folder `target`; returns its new path.
    ///
    /// Once the remote confirms, the tree and open tabs move together.
    pub async fn move_node(&self, node_path: &str, target: &str) -> AppResult<String> {
        let new_path = {
            let state = self.ctx.state.read().await;
            let mut draft = state.tree.clone();
            mutation::move_node(node_path, target, &mut draft)?;
            path::join(target, path::file_name(node_path))
        };
        if new_path == node_path {
            return Ok(new_path);
        }

        self.ctx.remote.move_node(node_path, target).await.map_err(|e| {
            error!(path = %node_path, target = %target, error = %e, "Remote move failed");
            e
        })?;

        {
            let mut state = self.ctx.state.write().await;
            let mut draft = state.tree.clone();
            if mutation::move_node(node_path, target, &mut draft).is_ok() {
                state.commit_local(draft);
            }
            state.session.rebase_paths(node_path, &new_path);
        }
        info!(path = %node_path, target = %target, "Node moved");

        self.refresh_logged().await;
        Ok(new_path)
    }

    /// Rename the node at `node_path`; returns its new path.
    ///
    /// The tree and open tabs change immediately. If the remote rejects the
    /// rename both are put back and the error is returned.
    pub async fn rename(&self, node_path: &str, new_name: &str) -> AppResult<String> {
        let (kind, new_path) = {
            let mut state = self.ctx.state.write().await;
            let kind = lookup::find_node(node_path, &state.tree)
                .map(|node| node.kind())
                .ok_or_else(|| AppError::not_found(format!("no node at '{node_path}'")))?;
            let mut draft = state.tree.clone();
            let new_path = rename_node(node_path, new_name, kind, &mut draft)?;
            if new_path == node_path {
                return Ok(new_path);
            }
            state.commit_local(draft);
            state.session.rebase_paths(node_path, &new_path);
            (kind, new_path)
        };

        match self.ctx.remote.rename(node_path, new_name).await {
            Ok(()) => {
                info!(path = %node_path, target = %new_path, kind = %kind, "Node renamed");
                self.refresh_logged().await;
                Ok(new_path)
            }
            Err(e) => {
                error!(path = %node_path, target = %new_path, error = %e, "Remote rename failed, reverting");
                {
                    let mut state = self.ctx.state.write().await;
                    let mut draft = state.tree.clone();
                    if rename_node(&new_path, path::file_name(node_path), kind, &mut draft).is_ok() {
                        state.commit_local(draft);
                    }
                    state.session.rebase_paths(&new_path, node_path);
                }
                self.refresh_logged().await;
                Err(e)
            }
        }
    }

    /// Delete the file or folder at `node_path` and close its tabs.
    pub async fn delete(&self, node_path: &str, kind: NodeKind) -> AppResult<()> {
        {
            let state = self.ctx.state.read().await;
            let mut draft = state.tree.clone();
            remove_node(node_path, kind, &mut draft)?;
        }

        self.ctx.remote.delete(node_path).await.map_err(|e| {
            error!(path = %node_path, kind = %kind, error = %e, "Remote delete failed");
            e
        })?;

        {
            let mut state = self.ctx.state.write().await;
            let mut draft = state.tree.clone();
            if remove_node(node_path, kind, &mut draft).is_ok() {
                state.commit_local(draft);
            }
            match kind {
                NodeKind::File => {
                    state.session.close_tab(node_path);
                }
                NodeKind::Folder => {
                    state.session.close_within(node_path);
                }
            }
        }
        info!(path = %node_path, kind = %kind, "Node deleted");

        self.refresh_logged().await;
        Ok(())
    }

    /// Refresh; when the listing cannot be fetched, apply `edit` locally instead.
    async fn refresh_or_apply<F>(&self, edit: F)
    where
        F: FnOnce(&mut FolderNode) -> TreeResult<()>,
    {
        if let Err(e) = self.refresh().await {
            warn!(error = %e, "Refresh after mutation failed, applying edit locally");
            let mut state = self.ctx.state.write().await;
            let mut draft = state.tree.clone();
            if edit(&mut draft).is_ok() {
                state.commit_local(draft);
            }
        }
    }

    async fn refresh_logged(&self) {
        if let Err(e) = self.refresh().await {
            warn!(error = %e, "Refresh after mutation failed");
        }
    }
}

fn add_node(parent_path: &str, name: &str, kind: NodeKind, tree: &mut FolderNode) -> TreeResult<String> {
    match kind {
        NodeKind::File => mutation::add_file(parent_path, name, None, tree),
        NodeKind::Folder => mutation::add_folder(parent_path, name, tree),
    }
}

fn rename_node(node_path: &str, new_name: &str, kind: NodeKind, tree: &mut FolderNode) -> TreeResult<String> {
    match kind {
        NodeKind::File => mutation::rename_file(node_path, new_name, tree),
        NodeKind::Folder => mutation::rename_folder(node_path, new_name, tree),
    }
}

fn remove_node(node_path: &str, kind: NodeKind, tree: &mut FolderNode) -> TreeResult<()> {
    match kind {
        NodeKind::File => mutation::delete_file(node_path, tree),
        NodeKind::Folder => mutation::delete_folder(node_path, tree),
    }
}
