//! Shared vault state and completion-ordering bookkeeping.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use notevault_core::config::vault::ViewMode;
use notevault_entity::FolderNode;

use crate::document::Session;

/// State shared by all services behind one lock.
pub type SharedState = Arc<RwLock<VaultState>>;

/// Sequence number taken when a listing fetch is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ListingTicket(u64);

/// Sequence number taken when a file is selected for opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SelectionTicket(u64);

/// Sequence number taken when a save is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SaveTicket(u64);

/// The local tree, the open tabs, and what is in flight.
#[derive(Debug, Clone, Default)]
pub struct VaultState {
    /// Current tree.
    pub tree: FolderNode,
    /// Open tabs and the active buffer.
    pub session: Session,
    /// Projection applied on refresh.
    pub view: ViewMode,
    /// When a listing was last applied.
    pub last_refreshed_at: Option<DateTime<Utc>>,
    listing_issued: u64,
    listing_applied: u64,
    selection: u64,
    save_counter: u64,
    latest_saves: HashMap<String, u64>,
}

impl VaultState {
    /// Empty tree, nothing open, showing `view`.
    pub fn new(view: ViewMode) -> Self {
        Self {
            tree: FolderNode::root(),
            view,
            ..Self::default()
        }
    }

    /// Start from an existing tree (inline content, no remote listing yet).
    pub fn with_tree(view: ViewMode, tree: FolderNode) -> Self {
        Self {
            tree,
            ..Self::new(view)
        }
    }

    /// Take the ticket for a new listing fetch.
    pub fn issue_listing_ticket(&mut self) -> ListingTicket {
        self.listing_issued += 1;
        ListingTicket(self.listing_issued)
    }

    /// Swap in a tree built from a listing.
    ///
    /// Returns `false` (and keeps the current tree) when a newer listing or
    /// a local edit has already been applied.
    pub fn apply_listing(&mut self, ticket: ListingTicket, tree: FolderNode) -> bool {
        if ticket.0 <= self.listing_applied {
            return false;
        }
        self.listing_applied = ticket.0;
        self.tree = tree;
        self.last_refreshed_at = Some(Utc::now());
        true
    }

    /// Swap in a locally edited tree.
    ///
    /// Listings issued before this point describe the remote before the edit
    /// and are discarded when they complete.
    pub fn commit_local(&mut self, tree: FolderNode) {
        self.listing_applied = self.listing_issued;
        self.tree = tree;
    }

    /// Take the ticket for a new selection.
    pub fn issue_selection(&mut self) -> SelectionTicket {
        self.selection += 1;
        SelectionTicket(self.selection)
    }

    /// Whether no selection was made after `ticket`.
    pub fn is_current_selection(&self, ticket: SelectionTicket) -> bool {
        ticket.0 == self.selection
    }

    /// Take the ticket for a save of `path`.
    pub fn issue_save(&mut self, file_path: &str) -> SaveTicket {
        self.save_counter += 1;
        self.latest_saves
            .insert(file_path.to_string(), self.save_counter);
        SaveTicket(self.save_counter)
    }

    /// Whether `ticket` is the most recent save issued for `path`.
    pub fn is_latest_save(&self, file_path: &str, ticket: SaveTicket) -> bool {
        self.latest_saves.get(file_path) == Some(&ticket.0)
    }

    /// Wrap into the shared handle services hold.
    pub fn shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }
}
