//! Admin and student projections of the remote listing.

use std::collections::HashSet;

use notevault_core::config::vault::{ViewMode, default_excluded_names};
use notevault_core::traits::ListingNode;
use notevault_core::types::RootPrefix;
use notevault_core::types::path;

/// Which listing entries are never shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionRules {
    excluded_names: HashSet<String>,
}

impl ProjectionRules {
    /// Rules excluding the given entry names.
    pub fn new<I, S>(excluded_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded_names: excluded_names.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `name` is hidden in every projection.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded_names.contains(name)
    }
}

impl Default for ProjectionRules {
    fn default() -> Self {
        Self::new(default_excluded_names())
    }
}

/// Project `listing` for `view`.
pub fn project(listing: &[ListingNode], view: ViewMode, rules: &ProjectionRules) -> Vec<ListingNode> {
    match view {
        ViewMode::Admin => admin_view(listing, rules),
        ViewMode::Student => student_view(listing, rules),
    }
}

/// Everything except excluded names, in source order.
pub fn admin_view(listing: &[ListingNode], rules: &ProjectionRules) -> Vec<ListingNode> {
    listing
        .iter()
        .filter(|entry| !rules.is_excluded(&entry.name))
        .map(|entry| {
            let mut kept = entry.clone();
            if entry.folder {
                kept.children = admin_view(&entry.children, rules);
            }
            kept
        })
        .collect()
}

/// Published files only; a folder survives only if something inside it does.
pub fn student_view(listing: &[ListingNode], rules: &ProjectionRules) -> Vec<ListingNode> {
    listing
        .iter()
        .filter(|entry| !rules.is_excluded(&entry.name))
        .filter_map(|entry| {
            if entry.folder {
                let children = student_view(&entry.children, rules);
                if children.is_empty() {
                    return None;
                }
                let mut kept = entry.clone();
                kept.children = children;
                Some(kept)
            } else if entry.is_published() {
                Some(entry.clone())
            } else {
                None
            }
        })
        .collect()
}

/// Root-relative paths of every published file, in listing order.
pub fn published_paths(listing: &[ListingNode], root: &RootPrefix) -> Vec<String> {
    let mut paths = Vec::new();
    collect_published(listing, root, &mut paths);
    paths
}

fn collect_published(listing: &[ListingNode], root: &RootPrefix, out: &mut Vec<String>) {
    for entry in listing {
        if entry.folder {
            collect_published(&entry.children, root, out);
        } else if entry.is_published() {
            out.push(path::to_relative(&entry.path, root));
        }
    }
}
