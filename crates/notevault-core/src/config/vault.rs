//! Vault layout and view configuration.

use serde::{Deserialize, Serialize};

use crate::result::AppResult;
use crate::types::path::RootPrefix;

/// Which projection of the remote listing the local tree shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Every node except infrastructure entries; editable.
    #[default]
    Admin,
    /// Published files only, folders pruned when nothing inside is published.
    Student,
}

/// Vault configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Absolute prefix the remote store puts in front of every listed path.
    #[serde(default = "default_root_prefix")]
    pub root_prefix: String,
    /// Projection used when rebuilding the tree from a listing.
    #[serde(default)]
    pub view: ViewMode,
    /// Entry names never shown in either projection.
    #[serde(default = "default_excluded_names")]
    pub excluded_names: Vec<String>,
}

impl VaultConfig {
    /// Parse the configured root prefix.
    pub fn root_prefix(&self) -> AppResult<RootPrefix> {
        RootPrefix::parse(&self.root_prefix)
    }
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            root_prefix: default_root_prefix(),
            view: ViewMode::default(),
            excluded_names: default_excluded_names(),
        }
    }
}

fn default_root_prefix() -> String {
    "/default/note/".to_string()
}

/// Infrastructure entries the note server keeps next to the notes.
pub fn default_excluded_names() -> Vec<String> {
    [".DS_Store", "images", "public"]
        .into_iter()
        .map(String::from)
        .collect()
}
