//! Open-file (tab) model.

use serde::{Deserialize, Serialize};

/// A file currently open as an editor tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenFile {
    /// Root-relative path of the underlying file.
    pub path: String,
    /// Client-side copy of the file's buffer.
    pub content: String,
    /// Whether this is the selected tab.
    pub active: bool,
    /// Whether `content` holds edits not yet written to the remote store.
    #[serde(default)]
    pub dirty: bool,
}

impl OpenFile {
    /// Create an inactive, clean tab.
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            active: false,
            dirty: false,
        }
    }
}
