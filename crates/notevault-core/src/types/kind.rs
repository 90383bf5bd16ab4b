//! File/folder discriminant shared by the tree and the remote contract.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of a vault node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A markdown note.
    File,
    /// A folder holding other nodes.
    Folder,
}

impl NodeKind {
    /// Wire name used in the `type` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Folder => "folder",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
