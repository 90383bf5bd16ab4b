//! File and folder node model.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use notevault_core::types::NodeKind;
use notevault_core::types::path;

/// A note file in the vault tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    /// Node identifier, derived from the path.
    pub id: String,
    /// File name (final path segment).
    pub name: String,
    /// Root-relative path.
    pub path: String,
    /// Inline content. `None` when content is fetched from the remote on open.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl FileNode {
    /// Create a file node at `path`.
    pub fn new(name: impl Into<String>, path: impl Into<String>, content: Option<String>) -> Self {
        let path = path.into();
        Self {
            id: path.clone(),
            name: name.into(),
            path,
            content,
        }
    }
}

/// A folder in the vault tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderNode {
    /// Node identifier, derived from the path.
    pub id: String,
    /// Folder name (final path segment).
    pub name: String,
    /// Root-relative path (`""` for the vault root).
    pub path: String,
    /// Children, folders first then by name.
    #[serde(default)]
    pub children: Vec<Node>,
}

impl FolderNode {
    /// Create an empty folder at `path`.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            id: path.clone(),
            name: name.into(),
            path,
            children: Vec::new(),
        }
    }

    /// Create the vault root.
    pub fn root() -> Self {
        Self::new("root", "")
    }

    /// Builder-style helper attaching children.
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Check if this is the vault root.
    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Total number of nodes beneath this folder.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| match child {
                Node::File(_) => 1,
                Node::Folder(folder) => 1 + folder.descendant_count(),
            })
            .sum()
    }
}

impl Default for FolderNode {
    fn default() -> Self {
        Self::root()
    }
}

/// A node in the vault tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    /// A note file.
    File(FileNode),
    /// A folder.
    Folder(FolderNode),
}

impl Node {
    /// Node identifier.
    pub fn id(&self) -> &str {
        match self {
            Self::File(file) => &file.id,
            Self::Folder(folder) => &folder.id,
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        match self {
            Self::File(file) => &file.name,
            Self::Folder(folder) => &folder.name,
        }
    }

    /// Root-relative path.
    pub fn path(&self) -> &str {
        match self {
            Self::File(file) => &file.path,
            Self::Folder(folder) => &folder.path,
        }
    }

    /// File or folder.
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::File(_) => NodeKind::File,
            Self::Folder(_) => NodeKind::Folder,
        }
    }

    /// Borrow as a folder if it is one.
    pub fn as_folder(&self) -> Option<&FolderNode> {
        match self {
            Self::File(_) => None,
            Self::Folder(folder) => Some(folder),
        }
    }

    /// Borrow as a file if it is one.
    pub fn as_file(&self) -> Option<&FileNode> {
        match self {
            Self::File(file) => Some(file),
            Self::Folder(_) => None,
        }
    }

    /// Point this node (and every descendant) at `new_path`.
    ///
    /// The node's name becomes the final segment of `new_path`; each
    /// descendant keeps its own name and is re-rooted beneath it.
    pub fn relocate(&mut self, new_path: &str) {
        let name = path::file_name(new_path).to_string();
        match self {
            Self::File(file) => {
                file.name = name;
                file.path = new_path.to_string();
                file.id = new_path.to_string();
            }
            Self::Folder(folder) => {
                folder.name = name;
                folder.path = new_path.to_string();
                folder.id = new_path.to_string();
                for child in &mut folder.children {
                    let child_path = path::join(new_path, child.name());
                    child.relocate(&child_path);
                }
            }
        }
    }

    /// Sibling ordering: folders before files, then lexicographic by name.
    pub fn sibling_order(&self, other: &Self) -> Ordering {
        fn rank(node: &Node) -> u8 {
            match node {
                Node::Folder(_) => 0,
                Node::File(_) => 1,
            }
        }
        rank(self)
            .cmp(&rank(other))
            .then_with(|| self.name().cmp(other.name()))
    }
}
