//! # notevault-entity
//!
//! Domain model for NoteVault: the file/folder node tree, open-file
//! records, and the pure algorithms that look up and restructure the tree.

pub mod document;
pub mod node;
pub mod tree;

pub use document::OpenFile;
pub use node::{FileNode, FolderNode, Node};
pub use tree::{TreeError, TreeResult};
