//! Vault node entities.

pub mod model;

pub use model::{FileNode, FolderNode, Node};
