//! Remote store contract for the authoritative note server.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;
use crate::types::NodeKind;

/// One entry of the raw remote listing (`GET /files`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingNode {
    /// Display name (final path segment).
    pub name: String,
    /// Path as reported by the server, usually absolute under the root prefix.
    pub path: String,
    /// Whether the entry is a folder.
    #[serde(default)]
    pub folder: bool,
    /// Publish flag; only meaningful on files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish: Option<bool>,
    /// Child entries (empty for files).
    #[serde(default)]
    pub children: Vec<ListingNode>,
}

impl ListingNode {
    /// Build a file entry.
    pub fn file(name: impl Into<String>, path: impl Into<String>, publish: bool) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            folder: false,
            publish: Some(publish),
            children: Vec::new(),
        }
    }

    /// Build a folder entry.
    pub fn folder(
        name: impl Into<String>,
        path: impl Into<String>,
        children: Vec<ListingNode>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            folder: true,
            publish: None,
            children,
        }
    }

    /// Whether this entry is a file flagged as published.
    pub fn is_published(&self) -> bool {
        !self.folder && self.publish == Some(true)
    }
}

/// An image to store next to the notes.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Original file name, used as the multipart file name.
    pub file_name: String,
    /// MIME type of the payload (e.g. `image/png`).
    pub mime_type: String,
    /// Raw image bytes.
    pub data: Bytes,
}

/// Trait for the authoritative note store.
///
/// Every path argument is root-relative. Implementations exist for the
/// HTTP note server and for an in-memory store; both live in
/// `notevault-remote`.
#[async_trait]
pub trait RemoteStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the store type name (e.g., "http", "memory").
    fn store_type(&self) -> &str;

    /// Fetch the full listing.
    async fn list(&self) -> AppResult<Vec<ListingNode>>;

    /// Create a file or folder at `path`.
    async fn create(&self, path: &str, kind: NodeKind) -> AppResult<()>;

    /// Move the node at `path` into the folder `to`.
    async fn move_node(&self, path: &str, to: &str) -> AppResult<()>;

    /// Replace the final segment of `path` with `new_name`.
    async fn rename(&self, path: &str, new_name: &str) -> AppResult<()>;

    /// Delete a file, or a folder with everything beneath it.
    async fn delete(&self, path: &str) -> AppResult<()>;

    /// Read the full content of a file.
    async fn read_content(&self, path: &str) -> AppResult<String>;

    /// Overwrite the full content of a file.
    async fn write_content(&self, path: &str, content: &str) -> AppResult<()>;

    /// Set the publish flag on every listed file.
    async fn publish(&self, paths: &[String]) -> AppResult<()>;

    /// Clear the publish flag on every listed file.
    async fn unpublish(&self, paths: &[String]) -> AppResult<()>;

    /// Store images and return the path or URL of each stored image.
    async fn upload_images(&self, images: Vec<ImageUpload>) -> AppResult<Vec<String>>;
}
