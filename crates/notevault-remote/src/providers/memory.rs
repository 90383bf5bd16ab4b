//! In-memory remote store.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use notevault_core::error::AppError;
use notevault_core::result::AppResult;
use notevault_core::traits::remote::{ImageUpload, ListingNode, RemoteStore};
use notevault_core::types::path;
use notevault_core::types::{NodeKind, RootPrefix};

#[derive(Debug, Clone)]
enum Entry {
    Folder,
    File { content: String, publish: bool },
}

#[derive(Debug, Default)]
struct Inner {
    /// Root-relative path to entry.
    entries: BTreeMap<String, Entry>,
    images: Vec<String>,
}

/// Remote store kept entirely in memory.
///
/// Listings report absolute paths under the configured root prefix, the
/// same shape the note server produces. Clones share state.
#[derive(Debug, Clone)]
pub struct MemoryRemoteStore {
    root: RootPrefix,
    inner: Arc<RwLock<Inner>>,
}

impl MemoryRemoteStore {
    /// Create an empty store listing under `root`.
    pub fn new(root: RootPrefix) -> Self {
        Self {
            root,
            inner: Arc::new(RwLock::new(Inner::default())),
        }
    }

    /// Seed a folder (and any missing ancestors).
    pub fn with_folder(self, folder_path: &str) -> Self {
        if let Ok(mut inner) = self.inner.try_write() {
            insert_with_ancestors(&mut inner.entries, folder_path, Entry::Folder);
        }
        self
    }

    /// Seed a file (and any missing ancestor folders).
    pub fn with_file(self, file_path: &str, content: &str, publish: bool) -> Self {
        if let Ok(mut inner) = self.inner.try_write() {
            let entry = Entry::File {
                content: content.to_string(),
                publish,
            };
            insert_with_ancestors(&mut inner.entries, file_path, entry);
        }
        self
    }

    /// Paths of every image uploaded so far.
    pub async fn images(&self) -> Vec<String> {
        self.inner.read().await.images.clone()
    }

    /// Whether a file or folder exists at `path`.
    pub async fn contains(&self, node_path: &str) -> bool {
        self.inner.read().await.entries.contains_key(node_path)
    }

    /// Stored publish flag of the file at `path`.
    pub async fn is_published(&self, file_path: &str) -> Option<bool> {
        match self.inner.read().await.entries.get(file_path) {
            Some(Entry::File { publish, .. }) => Some(*publish),
            _ => None,
        }
    }

    fn build_listing(&self, entries: &BTreeMap<String, Entry>, parent: &str) -> Vec<ListingNode> {
        let mut folders = Vec::new();
        let mut files = Vec::new();
        for (entry_path, entry) in entries {
            if entry_path.is_empty() || path::parent_of(entry_path) != parent {
                continue;
            }
            let name = path::file_name(entry_path).to_string();
            let absolute = path::to_absolute(entry_path, &self.root);
            match entry {
                Entry::Folder => folders.push(ListingNode::folder(
                    name,
                    absolute,
                    self.build_listing(entries, entry_path),
                )),
                Entry::File { publish, .. } => {
                    files.push(ListingNode::file(name, absolute, *publish))
                }
            }
        }
        folders.extend(files);
        folders
    }
}

fn insert_with_ancestors(entries: &mut BTreeMap<String, Entry>, node_path: &str, entry: Entry) {
    let mut ancestor = path::parent_of(node_path);
    while !ancestor.is_empty() {
        entries
            .entry(ancestor.to_string())
            .or_insert(Entry::Folder);
        ancestor = path::parent_of(ancestor);
    }
    entries.insert(node_path.to_string(), entry);
}

/// Move every entry at or beneath `from` to the same suffix under `to`.
fn rebase_entries(entries: &mut BTreeMap<String, Entry>, from: &str, to: &str) -> AppResult<()> {
    if from == to {
        return Ok(());
    }
    if entries.contains_key(to) {
        return Err(AppError::remote(format!("'{to}' already exists")));
    }
    let moved: Vec<String> = entries
        .keys()
        .filter(|key| path::is_same_or_within(key, from))
        .cloned()
        .collect();
    for old in moved {
        if let (Some(entry), Some(new)) = (entries.remove(&old), path::rebase(&old, from, to)) {
            entries.insert(new, entry);
        }
    }
    Ok(())
}

#[async_trait]
impl RemoteStore for MemoryRemoteStore {
    fn store_type(&self) -> &str {
        "memory"
    }

    async fn list(&self) -> AppResult<Vec<ListingNode>> {
        let inner = self.inner.read().await;
        Ok(self.build_listing(&inner.entries, ""))
    }

    async fn create(&self, node_path: &str, kind: NodeKind) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        let parent = path::parent_of(node_path);
        if !parent.is_empty() && !matches!(inner.entries.get(parent), Some(Entry::Folder)) {
            return Err(AppError::remote(format!("parent '{parent}' does not exist")));
        }
        if inner.entries.contains_key(node_path) {
            return Err(AppError::remote(format!("'{node_path}' already exists")));
        }
        let entry = match kind {
            NodeKind::Folder => Entry::Folder,
            NodeKind::File => Entry::File {
                content: String::new(),
                publish: false,
            },
        };
        inner.entries.insert(node_path.to_string(), entry);
        debug!(path = %node_path, kind = %kind, "Memory store created node");
        Ok(())
    }

    async fn move_node(&self, node_path: &str, to: &str) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        if !inner.entries.contains_key(node_path) {
            return Err(AppError::remote(format!("'{node_path}' does not exist")));
        }
        if !to.is_empty() && !matches!(inner.entries.get(to), Some(Entry::Folder)) {
            return Err(AppError::remote(format!("target '{to}' is not a folder")));
        }
        if path::is_same_or_within(to, node_path) {
            return Err(AppError::remote(format!("cannot move '{node_path}' into '{to}'")));
        }
        let destination = path::join(to, path::file_name(node_path));
        rebase_entries(&mut inner.entries, node_path, &destination)
    }

    async fn rename(&self, node_path: &str, new_name: &str) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        if !inner.entries.contains_key(node_path) {
            return Err(AppError::remote(format!("'{node_path}' does not exist")));
        }
        let destination = path::join(path::parent_of(node_path), new_name);
        rebase_entries(&mut inner.entries, node_path, &destination)
    }

    async fn delete(&self, node_path: &str) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        if !inner.entries.contains_key(node_path) {
            return Err(AppError::remote(format!("'{node_path}' does not exist")));
        }
        inner
            .entries
            .retain(|key, _| !path::is_same_or_within(key, node_path));
        Ok(())
    }

    async fn read_content(&self, file_path: &str) -> AppResult<String> {
        match self.inner.read().await.entries.get(file_path) {
            Some(Entry::File { content, .. }) => Ok(content.clone()),
            _ => Err(AppError::remote(format!("no file at '{file_path}'"))),
        }
    }

    async fn write_content(&self, file_path: &str, new_content: &str) -> AppResult<()> {
        match self.inner.write().await.entries.get_mut(file_path) {
            Some(Entry::File { content, .. }) => {
                *content = new_content.to_string();
                Ok(())
            }
            _ => Err(AppError::remote(format!("no file at '{file_path}'"))),
        }
    }

    async fn publish(&self, paths: &[String]) -> AppResult<()> {
        set_publish(&mut self.inner.write().await.entries, paths, true)
    }

    async fn unpublish(&self, paths: &[String]) -> AppResult<()> {
        set_publish(&mut self.inner.write().await.entries, paths, false)
    }

    async fn upload_images(&self, images: Vec<ImageUpload>) -> AppResult<Vec<String>> {
        let mut inner = self.inner.write().await;
        let stored: Vec<String> = images
            .into_iter()
            .map(|image| format!("/images/{}", image.file_name))
            .collect();
        inner.images.extend(stored.iter().cloned());
        Ok(stored)
    }
}

fn set_publish(entries: &mut BTreeMap<String, Entry>, paths: &[String], value: bool) -> AppResult<()> {
    for file_path in paths {
        match entries.get_mut(file_path) {
            Some(Entry::File { publish, .. }) => *publish = value,
            _ => return Err(AppError::remote(format!("no file at '{file_path}'"))),
        }
    }
    Ok(())
}
