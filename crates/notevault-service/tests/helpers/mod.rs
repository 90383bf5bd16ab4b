//! Shared test helpers for service integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::oneshot;

use notevault_core::config::vault::ViewMode;
use notevault_core::error::AppError;
use notevault_core::result::AppResult;
use notevault_core::traits::remote::{ImageUpload, ListingNode, RemoteStore};
use notevault_core::types::{NodeKind, RootPrefix};
use notevault_remote::MemoryRemoteStore;
use notevault_service::{Vault, VaultContext, VaultState};

/// An empty in-memory store under the default root prefix.
pub fn memory() -> MemoryRemoteStore {
    MemoryRemoteStore::new(RootPrefix::default())
}

/// Build a vault over `remote` and load the first listing.
pub async fn vault(remote: Arc<dyn RemoteStore>, view: ViewMode) -> Vault {
    let vault = Vault::new(VaultContext::new(remote, VaultState::new(view)));
    vault.tree.refresh().await.unwrap();
    vault
}

/// Remote wrapper that fails the named operations.
#[derive(Debug)]
pub struct FlakyRemote {
    inner: MemoryRemoteStore,
    failing: Mutex<HashSet<&'static str>>,
}

impl FlakyRemote {
    pub fn new(inner: MemoryRemoteStore) -> Self {
        Self {
            inner,
            failing: Mutex::new(HashSet::new()),
        }
    }

    /// Make `operation` fail from now on.
    pub fn fail(&self, operation: &'static str) {
        self.failing.lock().unwrap().insert(operation);
    }

    /// Let `operation` succeed again.
    pub fn heal(&self, operation: &'static str) {
        self.failing.lock().unwrap().remove(operation);
    }

    fn check(&self, operation: &'static str) -> AppResult<()> {
        if self.failing.lock().unwrap().contains(operation) {
            Err(AppError::remote(format!("{operation} unavailable")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RemoteStore for FlakyRemote {
    fn store_type(&self) -> &str {
        "flaky"
    }

    async fn list(&self) -> AppResult<Vec<ListingNode>> {
        self.check("list")?;
        self.inner.list().await
    }

    async fn create(&self, path: &str, kind: NodeKind) -> AppResult<()> {
        self.check("create")?;
        self.inner.create(path, kind).await
    }

    async fn move_node(&self, path: &str, to: &str) -> AppResult<()> {
        self.check("move")?;
        self.inner.move_node(path, to).await
    }

    async fn rename(&self, path: &str, new_name: &str) -> AppResult<()> {
        self.check("rename")?;
        self.inner.rename(path, new_name).await
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        self.check("delete")?;
        self.inner.delete(path).await
    }

    async fn read_content(&self, path: &str) -> AppResult<String> {
        self.check("read_content")?;
        self.inner.read_content(path).await
    }

    async fn write_content(&self, path: &str, content: &str) -> AppResult<()> {
        self.check("write_content")?;
        self.inner.write_content(path, content).await
    }

    async fn publish(&self, paths: &[String]) -> AppResult<()> {
        self.check("publish")?;
        self.inner.publish(paths).await
    }

    async fn unpublish(&self, paths: &[String]) -> AppResult<()> {
        self.check("unpublish")?;
        self.inner.unpublish(paths).await
    }

    async fn upload_images(&self, images: Vec<ImageUpload>) -> AppResult<Vec<String>> {
        self.check("upload_images")?;
        self.inner.upload_images(images).await
    }
}

/// Server side of a gate: signals arrival, then waits to be released.
#[derive(Debug)]
struct Gate {
    entered: oneshot::Sender<()>,
    release: oneshot::Receiver<()>,
}

/// Test side of a gate.
#[derive(Debug)]
pub struct GateHandle {
    entered: oneshot::Receiver<()>,
    release: oneshot::Sender<()>,
}

impl GateHandle {
    /// Wait until the gated call has produced its result and is held.
    pub async fn entered(&mut self) {
        (&mut self.entered).await.unwrap();
    }

    /// Let the held call return.
    pub fn release(self) {
        self.release.send(()).unwrap();
    }
}

/// Remote wrapper that can hold chosen calls after they ran, so their
/// responses arrive late.
#[derive(Debug)]
pub struct GatedRemote {
    inner: MemoryRemoteStore,
    gates: Mutex<HashMap<&'static str, VecDeque<Gate>>>,
}

impl GatedRemote {
    pub fn new(inner: MemoryRemoteStore) -> Self {
        Self {
            inner,
            gates: Mutex::new(HashMap::new()),
        }
    }

    /// Hold the next call of `operation`.
    pub fn gate_next(&self, operation: &'static str) -> GateHandle {
        let (entered_tx, entered_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        self.gates
            .lock()
            .unwrap()
            .entry(operation)
            .or_default()
            .push_back(Gate {
                entered: entered_tx,
                release: release_rx,
            });
        GateHandle {
            entered: entered_rx,
            release: release_tx,
        }
    }

    async fn hold<T>(&self, operation: &'static str, result: T) -> T {
        let gate = self
            .gates
            .lock()
            .unwrap()
            .get_mut(operation)
            .and_then(VecDeque::pop_front);
        if let Some(gate) = gate {
            gate.entered.send(()).unwrap();
            gate.release.await.unwrap();
        }
        result
    }
}

#[async_trait]
impl RemoteStore for GatedRemote {
    fn store_type(&self) -> &str {
        "gated"
    }

    async fn list(&self) -> AppResult<Vec<ListingNode>> {
        let result = self.inner.list().await;
        self.hold("list", result).await
    }

    async fn create(&self, path: &str, kind: NodeKind) -> AppResult<()> {
        self.inner.create(path, kind).await
    }

    async fn move_node(&self, path: &str, to: &str) -> AppResult<()> {
        self.inner.move_node(path, to).await
    }

    async fn rename(&self, path: &str, new_name: &str) -> AppResult<()> {
        self.inner.rename(path, new_name).await
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        self.inner.delete(path).await
    }

    async fn read_content(&self, path: &str) -> AppResult<String> {
        let result = self.inner.read_content(path).await;
        self.hold("read_content", result).await
    }

    async fn write_content(&self, path: &str, content: &str) -> AppResult<()> {
        let result = self.inner.write_content(path, content).await;
        self.hold("write_content", result).await
    }

    async fn publish(&self, paths: &[String]) -> AppResult<()> {
        self.inner.publish(paths).await
    }

    async fn unpublish(&self, paths: &[String]) -> AppResult<()> {
        self.inner.unpublish(paths).await
    }

    async fn upload_images(&self, images: Vec<ImageUpload>) -> AppResult<Vec<String>> {
        self.inner.upload_images(images).await
    }
}
