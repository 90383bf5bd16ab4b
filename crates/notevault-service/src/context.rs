//! Dependencies shared by every vault service.

use std::sync::Arc;

use notevault_core::config::AppConfig;
use notevault_core::result::AppResult;
use notevault_core::traits::RemoteStore;
use notevault_core::types::RootPrefix;

use crate::document::DocumentService;
use crate::publish::{ProjectionRules, PublishService};
use crate::state::{SharedState, VaultState};
use crate::tree::TreeService;

/// Remote store, shared state, and the settings the services consult.
#[derive(Debug, Clone)]
pub struct VaultContext {
    /// Authoritative store.
    pub remote: Arc<dyn RemoteStore>,
    /// Tree and session.
    pub state: SharedState,
    /// Prefix stripped from listed paths.
    pub root: RootPrefix,
    /// Entries hidden from every projection.
    pub rules: ProjectionRules,
    /// Base URL of the published pages site.
    pub pages_base_url: Option<String>,
}

impl VaultContext {
    /// Context with default root prefix and rules.
    pub fn new(remote: Arc<dyn RemoteStore>, state: VaultState) -> Self {
        Self {
            remote,
            state: state.shared(),
            root: RootPrefix::default(),
            rules: ProjectionRules::default(),
            pages_base_url: None,
        }
    }

    /// Context configured from `config`, starting with an empty tree.
    pub fn from_config(remote: Arc<dyn RemoteStore>, config: &AppConfig) -> AppResult<Self> {
        Ok(Self {
            remote,
            state: VaultState::new(config.vault.view).shared(),
            root: config.vault.root_prefix()?,
            rules: ProjectionRules::new(config.vault.excluded_names.iter().cloned()),
            pages_base_url: config.publish.pages_base_url.clone(),
        })
    }

    /// Override the root prefix.
    pub fn with_root(mut self, root: RootPrefix) -> Self {
        self.root = root;
        self
    }

    /// Override the published pages base URL.
    pub fn with_pages_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.pages_base_url = Some(base_url.into());
        self
    }
}

/// All vault services over one context.
#[derive(Debug, Clone)]
pub struct Vault {
    ctx: Arc<VaultContext>,
    /// Tree structure sync.
    pub tree: TreeService,
    /// Open tabs, editing, saving.
    pub documents: DocumentService,
    /// Publish flags and page URLs.
    pub publish: PublishService,
}

impl Vault {
    /// Build every service over `context`.
    pub fn new(context: VaultContext) -> Self {
        let ctx = Arc::new(context);
        let tree = TreeService::new(Arc::clone(&ctx));
        Self {
            documents: DocumentService::new(Arc::clone(&ctx)),
            publish: PublishService::new(Arc::clone(&ctx), tree.clone()),
            tree,
            ctx,
        }
    }

    /// The shared context.
    pub fn context(&self) -> &VaultContext {
        &self.ctx
    }

    /// Copy of the current tree and session.
    pub async fn state(&self) -> VaultState {
        self.ctx.state.read().await.clone()
    }
}
