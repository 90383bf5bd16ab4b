//! Publish flag management.

use std::sync::Arc;

use tracing::{error, info};

use notevault_core::error::AppError;
use notevault_core::result::AppResult;
use notevault_core::types::path;

use crate::context::VaultContext;
use crate::publish::deploy::DeployPlan;
use crate::publish::projection;
use crate::tree::TreeService;

/// Publishes notes to the student view.
#[derive(Debug, Clone)]
pub struct PublishService {
    ctx: Arc<VaultContext>,
    tree: TreeService,
}

impl PublishService {
    /// Creates a new publish service.
    pub fn new(ctx: Arc<VaultContext>, tree: TreeService) -> Self {
        Self { ctx, tree }
    }

    /// Root-relative paths of every visible published file.
    pub async fn published_files(&self) -> AppResult<Vec<String>> {
        let listing = self.ctx.remote.list().await?;
        let visible = projection::admin_view(&listing, &self.ctx.rules);
        Ok(projection::published_paths(&visible, &self.ctx.root))
    }

    /// Mark `paths` published.
    pub async fn publish(&self, paths: &[String]) -> AppResult<()> {
        if paths.is_empty() {
            return Ok(());
        }
        self.ctx.remote.publish(paths).await.map_err(|e| {
            error!(count = paths.len(), error = %e, "Remote publish failed");
            e
        })?;
        info!(count = paths.len(), "Notes published");
        self.refresh_logged().await;
        Ok(())
    }

    /// Clear the publish flag on `paths`.
    pub async fn unpublish(&self, paths: &[String]) -> AppResult<()> {
        if paths.is_empty() {
            return Ok(());
        }
        self.ctx.remote.unpublish(paths).await.map_err(|e| {
            error!(count = paths.len(), error = %e, "Remote unpublish failed");
            e
        })?;
        info!(count = paths.len(), "Notes unpublished");
        self.refresh_logged().await;
        Ok(())
    }

    /// Make exactly `selected` published, in at most two remote calls.
    pub async fn deploy(&self, selected: &[String]) -> AppResult<DeployPlan> {
        let published = self.published_files().await?;
        let plan = DeployPlan::between(&published, selected);
        if plan.is_empty() {
            return Ok(plan);
        }

        if !plan.to_publish.is_empty() {
            self.ctx.remote.publish(&plan.to_publish).await.map_err(|e| {
                error!(count = plan.to_publish.len(), error = %e, "Deploy publish failed");
                e
            })?;
        }
        if !plan.to_unpublish.is_empty() {
            self.ctx.remote.unpublish(&plan.to_unpublish).await.map_err(|e| {
                error!(count = plan.to_unpublish.len(), error = %e, "Deploy unpublish failed");
                e
            })?;
        }
        info!(
            published = plan.to_publish.len(),
            unpublished = plan.to_unpublish.len(),
            "Deploy complete"
        );
        self.refresh_logged().await;
        Ok(plan)
    }

    /// Public page URL of the note at `file_path`.
    pub fn page_url(&self, file_path: &str) -> AppResult<String> {
        let base = self
            .ctx
            .pages_base_url
            .as_deref()
            .ok_or_else(|| AppError::configuration("publish.pages_base_url is not set"))?;
        Ok(page_url(base, file_path))
    }

    async fn refresh_logged(&self) {
        if let Err(e) = self.tree.refresh().await {
            error!(error = %e, "Refresh after publish change failed");
        }
    }
}

/// `{base}/pages/{path without .md}`.
pub fn page_url(base: &str, file_path: &str) -> String {
    format!(
        "{}/pages/{}",
        base.trim_end_matches('/'),
        path::strip_markdown_extension(file_path.trim_start_matches('/'))
    )
}
