//! Publish/deploy configuration.

use serde::{Deserialize, Serialize};

/// Settings for the published (student) pages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublishConfig {
    /// Base URL of the static site serving published notes under `/pages/`.
    #[serde(default)]
    pub pages_base_url: Option<String>,
}
