//! # notevault-service
//!
//! Vault services over a shared [`VaultState`]. Each service pairs the pure
//! tree engine with [`RemoteStore`](notevault_core::traits::RemoteStore)
//! round-trips, keeping the local tree and open tabs consistent with the
//! remote store.
//!
//! Services are cheap to clone; all of them share one [`VaultContext`].

pub mod context;
pub mod document;
pub mod publish;
pub mod search;
pub mod state;
pub mod tree;

pub use context::{Vault, VaultContext};
pub use document::{DocumentService, OpenOutcome, SaveOutcome, Session};
pub use publish::{DeployPlan, ProjectionRules, PublishService};
pub use search::SearchMatch;
pub use state::{SharedState, VaultState};
pub use tree::{RefreshOutcome, TreeService};
