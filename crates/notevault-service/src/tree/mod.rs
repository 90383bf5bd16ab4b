//! Remote-synchronized tree operations.

pub mod service;

pub use service::{RefreshOutcome, TreeService};
