//! Trait definitions for pluggable collaborators.

pub mod remote;

pub use remote::{ImageUpload, ListingNode, RemoteStore};
