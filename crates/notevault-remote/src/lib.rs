//! # notevault-remote
//!
//! [`RemoteStore`](notevault_core::traits::RemoteStore) implementations:
//! the HTTP note server client and an in-memory store.

pub mod providers;

pub use providers::{HttpRemoteStore, MemoryRemoteStore};
