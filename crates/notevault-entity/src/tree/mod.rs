//! Tree lookup and mutation engine.
//!
//! Every function takes the tree explicitly and either returns what it
//! found or reports a [`TreeError`]; none of them panic on a missing path.
//! Callers mutate a clone and swap it in on success.

pub mod error;
pub mod listing;
pub mod lookup;
pub mod mutation;

pub use error::{TreeError, TreeResult};
