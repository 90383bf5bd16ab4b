//! Open-document session and its remote-backed service.

pub mod service;
pub mod session;

pub use service::{DocumentService, OpenOutcome, SaveOutcome};
pub use session::Session;
