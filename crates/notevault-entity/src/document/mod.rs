//! Open-document entities.

pub mod model;

pub use model::OpenFile;
