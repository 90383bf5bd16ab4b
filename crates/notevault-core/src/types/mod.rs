//! Shared value types.

pub mod kind;
pub mod path;

pub use kind::NodeKind;
pub use path::RootPrefix;
