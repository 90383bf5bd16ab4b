//! Tree engine errors.

use thiserror::Error;

use notevault_core::error::{AppError, ErrorKind};

/// Reasons a tree lookup or mutation did not apply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// No node of the expected kind lives at the path.
    #[error("no node at '{0}'")]
    NotFound(String),
    /// The parent folder of a new node does not exist.
    #[error("parent folder '{0}' not found")]
    ParentNotFound(String),
    /// The destination folder of a move does not exist.
    #[error("target folder '{0}' not found")]
    TargetNotFound(String),
    /// A folder would become its own descendant.
    #[error("cannot move '{node}' into '{target}'")]
    IllegalMove {
        /// Path of the folder being moved.
        node: String,
        /// Requested destination folder.
        target: String,
    },
    /// Another node already occupies the path.
    #[error("a node at '{0}' already exists")]
    AlreadyExists(String),
    /// The name cannot be used as a path segment.
    #[error("invalid name '{0}'")]
    InvalidName(String),
}

/// Result alias for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;

impl From<TreeError> for AppError {
    fn from(err: TreeError) -> Self {
        let kind = match &err {
            TreeError::NotFound(_) | TreeError::ParentNotFound(_) | TreeError::TargetNotFound(_) => {
                ErrorKind::NotFound
            }
            TreeError::IllegalMove { .. } | TreeError::InvalidName(_) => ErrorKind::Validation,
            TreeError::AlreadyExists(_) => ErrorKind::Conflict,
        };
        AppError::new(kind, err.to_string())
    }
}
