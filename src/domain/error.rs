//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Errors raised when values cannot be placed in a search tree.
///
/// Lookups, deletions and shape queries never fail: a missing value or an
/// empty tree is reported through `Option`, not through this type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("value at input position {position} cannot be totally ordered")]
    Unordered { position: usize },

    #[error("value cannot be compared with the node at depth {depth}")]
    Incomparable { depth: usize },
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
