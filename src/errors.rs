//! Error Types
//!
//! Structural edits to the scene graph either fully succeed or leave the
//! graph exactly as it was before the call; the error tells the caller
//! which check rejected the edit so it can recover locally (detach first,
//! drop the edit, or refresh a stale handle).

use thiserror::Error;

/// Errors reported by structural scene-graph operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    /// An attach would break the tree shape: attaching a node to itself,
    /// re-parenting a node that still has a parent, or closing a cycle.
    #[error("invalid hierarchy: {reason}")]
    InvalidHierarchy {
        /// Which tree invariant the edit would have violated.
        reason: &'static str,
    },

    /// A handle did not resolve to a live node, or a detach target had
    /// no parent link to clear.
    #[error("{what} not found")]
    NotFound {
        /// What failed to resolve.
        what: &'static str,
    },
}

/// Alias for `Result<T, SceneError>`.
pub type Result<T> = std::result::Result<T, SceneError>;
