//! Error types for property-tree operations.
//!
//! Structural problems found while loading, saving, or assigning nodes are
//! surfaced as [`TreeError`] values rather than logged and swallowed, so the
//! caller decides whether a malformed document is fatal. Unknown document
//! keys and unmatched registered children are deliberately *not* errors —
//! they are the forward/backward-compatibility mechanism of group loading.

use thiserror::Error;

/// Structured errors for node load/save/assign operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TreeError {
    /// A node that needs a name to address its value was used anonymously.
    ///
    /// Groups may legitimately be anonymous (their children flatten into the
    /// enclosing document); sequences and fixed arrays may not be loaded or
    /// saved without one.
    #[error("unnamed {kind} node: a name is required to load or save this variant")]
    UnnamedNode {
        /// The node variant, e.g. `"sequence"`.
        kind: &'static str,
    },

    /// A value or node of the wrong shape was supplied.
    ///
    /// Raised when `assign` crosses concrete variants and when `load`
    /// receives a document incompatible with the node (an object for a
    /// scalar, an array for a group, and so on).
    #[error("type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// A fixed array was given an array of the wrong length.
    #[error("arity mismatch: expected {expected} elements, found {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    /// A scalar value could not be encoded as a document.
    #[error("value serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl TreeError {
    /// Builds a `TypeMismatch` from anything printable.
    pub(crate) fn mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        TreeError::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Check if this error is a missing-name error.
    pub fn is_unnamed(&self) -> bool {
        matches!(self, TreeError::UnnamedNode { .. })
    }

    /// Check if this error is a shape or variant mismatch.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, TreeError::TypeMismatch { .. })
    }

    /// Check if this error is a fixed-array length mismatch.
    pub fn is_arity_mismatch(&self) -> bool {
        matches!(self, TreeError::ArityMismatch { .. })
    }
}
