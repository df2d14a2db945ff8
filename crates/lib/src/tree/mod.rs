//! The property-tree node hierarchy.
//!
//! Every element of a property tree — scalar leaf, composite group, sequence,
//! fixed array, nested record — implements the [`Node`] contract: it knows
//! its name (the key it is stored under in a document), it can deep-copy
//! itself, copy values from a peer of the same variant, and convert to and
//! from a [`Document`](crate::Document).
//!
//! Ownership is a strict tree. A group owns its children as `Box<dyn Node>`,
//! sequences and arrays own their element slots, and nothing is ever shared
//! between two parents, so `Drop` releases everything top-down with no
//! cycles to worry about.

use std::any::Any;
use std::fmt;

use crate::Document;

pub mod errors;
pub mod field;

mod array;
mod group;
mod scalar;
mod sequence;


pub use array::FixedArray;
pub use errors::TreeError;
pub use field::{ArrayField, Field, RecordField, SeqField};
pub use group::{Group, Record, RecordNode};
pub use scalar::{Scalar, ScalarValue};
pub use sequence::Sequence;

/// The contract every property-tree element implements.
///
/// `Node` is object-safe so a [`Group`] can own an extensible, heterogeneous
/// set of children behind `Box<dyn Node>`. The built-in variants are
/// [`Scalar`], [`Group`], [`Sequence`], and [`FixedArray`]; user composites
/// join the tree through [`RecordNode`].
pub trait Node: fmt::Debug {
    /// The key under which this node is nested in its parent's document,
    /// or `None` for the anonymous/root case.
    ///
    /// A node's name is fixed at construction and never changes.
    fn name(&self) -> Option<&str>;

    /// The node variant, e.g. `"scalar"` or `"group"`, for error messages.
    fn kind(&self) -> &'static str;

    /// Produces a deep copy: all owned children are cloned recursively, and
    /// the clone never shares state with the original.
    fn clone_node(&self) -> Box<dyn Node>;

    /// Copies *values* (never identity) from `other` into `self`.
    ///
    /// `other` must be the same concrete variant as `self`;
    /// [`TreeError::TypeMismatch`] otherwise. `self.name()` is unchanged.
    fn assign(&mut self, other: &dyn Node) -> Result<(), TreeError>;

    /// Populates `self` from `doc`.
    ///
    /// `doc` is the value addressed by this node's name — either the inner
    /// value directly (the caller already navigated to it) or the node's own
    /// single-entry `{name: value}` wrapper as produced by [`Node::save`].
    fn load(&mut self, doc: &Document) -> Result<(), TreeError>;

    /// Produces the serialized representation, wrapped as `{name: value}`
    /// when the node is named.
    fn save(&self) -> Result<Document, TreeError>;

    /// Upcast for variant-checked downcasting in `assign` and typed getters.
    fn as_any(&self) -> &dyn Any;

    /// Mutable counterpart of [`Node::as_any`].
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl Clone for Box<dyn Node> {
    fn clone(&self) -> Self {
        self.clone_node()
    }
}

/// Strips the single-entry `{name: value}` wrapper a named node's `save`
/// produces, if `doc` is exactly that wrapper; otherwise returns `doc`
/// unchanged.
pub(crate) fn strip_wrapper<'a>(name: &str, doc: &'a Document) -> &'a Document {
    if let Document::Object(map) = doc
        && map.len() == 1
        && let Some(inner) = map.get(name)
    {
        return inner;
    }
    doc
}
