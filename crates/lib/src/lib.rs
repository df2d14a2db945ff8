//!
//! Proptree: declarative property-tree serialization.
//!
//! A composite type registers its fields ("properties") against an embedded
//! [`Group`] once, at construction, and gets document load/save for the whole
//! tree for free — no per-field encode/decode code. Trees nest arbitrarily:
//! scalar leaves, nested records, variable-length sequences, and fixed-arity
//! arrays are all first-class node variants behind the common [`Node`]
//! contract.
//!
//! ## Core concepts
//!
//! * **[`Node`]**: the contract every tree element implements — name, deep
//!   clone, value assignment, and document load/save.
//! * **[`Scalar<T>`](Scalar)**: a named leaf wrapping one value.
//! * **[`Group`]**: a composite owning a name-keyed set of children; named
//!   groups nest, anonymous groups flatten into the enclosing document.
//! * **[`Sequence<R>`](Sequence)** / **[`FixedArray<R, N>`](FixedArray)**:
//!   ordered collections of one record type, growable or fixed-arity.
//! * **[`Record`]**: the trait a user composite implements (embed a `Group`,
//!   register fields in `Default`) to join the tree.
//! * **[`Document`]**: the generic JSON tree value exchanged with the
//!   serialization format, merged right-biased by [`merge`].
//!
//! ## Usage
//!
//! ```
//! use proptree::{Field, Group, Record};
//!
//! #[derive(Debug, Clone)]
//! struct Player {
//!     props: Group,
//!     health: Field<i64>,
//!     name: Field<String>,
//! }
//!
//! impl Default for Player {
//!     fn default() -> Self {
//!         let mut props = Group::named("Player");
//!         let health = props.add("Health", 100_i64);
//!         let name = props.add("Name", String::new());
//!         Player { props, health, name }
//!     }
//! }
//!
//! impl Record for Player {
//!     fn props(&self) -> &Group {
//!         &self.props
//!     }
//!     fn props_mut(&mut self) -> &mut Group {
//!         &mut self.props
//!     }
//! }
//!
//! # fn main() -> proptree::Result<()> {
//! let mut player = Player::default();
//! let health = player.health.clone();
//! player.props.set(&health, 42);
//!
//! // save() -> {"Player": {"Health": 42, "Name": ""}}
//! let doc = player.save()?;
//!
//! let mut restored = Player::default();
//! restored.load(&doc)?;
//! assert_eq!(restored.props.get(&restored.health), Some(&42));
//! # Ok(())
//! # }
//! ```
//!
//! File round-trips go through [`read_document_or_empty`] and
//! [`write_document`], which degrade gracefully (missing file on first run,
//! nothing to write) instead of failing the caller.

pub mod document;
pub mod tree;

pub use document::{
    Document, document_kind, is_empty_document, merge, parse_document, read_document,
    read_document_or_empty, stringify_document, write_document,
};
pub use tree::{
    ArrayField, Field, FixedArray, Group, Node, Record, RecordField, RecordNode, Scalar,
    ScalarValue, SeqField, Sequence, TreeError,
};

/// Result type used throughout the proptree library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the proptree library.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured property-tree errors from the tree module
    #[error(transparent)]
    Tree(#[from] tree::TreeError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
            Error::Tree(_) => "tree",
        }
    }

    /// Check if this error is a document-shape or variant mismatch.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Error::Tree(e) if e.is_type_mismatch())
    }

    /// Check if this error is a fixed-array length mismatch.
    pub fn is_arity_mismatch(&self) -> bool {
        matches!(self, Error::Tree(e) if e.is_arity_mismatch())
    }

    /// Check if this error came from reading or writing a file.
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}
