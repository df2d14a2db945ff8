//! Fixed-arity arrays of record elements.

use std::any::Any;
use std::fmt;

use serde_json::Map;

use crate::Document;
use crate::document::document_kind;
use crate::tree::sequence::{load_slots, save_slots};
use crate::tree::{Node, Record, TreeError, strip_wrapper};

/// As [`Sequence`](super::Sequence), but with exactly `N` slots for the
/// container's entire lifetime.
///
/// A fixed array never resizes: `load` demands an array of exactly `N`
/// entries and anything else is an [`TreeError::ArityMismatch`] — never a
/// silent truncation or pad. The arity is checked before any slot is
/// touched, so a failed load leaves the previous elements intact.
#[derive(Clone)]
pub struct FixedArray<R, const N: usize> {
    name: Option<String>,
    elems: Vec<Option<R>>,
}

impl<R: Record, const N: usize> FixedArray<R, N> {
    /// Creates a named fixed array with all `N` slots empty.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            elems: vec![None; N],
        }
    }

    /// Creates an anonymous fixed array; see
    /// [`Sequence::anonymous`](super::Sequence::anonymous) for the caveats.
    pub fn anonymous() -> Self {
        Self {
            name: None,
            elems: vec![None; N],
        }
    }

    /// Number of slots — always `N`.
    pub fn len(&self) -> usize {
        N
    }

    /// Returns true only for the degenerate `N == 0` array.
    pub fn is_empty(&self) -> bool {
        N == 0
    }

    /// The element at `index`, if in bounds and non-empty.
    pub fn get(&self, index: usize) -> Option<&R> {
        self.elems.get(index)?.as_ref()
    }

    /// Mutable counterpart of [`FixedArray::get`].
    pub fn get_mut(&mut self, index: usize) -> Option<&mut R> {
        self.elems.get_mut(index)?.as_mut()
    }

    /// Places an element into the slot at `index`, dropping whatever was
    /// there. Returns false if `index` is out of bounds.
    pub fn set(&mut self, index: usize, element: R) -> bool {
        match self.elems.get_mut(index) {
            Some(slot) => {
                *slot = Some(element);
                true
            }
            None => false,
        }
    }

    /// Iterates the non-empty elements in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.elems.iter().filter_map(Option::as_ref)
    }

    /// Mutable counterpart of [`FixedArray::iter`].
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut R> {
        self.elems.iter_mut().filter_map(Option::as_mut)
    }

    /// Replaces this array's elements with deep clones of `other`'s, paired
    /// by position. The arities agree by type.
    pub fn assign_from(&mut self, other: &FixedArray<R, N>) {
        self.elems = other.elems.clone();
    }

    fn require_name(&self) -> Result<&str, TreeError> {
        self.name
            .as_deref()
            .ok_or(TreeError::UnnamedNode { kind: "fixed array" })
    }
}

impl<R: Record, const N: usize> Node for FixedArray<R, N> {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn kind(&self) -> &'static str {
        "fixed array"
    }

    fn clone_node(&self) -> Box<dyn Node> {
        Box::new(self.clone())
    }

    fn assign(&mut self, other: &dyn Node) -> Result<(), TreeError> {
        let other = other
            .as_any()
            .downcast_ref::<FixedArray<R, N>>()
            .ok_or_else(|| TreeError::mismatch("fixed array", other.kind()))?;
        self.assign_from(other);
        Ok(())
    }

    fn load(&mut self, doc: &Document) -> Result<(), TreeError> {
        let name = self.require_name()?;
        let doc = strip_wrapper(name, doc);
        let Document::Array(items) = doc else {
            return Err(TreeError::mismatch("array", document_kind(doc)));
        };
        if items.len() != N {
            return Err(TreeError::ArityMismatch {
                expected: N,
                actual: items.len(),
            });
        }

        self.elems = load_slots(items)?;
        Ok(())
    }

    fn save(&self) -> Result<Document, TreeError> {
        let name = self.require_name()?;
        let items = save_slots(&self.elems)?;

        let mut out = Map::new();
        out.insert(name.to_string(), Document::Array(items));
        Ok(Document::Object(out))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl<R: Record, const N: usize> fmt::Debug for FixedArray<R, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedArray")
            .field("name", &self.name)
            .field("len", &N)
            .finish()
    }
}
