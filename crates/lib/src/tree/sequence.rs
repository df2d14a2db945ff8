//! Variable-length sequences of record elements.

use std::any::Any;
use std::fmt;

use serde_json::Map;

use crate::Document;
use crate::document::document_kind;
use crate::tree::{Node, Record, TreeError, strip_wrapper};

/// A node owning an ordered, growable collection of `R` elements.
///
/// Every slot either holds an owned element of exactly `R` or is empty.
/// Loading resets the sequence to match the document: the slot vector is
/// resized to the array's length and each slot gets a fresh
/// `R::default()` loaded from the corresponding entry, in order. Elements
/// inside a sequence are not individually named — the sequence carries one
/// name for the whole array, and each element serializes as its bare field
/// object.
///
/// ```
/// use proptree::{Group, Node, Record, Sequence};
/// # use proptree::Field;
/// # #[derive(Debug, Clone)]
/// # struct Example { props: Group, value: Field<i64> }
/// # impl Default for Example {
/// #     fn default() -> Self {
/// #         let mut props = Group::named("Example");
/// #         let value = props.add("Name", 0_i64);
/// #         Example { props, value }
/// #     }
/// # }
/// # impl Record for Example {
/// #     fn props(&self) -> &Group { &self.props }
/// #     fn props_mut(&mut self) -> &mut Group { &mut self.props }
/// # }
/// let mut seq = Sequence::<Example>::new("Examples");
/// seq.push(Example::default());
/// seq.push(Example::default());
///
/// let doc = seq.save().unwrap();
///
/// let mut restored = Sequence::<Example>::new("Examples");
/// restored.load(&doc).unwrap();
/// assert_eq!(restored.len(), 2);
/// ```
#[derive(Clone)]
pub struct Sequence<R> {
    name: Option<String>,
    elems: Vec<Option<R>>,
}

impl<R: Record> Sequence<R> {
    /// Creates an empty named sequence.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            elems: Vec::new(),
        }
    }

    /// Creates an empty anonymous sequence.
    ///
    /// An anonymous sequence cannot be loaded or saved (it has no name to
    /// address its array in a document); it only makes sense as scratch
    /// storage to `assign_from` later.
    pub fn anonymous() -> Self {
        Self {
            name: None,
            elems: Vec::new(),
        }
    }

    /// Number of slots, empty or not.
    pub fn len(&self) -> usize {
        self.elems.len()
    }

    /// Returns true if the sequence has no slots.
    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    /// The element at `index`, if the slot exists and is non-empty.
    pub fn get(&self, index: usize) -> Option<&R> {
        self.elems.get(index)?.as_ref()
    }

    /// Mutable counterpart of [`Sequence::get`].
    pub fn get_mut(&mut self, index: usize) -> Option<&mut R> {
        self.elems.get_mut(index)?.as_mut()
    }

    /// Appends an element.
    pub fn push(&mut self, element: R) {
        self.elems.push(Some(element));
    }

    /// Drops all elements.
    pub fn clear(&mut self) {
        self.elems.clear();
    }

    /// Iterates the non-empty elements in order.
    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.elems.iter().filter_map(Option::as_ref)
    }

    /// Mutable counterpart of [`Sequence::iter`].
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut R> {
        self.elems.iter_mut().filter_map(Option::as_mut)
    }

    /// Replaces this sequence's elements with deep clones of `other`'s,
    /// paired by position.
    pub fn assign_from(&mut self, other: &Sequence<R>) {
        self.elems = other.elems.clone();
    }

    fn require_name(&self) -> Result<&str, TreeError> {
        self.name
            .as_deref()
            .ok_or(TreeError::UnnamedNode { kind: "sequence" })
    }
}

/// Loads the element slots from a document array: fresh defaults loaded per
/// entry, built into a new buffer and swapped in only on full success. A
/// `null` entry becomes an empty slot, matching what `save` emits for one.
pub(crate) fn load_slots<R: Record>(items: &[Document]) -> Result<Vec<Option<R>>, TreeError> {
    let mut slots = Vec::with_capacity(items.len());
    for item in items {
        if item.is_null() {
            slots.push(None);
            continue;
        }
        let mut element = R::default();
        element.load(item)?;
        slots.push(Some(element));
    }
    Ok(slots)
}

/// Saves element slots as a document array of bare element values.
///
/// A record's own `save` wraps its fields as `{name: fields}`; inside a
/// sequence the element is unnamed, so the single-entry wrapper is stripped
/// and only the fields object is kept. Empty slots save as `null`.
pub(crate) fn save_slots<R: Record>(slots: &[Option<R>]) -> Result<Vec<Document>, TreeError> {
    let mut items = Vec::with_capacity(slots.len());
    for slot in slots {
        match slot {
            Some(element) => items.push(unwrap_element(element.save()?)),
            None => items.push(Document::Null),
        }
    }
    Ok(items)
}

/// Strips the `{name: fields}` wrapper from a named record's save; a record
/// with an anonymous group already saved flat.
fn unwrap_element(doc: Document) -> Document {
    if let Document::Object(map) = &doc
        && map.len() == 1
    {
        if let Some((_, inner)) = map.iter().next() {
            return inner.clone();
        }
    }
    doc
}

impl<R: Record> Node for Sequence<R> {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn kind(&self) -> &'static str {
        "sequence"
    }

    fn clone_node(&self) -> Box<dyn Node> {
        Box::new(self.clone())
    }

    fn assign(&mut self, other: &dyn Node) -> Result<(), TreeError> {
        let other = other
            .as_any()
            .downcast_ref::<Sequence<R>>()
            .ok_or_else(|| TreeError::mismatch("sequence", other.kind()))?;
        self.assign_from(other);
        Ok(())
    }

    fn load(&mut self, doc: &Document) -> Result<(), TreeError> {
        let name = self.require_name()?;
        let doc = strip_wrapper(name, doc);
        let Document::Array(items) = doc else {
            return Err(TreeError::mismatch("array", document_kind(doc)));
        };

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

impl<R: Record> fmt::Debug for Sequence<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("name", &self.name)
            .field("len", &self.elems.len())
            .finish()
    }
}
