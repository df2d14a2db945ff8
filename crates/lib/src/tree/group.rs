//! Composite group nodes and the user-composite protocol.

use std::any::Any;
use std::collections::HashMap;

use serde_json::Map;

use crate::Document;
use crate::document::{document_kind, merge};
use crate::tree::field::{ArrayField, Field, RecordField, SeqField};
use crate::tree::{FixedArray, Node, Scalar, ScalarValue, Sequence, TreeError};

/// A composite node owning a name-keyed set of children.
///
/// `Group` is the recursive case of the property tree: its children are any
/// mix of scalars, nested records, sequences, and fixed arrays, each owned
/// exclusively and addressed by a unique name. A group may itself be named
/// (its children nest under `{name: {...}}` in the saved document) or
/// anonymous (its children flatten directly into the enclosing document —
/// the root case).
///
/// Children are registered with the `add_*` methods, normally once, during
/// the owning composite's construction. Registration returns a typed handle
/// used for all later access:
///
/// ```
/// use proptree::{Group, Node};
/// use serde_json::json;
///
/// let mut group = Group::named("Example");
/// let a = group.add("A", 1_i64);
/// let b = group.add("B", String::from("hi"));
///
/// assert_eq!(group.save().unwrap(), json!({"Example": {"A": 1, "B": "hi"}}));
///
/// group.set(&a, 2);
/// assert_eq!(group.get(&a), Some(&2));
/// assert_eq!(group.get(&b).map(String::as_str), Some("hi"));
/// ```
///
/// Registering a name that already exists destroys the previous child first.
/// That is well-defined here — handles resolve by name and type, so a handle
/// to the replaced child either finds the compatible replacement or returns
/// `None` — but re-registering after construction is still unusual and worth
/// avoiding in composites whose handles are long-lived.
#[derive(Debug, Clone, Default)]
pub struct Group {
    name: Option<String>,
    children: HashMap<String, Box<dyn Node>>,
}

impl Group {
    /// Creates an anonymous group whose children flatten into the enclosing
    /// document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a named group whose children nest under `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            children: HashMap::new(),
        }
    }

    /// Registers a scalar child of type `T` under `name`, with `default` as
    /// its initial value, and returns the handle for accessing it.
    pub fn add<T: ScalarValue>(&mut self, name: impl Into<String>, default: T) -> Field<T> {
        let name = name.into();
        self.insert(name.clone(), Box::new(Scalar::new(name.clone(), default)));
        Field::new(name)
    }

    /// As [`Group::add`], with `T::default()` as the initial value.
    pub fn add_default<T: ScalarValue>(&mut self, name: impl Into<String>) -> Field<T> {
        self.add(name, T::default())
    }

    /// Registers a nested record child under the record's own group name.
    ///
    /// The record is moved into the tree; the returned handle reaches it via
    /// [`Group::record`] / [`Group::record_mut`]. Records nested this way
    /// should carry a named group — an anonymous one registers under the
    /// empty-string key, which round-trips but addresses poorly.
    pub fn add_record<R: Record>(&mut self, record: R) -> RecordField<R> {
        let name = record.props().name().unwrap_or_default().to_string();
        self.insert(name.clone(), Box::new(RecordNode(record)));
        RecordField::new(name)
    }

    /// Registers an empty sequence of `R` elements under `name`.
    pub fn add_sequence<R: Record>(&mut self, name: impl Into<String>) -> SeqField<R> {
        let name = name.into();
        self.insert(name.clone(), Box::new(Sequence::<R>::new(name.clone())));
        SeqField::new(name)
    }

    /// Registers a fixed array of `N` slots of `R` under `name`.
    pub fn add_fixed_array<R: Record, const N: usize>(
        &mut self,
        name: impl Into<String>,
    ) -> ArrayField<R, N> {
        let name = name.into();
        self.insert(name.clone(), Box::new(FixedArray::<R, N>::new(name.clone())));
        ArrayField::new(name)
    }

    /// Destroys and erases the child registered under `name`. No-op if there
    /// is none.
    pub fn remove(&mut self, name: &str) {
        self.children.remove(name);
    }

    /// Returns true if a child is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    /// Number of registered children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns true if no children are registered.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// The scalar value a handle points at, or `None` if the child was
    /// removed or replaced by one of a different type.
    pub fn get<T: ScalarValue>(&self, field: &Field<T>) -> Option<&T> {
        self.children
            .get(field.name())?
            .as_any()
            .downcast_ref::<Scalar<T>>()
            .map(Scalar::value)
    }

    /// Mutable counterpart of [`Group::get`].
    pub fn get_mut<T: ScalarValue>(&mut self, field: &Field<T>) -> Option<&mut T> {
        self.children
            .get_mut(field.name())?
            .as_any_mut()
            .downcast_mut::<Scalar<T>>()
            .map(Scalar::value_mut)
    }

    /// Sets the scalar value a handle points at. Returns false if the handle
    /// no longer resolves.
    pub fn set<T: ScalarValue>(&mut self, field: &Field<T>, value: T) -> bool {
        match self.get_mut(field) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// The nested record a handle points at.
    pub fn record<R: Record>(&self, field: &RecordField<R>) -> Option<&R> {
        self.children
            .get(field.name())?
            .as_any()
            .downcast_ref::<RecordNode<R>>()
            .map(RecordNode::record)
    }

    /// Mutable counterpart of [`Group::record`].
    pub fn record_mut<R: Record>(&mut self, field: &RecordField<R>) -> Option<&mut R> {
        self.children
            .get_mut(field.name())?
            .as_any_mut()
            .downcast_mut::<RecordNode<R>>()
            .map(RecordNode::record_mut)
    }

    /// The sequence a handle points at.
    pub fn sequence<R: Record>(&self, field: &SeqField<R>) -> Option<&Sequence<R>> {
        self.children
            .get(field.name())?
            .as_any()
            .downcast_ref::<Sequence<R>>()
    }

    /// Mutable counterpart of [`Group::sequence`].
    pub fn sequence_mut<R: Record>(&mut self, field: &SeqField<R>) -> Option<&mut Sequence<R>> {
        self.children
            .get_mut(field.name())?
            .as_any_mut()
            .downcast_mut::<Sequence<R>>()
    }

    /// The fixed array a handle points at.
    pub fn fixed_array<R: Record, const N: usize>(
        &self,
        field: &ArrayField<R, N>,
    ) -> Option<&FixedArray<R, N>> {
        self.children
            .get(field.name())?
            .as_any()
            .downcast_ref::<FixedArray<R, N>>()
    }

    /// Mutable counterpart of [`Group::fixed_array`].
    pub fn fixed_array_mut<R: Record, const N: usize>(
        &mut self,
        field: &ArrayField<R, N>,
    ) -> Option<&mut FixedArray<R, N>> {
        self.children
            .get_mut(field.name())?
            .as_any_mut()
            .downcast_mut::<FixedArray<R, N>>()
    }

    /// Copies values from matching children of `other`.
    ///
    /// For each key present in both groups, the child's `assign` runs; keys
    /// only in `other` are ignored, keys only in `self` keep their values.
    /// This deliberately updates existing children only — it is not a
    /// structural merge.
    pub fn assign_from(&mut self, other: &Group) -> Result<(), TreeError> {
        for (key, child) in &mut self.children {
            if let Some(theirs) = other.children.get(key) {
                child.assign(theirs.as_ref())?;
            }
        }
        Ok(())
    }

    /// Replace-on-reinsert registration: the old child under `name`, if any,
    /// is dropped before the new one goes in.
    fn insert(&mut self, name: String, node: Box<dyn Node>) {
        self.children.insert(name, node);
    }

    /// Resolves the document to load from, stripping this group's own
    /// `{name: {...}}` wrapper when `doc` is exactly that wrapper. The strip
    /// is skipped when the group's name is also a registered child key,
    /// since the document is then ambiguous and the navigated reading wins.
    fn target<'a>(&self, doc: &'a Document) -> &'a Document {
        if let Some(name) = &self.name
            && !self.children.contains_key(name)
            && let Document::Object(map) = doc
            && map.len() == 1
            && let Some(inner @ Document::Object(_)) = map.get(name)
        {
            return inner;
        }
        doc
    }
}

impl Node for Group {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn kind(&self) -> &'static str {
        "group"
    }

    fn clone_node(&self) -> Box<dyn Node> {
        Box::new(self.clone())
    }

    fn assign(&mut self, other: &dyn Node) -> Result<(), TreeError> {
        let other = other
            .as_any()
            .downcast_ref::<Group>()
            .ok_or_else(|| TreeError::mismatch("group", other.kind()))?;
        self.assign_from(other)
    }

    /// For every key in `doc` with a registered child of the same name, the
    /// child loads the corresponding sub-document. Unknown document keys are
    /// ignored and unmatched children keep their values, which is what makes
    /// loading old or newer documents safe.
    fn load(&mut self, doc: &Document) -> Result<(), TreeError> {
        let doc = self.target(doc);
        let Document::Object(map) = doc else {
            return Err(TreeError::mismatch("object", document_kind(doc)));
        };

        for (key, sub) in map {
            if let Some(child) = self.children.get_mut(key) {
                child.load(sub)?;
            }
        }
        Ok(())
    }

    /// Each child's save is merged right-biased into a single object; a
    /// named group wraps it as `{name: object}`, an anonymous group returns
    /// it flat so the children appear as top-level keys of the enclosing
    /// document.
    fn save(&self) -> Result<Document, TreeError> {
        let mut merged = Document::Object(Map::new());
        for child in self.children.values() {
            merge(&mut merged, &child.save()?);
        }

        match &self.name {
            Some(name) => {
                let mut out = Map::new();
                out.insert(name.clone(), merged);
                Ok(Document::Object(out))
            }
            None => Ok(merged),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// The protocol a user composite opts into to become serializable.
///
/// A record embeds a [`Group`] plus the handles for its registered fields,
/// does all registration in `Default::default()`, and derives `Clone`
/// (`Group`'s clone is deep, so the derive is a correct deep copy). The
/// provided methods give the composite its `load`/`save`/`assign_from`
/// surface by delegating to the group:
///
/// ```
/// use proptree::{Field, Group, Record};
///
/// #[derive(Debug, Clone)]
/// struct Settings {
///     props: Group,
///     volume: Field<i64>,
/// }
///
/// impl Default for Settings {
///     fn default() -> Self {
///         let mut props = Group::named("Settings");
///         let volume = props.add("Volume", 7_i64);
///         Settings { props, volume }
///     }
/// }
///
/// impl Record for Settings {
///     fn props(&self) -> &Group {
///         &self.props
///     }
///     fn props_mut(&mut self) -> &mut Group {
///         &mut self.props
///     }
/// }
///
/// let settings = Settings::default();
/// let doc = settings.save().unwrap();
///
/// let mut restored = Settings::default();
/// restored.load(&doc).unwrap();
/// assert_eq!(restored.props.get(&restored.volume), Some(&7));
/// ```
///
/// `Default` is what sequences and fixed arrays use to construct fresh
/// elements while loading, so registration must happen there, not in some
/// other constructor.
pub trait Record: Default + Clone + std::fmt::Debug + 'static {
    /// The record's property group.
    fn props(&self) -> &Group;

    /// Mutable access to the record's property group.
    fn props_mut(&mut self) -> &mut Group;

    /// Populates the record's registered fields from `doc`.
    fn load(&mut self, doc: &Document) -> Result<(), TreeError> {
        Node::load(self.props_mut(), doc)
    }

    /// Serializes the record's registered fields.
    fn save(&self) -> Result<Document, TreeError> {
        Node::save(self.props())
    }

    /// Copies field values from another record of the same type.
    fn assign_from(&mut self, other: &Self) -> Result<(), TreeError> {
        self.props_mut().assign_from(other.props())
    }
}

/// A bare `Group` is itself a record, so plain groups can nest inside other
/// groups through [`Group::add_record`] without a wrapper type. An anonymous
/// nested group saves flat and its fields merge straight into the parent's
/// document — the flattening composition across anonymous groups.
impl Record for Group {
    fn props(&self) -> &Group {
        self
    }

    fn props_mut(&mut self) -> &mut Group {
        self
    }
}

/// Adapter giving any [`Record`] a place in a group's `dyn Node` registry.
#[derive(Debug, Clone)]
pub struct RecordNode<R>(R);

impl<R: Record> RecordNode<R> {
    /// Wraps a record for registration.
    pub fn new(record: R) -> Self {
        Self(record)
    }

    /// The wrapped record.
    pub fn record(&self) -> &R {
        &self.0
    }

    /// Mutable access to the wrapped record.
    pub fn record_mut(&mut self) -> &mut R {
        &mut self.0
    }
}

impl<R: Record> Node for RecordNode<R> {
    fn name(&self) -> Option<&str> {
        self.0.props().name()
    }

    fn kind(&self) -> &'static str {
        "record"
    }

    fn clone_node(&self) -> Box<dyn Node> {
        Box::new(self.clone())
    }

    fn assign(&mut self, other: &dyn Node) -> Result<(), TreeError> {
        let other = other
            .as_any()
            .downcast_ref::<RecordNode<R>>()
            .ok_or_else(|| TreeError::mismatch("record", other.kind()))?;
        self.0.assign_from(&other.0)
    }

    fn load(&mut self, doc: &Document) -> Result<(), TreeError> {
        self.0.load(doc)
    }

    fn save(&self) -> Result<Document, TreeError> {
        self.0.save()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
