//! Scalar leaf nodes.

use std::any::{Any, type_name};
use std::fmt;
use std::ops::{Deref, DerefMut};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Map;

use crate::Document;
use crate::document::document_kind;
use crate::tree::{Node, TreeError, strip_wrapper};

/// Types a [`Scalar`] can wrap.
///
/// Anything serde can move through a JSON document qualifies: the primitive
/// numeric types, `bool`, `String`, and any owned `serde` type the caller
/// wants to treat as a single leaf value.
pub trait ScalarValue: Serialize + DeserializeOwned + Clone + Default + fmt::Debug + 'static {}

impl<T> ScalarValue for T where
    T: Serialize + DeserializeOwned + Clone + Default + fmt::Debug + 'static
{
}

/// A leaf node wrapping a single value of type `T`.
///
/// Scalars are always named: the name is the key addressing the value in the
/// enclosing document, and a scalar with nothing to address it could be
/// neither loaded nor saved. Requiring the name at construction turns that
/// whole error class into a compile-time/API-shape guarantee.
///
/// Most code never builds a `Scalar` directly — [`Group::add`](super::Group::add)
/// does it as part of registration — but the type is public for standalone
/// use:
///
/// ```
/// use proptree::{Node, Scalar};
/// use serde_json::json;
///
/// let mut volume = Scalar::new("Volume", 7_i64);
/// assert_eq!(volume.save().unwrap(), json!({"Volume": 7}));
///
/// volume.load(&json!(11)).unwrap();
/// assert_eq!(*volume.value(), 11);
/// ```
#[derive(Debug, Clone)]
pub struct Scalar<T> {
    name: String,
    value: T,
}

impl<T: ScalarValue> Scalar<T> {
    /// Creates a named scalar holding `value` as its initial/default value.
    pub fn new(name: impl Into<String>, value: T) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// The wrapped value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Mutable access to the wrapped value.
    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Replaces the wrapped value.
    pub fn set(&mut self, value: T) {
        self.value = value;
    }
}

impl<T: ScalarValue> Node for Scalar<T> {
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn kind(&self) -> &'static str {
        "scalar"
    }

    fn clone_node(&self) -> Box<dyn Node> {
        Box::new(self.clone())
    }

    fn assign(&mut self, other: &dyn Node) -> Result<(), TreeError> {
        let other = other
            .as_any()
            .downcast_ref::<Scalar<T>>()
            .ok_or_else(|| TreeError::mismatch(format!("scalar<{}>", type_name::<T>()), other.kind()))?;
        self.value = other.value.clone();
        Ok(())
    }

    fn load(&mut self, doc: &Document) -> Result<(), TreeError> {
        let doc = strip_wrapper(&self.name, doc);
        // Decode into a temporary so a mismatched document leaves the old
        // value intact.
        let value: T = serde_json::from_value(doc.clone())
            .map_err(|_| TreeError::mismatch(type_name::<T>(), document_kind(doc)))?;
        self.value = value;
        Ok(())
    }

    fn save(&self) -> Result<Document, TreeError> {
        let value = serde_json::to_value(&self.value)?;
        let mut out = Map::new();
        out.insert(self.name.clone(), value);
        Ok(Document::Object(out))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl<T: ScalarValue> Deref for Scalar<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: ScalarValue> DerefMut for Scalar<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T: ScalarValue + PartialEq> PartialEq<T> for Scalar<T> {
    fn eq(&self, other: &T) -> bool {
        self.value == *other
    }
}
