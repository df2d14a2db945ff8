//! Typed handles into a group's registry.
//!
//! Registering a child with [`Group::add`](super::Group::add) and friends
//! returns a handle instead of a live reference into the child's storage.
//! The handle is just the registration key plus the child's type, so holding
//! one never borrows the group: the owning composite stores its handles at
//! construction and goes through [`Group::get`](super::Group::get) /
//! [`Group::get_mut`](super::Group::get_mut) whenever it touches a value.
//!
//! This is what makes re-registration and removal safe. A handle left over
//! from a replaced or removed child simply resolves to `None` (or to the new
//! child, if one of the same name and type was re-added) — there is no
//! reference to dangle.

use std::fmt;
use std::marker::PhantomData;

/// Handle to a scalar child of type `T`.
pub struct Field<T> {
    name: String,
    _marker: PhantomData<fn() -> T>,
}

/// Handle to a nested record child of type `R`.
pub struct RecordField<R> {
    name: String,
    _marker: PhantomData<fn() -> R>,
}

/// Handle to a sequence child with elements of type `R`.
pub struct SeqField<R> {
    name: String,
    _marker: PhantomData<fn() -> R>,
}

/// Handle to a fixed-array child with `N` slots of type `R`.
pub struct ArrayField<R, const N: usize> {
    name: String,
    _marker: PhantomData<fn() -> R>,
}

macro_rules! handle_impls {
    ($handle:ident) => {
        impl<T> $handle<T> {
            pub(crate) fn new(name: String) -> Self {
                Self {
                    name,
                    _marker: PhantomData,
                }
            }

            /// The registration key this handle resolves against.
            pub fn name(&self) -> &str {
                &self.name
            }
        }

        impl<T> Clone for $handle<T> {
            fn clone(&self) -> Self {
                Self::new(self.name.clone())
            }
        }

        impl<T> fmt::Debug for $handle<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($handle))
                    .field("name", &self.name)
                    .finish()
            }
        }
    };
}

handle_impls!(Field);
handle_impls!(RecordField);
handle_impls!(SeqField);

impl<R, const N: usize> ArrayField<R, N> {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    /// The registration key this handle resolves against.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<R, const N: usize> Clone for ArrayField<R, N> {
    fn clone(&self) -> Self {
        Self::new(self.name.clone())
    }
}

impl<R, const N: usize> fmt::Debug for ArrayField<R, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayField")
            .field("name", &self.name)
            .field("len", &N)
            .finish()
    }
}
