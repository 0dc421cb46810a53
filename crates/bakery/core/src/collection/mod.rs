//! Collection Adapter: a uniform bounded-list view over non-conforming collections.
//!
//! Host collections (an item's tag set, its slot container) only follow a
//! loose convention: an `Add` method, a `Count` accessor, and usually an
//! enumerator. [`CollectionAdapter`] resolves those by name from a
//! [`CollectionShape`] when wrapping and exposes the [`BoundedList`]
//! capability on top.
//!
//! # Failure policy
//!
//! - Index-based writes (`set`, `insert`, `remove_at`) are structurally
//!   impossible and always return [`CollectionError::Unsupported`].
//! - Everything else degrades: reads return empty/`None`/0, writes are logged
//!   and ignored. The wrapped object's shape is only asserted at wrap time.

mod shape;

pub use shape::{CollectionShape, InvokeError, InvokeResult, Method};

use tracing::{debug, warn};

use crate::error::{BakeryError, ErrorSeverity};

/// Errors raised by the collection adapter.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CollectionError {
    /// The operation has no primitive on the wrapped collection.
    #[error("{operation} is not supported on wrapped {type_name}")]
    Unsupported {
        type_name: &'static str,
        operation: &'static str,
    },

    /// A mandatory method was missing (or had the wrong signature) at wrap time.
    #[error("{type_name} does not expose a usable '{method}' method")]
    MissingMethod {
        type_name: &'static str,
        method: &'static str,
    },

    /// The collection refused to take a value.
    #[error("adding to {type_name} failed")]
    AddFailed { type_name: &'static str },
}

impl BakeryError for CollectionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Unsupported { .. } => ErrorSeverity::Unsupported,
            Self::MissingMethod { .. } | Self::AddFailed { .. } => ErrorSeverity::LookupMiss,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Unsupported { .. } => "COLLECTION_UNSUPPORTED",
            Self::MissingMethod { .. } => "COLLECTION_MISSING_METHOD",
            Self::AddFailed { .. } => "COLLECTION_ADD_FAILED",
        }
    }
}

/// Uniform list capability over a collection with no native list interface.
pub trait BoundedList<T> {
    fn count(&self) -> usize;

    /// Element at `index` in the collection's own order.
    fn get(&self, index: usize) -> Option<T>;

    /// Always [`CollectionError::Unsupported`].
    fn set(&mut self, index: usize, value: T) -> Result<(), CollectionError>;

    /// Appends `value`, returning its index, or `None` if the collection refused it.
    fn add(&mut self, value: T) -> Option<usize>;

    fn contains(&self, value: &T) -> bool;

    fn index_of(&self, value: &T) -> Option<usize>;

    fn clear(&mut self);

    fn remove(&mut self, value: &T);

    /// Always [`CollectionError::Unsupported`].
    fn insert(&mut self, index: usize, value: T) -> Result<(), CollectionError>;

    /// Always [`CollectionError::Unsupported`].
    fn remove_at(&mut self, index: usize) -> Result<(), CollectionError>;

    /// Snapshot of the elements in iteration order.
    fn to_vec(&self) -> Vec<T>;
}

/// Borrowing adapter implementing [`BoundedList`] for any shaped collection.
pub struct CollectionAdapter<'a, C, T> {
    target: &'a mut C,
    shape: &'a CollectionShape<C, T>,
    add: fn(&mut C, T) -> InvokeResult<()>,
    count: fn(&C) -> InvokeResult<usize>,
}

impl<'a, C, T> CollectionAdapter<'a, C, T>
where
    T: Clone + PartialEq,
{
    /// Wraps `target`, resolving `Add` and `Count` from `shape`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::MissingMethod`] if either is absent or was
    /// declared with a different signature.
    pub fn wrap(
        target: &'a mut C,
        shape: &'a CollectionShape<C, T>,
    ) -> Result<Self, CollectionError> {
        let add = match shape.lookup("Add") {
            Some(Method::Add(add)) => *add,
            _ => return Err(missing(shape, "Add")),
        };
        let count = match shape.lookup("Count") {
            Some(Method::Count(count)) => *count,
            _ => return Err(missing(shape, "Count")),
        };

        Ok(Self {
            target,
            shape,
            add,
            count,
        })
    }

    pub fn type_name(&self) -> &'static str {
        self.shape.type_name()
    }

    /// Iterates over a snapshot of the elements.
    pub fn iter(&self) -> std::vec::IntoIter<T> {
        self.to_vec().into_iter()
    }

    fn unsupported(&self, operation: &'static str) -> CollectionError {
        CollectionError::Unsupported {
            type_name: self.type_name(),
            operation,
        }
    }

    fn log_failure(&self, operation: &'static str, error: &InvokeError) {
        warn!(
            target: "bakery::collection",
            collection = self.type_name(),
            operation,
            "{error}"
        );
    }
}

impl<C, T> BoundedList<T> for CollectionAdapter<'_, C, T>
where
    T: Clone + PartialEq,
{
    fn count(&self) -> usize {
        (self.count)(&*self.target).unwrap_or_else(|error| {
            self.log_failure("Count", &error);
            0
        })
    }

    fn get(&self, index: usize) -> Option<T> {
        if let Some(Method::Item(indexer)) = self.shape.lookup("Item") {
            return indexer(&*self.target, index).unwrap_or_else(|error| {
                self.log_failure("Item", &error);
                None
            });
        }
        self.to_vec().into_iter().nth(index)
    }

    fn set(&mut self, _index: usize, _value: T) -> Result<(), CollectionError> {
        Err(self.unsupported("set by index"))
    }

    fn add(&mut self, value: T) -> Option<usize> {
        match (self.add)(&mut *self.target, value) {
            Ok(()) => self.count().checked_sub(1),
            Err(error) => {
                self.log_failure("Add", &error);
                None
            }
        }
    }

    fn contains(&self, value: &T) -> bool {
        self.index_of(value).is_some()
    }

    fn index_of(&self, value: &T) -> Option<usize> {
        self.to_vec().iter().position(|item| item == value)
    }

    fn clear(&mut self) {
        let clear = match self.shape.lookup("Clear") {
            Some(Method::Clear(clear)) => *clear,
            _ => {
                warn!(
                    target: "bakery::collection",
                    collection = self.type_name(),
                    "no Clear method, clear ignored"
                );
                return;
            }
        };
        if let Err(error) = clear(&mut *self.target) {
            self.log_failure("Clear", &error);
        }
    }

    fn remove(&mut self, value: &T) {
        let remove = match self.shape.lookup("Remove") {
            Some(Method::Remove(remove)) => *remove,
            _ => {
                warn!(
                    target: "bakery::collection",
                    collection = self.type_name(),
                    "no Remove method, remove ignored"
                );
                return;
            }
        };
        match remove(&mut *self.target, value) {
            Ok(true) => {}
            Ok(false) => debug!(
                target: "bakery::collection",
                collection = self.type_name(),
                "remove: value not present"
            ),
            Err(error) => self.log_failure("Remove", &error),
        }
    }

    fn insert(&mut self, _index: usize, _value: T) -> Result<(), CollectionError> {
        Err(self.unsupported("insert at index"))
    }

    fn remove_at(&mut self, _index: usize) -> Result<(), CollectionError> {
        Err(self.unsupported("remove at index"))
    }

    fn to_vec(&self) -> Vec<T> {
        match self.shape.lookup("GetEnumerator") {
            Some(Method::GetEnumerator(enumerate)) => {
                enumerate(&*self.target).unwrap_or_else(|error| {
                    self.log_failure("GetEnumerator", &error);
                    Vec::new()
                })
            }
            _ => {
                debug!(
                    target: "bakery::collection",
                    collection = self.type_name(),
                    "no enumerator, treating as empty"
                );
                Vec::new()
            }
        }
    }
}

impl<C, T> IntoIterator for &CollectionAdapter<'_, C, T>
where
    T: Clone + PartialEq,
{
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn missing<C, T>(shape: &CollectionShape<C, T>, method: &'static str) -> CollectionError {
    CollectionError::MissingMethod {
        type_name: shape.type_name(),
        method,
    }
}
