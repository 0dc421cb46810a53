//! Named method tables describing how to drive an opaque collection type.

use core::fmt;

/// Failure raised by a collection method itself.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct InvokeError(pub String);

impl InvokeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

pub type InvokeResult<R> = Result<R, InvokeError>;

/// One method a collection type exposes, keyed by its conventional name.
///
/// | Name            | Variant         |
/// |-----------------|-----------------|
/// | `Add`           | [`Method::Add`] |
/// | `Count`         | [`Method::Count`] |
/// | `Item`          | [`Method::Item`] (indexer) |
/// | `GetEnumerator` | [`Method::GetEnumerator`] |
/// | `Clear`         | [`Method::Clear`] |
/// | `Remove`        | [`Method::Remove`] |
pub enum Method<C, T> {
    Add(fn(&mut C, T) -> InvokeResult<()>),
    Count(fn(&C) -> InvokeResult<usize>),
    Item(fn(&C, usize) -> InvokeResult<Option<T>>),
    GetEnumerator(fn(&C) -> InvokeResult<Vec<T>>),
    Clear(fn(&mut C) -> InvokeResult<()>),
    Remove(fn(&mut C, &T) -> InvokeResult<bool>),
}

impl<C, T> Method<C, T> {
    pub const fn signature(&self) -> &'static str {
        match self {
            Self::Add(_) => "Add(T)",
            Self::Count(_) => "Count",
            Self::Item(_) => "Item[usize]",
            Self::GetEnumerator(_) => "GetEnumerator()",
            Self::Clear(_) => "Clear()",
            Self::Remove(_) => "Remove(&T)",
        }
    }
}

/// The method surface of a collection type `C` holding `T`, looked up by name.
///
/// Shapes are declared once per collection type (typically in a `LazyLock`)
/// and only assert the collection's shape loosely: the adapter resolves the
/// mandatory methods when wrapping and everything else per call.
pub struct CollectionShape<C, T> {
    type_name: &'static str,
    methods: Vec<(&'static str, Method<C, T>)>,
}

impl<C, T> CollectionShape<C, T> {
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            methods: Vec::new(),
        }
    }

    /// Declares `method` under `name`, replacing an earlier declaration.
    pub fn with(mut self, name: &'static str, method: Method<C, T>) -> Self {
        self.methods.retain(|(existing, _)| *existing != name);
        self.methods.push((name, method));
        self
    }

    pub fn lookup(&self, name: &str) -> Option<&Method<C, T>> {
        self.methods
            .iter()
            .find(|(existing, _)| *existing == name)
            .map(|(_, method)| method)
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn method_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.methods.iter().map(|(name, _)| *name)
    }
}

impl<C, T> fmt::Debug for CollectionShape<C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionShape")
            .field("type_name", &self.type_name)
            .field("methods", &self.method_names().collect::<Vec<_>>())
            .finish()
    }
}
