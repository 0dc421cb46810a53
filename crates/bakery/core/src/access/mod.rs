//! Field Accessor: get/set named fields on live objects the engine does not own.
//!
//! Patching works against the host's own field names rather than compiled
//! references. Every patchable type publishes a [`FieldTable`] (built once,
//! lazily) through the [`Fields`] trait, and the blanket [`Reflect`] impl turns
//! that into an object-safe surface so capability modules of different types
//! can be configured uniformly.
//!
//! Failures are reported, never raised as hard faults: one malformed field in
//! a config must not abort the rest of the augmentation. Writes are
//! fire-and-forget; nothing here is transactional.

mod table;
mod value;

pub use table::{FieldAccessor, FieldTable, FieldTableBuilder};
pub use value::{FieldKind, FieldValue};

use tracing::warn;

use crate::error::{BakeryError, ErrorSeverity};

/// Errors raised while reading or writing a named field.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("field '{field}' not found on {type_name}")]
    NotFound {
        type_name: &'static str,
        field: String,
    },

    #[error("field '{field}' on {type_name} expects {expected}, got {found}")]
    TypeMismatch {
        type_name: &'static str,
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

impl BakeryError for FieldError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotFound { .. } => ErrorSeverity::LookupMiss,
            Self::TypeMismatch { .. } => ErrorSeverity::MalformedConfig,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "FIELD_NOT_FOUND",
            Self::TypeMismatch { .. } => "FIELD_TYPE_MISMATCH",
        }
    }
}

/// Types that publish a static field table.
pub trait Fields: Sized + 'static {
    fn field_table() -> &'static FieldTable<Self>;
}

/// Object-safe, name-indexed access to a value's fields.
pub trait Reflect {
    fn type_name(&self) -> &'static str;

    fn get_field(&self, name: &str) -> Option<FieldValue>;

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), FieldError>;

    fn field_names(&self) -> Vec<&'static str>;
}

impl<T: Fields> Reflect for T {
    fn type_name(&self) -> &'static str {
        T::field_table().type_name()
    }

    fn get_field(&self, name: &str) -> Option<FieldValue> {
        T::field_table().get(self, name)
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), FieldError> {
        T::field_table().set(self, name, value)
    }

    fn field_names(&self) -> Vec<&'static str> {
        T::field_table().names().collect()
    }
}

/// Reads `name` from `target`, or `None` if no such field exists.
pub fn get(target: &dyn Reflect, name: &str) -> Option<FieldValue> {
    target.get_field(name)
}

/// Writes `value` into `name` on `target` after best-effort coercion.
pub fn set(
    target: &mut dyn Reflect,
    name: &str,
    value: impl Into<FieldValue>,
) -> Result<(), FieldError> {
    target.set_field(name, value.into())
}

/// Fire-and-forget write: logs the failure and reports whether it landed.
pub fn set_logged(target: &mut dyn Reflect, name: &str, value: impl Into<FieldValue>) -> bool {
    match set(target, name, value) {
        Ok(()) => true,
        Err(error) => {
            warn!(
                target: "bakery::access",
                type_name = target.type_name(),
                field = name,
                code = error.error_code(),
                "{error}"
            );
            false
        }
    }
}
