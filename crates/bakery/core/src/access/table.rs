//! Per-type field tables: the static stand-in for name-indexed introspection.

use super::value::{FieldKind, FieldValue};
use super::FieldError;

enum Access<T> {
    Bool(fn(&T) -> bool, fn(&mut T, bool)),
    Int(fn(&T) -> i64, fn(&mut T, i64)),
    Float(fn(&T) -> f64, fn(&mut T, f64)),
    Text(fn(&T) -> String, fn(&mut T, String)),
    Enum(&'static [&'static str], fn(&T) -> i64, fn(&mut T, i64)),
}

/// Getter/setter pair for one named field of `T`.
pub struct FieldAccessor<T> {
    name: &'static str,
    access: Access<T>,
}

impl<T> FieldAccessor<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> FieldKind {
        match &self.access {
            Access::Bool(..) => FieldKind::Bool,
            Access::Int(..) => FieldKind::Int,
            Access::Float(..) => FieldKind::Float,
            Access::Text(..) => FieldKind::Text,
            Access::Enum(variants, ..) => FieldKind::Enum(variants),
        }
    }

    fn read(&self, target: &T) -> FieldValue {
        match &self.access {
            Access::Bool(get, _) => FieldValue::Bool(get(target)),
            Access::Int(get, _) | Access::Enum(_, get, _) => FieldValue::Int(get(target)),
            Access::Float(get, _) => FieldValue::Float(get(target)),
            Access::Text(get, _) => FieldValue::Text(get(target)),
        }
    }

    /// Writes an already-coerced value. Returns false if the variant does not
    /// match the accessor, which cannot happen for values produced by
    /// [`FieldKind::coerce`] on this accessor's kind.
    fn write(&self, target: &mut T, value: FieldValue) -> bool {
        match (&self.access, value) {
            (Access::Bool(_, set), FieldValue::Bool(v)) => set(target, v),
            (Access::Int(_, set), FieldValue::Int(v)) | (Access::Enum(_, _, set), FieldValue::Int(v)) => {
                set(target, v)
            }
            (Access::Float(_, set), FieldValue::Float(v)) => set(target, v),
            (Access::Text(_, set), FieldValue::Text(v)) => set(target, v),
            _ => return false,
        }
        true
    }
}

/// Name → accessor table for a patchable type, built once per type.
///
/// Lookup tries the exact name first and then an ASCII case-insensitive
/// match, so configs written against the host's field names (`typeID`,
/// `UseDurability`, ...) resolve regardless of casing.
pub struct FieldTable<T> {
    type_name: &'static str,
    fields: Vec<FieldAccessor<T>>,
}

impl<T> FieldTable<T> {
    pub fn builder(type_name: &'static str) -> FieldTableBuilder<T> {
        FieldTableBuilder {
            table: FieldTable {
                type_name,
                fields: Vec::new(),
            },
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn find(&self, name: &str) -> Option<&FieldAccessor<T>> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .or_else(|| {
                self.fields
                    .iter()
                    .find(|field| field.name.eq_ignore_ascii_case(name))
            })
    }

    pub fn get(&self, target: &T, name: &str) -> Option<FieldValue> {
        self.find(name).map(|field| field.read(target))
    }

    pub fn set(&self, target: &mut T, name: &str, value: FieldValue) -> Result<(), FieldError> {
        let field = self.find(name).ok_or_else(|| FieldError::NotFound {
            type_name: self.type_name,
            field: name.to_owned(),
        })?;

        let kind = field.kind();
        let found = value.kind_name();
        let mismatch = || FieldError::TypeMismatch {
            type_name: self.type_name,
            field: field.name,
            expected: kind.name(),
            found,
        };

        let coerced = kind.coerce(value).ok_or_else(mismatch)?;
        if field.write(target, coerced) {
            Ok(())
        } else {
            Err(mismatch())
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|field| field.name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Builder for [`FieldTable`]. Accessors are plain function pointers, so
/// non-capturing closures can be passed directly.
pub struct FieldTableBuilder<T> {
    table: FieldTable<T>,
}

impl<T> FieldTableBuilder<T> {
    pub fn boolean(self, name: &'static str, get: fn(&T) -> bool, set: fn(&mut T, bool)) -> Self {
        self.push(name, Access::Bool(get, set))
    }

    pub fn int(self, name: &'static str, get: fn(&T) -> i64, set: fn(&mut T, i64)) -> Self {
        self.push(name, Access::Int(get, set))
    }

    pub fn float(self, name: &'static str, get: fn(&T) -> f64, set: fn(&mut T, f64)) -> Self {
        self.push(name, Access::Float(get, set))
    }

    pub fn text(self, name: &'static str, get: fn(&T) -> String, set: fn(&mut T, String)) -> Self {
        self.push(name, Access::Text(get, set))
    }

    pub fn enumeration(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        get: fn(&T) -> i64,
        set: fn(&mut T, i64),
    ) -> Self {
        self.push(name, Access::Enum(variants, get, set))
    }

    pub fn build(self) -> FieldTable<T> {
        self.table
    }

    fn push(mut self, name: &'static str, access: Access<T>) -> Self {
        debug_assert!(
            self.table.find(name).is_none(),
            "duplicate field {name} on {}",
            self.table.type_name
        );
        self.table.fields.push(FieldAccessor { name, access });
        self
    }
}
