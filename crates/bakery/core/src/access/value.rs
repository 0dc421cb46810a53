//! Dynamic field values and best-effort coercion between field kinds.

use core::fmt;

/// A value read from or written to a named field.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// Short name of the value's variant, used in mismatch reports.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
        }
    }

    /// Numeric view of the value (ints widen to floats).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Declared kind of a field in a [`FieldTable`](super::FieldTable).
///
/// Enum fields store the variant index; their names are used to coerce text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Bool,
    Int,
    Float,
    Text,
    Enum(&'static [&'static str]),
}

impl FieldKind {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Text => "text",
            Self::Enum(_) => "enum",
        }
    }

    /// Coerces `value` into the representation this kind stores.
    ///
    /// Supported conversions:
    /// - int → float (widening), integral float → int, bool ↔ int (0/1)
    /// - text → int/float/bool when it parses
    /// - text → enum by case-insensitive variant name, int → enum when in range
    /// - anything → text
    ///
    /// Returns `None` when no conversion applies.
    pub fn coerce(&self, value: FieldValue) -> Option<FieldValue> {
        match (self, value) {
            (Self::Bool, FieldValue::Bool(v)) => Some(FieldValue::Bool(v)),
            (Self::Bool, FieldValue::Int(v @ (0 | 1))) => Some(FieldValue::Bool(v == 1)),
            (Self::Bool, FieldValue::Text(s)) => s.trim().parse().ok().map(FieldValue::Bool),

            (Self::Int, FieldValue::Int(v)) => Some(FieldValue::Int(v)),
            (Self::Int, FieldValue::Bool(v)) => Some(FieldValue::Int(i64::from(v))),
            (Self::Int, FieldValue::Float(v)) => integral(v).map(FieldValue::Int),
            (Self::Int, FieldValue::Text(s)) => s.trim().parse().ok().map(FieldValue::Int),

            (Self::Float, FieldValue::Float(v)) => Some(FieldValue::Float(v)),
            (Self::Float, FieldValue::Int(v)) => Some(FieldValue::Float(v as f64)),
            (Self::Float, FieldValue::Text(s)) => s.trim().parse().ok().map(FieldValue::Float),

            (Self::Text, value) => Some(FieldValue::Text(value.to_string())),

            (Self::Enum(variants), FieldValue::Text(s)) => variants
                .iter()
                .position(|variant| variant.eq_ignore_ascii_case(s.trim()))
                .map(|index| FieldValue::Int(index as i64)),
            (Self::Enum(variants), FieldValue::Int(v)) => in_range(v, variants.len()),
            (Self::Enum(variants), FieldValue::Float(v)) => {
                integral(v).and_then(|v| in_range(v, variants.len()))
            }

            _ => None,
        }
    }
}

fn integral(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

fn in_range(index: i64, len: usize) -> Option<FieldValue> {
    usize::try_from(index)
        .ok()
        .filter(|i| *i < len)
        .map(|_| FieldValue::Int(index))
}
