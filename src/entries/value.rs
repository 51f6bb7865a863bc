use chrono::{DateTime, Utc};

use super::refs::EntityRef;

/// A field value retrieved by name.
///
/// The records expose typed struct fields for code that knows the concrete
/// type; [`FieldValue`] backs the by-name lookup surface
/// ([`SemImage::field`](super::SemImage::field) and friends) that generic
/// host-facing code uses. Lookup of an unset field returns `None`, never a
/// default value wrapped in one of these variants.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// 64-bit floating point quantity.
    Float(f64),
    /// Integer quantity.
    Int(i64),
    /// Boolean flag.
    Bool(bool),
    /// Free text.
    Text(String),
    /// Capture timestamp.
    Timestamp(DateTime<Utc>),
    /// Single entity reference.
    Reference(EntityRef),
    /// Ordered list of entity references.
    References(Vec<EntityRef>),
}

impl FieldValue {
    /// Returns the float value, if this is a [`FieldValue::Float`].
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the integer value, if this is a [`FieldValue::Int`].
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the boolean value, if this is a [`FieldValue::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the text value, if this is a [`FieldValue::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the timestamp, if this is a [`FieldValue::Timestamp`].
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the single reference, if this is a [`FieldValue::Reference`].
    pub fn as_reference(&self) -> Option<&EntityRef> {
        match self {
            Self::Reference(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the reference list, if this is a [`FieldValue::References`].
    pub fn as_references(&self) -> Option<&[EntityRef]> {
        match self {
            Self::References(v) => Some(v),
            _ => None,
        }
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}
