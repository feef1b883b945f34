//! Field value types and per-entity field schemas

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A polymorphic field value that can hold different types
///
/// Backend rows arrive as JSON; the untagged representation lets a
/// `serde_json::Value` object map straight onto a set of `FieldValue`s.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
    #[default]
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a float, widening integers
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Float(f) if f.is_finite() => Some(*f),
            _ => None,
        }
    }

    /// Get the value as a boolean
    ///
    /// Accepts `"true"`/`"false"` strings and `0`/`1` integers, which is how
    /// several backend endpoints encode flags.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            FieldValue::Integer(0) => Some(false),
            FieldValue::Integer(1) => Some(true),
            FieldValue::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Get the value as a UUID if possible
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            FieldValue::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Null, or a string containing only whitespace
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Render the value the way a list cell would show it
    ///
    /// `Null` renders as the empty string.
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::String(s) => s.clone(),
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Float(f) => f.to_string(),
            FieldValue::Boolean(b) => b.to_string(),
            FieldValue::Uuid(u) => u.to_string(),
            FieldValue::DateTime(dt) => dt.to_rfc3339(),
            FieldValue::Null => String::new(),
        }
    }

    /// Equality used by exact-match filters
    ///
    /// Integers and floats compare numerically; every other pairing falls
    /// back to structural equality.
    pub fn matches(&self, other: &FieldValue) -> bool {
        match (self, other) {
            (FieldValue::Integer(_) | FieldValue::Float(_), FieldValue::Integer(_) | FieldValue::Float(_)) => {
                self.as_f64() == other.as_f64()
            }
            _ => self == other,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        FieldValue::String(value.clone())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(value as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Integer(value as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<Uuid> for FieldValue {
    fn from(value: Uuid) -> Self {
        FieldValue::Uuid(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::DateTime(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// What kind of data a declared field holds
///
/// The kind drives value resolution: dates are ordered chronologically,
/// numerics numerically, references through a lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Numeric,
    Date,
    Boolean,
    /// Foreign key whose display name lives in the named lookup table
    Reference { table: &'static str },
}

/// One entry of an entity's declared field schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name as exposed by `Record::field_value`
    pub name: &'static str,

    /// Data kind of the field
    pub kind: FieldKind,

    /// Whether free-text search looks at this field by default
    pub searchable: bool,
}

impl FieldDef {
    pub const fn new(name: &'static str, kind: FieldKind, searchable: bool) -> Self {
        Self {
            name,
            kind,
            searchable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_string() {
        let value = FieldValue::String("test".to_string());
        assert_eq!(value.as_string(), Some("test"));
        assert_eq!(value.as_integer(), None);
        assert!(!value.is_null());
    }

    #[test]
    fn test_field_value_integer() {
        let value = FieldValue::Integer(42);
        assert_eq!(value.as_integer(), Some(42));
        assert_eq!(value.as_f64(), Some(42.0));
        assert_eq!(value.as_string(), None);
    }

    #[test]
    fn test_field_value_null() {
        let value = FieldValue::Null;
        assert!(value.is_null());
        assert!(value.is_blank());
        assert_eq!(value.to_text(), "");
    }

    #[test]
    fn test_nan_is_not_a_number() {
        assert_eq!(FieldValue::Float(f64::NAN).as_f64(), None);
    }

    #[test]
    fn test_bool_coercions() {
        assert_eq!(FieldValue::from("TRUE").as_bool(), Some(true));
        assert_eq!(FieldValue::Integer(0).as_bool(), Some(false));
        assert_eq!(FieldValue::Integer(7).as_bool(), None);
        assert_eq!(FieldValue::from("yes").as_bool(), None);
    }

    #[test]
    fn test_numeric_match_across_types() {
        assert!(FieldValue::Integer(3).matches(&FieldValue::Float(3.0)));
        assert!(!FieldValue::Integer(3).matches(&FieldValue::from("3")));
        assert!(FieldValue::from("a").matches(&FieldValue::from("a")));
    }

    #[test]
    fn test_from_option() {
        assert_eq!(FieldValue::from(None::<i64>), FieldValue::Null);
        assert_eq!(FieldValue::from(Some(5_i64)), FieldValue::Integer(5));
    }

    #[test]
    fn test_deserialize_from_json() {
        let value: FieldValue = serde_json::from_str("12").unwrap();
        assert_eq!(value, FieldValue::Integer(12));
        let value: FieldValue = serde_json::from_str("null").unwrap();
        assert_eq!(value, FieldValue::Null);
        let value: FieldValue = serde_json::from_str("\"Alpha\"").unwrap();
        assert_eq!(value, FieldValue::from("Alpha"));
        let value: FieldValue = serde_json::from_str("1.5").unwrap();
        assert_eq!(value, FieldValue::Float(1.5));
    }
}
