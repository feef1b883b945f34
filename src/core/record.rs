//! Record traits defining the row abstraction every list view works on

use crate::core::field::{FieldDef, FieldValue};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A row that can be sorted and filtered by field name.
///
/// Typed entities implement this through `impl_record!`, which also
/// declares their field schema. The sorting and filtering kernel only ever
/// reads records through `field_value`; it never mutates them.
pub trait Record: Clone + Send + Sync + 'static {
    /// The plural resource name used by the backend (e.g., "devices")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "device")
    fn resource_name_singular() -> &'static str;

    /// Declared fields of this record type
    fn schema() -> &'static [FieldDef];

    /// Get the value of a field by name
    ///
    /// Unknown fields yield `FieldValue::Null`; callers never have to deal
    /// with a missing-field error.
    fn field_value(&self, field: &str) -> FieldValue;

    /// Look up a declared field by name
    fn field_def(field: &str) -> Option<&'static FieldDef> {
        Self::schema().iter().find(|def| def.name == field)
    }

    /// Fields marked searchable in the schema
    fn searchable_fields() -> Vec<&'static str> {
        Self::schema()
            .iter()
            .filter(|def| def.searchable)
            .map(|def| def.name)
            .collect()
    }
}

/// A schemaless row, e.g. a JSON object fetched from an endpoint that has
/// no typed counterpart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DynamicRecord {
    fields: IndexMap<String, FieldValue>,
}

impl DynamicRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Field names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Parse a JSON object into a record
    ///
    /// Non-object values produce an empty record.
    pub fn from_json(value: serde_json::Value) -> Self {
        match serde_json::from_value(value) {
            Ok(record) => record,
            Err(e) => {
                tracing::trace!(error = %e, "Row is not a flat JSON object, using empty record");
                Self::default()
            }
        }
    }
}

impl Record for DynamicRecord {
    fn resource_name() -> &'static str {
        "records"
    }

    fn resource_name_singular() -> &'static str {
        "record"
    }

    fn schema() -> &'static [FieldDef] {
        &[]
    }

    fn field_value(&self, field: &str) -> FieldValue {
        self.fields.get(field).cloned().unwrap_or_default()
    }
}

/// A typed record carrying extra, pre-computed fields.
///
/// Derived values such as a device's last activity date are computed by the
/// view from related collections and attached here before sorting. Extra
/// fields shadow fields of the same name on the inner record.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotated<R> {
    pub record: R,
    extra: IndexMap<String, FieldValue>,
}

impl<R> Annotated<R> {
    pub fn new(record: R) -> Self {
        Self {
            record,
            extra: IndexMap::new(),
        }
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.extra.insert(field.into(), value.into());
        self
    }

    pub fn derived(&self, field: &str) -> Option<&FieldValue> {
        self.extra.get(field)
    }

    pub fn into_inner(self) -> R {
        self.record
    }
}

impl<R: Record> Record for Annotated<R> {
    fn resource_name() -> &'static str {
        R::resource_name()
    }

    fn resource_name_singular() -> &'static str {
        R::resource_name_singular()
    }

    fn schema() -> &'static [FieldDef] {
        R::schema()
    }

    fn field_value(&self, field: &str) -> FieldValue {
        match self.extra.get(field) {
            Some(value) => value.clone(),
            None => self.record.field_value(field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dynamic_record_missing_field_is_null() {
        let record = DynamicRecord::new().with("name", "Beta");
        assert_eq!(record.field_value("name"), FieldValue::from("Beta"));
        assert!(record.field_value("nope").is_null());
    }

    #[test]
    fn test_dynamic_record_from_json() {
        let record = DynamicRecord::from_json(json!({"id": 1, "name": "Alpha", "date": null}));
        assert_eq!(record.field_value("id"), FieldValue::Integer(1));
        assert!(record.field_value("date").is_null());
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["id", "name", "date"]);
    }

    #[test]
    fn test_dynamic_record_from_non_object() {
        let record = DynamicRecord::from_json(json!([1, 2, 3]));
        assert_eq!(record.keys().count(), 0);
    }

    #[test]
    fn test_annotated_shadows_inner_fields() {
        let inner = DynamicRecord::new().with("name", "Beta").with("score", 1);
        let annotated = Annotated::new(inner).with("score", 9).with("extra", true);

        assert_eq!(annotated.field_value("name"), FieldValue::from("Beta"));
        assert_eq!(annotated.field_value("score"), FieldValue::Integer(9));
        assert_eq!(annotated.field_value("extra"), FieldValue::Boolean(true));
        assert_eq!(annotated.derived("extra"), Some(&FieldValue::Boolean(true)));
    }
}
