//! Lookup tables mapping foreign keys to display names

use crate::core::field::FieldValue;
use crate::core::record::Record;
use std::collections::HashMap;

/// Normalized key of a lookup table entry
///
/// Foreign keys arrive as integers, UUIDs or numeric strings depending on the
/// endpoint, so every key is normalized to its textual form. `Integer(7)`,
/// `Float(7.0)` and `String("7")` all address the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey(String);

impl LookupKey {
    /// Normalize a field value into a key; null and blank values have none
    pub fn from_value(value: &FieldValue) -> Option<Self> {
        let text = match value {
            FieldValue::Null => return None,
            FieldValue::Float(f) if f.fract() == 0.0 && f.is_finite() => (*f as i64).to_string(),
            FieldValue::String(s) => s.trim().to_string(),
            other => other.to_text(),
        };

        if text.is_empty() { None } else { Some(Self(text)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Id to display-name mapping built from a side-loaded reference collection
///
/// Tables are rebuilt whenever the backing collection is refetched and are
/// only ever read by the resolver.
#[derive(Debug, Clone, Default)]
pub struct LookupTable {
    names: HashMap<LookupKey, String>,
}

impl LookupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(key, name)` pairs; later duplicates win
    pub fn from_pairs<K, N, I>(pairs: I) -> Self
    where
        K: Into<FieldValue>,
        N: Into<String>,
        I: IntoIterator<Item = (K, N)>,
    {
        let mut table = Self::new();
        for (key, name) in pairs {
            table.insert(key, name);
        }
        table
    }

    /// Build a table from a fetched collection, reading the key and the
    /// display name from two of its fields
    pub fn from_records<R: Record>(records: &[R], key_field: &str, name_field: &str) -> Self {
        let mut table = Self::new();
        for record in records {
            let name = record.field_value(name_field).to_text();
            table.insert(record.field_value(key_field), name);
        }
        tracing::debug!(
            resource = R::resource_name(),
            entries = table.len(),
            "Built lookup table"
        );
        table
    }

    /// Insert an entry; keys that normalize to nothing are ignored
    pub fn insert(&mut self, key: impl Into<FieldValue>, name: impl Into<String>) {
        if let Some(key) = LookupKey::from_value(&key.into()) {
            self.names.insert(key, name.into());
        }
    }

    /// Display name for a foreign key value
    pub fn get(&self, key: &FieldValue) -> Option<&str> {
        let key = LookupKey::from_value(key)?;
        self.names.get(&key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Named lookup tables available to a view
#[derive(Debug, Clone, Default)]
pub struct LookupSet {
    tables: HashMap<String, LookupTable>,
}

impl LookupSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, table: LookupTable) -> Self {
        self.insert(name, table);
        self
    }

    /// Insert or replace a table, e.g. after its collection was refetched
    pub fn insert(&mut self, name: impl Into<String>, table: LookupTable) {
        self.tables.insert(name.into(), table);
    }

    pub fn get(&self, name: &str) -> Option<&LookupTable> {
        self.tables.get(name)
    }

    /// Resolve a foreign key through the named table
    pub fn name_of(&self, table: &str, key: &FieldValue) -> Option<&str> {
        self.get(table)?.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::DynamicRecord;

    #[test]
    fn test_key_normalization() {
        let table = LookupTable::from_pairs([(7_i64, "Tallinn")]);
        assert_eq!(table.get(&FieldValue::Integer(7)), Some("Tallinn"));
        assert_eq!(table.get(&FieldValue::Float(7.0)), Some("Tallinn"));
        assert_eq!(table.get(&FieldValue::from(" 7 ")), Some("Tallinn"));
        assert_eq!(table.get(&FieldValue::Integer(8)), None);
    }

    #[test]
    fn test_null_and_blank_keys_resolve_to_nothing() {
        let mut table = LookupTable::new();
        table.insert(FieldValue::Null, "ghost");
        table.insert("   ", "ghost");
        assert!(table.is_empty());
        assert_eq!(table.get(&FieldValue::Null), None);
    }

    #[test]
    fn test_from_records() {
        let locations = vec![
            DynamicRecord::new().with("id", 1).with("name", "Warehouse"),
            DynamicRecord::new().with("id", 2).with("name", "Office"),
        ];

        let table = LookupTable::from_records(&locations, "id", "name");
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&FieldValue::Integer(2)), Some("Office"));
    }

    #[test]
    fn test_lookup_set_replaces_tables() {
        let mut set = LookupSet::new().with("locations", LookupTable::from_pairs([(1, "Old")]));
        assert_eq!(set.name_of("locations", &FieldValue::Integer(1)), Some("Old"));

        set.insert("locations", LookupTable::from_pairs([(1, "New")]));
        assert_eq!(set.name_of("locations", &FieldValue::Integer(1)), Some("New"));
        assert_eq!(set.name_of("clients", &FieldValue::Integer(1)), None);
    }
}
