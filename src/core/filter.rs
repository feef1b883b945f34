//! Filter criteria applied to records before sorting

use crate::core::field::FieldValue;
use crate::core::record::Record;
use crate::core::resolver::ValueResolver;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The active filter constraints of a list view
///
/// All criteria are ANDed. An absent criterion constrains nothing: empty
/// text matches every record, and an exact-match or flag entry whose value
/// is `None` (or `FieldValue::Null`) is the "All" choice of a dropdown, not
/// a filter that matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Free text matched case-insensitively against the searchable fields
    #[serde(default)]
    pub text: String,

    /// Field values records must equal (e.g., classifier ids)
    #[serde(default)]
    pub exact_matches: IndexMap<String, Option<FieldValue>>,

    /// Boolean fields records must equal
    #[serde(default)]
    pub boolean_flags: IndexMap<String, Option<bool>>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_exact(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set_exact(field, Some(value.into()));
        self
    }

    pub fn with_flag(mut self, field: impl Into<String>, value: bool) -> Self {
        self.set_flag(field, Some(value));
        self
    }

    /// Set or clear (`None`) an exact-match constraint
    pub fn set_exact(&mut self, field: impl Into<String>, value: Option<FieldValue>) {
        self.exact_matches.insert(field.into(), value);
    }

    /// Set or clear (`None`) a boolean constraint
    pub fn set_flag(&mut self, field: impl Into<String>, value: Option<bool>) {
        self.boolean_flags.insert(field.into(), value);
    }

    /// Whether no criterion constrains anything
    pub fn is_unconstrained(&self) -> bool {
        self.text.trim().is_empty()
            && self
                .exact_matches
                .values()
                .all(|v| v.as_ref().is_none_or(FieldValue::is_null))
            && self.boolean_flags.values().all(Option::is_none)
    }

    /// Test a record against every criterion, stopping at the first failure
    pub fn matches<R: Record>(&self, record: &R, resolver: &ValueResolver<'_, R>) -> bool {
        self.matches_exact(record) && self.matches_flags(record) && self.matches_text(record, resolver)
    }

    fn matches_text<R: Record>(&self, record: &R, resolver: &ValueResolver<'_, R>) -> bool {
        let needle = self.text.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        resolver
            .searchable_fields()
            .iter()
            .any(|field| resolver.display_text(record, field).to_lowercase().contains(&needle))
    }

    fn matches_exact<R: Record>(&self, record: &R) -> bool {
        self.exact_matches.iter().all(|(field, expected)| match expected {
            None | Some(FieldValue::Null) => true,
            Some(expected) => record.field_value(field).matches(expected),
        })
    }

    fn matches_flags<R: Record>(&self, record: &R) -> bool {
        self.boolean_flags.iter().all(|(field, expected)| match expected {
            None => true,
            Some(expected) => record.field_value(field).as_bool() == Some(*expected),
        })
    }
}

/// Keep the records matching the criteria, in their original order
pub fn filter_records<R: Record>(
    records: &[R],
    criteria: &FilterCriteria,
    resolver: &ValueResolver<'_, R>,
) -> Vec<R> {
    if criteria.is_unconstrained() {
        return records.to_vec();
    }

    let filtered: Vec<R> = records
        .iter()
        .filter(|record| criteria.matches(*record, resolver))
        .cloned()
        .collect();

    tracing::trace!(
        resource = R::resource_name(),
        before = records.len(),
        after = filtered.len(),
        "Filtered records"
    );

    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewConfig;
    use crate::core::lookup::{LookupSet, LookupTable};
    use crate::core::record::DynamicRecord;

    fn records() -> Vec<DynamicRecord> {
        vec![
            DynamicRecord::new()
                .with("id", 1)
                .with("name", "Printer")
                .with("type_id", 3)
                .with("active", true)
                .with("location_id", 1),
            DynamicRecord::new()
                .with("id", 2)
                .with("name", "Router")
                .with("type_id", 4)
                .with("active", false)
                .with("location_id", 2),
            DynamicRecord::new()
                .with("id", 3)
                .with("name", "Scanner")
                .with("type_id", 3)
                .with("active", "true")
                .with("location_id", 2),
        ]
    }

    fn config() -> ViewConfig<DynamicRecord> {
        ViewConfig::for_record("devices")
            .searchable(["name", "location_id"])
            .indirect("location_id", "locations", |r: &DynamicRecord| r.field_value("location_id"))
    }

    fn lookups() -> LookupSet {
        LookupSet::new().with(
            "locations",
            LookupTable::from_pairs([(1, "Basement"), (2, "Front Desk")]),
        )
    }

    fn ids(records: &[DynamicRecord]) -> Vec<i64> {
        records
            .iter()
            .filter_map(|r| r.field_value("id").as_integer())
            .collect()
    }

    #[test]
    fn test_empty_criteria_keeps_everything() {
        let config = config();
        let lookups = lookups();
        let resolver = ValueResolver::new(&config, &lookups);

        let all = filter_records(&records(), &FilterCriteria::new(), &resolver);
        assert_eq!(ids(&all), vec![1, 2, 3]);
    }

    #[test]
    fn test_text_is_case_insensitive_substring() {
        let config = config();
        let lookups = lookups();
        let resolver = ValueResolver::new(&config, &lookups);

        let criteria = FilterCriteria::new().with_text("  ROUT ");
        assert_eq!(ids(&filter_records(&records(), &criteria, &resolver)), vec![2]);
    }

    #[test]
    fn test_text_searches_lookup_names() {
        let config = config();
        let lookups = lookups();
        let resolver = ValueResolver::new(&config, &lookups);

        let criteria = FilterCriteria::new().with_text("front");
        assert_eq!(ids(&filter_records(&records(), &criteria, &resolver)), vec![2, 3]);
    }

    #[test]
    fn test_exact_match_and_unset_values() {
        let config = config();
        let lookups = lookups();
        let resolver = ValueResolver::new(&config, &lookups);

        let criteria = FilterCriteria::new().with_exact("type_id", 3);
        assert_eq!(ids(&filter_records(&records(), &criteria, &resolver)), vec![1, 3]);

        let mut criteria = FilterCriteria::new();
        criteria.set_exact("type_id", None);
        criteria.set_exact("location_id", Some(FieldValue::Null));
        assert!(criteria.is_unconstrained());
        assert_eq!(ids(&filter_records(&records(), &criteria, &resolver)), vec![1, 2, 3]);
    }

    #[test]
    fn test_boolean_flags() {
        let config = config();
        let lookups = lookups();
        let resolver = ValueResolver::new(&config, &lookups);

        let criteria = FilterCriteria::new().with_flag("active", true);
        assert_eq!(ids(&filter_records(&records(), &criteria, &resolver)), vec![1, 3]);

        let criteria = FilterCriteria::new().with_flag("active", false);
        assert_eq!(ids(&filter_records(&records(), &criteria, &resolver)), vec![2]);
    }

    #[test]
    fn test_criteria_are_anded() {
        let config = config();
        let lookups = lookups();
        let resolver = ValueResolver::new(&config, &lookups);

        let criteria = FilterCriteria::new()
            .with_text("desk")
            .with_exact("type_id", 3)
            .with_flag("active", true);
        assert_eq!(ids(&filter_records(&records(), &criteria, &resolver)), vec![3]);

        let criteria = criteria.with_flag("active", false);
        assert!(filter_records(&records(), &criteria, &resolver).is_empty());
    }

    #[test]
    fn test_criteria_deserialize_from_json() {
        let criteria: FilterCriteria = serde_json::from_str(
            r#"{"text": "desk", "exact_matches": {"type_id": 3, "status_id": null}}"#,
        )
        .unwrap();
        assert_eq!(criteria.exact_matches.get("type_id"), Some(&Some(FieldValue::Integer(3))));
        assert_eq!(criteria.exact_matches.get("status_id"), Some(&None));
        assert!(criteria.boolean_flags.is_empty());
    }
}
