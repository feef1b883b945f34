//! Typed per-view configuration

use super::{MissingPlacement, NumericCoercion, ViewSettings};
use crate::core::error::ConfigError;
use crate::core::field::{FieldKind, FieldValue};
use crate::core::record::Record;
use crate::core::sort::{SortKey, SortState};
use indexmap::{IndexMap, IndexSet};
use std::fmt;
use std::sync::Arc;

type KeyExtractor<R> = Arc<dyn Fn(&R) -> FieldValue + Send + Sync>;

/// A sort/search key whose display value lives in a lookup table
pub struct IndirectField<R> {
    /// Name of the lookup table holding display names
    pub table: String,
    extract: KeyExtractor<R>,
}

impl<R> IndirectField<R> {
    pub fn new(table: impl Into<String>, extract: impl Fn(&R) -> FieldValue + Send + Sync + 'static) -> Self {
        Self {
            table: table.into(),
            extract: Arc::new(extract),
        }
    }

    /// Foreign key value of a record
    pub fn lookup_key(&self, record: &R) -> FieldValue {
        (self.extract)(record)
    }
}

impl<R> Clone for IndirectField<R> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            extract: Arc::clone(&self.extract),
        }
    }
}

impl<R> fmt::Debug for IndirectField<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndirectField")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

/// Everything a list view declares about how its records are sorted,
/// searched and rendered
///
/// Built once per view, usually from the record schema via
/// [`ViewConfig::for_record`] and then refined with the builder methods or
/// with YAML [`ViewSettings`].
pub struct ViewConfig<R> {
    /// View name, used in logs and preference keys
    pub name: String,

    /// Sort state the view starts in
    pub initial_sort: SortState,

    /// Fields the free-text filter looks at
    pub searchable_fields: Vec<String>,

    /// Fields parsed as dates before comparison
    pub date_fields: IndexSet<String>,

    /// Keys resolved through a lookup table
    pub indirect: IndexMap<String, IndirectField<R>>,

    /// Secondary keys compared (ascending) when the primary values tie
    pub tie_breakers: Vec<SortKey>,

    /// Where missing dates sort; other blank fields always sort lowest
    pub missing_placement: MissingPlacement,

    /// Whether numeric-looking strings compare as numbers
    pub numeric_coercion: NumericCoercion,

    /// Display value for foreign keys without a lookup entry
    pub unknown_label: String,

    /// Message shown when filters exclude every record
    pub empty_message: String,

    /// Message shown when the view has no records at all
    pub no_data_message: String,
}

impl<R: Record> ViewConfig<R> {
    /// Configuration derived from the record schema
    ///
    /// Searchable fields, date fields and reference fields are taken from
    /// `R::schema()`; every `FieldKind::Reference` field resolves its own
    /// value through the named lookup table.
    pub fn for_record(name: impl Into<String>) -> Self {
        let mut config = Self::empty(name);

        for def in R::schema() {
            if def.searchable {
                config.searchable_fields.push(def.name.to_string());
            }
            match def.kind {
                FieldKind::Date => {
                    config.date_fields.insert(def.name.to_string());
                }
                FieldKind::Reference { table } => {
                    let field = def.name;
                    config.indirect.insert(
                        field.to_string(),
                        IndirectField::new(table, move |record: &R| record.field_value(field)),
                    );
                }
                _ => {}
            }
        }

        config
    }

    /// Apply YAML settings on top of this configuration
    ///
    /// Settings only add or override; fields declared in code stay unless a
    /// setting replaces them.
    pub fn with_settings(mut self, settings: &ViewSettings) -> Result<Self, ConfigError> {
        if let Some(sort) = &settings.initial_sort {
            self.initial_sort = sort.clone();
        }
        if let Some(fields) = &settings.searchable_fields {
            self.searchable_fields = fields.clone();
        }
        self.date_fields.extend(settings.date_fields.iter().cloned());

        for (field, indirect) in &settings.indirect_fields {
            if indirect.table.trim().is_empty() {
                return Err(ConfigError::InvalidField {
                    view: self.name.clone(),
                    field: field.clone(),
                    message: "lookup table name is empty".to_string(),
                });
            }
            let via = indirect.via.clone().unwrap_or_else(|| field.clone());
            self.indirect.insert(
                field.clone(),
                IndirectField::new(indirect.table.clone(), move |record: &R| record.field_value(&via)),
            );
        }

        if !settings.tie_breakers.is_empty() {
            self.tie_breakers = settings.tie_breakers.clone();
        }
        if let Some(placement) = settings.missing_placement {
            self.missing_placement = placement;
        }
        if let Some(coercion) = settings.numeric_coercion {
            self.numeric_coercion = coercion;
        }
        if let Some(label) = &settings.unknown_label {
            self.unknown_label = label.clone();
        }
        if let Some(message) = &settings.empty_message {
            self.empty_message = message.clone();
        }
        if let Some(message) = &settings.no_data_message {
            self.no_data_message = message.clone();
        }

        Ok(self)
    }

    /// Whether a key is compared chronologically
    pub fn is_date_field(&self, key: &str) -> bool {
        self.date_fields.contains(key)
            || R::field_def(key).is_some_and(|def| def.kind == FieldKind::Date)
    }

    /// Whether string values of a key may be coerced to numbers
    ///
    /// Fields the schema declares as text (serial numbers, codes) always
    /// compare lexically.
    pub fn coerces_numbers(&self, key: &str) -> bool {
        self.numeric_coercion == NumericCoercion::Auto
            && !R::field_def(key).is_some_and(|def| def.kind == FieldKind::Text)
    }
}

impl<R> ViewConfig<R> {
    /// Configuration with no declared fields
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initial_sort: SortState::unsorted(),
            searchable_fields: Vec::new(),
            date_fields: IndexSet::new(),
            indirect: IndexMap::new(),
            tie_breakers: Vec::new(),
            missing_placement: MissingPlacement::default(),
            numeric_coercion: NumericCoercion::default(),
            unknown_label: super::DEFAULT_UNKNOWN_LABEL.to_string(),
            empty_message: super::DEFAULT_EMPTY_MESSAGE.to_string(),
            no_data_message: super::DEFAULT_NO_DATA_MESSAGE.to_string(),
        }
    }

    pub fn initial_sort(mut self, state: SortState) -> Self {
        self.initial_sort = state;
        self
    }

    /// Replace the searchable fields
    pub fn searchable<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.searchable_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn date_field(mut self, field: impl Into<String>) -> Self {
        self.date_fields.insert(field.into());
        self
    }

    /// Declare a key resolved through a lookup table with a typed extractor
    pub fn indirect(
        mut self,
        key: impl Into<String>,
        table: impl Into<String>,
        extract: impl Fn(&R) -> FieldValue + Send + Sync + 'static,
    ) -> Self {
        self.indirect.insert(key.into(), IndirectField::new(table, extract));
        self
    }

    pub fn tie_breaker(mut self, key: impl Into<SortKey>) -> Self {
        self.tie_breakers.push(key.into());
        self
    }

    pub fn missing_placement(mut self, placement: MissingPlacement) -> Self {
        self.missing_placement = placement;
        self
    }

    pub fn numeric_coercion(mut self, coercion: NumericCoercion) -> Self {
        self.numeric_coercion = coercion;
        self
    }

    pub fn unknown_label(mut self, label: impl Into<String>) -> Self {
        self.unknown_label = label.into();
        self
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn no_data(mut self, message: impl Into<String>) -> Self {
        self.no_data_message = message.into();
        self
    }
}

impl<R> Clone for ViewConfig<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            initial_sort: self.initial_sort.clone(),
            searchable_fields: self.searchable_fields.clone(),
            date_fields: self.date_fields.clone(),
            indirect: self.indirect.clone(),
            tie_breakers: self.tie_breakers.clone(),
            missing_placement: self.missing_placement,
            numeric_coercion: self.numeric_coercion,
            unknown_label: self.unknown_label.clone(),
            empty_message: self.empty_message.clone(),
            no_data_message: self.no_data_message.clone(),
        }
    }
}

impl<R> fmt::Debug for ViewConfig<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewConfig")
            .field("name", &self.name)
            .field("initial_sort", &self.initial_sort)
            .field("searchable_fields", &self.searchable_fields)
            .field("date_fields", &self.date_fields)
            .field("indirect", &self.indirect)
            .field("tie_breakers", &self.tie_breakers)
            .field("missing_placement", &self.missing_placement)
            .field("numeric_coercion", &self.numeric_coercion)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::DynamicRecord;
    use crate::core::sort::SortDirection;

    #[test]
    fn test_empty_config_defaults() {
        let config: ViewConfig<DynamicRecord> = ViewConfig::for_record("rows");
        assert_eq!(config.initial_sort, SortState::unsorted());
        assert!(config.searchable_fields.is_empty());
        assert_eq!(config.unknown_label, "Unknown");
        assert_eq!(config.missing_placement, MissingPlacement::Lowest);
        assert!(config.coerces_numbers("serial"));
    }

    #[test]
    fn test_settings_override_builder_values() {
        let yaml = r#"
name: rows
initial_sort:
  key: date
  direction: desc
searchable_fields: [name, serial]
date_fields: [date]
indirect_fields:
  location_name:
    table: locations
    via: location_id
missing_placement: highest
numeric_coercion: lexical
unknown_label: "-"
"#;
        let settings: ViewSettings = serde_yaml::from_str(yaml).unwrap();
        let config = ViewConfig::<DynamicRecord>::for_record("rows")
            .searchable(["name"])
            .with_settings(&settings)
            .unwrap();

        assert_eq!(config.initial_sort.direction, SortDirection::Descending);
        assert_eq!(config.searchable_fields, vec!["name", "serial"]);
        assert!(config.is_date_field("date"));
        assert_eq!(config.missing_placement, MissingPlacement::Highest);
        assert!(!config.coerces_numbers("serial"));
        assert_eq!(config.unknown_label, "-");

        let indirect = config.indirect.get("location_name").unwrap();
        assert_eq!(indirect.table, "locations");
        let record = DynamicRecord::new().with("location_id", 4);
        assert_eq!(indirect.lookup_key(&record), FieldValue::Integer(4));
    }

    #[test]
    fn test_settings_reject_blank_table() {
        let yaml = r#"
name: rows
indirect_fields:
  location_id:
    table: ""
"#;
        let settings: ViewSettings = serde_yaml::from_str(yaml).unwrap();
        let err = ViewConfig::<DynamicRecord>::for_record("rows")
            .with_settings(&settings)
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_FIELD");
    }
}
