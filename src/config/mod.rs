//! View configuration loading and management

mod view;

pub use view::{IndirectField, ViewConfig};

use crate::core::error::ConfigError;
use crate::core::record::Record;
use crate::core::sort::{SortKey, SortState};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub(crate) const DEFAULT_UNKNOWN_LABEL: &str = "Unknown";
pub(crate) const DEFAULT_EMPTY_MESSAGE: &str = "No results match the current filters";
pub(crate) const DEFAULT_NO_DATA_MESSAGE: &str = "No data";

/// Where missing dates (blank, unparsable or "No Data") sort
///
/// Only date fields honor the placement. Blank values of other fields always
/// sort lowest, the way an empty string would.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPlacement {
    /// Missing dates compare below every present value
    #[default]
    Lowest,
    /// Missing dates compare above every present value
    Highest,
}

/// How numeric-looking strings are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericCoercion {
    /// Strings that parse cleanly as numbers compare numerically,
    /// except on fields declared as text
    #[default]
    Auto,
    /// Strings always compare lexically
    Lexical,
}

/// Lookup declaration for an indirect key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndirectSettings {
    /// Lookup table name
    pub table: String,

    /// Record field holding the foreign key; defaults to the key itself
    #[serde(default)]
    pub via: Option<String>,
}

/// YAML settings for one list view
///
/// Every setting is optional; unset values keep what the code declared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewSettings {
    /// View name (e.g., "devices", "tickets")
    pub name: String,

    #[serde(default)]
    pub initial_sort: Option<SortState>,

    #[serde(default)]
    pub searchable_fields: Option<Vec<String>>,

    #[serde(default)]
    pub date_fields: Vec<String>,

    #[serde(default)]
    pub indirect_fields: IndexMap<String, IndirectSettings>,

    #[serde(default)]
    pub tie_breakers: Vec<SortKey>,

    #[serde(default)]
    pub missing_placement: Option<MissingPlacement>,

    #[serde(default)]
    pub numeric_coercion: Option<NumericCoercion>,

    #[serde(default)]
    pub unknown_label: Option<String>,

    #[serde(default)]
    pub empty_message: Option<String>,

    #[serde(default)]
    pub no_data_message: Option<String>,
}

/// Complete configuration for all list views
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewsConfig {
    /// List of view settings
    #[serde(default)]
    pub views: Vec<ViewSettings>,
}

impl ViewsConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        tracing::debug!(views = config.views.len(), "Loaded view configuration");
        Ok(config)
    }

    /// Reject configurations that name the same view twice
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for view in &self.views {
            if !seen.insert(view.name.as_str()) {
                return Err(ConfigError::DuplicateView {
                    name: view.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Find the settings of a view
    pub fn view(&self, name: &str) -> Option<&ViewSettings> {
        self.views.iter().find(|view| view.name == name)
    }

    /// Apply the settings of `base.name` to a code-declared configuration
    ///
    /// Views without settings are returned unchanged.
    pub fn apply<R: Record>(&self, base: ViewConfig<R>) -> Result<ViewConfig<R>, ConfigError> {
        match self.view(&base.name) {
            Some(settings) => base.with_settings(settings),
            None => Ok(base),
        }
    }

    /// Like [`ViewsConfig::apply`], but the view must be configured
    pub fn require<R: Record>(&self, base: ViewConfig<R>) -> Result<ViewConfig<R>, ConfigError> {
        let settings = self.view(&base.name).ok_or_else(|| ConfigError::UnknownView {
            name: base.name.clone(),
        })?;
        base.with_settings(settings)
    }

    /// Merge several configurations; later views replace earlier ones with
    /// the same name
    pub fn merge(configs: Vec<ViewsConfig>) -> Self {
        let mut views: IndexMap<String, ViewSettings> = IndexMap::new();
        for config in configs {
            for view in config.views {
                views.insert(view.name.clone(), view);
            }
        }
        Self {
            views: views.into_values().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::DynamicRecord;

    const YAML: &str = r#"
views:
  - name: devices
    initial_sort:
      key: name
    searchable_fields: [name, serial_number]
  - name: tickets
    initial_sort:
      key: created_at
      direction: desc
    missing_placement: highest
"#;

    #[test]
    fn test_yaml_parsing() {
        let config = ViewsConfig::from_yaml_str(YAML).unwrap();
        assert_eq!(config.views.len(), 2);

        let tickets = config.view("tickets").unwrap();
        assert_eq!(tickets.initial_sort, Some(SortState::descending("created_at")));
        assert_eq!(tickets.missing_placement, Some(MissingPlacement::Highest));
        assert!(config.view("contacts").is_none());
    }

    #[test]
    fn test_yaml_serialization() {
        let config = ViewsConfig::from_yaml_str(YAML).unwrap();
        let yaml = serde_yaml::to_string(&config).unwrap();

        let parsed = ViewsConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_duplicate_views_rejected() {
        let yaml = "views:\n  - name: devices\n  - name: devices\n";
        let err = ViewsConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateView { .. }));
    }

    #[test]
    fn test_apply_and_require() {
        let config = ViewsConfig::from_yaml_str(YAML).unwrap();

        let devices = config
            .apply(ViewConfig::<DynamicRecord>::for_record("devices"))
            .unwrap();
        assert_eq!(devices.initial_sort, SortState::ascending("name"));

        let contacts = config
            .apply(ViewConfig::<DynamicRecord>::for_record("contacts"))
            .unwrap();
        assert_eq!(contacts.initial_sort, SortState::unsorted());

        let err = config
            .require(ViewConfig::<DynamicRecord>::for_record("contacts"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownView { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = ViewsConfig::from_yaml_file("/nonexistent/views.yaml").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_IO_ERROR");
    }

    #[test]
    fn test_merge_later_wins() {
        let first = ViewsConfig::from_yaml_str(YAML).unwrap();
        let second = ViewsConfig::from_yaml_str("views:\n  - name: devices\n    unknown_label: n/a\n").unwrap();

        let merged = ViewsConfig::merge(vec![first, second]);
        assert_eq!(merged.views.len(), 2);
        assert_eq!(merged.views[0].name, "devices");
        assert_eq!(merged.views[0].unknown_label.as_deref(), Some("n/a"));
        assert!(merged.views[0].initial_sort.is_none());
    }
}
