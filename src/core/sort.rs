//! Sort state and the stable record sorter

use crate::config::MissingPlacement;
use crate::core::record::Record;
use crate::core::resolver::{SortValue, ValueResolver};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Direction of a sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
}

impl SortDirection {
    /// Apply this direction to an ascending comparison result
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Identifies the field (or derived value) a list is sorted by
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortKey(String);

impl SortKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SortKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SortKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The active sort key and direction of a list view
///
/// A state without a key is a no-op: records keep their input order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    pub key: Option<SortKey>,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortState {
    /// No sorting; input order is preserved
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn ascending(key: impl Into<SortKey>) -> Self {
        Self {
            key: Some(key.into()),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: impl Into<SortKey>) -> Self {
        Self {
            key: Some(key.into()),
            direction: SortDirection::Descending,
        }
    }

    /// Parse the `field`, `field:asc` or `field:desc` form used in query
    /// strings and saved preferences
    ///
    /// The direction follows the last `:`, so keys may contain colons. An
    /// empty expression or an unknown direction yields `None`.
    pub fn parse(expr: &str) -> Option<Self> {
        let (field, direction) = match expr.trim().rsplit_once(':') {
            Some((field, "asc")) => (field, SortDirection::Ascending),
            Some((field, "desc")) => (field, SortDirection::Descending),
            Some(_) => return None,
            None => (expr.trim(), SortDirection::Ascending),
        };

        let field = field.trim();
        if field.is_empty() {
            return None;
        }

        Some(Self {
            key: Some(SortKey::new(field)),
            direction,
        })
    }

    /// Click-to-sort transition
    ///
    /// Clicking the ascending column flips it to descending; any other click
    /// (descending column, different column, unsorted list) selects the
    /// clicked column ascending.
    pub fn on_header_click(&self, clicked: impl Into<SortKey>) -> Self {
        let clicked = clicked.into();
        let flip = self.key.as_ref() == Some(&clicked)
            && self.direction == SortDirection::Ascending;

        Self {
            key: Some(clicked),
            direction: if flip {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            },
        }
    }

    pub fn is_sorted_by(&self, key: &str) -> bool {
        self.key.as_ref().is_some_and(|k| k.as_str() == key)
    }

    /// Glyph shown next to a column header
    pub fn indicator(&self, key: &str) -> char {
        if !self.is_sorted_by(key) {
            return '↕';
        }
        match self.direction {
            SortDirection::Ascending => '▲',
            SortDirection::Descending => '▼',
        }
    }
}

impl fmt::Display for SortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            None => Ok(()),
            Some(key) => match self.direction {
                SortDirection::Ascending => write!(f, "{}:asc", key),
                SortDirection::Descending => write!(f, "{}:desc", key),
            },
        }
    }
}

/// Sort records by the given state, returning a new vector
///
/// The input slice is never reordered. Rows with equal resolved values keep
/// their input order in both directions; the view's tie-breaker keys, if
/// any, are consulted first and always compare ascending.
pub fn sort_records<R: Record>(
    records: &[R],
    state: &SortState,
    resolver: &ValueResolver<'_, R>,
) -> Vec<R> {
    let Some(key) = state.key.as_ref() else {
        return records.to_vec();
    };

    let config = resolver.config();
    let keys = std::iter::once(key).chain(config.tie_breakers.iter().filter(|tie| *tie != key));

    // Placement only moves missing dates; other blanks sort like empty text
    let columns: Vec<(Vec<SortValue>, MissingPlacement)> = keys
        .map(|key| {
            let placement = if config.is_date_field(key.as_str()) {
                config.missing_placement
            } else {
                MissingPlacement::Lowest
            };
            (resolver.resolve_column(records, key.as_str()), placement)
        })
        .collect();

    let mut order: Vec<usize> = (0..records.len()).collect();

    // sort_by is stable, equal rows keep input order
    order.sort_by(|&a, &b| {
        let mut columns = columns.iter();
        let primary = match columns.next() {
            Some((column, placement)) => state
                .direction
                .apply(column[a].compare(&column[b], *placement)),
            None => Ordering::Equal,
        };
        columns.fold(primary, |ordering, (column, placement)| {
            ordering.then_with(|| column[a].compare(&column[b], *placement))
        })
    });

    tracing::trace!(
        resource = R::resource_name(),
        sort = %state,
        rows = records.len(),
        "Sorted records"
    );

    order.into_iter().map(|i| records[i].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_state_machine() {
        let state = SortState::unsorted();

        let state = state.on_header_click("A");
        assert_eq!(state, SortState::ascending("A"));

        let state = state.on_header_click("A");
        assert_eq!(state, SortState::descending("A"));

        let state = state.on_header_click("B");
        assert_eq!(state, SortState::ascending("B"));
    }

    #[test]
    fn test_descending_click_returns_to_ascending() {
        let state = SortState::descending("A").on_header_click("A");
        assert_eq!(state, SortState::ascending("A"));
    }

    #[test]
    fn test_indicator_glyphs() {
        let state = SortState::ascending("name");
        assert_eq!(state.indicator("name"), '▲');
        assert_eq!(state.indicator("date"), '↕');
        assert_eq!(SortState::descending("name").indicator("name"), '▼');
        assert_eq!(SortState::unsorted().indicator("name"), '↕');
    }

    #[test]
    fn test_parse_sort_expression() {
        assert_eq!(SortState::parse("amount:desc"), Some(SortState::descending("amount")));
        assert_eq!(SortState::parse("created_at:asc"), Some(SortState::ascending("created_at")));
        assert_eq!(SortState::parse("name"), Some(SortState::ascending("name")));
        assert_eq!(SortState::parse("name:sideways"), None);
        assert_eq!(SortState::parse("  "), None);
        assert_eq!(SortState::parse(":desc"), None);
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let state = SortState::descending("serial_number");
        assert_eq!(state.to_string(), "serial_number:desc");
        assert_eq!(SortState::parse(&state.to_string()), Some(state));
        assert_eq!(SortState::unsorted().to_string(), "");
    }

    #[test]
    fn test_keys_with_colons_round_trip() {
        let state = SortState::ascending("meta:owner");
        assert_eq!(state.to_string(), "meta:owner:asc");
        assert_eq!(SortState::parse(&state.to_string()), Some(state));
        assert_eq!(
            SortState::parse("a:b:desc"),
            Some(SortState::descending("a:b"))
        );
    }

    #[test]
    fn test_direction_deserializes_short_forms() {
        let direction: SortDirection = serde_yaml::from_str("desc").unwrap();
        assert_eq!(direction, SortDirection::Descending);
        let direction: SortDirection = serde_yaml::from_str("ascending").unwrap();
        assert_eq!(direction, SortDirection::Ascending);
    }
}
