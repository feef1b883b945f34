//! Resolution of record fields into comparable values
//!
//! The resolver is the only place that knows how a key maps to something
//! orderable: direct fields are read as-is, indirect keys go through a
//! lookup table, date fields are parsed into timestamps. Nothing here can
//! fail. Malformed values degrade to [`SortValue::Missing`] or to the view's
//! unknown label and are logged at `trace` level.

use crate::config::{MissingPlacement, ViewConfig};
use crate::core::field::FieldValue;
use crate::core::lookup::LookupSet;
use crate::core::record::Record;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::cmp::Ordering;

/// Values the backend uses in place of a date it does not have
const DATE_SENTINELS: &[&str] = &["no data", "n/a", "-"];

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%d.%m.%Y %H:%M",
    "%d.%m.%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y"];

/// A value ready for three-way comparison
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    /// Blank field, unparsable date or unusable number
    Missing,
    /// Finite number
    Number(f64),
    /// Milliseconds since the Unix epoch
    Timestamp(i64),
    /// Case-folded text
    Text(String),
}

impl SortValue {
    fn rank(&self) -> u8 {
        match self {
            SortValue::Missing => 0,
            SortValue::Number(_) => 1,
            SortValue::Timestamp(_) => 2,
            SortValue::Text(_) => 3,
        }
    }

    /// Ascending three-way comparison
    ///
    /// This is a total order for any input: missing values sit at the
    /// requested extreme, numbers and timestamps compare numerically, text
    /// compares on its folded form. Values of different kinds order as
    /// numbers, then timestamps, then text.
    pub fn compare(&self, other: &Self, placement: MissingPlacement) -> Ordering {
        match (self, other) {
            (SortValue::Missing, SortValue::Missing) => Ordering::Equal,
            (SortValue::Missing, _) => match placement {
                MissingPlacement::Lowest => Ordering::Less,
                MissingPlacement::Highest => Ordering::Greater,
            },
            (_, SortValue::Missing) => match placement {
                MissingPlacement::Lowest => Ordering::Greater,
                MissingPlacement::Highest => Ordering::Less,
            },
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
            (SortValue::Timestamp(a), SortValue::Timestamp(b)) => a.cmp(b),
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

/// Parse a date-like field value into epoch milliseconds
///
/// Integers are taken as epoch milliseconds. Strings are tried against
/// RFC 3339 and the date formats the backend emits. Sentinels such as
/// `"No Data"` and anything unparsable yield `None`.
pub fn parse_timestamp(value: &FieldValue) -> Option<i64> {
    match value {
        FieldValue::DateTime(dt) => Some(dt.timestamp_millis()),
        FieldValue::Integer(ms) => Some(*ms),
        FieldValue::String(s) => parse_date_str(s),
        _ => None,
    }
}

fn parse_date_str(raw: &str) -> Option<i64> {
    let s = raw.trim();
    if s.is_empty() || DATE_SENTINELS.contains(&s.to_ascii_lowercase().as_str()) {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|dt| dt.and_utc().timestamp_millis());
        }
    }

    None
}

/// Parse a string that is cleanly a finite number
fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    // Rust's float parser accepts "inf" and "nan" spellings
    if trimmed.is_empty() || trimmed.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Maps `(record, key)` pairs to comparable values for one view
pub struct ValueResolver<'a, R> {
    config: &'a ViewConfig<R>,
    lookups: &'a LookupSet,
}

impl<'a, R: Record> ValueResolver<'a, R> {
    pub fn new(config: &'a ViewConfig<R>, lookups: &'a LookupSet) -> Self {
        Self { config, lookups }
    }

    pub fn config(&self) -> &'a ViewConfig<R> {
        self.config
    }

    /// The value a key shows for a record
    ///
    /// Indirect keys yield the looked-up display name, or the view's unknown
    /// label when the table or the entry is missing.
    pub fn raw(&self, record: &R, key: &str) -> FieldValue {
        let Some(indirect) = self.config.indirect.get(key) else {
            return record.field_value(key);
        };

        let foreign_key = indirect.lookup_key(record);
        match self.lookups.name_of(&indirect.table, &foreign_key) {
            Some(name) => FieldValue::String(name.to_string()),
            None => {
                tracing::trace!(
                    view = %self.config.name,
                    key,
                    table = %indirect.table,
                    foreign_key = %foreign_key.to_text(),
                    "No lookup entry, using unknown label"
                );
                FieldValue::String(self.config.unknown_label.clone())
            }
        }
    }

    /// Text used by the free-text filter
    pub fn display_text(&self, record: &R, key: &str) -> String {
        self.raw(record, key).to_text()
    }

    /// Resolve a single value
    pub fn resolve(&self, record: &R, key: &str) -> SortValue {
        let value = self.raw(record, key);
        if value.is_blank() {
            return SortValue::Missing;
        }

        if self.config.is_date_field(key) {
            return match parse_timestamp(&value) {
                Some(ts) => SortValue::Timestamp(ts),
                None => {
                    tracing::trace!(
                        view = %self.config.name,
                        key,
                        value = %value.to_text(),
                        "Unparsable date treated as missing"
                    );
                    SortValue::Missing
                }
            };
        }

        match value {
            FieldValue::Integer(i) => SortValue::Number(i as f64),
            FieldValue::Float(f) if f.is_finite() => SortValue::Number(f),
            FieldValue::Float(_) => SortValue::Missing,
            FieldValue::Boolean(b) => SortValue::Number(if b { 1.0 } else { 0.0 }),
            FieldValue::DateTime(dt) => SortValue::Timestamp(dt.timestamp_millis()),
            FieldValue::String(s) => {
                let number = if self.config.coerces_numbers(key) {
                    parse_number(&s)
                } else {
                    None
                };
                match number {
                    Some(n) => SortValue::Number(n),
                    None => SortValue::Text(s.to_lowercase()),
                }
            }
            FieldValue::Uuid(u) => SortValue::Text(u.to_string()),
            FieldValue::Null => SortValue::Missing,
        }
    }

    /// Resolve a key for every record, harmonizing the column
    ///
    /// A column compares numerically only if every present value is a number
    /// or timestamp; otherwise all of its values compare as text. The text
    /// is the value as shown, so `"007"` and `"7"` stay distinct.
    pub fn resolve_column(&self, records: &[R], key: &str) -> Vec<SortValue> {
        let column: Vec<SortValue> = records.iter().map(|r| self.resolve(r, key)).collect();

        let has_text = column.iter().any(|v| matches!(v, SortValue::Text(_)));
        let has_number = column
            .iter()
            .any(|v| matches!(v, SortValue::Number(_) | SortValue::Timestamp(_)));

        if !(has_text && has_number) {
            return column;
        }

        records
            .iter()
            .zip(column)
            .map(|(record, value)| match value {
                SortValue::Number(_) | SortValue::Timestamp(_) => {
                    SortValue::Text(self.display_text(record, key).to_lowercase())
                }
                other => other,
            })
            .collect()
    }

    /// Fields the free-text filter looks at
    pub fn searchable_fields(&self) -> &'a [String] {
        &self.config.searchable_fields
    }
}
