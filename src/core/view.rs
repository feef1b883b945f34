//! List view state: records, lookups, sort state and filter criteria

use crate::config::ViewConfig;
use crate::core::field::FieldValue;
use crate::core::filter::{FilterCriteria, filter_records};
use crate::core::lookup::{LookupSet, LookupTable};
use crate::core::record::Record;
use crate::core::resolver::ValueResolver;
use crate::core::sort::{SortKey, SortState, sort_records};

/// What a list view renders after filtering and sorting
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered<R> {
    /// Rows to display, in display order
    Rows(Vec<R>),

    /// Nothing to display; the message explains why
    Empty { message: String },
}

impl<R> Rendered<R> {
    pub fn rows(&self) -> &[R] {
        match self {
            Rendered::Rows(rows) => rows,
            Rendered::Empty { .. } => &[],
        }
    }

    pub fn into_rows(self) -> Vec<R> {
        match self {
            Rendered::Rows(rows) => rows,
            Rendered::Empty { .. } => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Rendered::Empty { .. })
    }

    pub fn empty_message(&self) -> Option<&str> {
        match self {
            Rendered::Rows(_) => None,
            Rendered::Empty { message } => Some(message),
        }
    }
}

/// One list view: the records it fetched plus the user's sort and filter
/// choices
///
/// Every mutation is a discrete step; [`ListView::render`] re-evaluates the
/// filter-then-sort pipeline from scratch and never touches the stored
/// records.
#[derive(Debug, Clone)]
pub struct ListView<R> {
    config: ViewConfig<R>,
    records: Vec<R>,
    lookups: LookupSet,
    sort: SortState,
    criteria: FilterCriteria,
}

impl<R: Record> ListView<R> {
    pub fn new(config: ViewConfig<R>) -> Self {
        let sort = config.initial_sort.clone();
        Self {
            config,
            records: Vec::new(),
            lookups: LookupSet::new(),
            sort,
            criteria: FilterCriteria::new(),
        }
    }

    pub fn with_records(mut self, records: Vec<R>) -> Self {
        self.set_records(records);
        self
    }

    pub fn with_lookup(mut self, name: impl Into<String>, table: LookupTable) -> Self {
        self.set_lookup(name, table);
        self
    }

    pub fn config(&self) -> &ViewConfig<R> {
        &self.config
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Replace the records after a fetch
    ///
    /// A failed fetch is represented by an empty vector; the view then
    /// renders its no-data message.
    pub fn set_records(&mut self, records: Vec<R>) {
        tracing::debug!(view = %self.config.name, records = records.len(), "Records replaced");
        self.records = records;
    }

    /// Replace a lookup table after its collection was refetched
    pub fn set_lookup(&mut self, name: impl Into<String>, table: LookupTable) {
        self.lookups.insert(name, table);
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn set_sort(&mut self, state: SortState) {
        self.sort = state;
    }

    /// Column header click
    pub fn on_header_click(&mut self, key: impl Into<SortKey>) -> &SortState {
        self.sort = self.sort.on_header_click(key);
        tracing::debug!(view = %self.config.name, sort = %self.sort, "Sort changed");
        &self.sort
    }

    /// Header glyph for a column
    pub fn indicator(&self, key: &str) -> char {
        self.sort.indicator(key)
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.criteria.text = text.into();
    }

    pub fn set_exact(&mut self, field: impl Into<String>, value: Option<FieldValue>) {
        self.criteria.set_exact(field, value);
    }

    pub fn set_flag(&mut self, field: impl Into<String>, value: Option<bool>) {
        self.criteria.set_flag(field, value);
    }

    pub fn clear_filters(&mut self) {
        self.criteria = FilterCriteria::new();
    }

    /// Filter, then sort, the current records
    pub fn visible(&self) -> Vec<R> {
        let resolver = ValueResolver::new(&self.config, &self.lookups);
        let filtered = filter_records(&self.records, &self.criteria, &resolver);
        sort_records(&filtered, &self.sort, &resolver)
    }

    /// Rows to render, or an explicit empty state
    pub fn render(&self) -> Rendered<R> {
        if self.records.is_empty() {
            return Rendered::Empty {
                message: self.config.no_data_message.clone(),
            };
        }

        let rows = self.visible();
        tracing::debug!(
            view = %self.config.name,
            total = self.records.len(),
            visible = rows.len(),
            sort = %self.sort,
            "Rendered list view"
        );

        if rows.is_empty() {
            Rendered::Empty {
                message: self.config.empty_message.clone(),
            }
        } else {
            Rendered::Rows(rows)
        }
    }
}
