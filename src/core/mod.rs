//! Core module containing the record abstraction and the sort/filter kernel

pub mod debounce;
pub mod error;
pub mod field;
pub mod filter;
pub mod lookup;
pub mod record;
pub mod resolver;
pub mod sort;
pub mod store;
pub mod view;

pub use debounce::Debouncer;
pub use error::{ConfigError, RosterError, StorageError};
pub use field::{FieldDef, FieldKind, FieldValue};
pub use filter::{FilterCriteria, filter_records};
pub use lookup::{LookupKey, LookupSet, LookupTable};
pub use record::{Annotated, DynamicRecord, Record};
pub use resolver::{SortValue, ValueResolver};
pub use sort::{SortDirection, SortKey, SortState, sort_records};
pub use store::{ColumnVisibility, PreferenceStore, Preferences};
pub use view::{ListView, Rendered};
