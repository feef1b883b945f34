//! # Roster
//!
//! Typed sorting, filtering and view state for the list views of a
//! maintenance CRM (clients, devices, tickets, maintenances, contacts,
//! software info, locations).
//!
//! ## Features
//!
//! - **Declared Schemas**: records declare their fields once via `impl_record!`
//! - **Lookup Resolution**: foreign keys sort and search by their display name
//! - **Stable Sorting**: ties keep their input order in both directions
//! - **Total Ordering**: numbers, dates and text never produce a panicking comparator
//! - **Composable Filters**: free text, exact matches and boolean flags, ANDed
//! - **Click-to-Sort**: header click state machine with ▲/▼/↕ indicators
//! - **Configuration-Based**: per-view overrides via YAML
//! - **Preference Port**: last visited device, column visibility and sort
//!   choices behind a pluggable store
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use roster::prelude::*;
//!
//! let mut view = ListView::new(devices_view())
//!     .with_records(devices)
//!     .with_lookup(tables::LOCATIONS, LookupTable::from_records(&locations, "id", "name"));
//!
//! view.on_header_click("location_id"); // sort by location name
//! view.set_text("boiler");
//!
//! match view.render() {
//!     Rendered::Rows(rows) => { /* draw rows */ }
//!     Rendered::Empty { message } => { /* draw message */ }
//! }
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod storage;
pub mod views;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        debounce::{DEFAULT_QUIET_WINDOW, Debouncer},
        error::{ConfigError, RosterError, StorageError},
        field::{FieldDef, FieldKind, FieldValue},
        filter::{FilterCriteria, filter_records},
        lookup::{LookupSet, LookupTable},
        record::{Annotated, DynamicRecord, Record},
        resolver::{SortValue, ValueResolver},
        sort::{SortDirection, SortKey, SortState, sort_records},
        store::{ColumnVisibility, PreferenceStore, Preferences},
        view::{ListView, Rendered},
    };

    // === Macros ===
    pub use crate::impl_record;

    // === Entities ===
    pub use crate::entities::{
        Classifier, Client, Contact, Device, Location, Maintenance, SoftwareInfo, Ticket, tables,
    };

    // === Views ===
    pub use crate::views::{
        LAST_ACTIVITY, NO_DATA, ViewCatalog, attach_last_activity, client_devices_view,
        clients_view, contacts_view, devices_view, maintenances_view, software_view, tickets_view,
    };

    // === Config ===
    pub use crate::config::{
        MissingPlacement, NumericCoercion, ViewConfig, ViewSettings, ViewsConfig,
    };

    // === Storage ===
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemoryPreferenceStore;
    #[cfg(feature = "json-file")]
    pub use crate::storage::JsonFilePreferenceStore;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use serde::{Deserialize, Serialize};
}
