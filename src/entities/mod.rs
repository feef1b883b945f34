//! CRM record types
//!
//! Each record mirrors a backend resource. Reference fields name the lookup
//! table their display values come from; see [`tables`].

pub mod macros;

mod client;
mod device;
mod maintenance;
mod reference;
mod ticket;

pub use client::{Client, Contact};
pub use device::{Device, SoftwareInfo};
pub use maintenance::Maintenance;
pub use reference::{Classifier, Location};
pub use ticket::Ticket;

/// Lookup table names shared by the record schemas and the views
pub mod tables {
    pub const CLIENTS: &str = "clients";
    pub const DEVICES: &str = "devices";
    pub const LOCATIONS: &str = "locations";
    pub const DEVICE_TYPES: &str = "device_types";
    pub const TICKET_STATUSES: &str = "ticket_statuses";
    pub const WORK_TYPES: &str = "work_types";
}
