//! Configurations of the CRM list views
//!
//! Each list view used to carry its own sort and search code. They are all
//! expressed here as a [`ViewConfig`] over one record type, derived from the
//! record schema and adjusted where a view behaves differently.

mod activity;

pub use activity::{LAST_ACTIVITY, NO_DATA, attach_last_activity};

use crate::config::{MissingPlacement, ViewConfig, ViewsConfig};
use crate::core::error::ConfigError;
use crate::core::record::Annotated;
use crate::core::sort::SortState;
use crate::entities::{Client, Contact, Device, Maintenance, SoftwareInfo, Ticket};

pub const DEVICES: &str = "devices";
pub const CLIENT_DEVICES: &str = "client_devices";
pub const TICKETS: &str = "tickets";
pub const MAINTENANCES: &str = "maintenances";
pub const CLIENTS: &str = "clients";
pub const CONTACTS: &str = "contacts";
pub const SOFTWARE: &str = "software";

/// All devices, alphabetical, searchable by name, serial, type and location
pub fn devices_view() -> ViewConfig<Device> {
    ViewConfig::for_record(DEVICES)
        .initial_sort(SortState::ascending("name"))
        .tie_breaker("id")
}

/// One client's devices, most recently active first
///
/// Rows carry the derived [`LAST_ACTIVITY`] field; see
/// [`attach_last_activity`].
pub fn client_devices_view() -> ViewConfig<Annotated<Device>> {
    ViewConfig::for_record(CLIENT_DEVICES)
        .date_field(LAST_ACTIVITY)
        .initial_sort(SortState::descending(LAST_ACTIVITY))
        .empty_message("No devices match the current filters")
        .no_data("This client has no devices yet")
}

/// Tickets, newest first
pub fn tickets_view() -> ViewConfig<Ticket> {
    ViewConfig::for_record(TICKETS)
        .initial_sort(SortState::descending("created_at"))
        .tie_breaker("id")
}

/// Maintenances by schedule; unscheduled work goes to the end
pub fn maintenances_view() -> ViewConfig<Maintenance> {
    ViewConfig::for_record(MAINTENANCES)
        .initial_sort(SortState::ascending("scheduled_at"))
        .missing_placement(MissingPlacement::Highest)
}

pub fn clients_view() -> ViewConfig<Client> {
    ViewConfig::for_record(CLIENTS).initial_sort(SortState::ascending("name"))
}

/// Contacts keep the order the backend returns them in
pub fn contacts_view() -> ViewConfig<Contact> {
    ViewConfig::for_record(CONTACTS)
}

pub fn software_view() -> ViewConfig<SoftwareInfo> {
    ViewConfig::for_record(SOFTWARE).initial_sort(SortState::ascending("license_expires"))
}

/// Every view configuration, with YAML settings applied on top
#[derive(Debug, Clone)]
pub struct ViewCatalog {
    pub devices: ViewConfig<Device>,
    pub client_devices: ViewConfig<Annotated<Device>>,
    pub tickets: ViewConfig<Ticket>,
    pub maintenances: ViewConfig<Maintenance>,
    pub clients: ViewConfig<Client>,
    pub contacts: ViewConfig<Contact>,
    pub software: ViewConfig<SoftwareInfo>,
}

impl ViewCatalog {
    /// Built-in configurations
    pub fn defaults() -> Self {
        Self {
            devices: devices_view(),
            client_devices: client_devices_view(),
            tickets: tickets_view(),
            maintenances: maintenances_view(),
            clients: clients_view(),
            contacts: contacts_view(),
            software: software_view(),
        }
    }

    /// Built-in configurations overridden by the views named in `settings`
    pub fn with_settings(settings: &ViewsConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            devices: settings.apply(devices_view())?,
            client_devices: settings.apply(client_devices_view())?,
            tickets: settings.apply(tickets_view())?,
            maintenances: settings.apply(maintenances_view())?,
            clients: settings.apply(clients_view())?,
            contacts: settings.apply(contacts_view())?,
            software: settings.apply(software_view())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sort::SortDirection;
    use crate::entities::tables;

    #[test]
    fn test_devices_view_from_schema() {
        let config = devices_view();
        assert_eq!(config.initial_sort, SortState::ascending("name"));
        assert!(config.searchable_fields.contains(&"serial_number".to_string()));
        assert_eq!(config.indirect.get("location_id").unwrap().table, tables::LOCATIONS);
        assert!(config.is_date_field("introduced_at"));
        assert!(!config.coerces_numbers("serial_number"));
    }

    #[test]
    fn test_client_devices_view_sorts_by_activity() {
        let config = client_devices_view();
        assert!(config.is_date_field(LAST_ACTIVITY));
        assert_eq!(config.initial_sort.direction, SortDirection::Descending);
    }

    #[test]
    fn test_catalog_applies_settings() {
        let settings = ViewsConfig::from_yaml_str(
            "views:\n  - name: tickets\n    initial_sort:\n      key: priority\n",
        )
        .unwrap();

        let catalog = ViewCatalog::with_settings(&settings).unwrap();
        assert_eq!(catalog.tickets.initial_sort, SortState::ascending("priority"));
        assert_eq!(catalog.devices.initial_sort, devices_view().initial_sort);
        assert!(catalog.contacts.initial_sort.key.is_none());
    }
}
