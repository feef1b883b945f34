//! The derived "last activity" column of the client devices view

use crate::core::field::FieldValue;
use crate::core::record::Annotated;
use crate::core::resolver::parse_timestamp;
use crate::entities::{Device, Maintenance, Ticket};
use chrono::DateTime;
use std::collections::HashMap;

/// Name of the derived field
pub const LAST_ACTIVITY: &str = "last_activity";

/// Value shown for devices without any recorded activity
pub const NO_DATA: &str = "No Data";

/// Attach each device's most recent activity date
///
/// Activity is any maintenance date (scheduled or completed) and any ticket
/// creation or closing date referring to the device. Devices without
/// activity get the [`NO_DATA`] sentinel, which sorts as a missing date.
pub fn attach_last_activity(
    devices: &[Device],
    maintenances: &[Maintenance],
    tickets: &[Ticket],
) -> Vec<Annotated<Device>> {
    let mut latest: HashMap<i64, i64> = HashMap::new();
    let mut note = |device_id: Option<i64>, date: &Option<String>| {
        let Some(device_id) = device_id else { return };
        let Some(ts) = parse_timestamp(&FieldValue::from(date.clone())) else {
            return;
        };
        latest
            .entry(device_id)
            .and_modify(|current| *current = (*current).max(ts))
            .or_insert(ts);
    };

    for maintenance in maintenances {
        note(maintenance.device_id, &maintenance.scheduled_at);
        note(maintenance.device_id, &maintenance.completed_at);
    }
    for ticket in tickets {
        note(ticket.device_id, &ticket.created_at);
        note(ticket.device_id, &ticket.closed_at);
    }

    devices
        .iter()
        .map(|device| {
            let value = latest
                .get(&device.id)
                .and_then(|ms| DateTime::from_timestamp_millis(*ms))
                .map(FieldValue::DateTime)
                .unwrap_or_else(|| FieldValue::from(NO_DATA));
            Annotated::new(device.clone()).with(LAST_ACTIVITY, value)
        })
        .collect()
}
