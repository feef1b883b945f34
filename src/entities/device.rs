//! Devices and the software/tech info recorded for clients

use super::tables;
use crate::core::field::FieldKind;
use crate::impl_record;

impl_record!(
    /// A maintained piece of equipment
    Device,
    "device",
    "devices",
    {
        id: i64 => (FieldKind::Numeric, false),
        client_id: i64 => (FieldKind::Reference { table: tables::CLIENTS }, true),
        name: String => (FieldKind::Text, true),
        serial_number: Option<String> => (FieldKind::Text, true),
        device_type_id: Option<i64> => (FieldKind::Reference { table: tables::DEVICE_TYPES }, true),
        location_id: Option<i64> => (FieldKind::Reference { table: tables::LOCATIONS }, true),
        introduced_at: Option<String> => (FieldKind::Date, false),
        #[serde(default)]
        written_off: bool => (FieldKind::Boolean, false),
    }
);

impl_record!(
    /// Software, license or other technical information kept for a client
    SoftwareInfo,
    "software_info",
    "software_infos",
    {
        id: i64 => (FieldKind::Numeric, false),
        client_id: i64 => (FieldKind::Reference { table: tables::CLIENTS }, false),
        name: String => (FieldKind::Text, true),
        version: Option<String> => (FieldKind::Text, true),
        license_key: Option<String> => (FieldKind::Text, false),
        license_expires: Option<String> => (FieldKind::Date, false),
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::Record;

    #[test]
    fn test_device_from_backend_json() {
        let device: Device = serde_json::from_str(
            r#"{"id": 4, "client_id": 1, "name": "Boiler", "serial_number": "00981", "location_id": 2}"#,
        )
        .unwrap();

        assert_eq!(device.device_type_id, None);
        assert!(!device.written_off);
        assert_eq!(device.field_value("serial_number").as_string(), Some("00981"));
        assert_eq!(
            Device::searchable_fields(),
            vec!["client_id", "name", "serial_number", "device_type_id", "location_id"]
        );
    }
}
