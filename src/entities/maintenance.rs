//! Scheduled and completed maintenance work

use super::tables;
use crate::core::field::FieldKind;
use crate::impl_record;

impl_record!(
    Maintenance,
    "maintenance",
    "maintenances",
    {
        id: i64 => (FieldKind::Numeric, false),
        client_id: i64 => (FieldKind::Reference { table: tables::CLIENTS }, true),
        device_id: Option<i64> => (FieldKind::Reference { table: tables::DEVICES }, true),
        name: String => (FieldKind::Text, true),
        work_type_id: Option<i64> => (FieldKind::Reference { table: tables::WORK_TYPES }, false),
        scheduled_at: Option<String> => (FieldKind::Date, false),
        completed_at: Option<String> => (FieldKind::Date, false),
        #[serde(default)]
        is_completed: bool => (FieldKind::Boolean, false),
        comment: Option<String> => (FieldKind::Text, true),
    }
);
