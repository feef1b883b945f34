//! Support tickets

use super::tables;
use crate::core::field::FieldKind;
use crate::impl_record;

impl_record!(
    Ticket,
    "ticket",
    "tickets",
    {
        id: i64 => (FieldKind::Numeric, false),
        client_id: i64 => (FieldKind::Reference { table: tables::CLIENTS }, true),
        title: String => (FieldKind::Text, true),
        description: Option<String> => (FieldKind::Text, true),
        status_id: Option<i64> => (FieldKind::Reference { table: tables::TICKET_STATUSES }, false),
        device_id: Option<i64> => (FieldKind::Reference { table: tables::DEVICES }, true),
        priority: Option<i64> => (FieldKind::Numeric, false),
        created_at: Option<String> => (FieldKind::Date, false),
        closed_at: Option<String> => (FieldKind::Date, false),
        #[serde(default)]
        is_closed: bool => (FieldKind::Boolean, false),
    }
);
