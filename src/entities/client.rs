//! Clients and their contact people

use super::tables;
use crate::core::field::FieldKind;
use crate::impl_record;

impl_record!(
    Client,
    "client",
    "clients",
    {
        id: i64 => (FieldKind::Numeric, false),
        name: String => (FieldKind::Text, true),
        short_name: Option<String> => (FieldKind::Text, true),
        registration_code: Option<String> => (FieldKind::Text, true),
        email: Option<String> => (FieldKind::Text, true),
        phone: Option<String> => (FieldKind::Text, false),
        #[serde(default)]
        is_active: bool => (FieldKind::Boolean, false),
        created_at: Option<String> => (FieldKind::Date, false),
    }
);

impl_record!(
    Contact,
    "contact",
    "contacts",
    {
        id: i64 => (FieldKind::Numeric, false),
        client_id: i64 => (FieldKind::Reference { table: tables::CLIENTS }, true),
        name: String => (FieldKind::Text, true),
        title: Option<String> => (FieldKind::Text, true),
        email: Option<String> => (FieldKind::Text, true),
        phone: Option<String> => (FieldKind::Text, true),
        #[serde(default)]
        is_primary: bool => (FieldKind::Boolean, false),
    }
);
