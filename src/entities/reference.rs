//! Reference collections side-loaded for lookups

use super::tables;
use crate::core::field::FieldKind;
use crate::impl_record;

impl_record!(
    /// A site belonging to a client where devices are installed
    Location,
    "location",
    "locations",
    {
        id: i64 => (FieldKind::Numeric, false),
        client_id: Option<i64> => (FieldKind::Reference { table: tables::CLIENTS }, false),
        name: String => (FieldKind::Text, true),
        address: Option<String> => (FieldKind::Text, true),
    }
);

impl_record!(
    /// A small categorizing entity: device type, ticket status, work type
    Classifier,
    "classifier",
    "classifiers",
    {
        id: i64 => (FieldKind::Numeric, false),
        name: String => (FieldKind::Text, true),
        #[serde(default)]
        kind: String => (FieldKind::Text, false),
    }
);
