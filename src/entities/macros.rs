//! Macros for reducing boilerplate when declaring record types
//!
//! A record type needs a struct, a field schema and a by-name accessor that
//! agree with each other; `impl_record!` generates all three from a single
//! field list.

/// Declare a record struct together with its `Record` implementation
///
/// Each field is annotated with its [`FieldKind`](crate::core::field::FieldKind)
/// and whether free-text search looks at it. Field types must convert into
/// [`FieldValue`](crate::core::field::FieldValue) (strings, integers, floats,
/// booleans, UUIDs, UTC datetimes, and `Option`s of those).
///
/// # Example
///
/// ```rust,ignore
/// use roster::prelude::*;
///
/// impl_record!(
///     Device,
///     "device",
///     "devices",
///     {
///         id: i64 => (FieldKind::Numeric, false),
///         name: String => (FieldKind::Text, true),
///         location_id: Option<i64> => (FieldKind::Reference { table: "locations" }, true),
///     }
/// );
///
/// assert_eq!(Device::resource_name(), "devices");
/// assert_eq!(Device::searchable_fields(), vec!["name", "location_id"]);
/// ```
#[macro_export]
macro_rules! impl_record {
    (
        $(#[$meta:meta])*
        $type:ident,
        $singular:expr,
        $plural:expr,
        {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $field_type:ty => ($kind:expr, $searchable:expr)
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $type {
            $(
                $(#[$field_meta])*
                pub $field: $field_type,
            )*
        }

        impl $crate::core::record::Record for $type {
            fn resource_name() -> &'static str {
                $plural
            }

            fn resource_name_singular() -> &'static str {
                $singular
            }

            fn schema() -> &'static [$crate::core::field::FieldDef] {
                const SCHEMA: &[$crate::core::field::FieldDef] = &[
                    $( $crate::core::field::FieldDef::new(stringify!($field), $kind, $searchable) ),*
                ];
                SCHEMA
            }

            fn field_value(&self, field: &str) -> $crate::core::field::FieldValue {
                $(
                    if field == stringify!($field) {
                        return $crate::core::field::FieldValue::from(self.$field.clone());
                    }
                )*
                $crate::core::field::FieldValue::Null
            }
        }
    };
}
