//! Preference store backends

#[cfg(feature = "in-memory")]
pub mod in_memory;
#[cfg(feature = "json-file")]
pub mod json_file;

#[cfg(feature = "in-memory")]
pub use in_memory::InMemoryPreferenceStore;
#[cfg(feature = "json-file")]
pub use json_file::JsonFilePreferenceStore;
