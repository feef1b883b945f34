//! Typed error handling for roster
//!
//! Sorting and filtering never fail: bad input degrades to fallback values.
//! Errors only exist at the edges, where view configuration is loaded and
//! preferences are persisted.
//!
//! # Error Categories
//!
//! - [`ConfigError`]: view configuration parsing and validation
//! - [`StorageError`]: preference store backends

use thiserror::Error;

/// The main error type for roster
#[derive(Debug, Error)]
pub enum RosterError {
    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Preference storage errors
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl RosterError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            RosterError::Config(e) => e.error_code(),
            RosterError::Storage(e) => e.error_code(),
        }
    }
}

/// Errors raised while loading or applying view configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration content is not valid YAML for the expected shape
    #[error("Failed to parse view configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Two views share the same name
    #[error("View '{name}' is defined more than once")]
    DuplicateView { name: String },

    /// No view with this name is configured
    #[error("View '{name}' is not configured")]
    UnknownView { name: String },

    /// A field setting cannot be honored
    #[error("Invalid setting for field '{field}' in view '{view}': {message}")]
    InvalidField {
        view: String,
        field: String,
        message: String,
    },
}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::Io { .. } => "CONFIG_IO_ERROR",
            ConfigError::Parse(_) => "CONFIG_PARSE_ERROR",
            ConfigError::DuplicateView { .. } => "DUPLICATE_VIEW",
            ConfigError::UnknownView { .. } => "UNKNOWN_VIEW",
            ConfigError::InvalidField { .. } => "INVALID_FIELD",
        }
    }
}

/// Errors raised by preference store backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backing file could not be read or written
    #[error("Preference file '{path}' is not accessible: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Stored content could not be decoded
    #[error("Preference data is corrupted: {0}")]
    Corrupted(#[from] serde_json::Error),

    /// A lock guarding in-memory state was poisoned
    #[error("Preference store lock poisoned: {0}")]
    Poisoned(String),
}

impl StorageError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::Io { .. } => "STORAGE_IO_ERROR",
            StorageError::Corrupted(_) => "STORAGE_CORRUPTED",
            StorageError::Poisoned(_) => "STORAGE_POISONED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::UnknownView {
            name: "devices".to_string(),
        };
        assert_eq!(err.to_string(), "View 'devices' is not configured");
        assert_eq!(err.error_code(), "UNKNOWN_VIEW");
    }

    #[test]
    fn test_roster_error_wraps_categories() {
        let err: RosterError = ConfigError::DuplicateView {
            name: "tickets".to_string(),
        }
        .into();
        assert_eq!(err.error_code(), "DUPLICATE_VIEW");
        assert_eq!(err.to_string(), "View 'tickets' is defined more than once");

        let err: RosterError = StorageError::Poisoned("boom".to_string()).into();
        assert_eq!(err.error_code(), "STORAGE_POISONED");
    }
}
