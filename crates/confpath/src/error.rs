//! Configuration error types.

use thiserror::Error;

/// Result type for configuration access and binding.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while parsing, reading or binding configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Nothing exists at the requested path.
    #[error("not found: {path}")]
    NotFound {
        /// The requested path.
        path: String,
    },

    /// The path cannot be used (for example an empty file path).
    #[error("incorrect path: {path:?}")]
    IncorrectPath {
        /// The offending path.
        path: String,
    },

    /// A value exists but cannot be coerced into the requested type.
    #[error("incorrect value type: expected {expected}")]
    IncorrectValueType {
        /// Name of the requested type.
        expected: &'static str,
    },

    /// The configuration type is not one of the supported formats.
    #[error("unknown config type: {config_type:?}")]
    UnknownConfigType {
        /// The rejected type or extension.
        config_type: String,
    },

    /// The binder met a target it cannot fill from configuration.
    #[error("unsupported type to load value: {type_name}")]
    UnsupportedType {
        /// Rust type name of the target.
        type_name: &'static str,
    },

    /// A custom loader or `Loadable` rejected the value.
    #[error("invalid value {value:?}: {reason}")]
    InvalidValue {
        /// The raw configuration value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// JSON parsing error.
    #[error("failed to parse JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error.
    #[error("failed to parse YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// INI or XML parsing error.
    #[error("failed to parse {format} configuration: {message}")]
    Parse {
        /// Format being parsed.
        format: &'static str,
        /// Description of the problem.
        message: String,
    },

    /// Duration parsing error.
    #[error("failed to parse duration: {0}")]
    Duration(#[from] humantime::DurationError),

    /// Timestamp parsing error.
    #[error("failed to parse time: {0}")]
    Time(#[from] chrono::ParseError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Create a new not found error.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create a new incorrect path error.
    pub fn incorrect_path(path: impl Into<String>) -> Self {
        Self::IncorrectPath { path: path.into() }
    }

    /// Create a new incorrect value type error.
    pub fn incorrect_value_type(expected: &'static str) -> Self {
        Self::IncorrectValueType { expected }
    }

    /// Create a new unknown config type error.
    pub fn unknown_config_type(config_type: impl Into<String>) -> Self {
        Self::UnknownConfigType {
            config_type: config_type.into(),
        }
    }

    /// Create a new unsupported type error for `T`.
    pub fn unsupported_type<T: ?Sized>() -> Self {
        Self::UnsupportedType {
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Create a new invalid value error.
    pub fn invalid_value(value: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidValue {
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a new parse error.
    pub fn parse(format: &'static str, message: impl Into<String>) -> Self {
        Self::Parse {
            format,
            message: message.into(),
        }
    }

    /// Returns `true` for [`ConfigError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` for [`ConfigError::IncorrectValueType`].
    pub fn is_incorrect_value_type(&self) -> bool {
        matches!(self, Self::IncorrectValueType { .. })
    }
}
