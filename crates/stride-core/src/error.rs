//! Error types for Stride

use thiserror::Error;

/// The main error type for Stride operations
#[derive(Debug, Error)]
pub enum StrideError {
    #[error("Missing scene reference: {0}")]
    MissingReference(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("Physics error: {0}")]
    PhysicsError(String),
}

/// Result type alias for Stride operations
pub type Result<T> = std::result::Result<T, StrideError>;

impl From<toml::de::Error> for StrideError {
    fn from(err: toml::de::Error) -> Self {
        StrideError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for StrideError {
    fn from(err: toml::ser::Error) -> Self {
        StrideError::TomlSerError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_error_conversion() {
        let err: StrideError = toml::from_str::<toml::Value>("walk_speed = ")
            .unwrap_err()
            .into();
        assert!(matches!(err, StrideError::TomlParseError(_)));
    }

    #[test]
    fn test_out_of_range_message() {
        let err = StrideError::ValueOutOfRange {
            field: "walk_speed".into(),
            min: 0.0,
            max: 100.0,
            value: -1.0,
        };
        assert_eq!(
            err.to_string(),
            "Value out of range: walk_speed must be between 0 and 100, got -1"
        );
    }
}
