//! Domain error types
//!
//! This module defines the error hierarchy for SemAn. Errors only surface while
//! building schemas, engines and configuration; anonymizing a document never fails.

use thiserror::Error;

/// Main SemAn error type
///
/// This is the primary error type used throughout the library.
#[derive(Debug, Error)]
pub enum SemanError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Schema loading or structure errors
    #[error("Schema error: {0}")]
    Schema(String),

    /// A built-in transformer was configured with options it cannot use
    #[error("Invalid options for transformer {kind} at '{path}': {message}")]
    InvalidTransformerOptions {
        path: String,
        kind: String,
        message: String,
    },

    /// Schema nesting exceeds the engine's depth guard
    #[error("Schema depth {depth} exceeds the maximum of {max_depth}")]
    SchemaTooDeep { depth: usize, max_depth: usize },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl SemanError {
    /// Whether the error stems from user-supplied configuration or schema input
    ///
    /// The CLI maps these to exit code 2.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            SemanError::Configuration(_)
                | SemanError::Schema(_)
                | SemanError::InvalidTransformerOptions { .. }
                | SemanError::SchemaTooDeep { .. }
        )
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for SemanError {
    fn from(err: std::io::Error) -> Self {
        SemanError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for SemanError {
    fn from(err: serde_json::Error) -> Self {
        SemanError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for SemanError {
    fn from(err: toml::de::Error) -> Self {
        SemanError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seman_error_display() {
        let err = SemanError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_invalid_options_display() {
        let err = SemanError::InvalidTransformerOptions {
            path: "debts[].amount".to_string(),
            kind: "RangeBucket".to_string(),
            message: "missing field `labels`".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid options for transformer RangeBucket at 'debts[].amount': missing field `labels`"
        );
    }

    #[test]
    fn test_schema_too_deep_display() {
        let err = SemanError::SchemaTooDeep {
            depth: 80,
            max_depth: 64,
        };
        assert_eq!(err.to_string(), "Schema depth 80 exceeds the maximum of 64");
    }

    #[test]
    fn test_is_configuration_error() {
        assert!(SemanError::Schema("bad".to_string()).is_configuration_error());
        assert!(SemanError::SchemaTooDeep {
            depth: 2,
            max_depth: 1
        }
        .is_configuration_error());
        assert!(!SemanError::Io("disk".to_string()).is_configuration_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: SemanError = io_err.into();
        assert!(matches!(err, SemanError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: SemanError = json_err.into();
        assert!(matches!(err, SemanError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: SemanError = toml_err.into();
        assert!(matches!(err, SemanError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_seman_error_implements_std_error() {
        let err = SemanError::Schema("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
