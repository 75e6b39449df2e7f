//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable console logs on stderr
//! - Configurable log levels, overridable with `RUST_LOG`
//! - Local JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use seman::logging::init_logging;
//! use seman::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log a transformer returning its input instead of a label
///
/// # Example
///
/// ```
/// use seman::log_transformer_fallback;
///
/// log_transformer_fallback!("RangeBucket", "value is not numeric");
/// ```
#[macro_export]
macro_rules! log_transformer_fallback {
    ($kind:expr, $reason:expr) => {
        tracing::debug!(
            transformer = $kind,
            reason = $reason,
            "Transformer fell back to pass-through"
        );
    };
}

/// Log the completion of an anonymization run
///
/// # Example
///
/// ```
/// use seman::log_anonymization_complete;
/// use std::time::Duration;
///
/// log_anonymization_complete!(42, Duration::from_millis(120));
/// ```
#[macro_export]
macro_rules! log_anonymization_complete {
    ($count:expr, $duration:expr) => {
        tracing::info!(
            count = $count,
            duration_ms = $duration.as_millis() as u64,
            "Anonymization completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```
/// use seman::log_error_with_context;
/// use seman::domain::SemanError;
///
/// let error = SemanError::Schema("unknown node type".to_string());
/// log_error_with_context!(&error, "Failed to load schema");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
