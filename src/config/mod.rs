//! Configuration management for SemAn.
//!
//! # Overview
//!
//! SemAn uses an optional TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `SEMAN_*` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use seman::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("seman.toml")?;
//!
//! println!("Log level: {}", config.application.log_level);
//! println!("Max schema depth: {}", config.engine.max_depth);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (name, log level)
//! - [`EngineConfig`] - Schema depth limit and default schema file
//! - [`AuditConfig`] - Audit log of anonymized documents
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [engine]
//! max_depth = 64
//! schema = "schemas/finavi.json"
//!
//! [audit]
//! enabled = true
//! log_path = "${SEMAN_AUDIT_DIR}/anonymization.log"
//!
//! [logging]
//! local_enabled = true
//! local_path = "./logs"
//! local_rotation = "daily"
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_default_config, parse_config, DEFAULT_CONFIG_FILE};
pub use schema::{ApplicationConfig, AuditConfig, EngineConfig, LoggingConfig, SemanConfig};
