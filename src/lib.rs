// SemAn - Schema-driven Semantic Anonymization
// Copyright (c) 2025 SemAn Contributors
// Licensed under the MIT License

//! # SemAn - Schema-driven Semantic Anonymization
//!
//! SemAn turns structured personal data into an anonymized document that keeps
//! its meaning. A schema describes the shape of the data: only the fields it
//! names survive, and each of them can be generalized by a transformer (exact
//! ages become age classes, dates become years, scores become labels).
//!
//! ## Architecture
//!
//! - [`schema`] - Schema tree, fluent builder and schema files
//! - [`transformers`] - Transformer contract, built-in kinds and registry
//! - [`anonymization`] - Engine, reports and audit log
//! - [`presets`] - Ready-made field rules
//! - [`domain`] - Error and result types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//! - [`cli`] - Command-line interface
//!
//! ## Quick Start
//!
//! ```
//! use seman::anonymization::AnonymizationEngine;
//! use seman::schema::Schema;
//! use seman::transformers::ValueMapperOptions;
//! use serde_json::json;
//!
//! let schema = Schema::object([
//!     ("age", Schema::number().range_bucket([30, 40, 50, 60], ["unter30", "30bis39", "40bis49", "50bis59", "60plus"])),
//!     ("netWorth", Schema::number().range_bucket([50000, 150000, 500000], ["niedrig", "mittel", "hoch", "sehrHoch"])),
//!     ("healthIndicators", Schema::object([
//!         ("ausgaben", Schema::number().value_mapper(
//!             ValueMapperOptions::new().map(2, "gut").map(1, "mittel").map(0, "schlecht"),
//!         )),
//!     ])),
//! ]);
//!
//! let engine = AnonymizationEngine::new(schema)?;
//! let output = engine.anonymize(&json!({
//!     "name": "Max Mustermann",
//!     "age": 34,
//!     "netWorth": 125000,
//!     "healthIndicators": {"ausgaben": 2}
//! }));
//!
//! assert_eq!(output, json!({
//!     "age": "30bis39",
//!     "netWorth": "mittel",
//!     "healthIndicators": {"ausgaben": "gut"}
//! }));
//! # Ok::<(), seman::domain::SemanError>(())
//! ```
//!
//! ## Custom Transformers
//!
//! ```
//! use seman::anonymization::AnonymizationEngine;
//! use seman::schema::{Schema, TransformerConfig};
//! use seman::transformers::Transformer;
//! use serde_json::{json, Value};
//!
//! struct Initials;
//!
//! impl Transformer for Initials {
//!     fn transform(&self, value: &Value, _options: &Value) -> anyhow::Result<Value> {
//!         let name = value.as_str().unwrap_or_default();
//!         Ok(json!(name.split_whitespace().filter_map(|w| w.chars().next()).collect::<String>()))
//!     }
//! }
//!
//! let engine = AnonymizationEngine::builder(Schema::object([
//!     ("name", Schema::string().transform(TransformerConfig::new("Initials", Value::Null))),
//! ]))
//! .register("Initials", Initials)
//! .build()?;
//!
//! assert_eq!(engine.anonymize(&json!({"name": "Max Mustermann"})), json!({"name": "MM"}));
//! # Ok::<(), seman::domain::SemanError>(())
//! ```
//!
//! ## Error Handling
//!
//! Construction errors use [`domain::SemanError`]. Anonymizing never fails:
//! a value a transformer cannot handle is passed through and reported.
//!
//! ## Logging
//!
//! SemAn logs with the `tracing` crate. Transformer fallbacks are logged at
//! debug level, unknown transformer kinds and transformer errors at warn level.

pub mod anonymization;
pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
pub mod presets;
pub mod schema;
pub mod transformers;

pub use anonymization::{AnonymizationEngine, AnonymizationReport};
pub use domain::{Result, SemanError};
pub use schema::{Schema, SchemaBuilder, SchemaNode, TransformerConfig};
pub use transformers::{BoundTransformer, Transformer, TransformerKind, TransformerRegistry};
