//! Schema-driven anonymization
//!
//! This module applies a [`SchemaNode`](crate::schema::SchemaNode) to JSON
//! documents. The schema is an allowlist: fields it does not name never reach
//! the output, and the fields it does name are generalized by their
//! transformers.
//!
//! # Architecture
//!
//! - **Engine**: walks document and schema together ([`AnonymizationEngine`])
//! - **Report**: counters collected during the walk ([`AnonymizationReport`])
//! - **Audit**: append-only log of processed documents, keyed by input hash
//!
//! # Usage
//!
//! ```
//! use seman::anonymization::AnonymizationEngine;
//! use seman::schema::Schema;
//! use seman::transformers::DatePrecision;
//! use serde_json::json;
//!
//! let engine = AnonymizationEngine::new(Schema::object([
//!     ("birthDate", Schema::string().fuzzy_date(DatePrecision::Decade)),
//! ]))?;
//!
//! let result = engine.anonymize_with_report(&json!({"birthDate": "1987-06-30", "iban": "DE89..."}));
//! assert_eq!(result.data, json!({"birthDate": "1980er"}));
//! assert_eq!(result.report.fields_dropped, 1);
//! # Ok::<(), seman::domain::SemanError>(())
//! ```

pub mod audit;
pub mod engine;
pub mod report;

pub use audit::AuditLogger;
pub use engine::{AnonymizationEngine, EngineBuilder, DEFAULT_MAX_DEPTH};
pub use report::{AnonymizationReport, AnonymizedDocument};
