//! Audit logging module
//!
//! Records which documents were anonymized without storing their content.

pub mod logger;

pub use logger::AuditLogger;
