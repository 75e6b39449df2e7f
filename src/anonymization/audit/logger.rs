//! Audit logger for anonymized documents

use crate::anonymization::report::AnonymizationReport;
use crate::config::AuditConfig;
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Audit log entry
#[derive(Debug, Serialize)]
struct AuditLogEntry {
    timestamp: String,
    document_index: usize,
    /// SHA-256 of the serialized input; the input itself is never written
    input_hash: String,
    fields_kept: usize,
    fields_dropped: usize,
    transformations: usize,
    fallbacks: usize,
    processing_time_ms: u64,
}

/// Appends one line per anonymized document to an audit file
#[derive(Debug)]
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
    enabled: bool,
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new(log_path: PathBuf, json_format: bool, enabled: bool) -> Result<Self> {
        if enabled {
            if let Some(parent) = log_path.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create audit log directory: {}", parent.display())
                })?;
            }
        }

        Ok(Self {
            log_path,
            json_format,
            enabled,
        })
    }

    /// Create a logger from the `[audit]` configuration section
    pub fn from_config(config: &AuditConfig) -> Result<Self> {
        Self::new(config.log_path.clone(), config.json_format, config.enabled)
    }

    /// Whether entries are written at all
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record one anonymized document
    pub fn log_document(
        &self,
        document_index: usize,
        input: &Value,
        report: &AnonymizationReport,
        processing_time_ms: u64,
    ) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let entry = AuditLogEntry {
            timestamp: Utc::now().to_rfc3339(),
            document_index,
            input_hash: hash_document(input),
            fields_kept: report.fields_kept,
            fields_dropped: report.fields_dropped,
            transformations: report.total_transformations(),
            fallbacks: report.unknown_transformers.values().sum::<usize>()
                + report.transformer_failures.values().sum::<usize>(),
            processing_time_ms,
        };

        self.write_entry(&entry)
    }

    fn write_entry(&self, entry: &AuditLogEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open audit log: {}", self.log_path.display()))?;

        if self.json_format {
            let json_line =
                serde_json::to_string(entry).context("Failed to serialize audit entry")?;
            writeln!(file, "{json_line}").context("Failed to write audit entry")?;
        } else {
            writeln!(
                file,
                "[{}] Document: {} | Hash: {} | Kept: {} | Dropped: {} | Transformed: {} | Time: {}ms",
                entry.timestamp,
                entry.document_index,
                entry.input_hash,
                entry.fields_kept,
                entry.fields_dropped,
                entry.transformations,
                entry.processing_time_ms
            )
            .context("Failed to write audit entry")?;
        }

        Ok(())
    }
}

/// SHA-256 of a document's compact JSON form
fn hash_document(value: &Value) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.to_string().as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn sample_report() -> AnonymizationReport {
        let mut report = AnonymizationReport::new();
        report.documents = 1;
        report.fields_kept = 2;
        report.fields_dropped = 1;
        report.transformations.insert("RangeBucket".to_string(), 2);
        report
    }

    #[test]
    fn test_audit_logger_creation_creates_directory() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit").join("anonymization.log");

        let logger = AuditLogger::new(log_path.clone(), true, true).unwrap();
        assert!(logger.is_enabled());
        assert!(log_path.parent().unwrap().exists());
    }

    #[test]
    fn test_hash_document() {
        let first = hash_document(&json!({"name": "Max"}));
        assert_eq!(first, hash_document(&json!({"name": "Max"})));
        assert_ne!(first, hash_document(&json!({"name": "Erika"})));
        assert_eq!(first.len(), 64);
    }

    #[test]
    fn test_log_document_json() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit.log");
        let logger = AuditLogger::new(log_path.clone(), true, true).unwrap();

        let input = json!({"name": "Max Mustermann", "age": 34});
        logger.log_document(0, &input, &sample_report(), 3).unwrap();
        logger.log_document(1, &input, &sample_report(), 4).unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let entry: Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(entry["document_index"], 1);
        assert_eq!(entry["fields_dropped"], 1);
        assert_eq!(entry["transformations"], 2);
        assert!(!content.contains("Mustermann"));
    }

    #[test]
    fn test_log_document_plain_text() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit.log");
        let logger = AuditLogger::new(log_path.clone(), false, true).unwrap();

        logger
            .log_document(7, &json!({"age": 34}), &sample_report(), 1)
            .unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("Document: 7"));
        assert!(content.contains("Kept: 2"));
    }

    #[test]
    fn test_disabled_logger_writes_nothing() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("nested").join("audit.log");
        let logger = AuditLogger::new(log_path.clone(), true, false).unwrap();

        logger
            .log_document(0, &json!({}), &AnonymizationReport::new(), 0)
            .unwrap();
        assert!(!log_path.exists());
    }
}
