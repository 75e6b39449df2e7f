//! Anonymization statistics
//!
//! This module provides the [`AnonymizationReport`] filled in while the engine
//! walks documents: how many fields the schema kept or dropped, which
//! transformers ran, and where values fell back to pass-through.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Warnings kept per report; later ones are only counted
const MAX_WARNINGS: usize = 20;

/// Output of a single reported anonymization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnonymizedDocument {
    /// Anonymized document
    pub data: Value,

    /// Statistics for this document
    pub report: AnonymizationReport,
}

/// Statistics about one or more anonymized documents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnonymizationReport {
    /// Documents processed
    pub documents: usize,

    /// Input fields present in the schema
    pub fields_kept: usize,

    /// Input fields removed by the allowlist
    pub fields_dropped: usize,

    /// `null` values passed through
    pub null_values: usize,

    /// Values whose JSON type did not fit an object or array node
    pub shape_mismatches: usize,

    /// Successful transformations by kind
    pub transformations: BTreeMap<String, usize>,

    /// Values that named an unregistered transformer, by kind
    pub unknown_transformers: BTreeMap<String, usize>,

    /// Transformer errors by kind
    pub transformer_failures: BTreeMap<String, usize>,

    /// First warnings, with their document paths
    pub warnings: Vec<String>,

    /// Total processing time in milliseconds, when measured by the caller
    pub total_processing_time_ms: u64,
}

impl AnonymizationReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_transformation(&mut self, kind: &str) {
        *self.transformations.entry(kind.to_string()).or_insert(0) += 1;
    }

    pub(crate) fn record_unknown_transformer(&mut self, kind: &str, path: &str) {
        *self.unknown_transformers.entry(kind.to_string()).or_insert(0) += 1;
        self.add_warning(format!("Transformer '{kind}' not found at {path}"));
    }

    pub(crate) fn record_transformer_failure(&mut self, kind: &str, path: &str) {
        *self.transformer_failures.entry(kind.to_string()).or_insert(0) += 1;
        self.add_warning(format!("Transformer '{kind}' failed at {path}"));
    }

    /// Add a warning; ignored once the report holds [`MAX_WARNINGS`]
    pub fn add_warning(&mut self, warning: String) {
        if self.warnings.len() < MAX_WARNINGS {
            self.warnings.push(warning);
        }
    }

    /// Fold another report into this one
    pub fn merge(&mut self, other: &AnonymizationReport) {
        self.documents += other.documents;
        self.fields_kept += other.fields_kept;
        self.fields_dropped += other.fields_dropped;
        self.null_values += other.null_values;
        self.shape_mismatches += other.shape_mismatches;
        self.total_processing_time_ms += other.total_processing_time_ms;

        for (target, source) in [
            (&mut self.transformations, &other.transformations),
            (&mut self.unknown_transformers, &other.unknown_transformers),
            (&mut self.transformer_failures, &other.transformer_failures),
        ] {
            for (kind, count) in source {
                *target.entry(kind.clone()).or_insert(0) += count;
            }
        }

        for warning in &other.warnings {
            self.add_warning(warning.clone());
        }
    }

    /// Sum of successful transformations over all kinds
    pub fn total_transformations(&self) -> usize {
        self.transformations.values().sum()
    }

    /// Whether any value fell back to pass-through
    pub fn has_warnings(&self) -> bool {
        !self.unknown_transformers.is_empty() || !self.transformer_failures.is_empty()
    }

    /// Average processing time per document in milliseconds
    pub fn avg_processing_time_ms(&self) -> u64 {
        if self.documents == 0 {
            0
        } else {
            self.total_processing_time_ms / self.documents as u64
        }
    }

    /// Format report for console output
    pub fn format_console(&self) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push_str("                    ANONYMIZATION REPORT                       \n");
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output.push_str("📊 SUMMARY\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        output.push_str(&format!("  Documents Processed:   {}\n", self.documents));
        output.push_str(&format!("  Fields Kept:           {}\n", self.fields_kept));
        output.push_str(&format!("  Fields Dropped:        {}\n", self.fields_dropped));
        output.push_str(&format!("  Null Values:           {}\n", self.null_values));
        output.push_str(&format!("  Shape Mismatches:      {}\n", self.shape_mismatches));
        output.push_str(&format!(
            "  Avg Processing Time:   {} ms\n",
            self.avg_processing_time_ms()
        ));
        output.push('\n');

        if !self.transformations.is_empty() {
            output.push_str("🔄 TRANSFORMATIONS\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            for (kind, count) in &self.transformations {
                output.push_str(&format!("  {:30} {:>5}\n", kind, count));
            }
            output.push('\n');
        }

        if !self.warnings.is_empty() {
            output.push_str("⚠️  WARNINGS\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            for warning in &self.warnings {
                output.push_str(&format!("  • {}\n", warning));
            }
            output.push('\n');
        }

        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output
    }

    /// Format report as JSON
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write the JSON report to a file
    pub fn write_to_file(&self, path: &std::path::Path) -> std::io::Result<()> {
        let json = self.format_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}
