//! Anonymize command implementation
//!
//! This module implements the `anonymize` command: read JSON documents,
//! apply a schema, write the anonymized documents.

use crate::anonymization::{AnonymizationEngine, AnonymizationReport, AuditLogger};
use crate::config::SemanConfig;
use crate::schema::load_schema;
use anyhow::Context;
use clap::Args;
use serde_json::Value;
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the anonymize command
#[derive(Args, Debug)]
pub struct AnonymizeArgs {
    /// Schema file (.json or .toml); defaults to `engine.schema` from the configuration
    #[arg(short, long)]
    pub schema: Option<PathBuf>,

    /// Input file; reads stdin when omitted
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file; writes stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Treat the input as newline-delimited JSON, one document per line
    #[arg(long)]
    pub ndjson: bool,

    /// Pretty-print output (ignored for NDJSON)
    #[arg(long)]
    pub pretty: bool,

    /// Print an anonymization report to stderr
    #[arg(long)]
    pub report: bool,
}

impl AnonymizeArgs {
    /// Execute the anonymize command
    pub fn execute(&self, config: &SemanConfig) -> anyhow::Result<i32> {
        let Some(schema_path) = self.schema.as_ref().or(config.engine.schema.as_ref()) else {
            eprintln!("❌ No schema given. Use --schema or set engine.schema in the configuration");
            return Ok(2);
        };

        tracing::info!(schema = %schema_path.display(), "Starting anonymize command");

        let schema = match load_schema(schema_path) {
            Ok(schema) => schema,
            Err(e) => {
                eprintln!("❌ Failed to load schema: {e}");
                return Ok(2);
            }
        };

        let engine = match AnonymizationEngine::from_config(schema, &config.engine) {
            Ok(engine) => engine,
            Err(e) => {
                eprintln!("❌ Invalid schema: {e}");
                return Ok(2);
            }
        };

        let audit = AuditLogger::from_config(&config.audit)?;
        let documents = self.read_documents()?;
        let mut writer = self.open_output()?;

        let started = Instant::now();
        let mut report = AnonymizationReport::new();

        for (index, document) in documents.iter().enumerate() {
            let document_started = Instant::now();
            let mut result = engine.anonymize_with_report(document);
            let elapsed_ms = document_started.elapsed().as_millis() as u64;
            result.report.total_processing_time_ms = elapsed_ms;

            audit.log_document(index, document, &result.report, elapsed_ms)?;
            report.merge(&result.report);

            let line = if self.pretty && !self.ndjson {
                serde_json::to_string_pretty(&result.data)
            } else {
                serde_json::to_string(&result.data)
            }
            .context("Failed to serialize anonymized document")?;
            writeln!(writer, "{line}").context("Failed to write output")?;
        }

        writer.flush().context("Failed to write output")?;

        crate::log_anonymization_complete!(documents.len(), started.elapsed());

        if report.has_warnings() {
            tracing::warn!(
                unknown = ?report.unknown_transformers,
                failed = ?report.transformer_failures,
                "Some values were passed through untransformed"
            );
        }

        if self.report {
            eprint!("{}", report.format_console());
        }

        Ok(0)
    }

    fn read_documents(&self) -> anyhow::Result<Vec<Value>> {
        let raw = match &self.input {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file: {}", path.display()))?,
            None => {
                let mut buffer = String::new();
                io::stdin()
                    .read_to_string(&mut buffer)
                    .context("Failed to read stdin")?;
                buffer
            }
        };

        parse_documents(&raw, self.ndjson)
    }

    fn open_output(&self) -> anyhow::Result<Box<dyn Write>> {
        Ok(match &self.output {
            Some(path) => {
                let file = fs::File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(BufWriter::new(io::stdout().lock())),
        })
    }
}

/// Split raw input into documents
///
/// NDJSON skips blank lines; otherwise the whole input is one document.
fn parse_documents(raw: &str, ndjson: bool) -> anyhow::Result<Vec<Value>> {
    if !ndjson {
        let document = serde_json::from_str(raw).context("Input is not valid JSON")?;
        return Ok(vec![document]);
    }

    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(number, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("Line {} is not valid JSON", number + 1))
        })
        .collect()
}
