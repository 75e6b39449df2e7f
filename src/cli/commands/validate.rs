//! Validate schema command implementation
//!
//! This module implements the `validate-schema` command, which loads a schema
//! file, builds an engine from it and prints a summary.

use crate::anonymization::AnonymizationEngine;
use crate::config::SemanConfig;
use crate::schema::load_schema;
use crate::transformers::TransformerKind;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the validate-schema command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Schema file (.json or .toml)
    #[arg(short, long)]
    pub schema: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate-schema command
    pub fn execute(&self, config: &SemanConfig) -> anyhow::Result<i32> {
        tracing::info!(schema = %self.schema.display(), "Validating schema");

        println!("🔍 Validating schema file: {}", self.schema.display());
        println!();

        let schema = match load_schema(&self.schema) {
            Ok(schema) => {
                println!("✅ Schema file loaded successfully");
                schema
            }
            Err(e) => {
                println!("❌ Failed to load schema file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let summary = schema.summary();

        let engine = match AnonymizationEngine::from_config(schema, &config.engine) {
            Ok(engine) => {
                println!("✅ Schema is valid");
                engine
            }
            Err(e) => {
                println!("❌ Schema validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2);
            }
        };

        println!();
        println!("Schema Summary:");
        println!("  Depth: {} (max {})", summary.depth, engine.max_depth());
        println!("  Object Nodes: {}", summary.object_nodes);
        println!("  Array Nodes: {}", summary.array_nodes);
        println!("  Leaf Nodes: {}", summary.leaf_nodes);
        println!("  Allowed Fields: {}", summary.allowed_fields);

        if !summary.transformers.is_empty() {
            println!("  Transformers:");
            for (kind, count) in &summary.transformers {
                let marker = if engine.registry().contains(&TransformerKind::from(kind.as_str())) {
                    ""
                } else {
                    " ⚠️  not registered, values pass through"
                };
                println!("    {kind}: {count}{marker}");
            }
        }
        println!();

        Ok(0)
    }
}
