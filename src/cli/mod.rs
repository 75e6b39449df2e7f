//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for SemAn using clap.

pub mod commands;

use crate::config::{load_config, load_default_config, SemanConfig};
use crate::domain::Result;
use clap::{Parser, Subcommand};

/// SemAn - schema-driven semantic anonymization
#[derive(Parser, Debug)]
#[command(name = "seman")]
#[command(version, about, long_about = None)]
#[command(author = "SemAn Contributors")]
pub struct Cli {
    /// Path to configuration file; `seman.toml` is used when present
    #[arg(short, long, env = "SEMAN_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SEMAN_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Load the configuration named on the command line, or the default one
    pub fn resolve_config(&self) -> Result<SemanConfig> {
        match &self.config {
            Some(path) => load_config(path),
            None => load_default_config(),
        }
    }

    /// Command-line level, falling back to the configured one
    pub fn effective_log_level<'a>(&'a self, config: &'a SemanConfig) -> &'a str {
        self.log_level
            .as_deref()
            .unwrap_or(&config.application.log_level)
    }

    /// Run the selected command and return its exit code
    pub fn execute(&self, config: &SemanConfig) -> anyhow::Result<i32> {
        match &self.command {
            Commands::Anonymize(args) => args.execute(config),
            Commands::ValidateSchema(args) => args.execute(config),
            Commands::Presets(args) => args.execute(),
            Commands::Init(args) => args.execute(),
            Commands::Demo(args) => args.execute(config),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Anonymize JSON documents with a schema
    Anonymize(commands::anonymize::AnonymizeArgs),

    /// Validate a schema file
    ValidateSchema(commands::validate::ValidateArgs),

    /// List presets or print one
    Presets(commands::presets::PresetsArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// Run the financial profile demo
    Demo(commands::demo::DemoArgs),
}
