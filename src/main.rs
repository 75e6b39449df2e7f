// SemAn - Schema-driven Semantic Anonymization
// Copyright (c) 2025 SemAn Contributors
// Licensed under the MIT License

use clap::Parser;
use seman::cli::Cli;
use seman::logging::init_logging;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    };

    let guard = match init_logging(cli.effective_log_level(&config), &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "SemAn starting");

    let exit_code = match cli.execute(&config) {
        Ok(code) => code,
        Err(e) => {
            seman::log_error_with_context!(&e, "Command execution failed");
            eprintln!("Error: {e:#}");
            5
        }
    };

    drop(guard);
    process::exit(exit_code);
}
