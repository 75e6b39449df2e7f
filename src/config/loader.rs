//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::SemanConfig;
use crate::domain::errors::SemanError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "seman.toml";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into SemanConfig
/// 4. Applies environment variable overrides (SEMAN_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use seman::config::load_config;
///
/// let config = load_config("seman.toml").expect("Failed to load config");
/// println!("Max depth: {}", config.engine.max_depth);
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<SemanConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SemanError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        SemanError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let config = parse_config(&contents)?;

    tracing::debug!(path = %path.display(), "Configuration loaded");
    Ok(config)
}

/// Loads `seman.toml` from the working directory, or defaults if it is absent
///
/// Environment overrides apply in both cases.
pub fn load_default_config() -> Result<SemanConfig> {
    if Path::new(DEFAULT_CONFIG_FILE).exists() {
        return load_config(DEFAULT_CONFIG_FILE);
    }

    let mut config = SemanConfig::default();
    apply_env_overrides(&mut config)?;
    validate(&config)?;
    Ok(config)
}

/// Parses configuration text, with substitution, overrides and validation
pub fn parse_config(contents: &str) -> Result<SemanConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: SemanConfig = toml::from_str(&contents)
        .map_err(|e| SemanError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &SemanConfig) -> Result<()> {
    config.validate().map_err(|e| {
        SemanError::Configuration(format!("Configuration validation failed: {}", e))
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| SemanError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&cap[0], &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(SemanError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using SEMAN_* prefix
///
/// Environment variables follow the pattern: SEMAN_<SECTION>_<KEY>,
/// for example SEMAN_ENGINE_MAX_DEPTH or SEMAN_AUDIT_ENABLED.
fn apply_env_overrides(config: &mut SemanConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("SEMAN_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Engine overrides
    if let Ok(val) = std::env::var("SEMAN_ENGINE_MAX_DEPTH") {
        config.engine.max_depth = val.parse().map_err(|_| {
            SemanError::Configuration(format!(
                "SEMAN_ENGINE_MAX_DEPTH must be a positive integer, got '{val}'"
            ))
        })?;
    }
    if let Ok(val) = std::env::var("SEMAN_ENGINE_SCHEMA") {
        config.engine.schema = Some(val.into());
    }

    // Audit overrides
    if let Ok(val) = std::env::var("SEMAN_AUDIT_ENABLED") {
        config.audit.enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("SEMAN_AUDIT_LOG_PATH") {
        config.audit.log_path = val.into();
    }
    if let Ok(val) = std::env::var("SEMAN_AUDIT_JSON_FORMAT") {
        config.audit.json_format = val.parse().unwrap_or(true);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("SEMAN_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("SEMAN_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("SEMAN_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
