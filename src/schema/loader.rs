//! Schema loading from JSON or TOML files

use super::SchemaNode;
use crate::domain::errors::SemanError;
use crate::domain::result::Result;
use std::fs;
use std::path::Path;

/// Load a schema from a `.json` or `.toml` file
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist or cannot be read
/// - The extension is neither `json` nor `toml`
/// - The content is not a valid schema
///
/// # Examples
///
/// ```no_run
/// use seman::schema::load_schema;
///
/// let schema = load_schema("schemas/finavi.json").expect("Failed to load schema");
/// println!("Schema depth: {}", schema.depth());
/// ```
pub fn load_schema(path: impl AsRef<Path>) -> Result<SchemaNode> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SemanError::Schema(format!(
            "Schema file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        SemanError::Schema(format!(
            "Failed to read schema file {}: {}",
            path.display(),
            e
        ))
    })?;

    let schema = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => parse_schema_json(&contents),
        Some("toml") => parse_schema_toml(&contents),
        _ => Err(SemanError::Schema(format!(
            "Schema file must be .json or .toml: {}",
            path.display()
        ))),
    }?;

    tracing::debug!(
        path = %path.display(),
        depth = schema.depth(),
        "Schema loaded"
    );

    Ok(schema)
}

/// Parse a schema from JSON text
pub fn parse_schema_json(contents: &str) -> Result<SchemaNode> {
    serde_json::from_str(contents)
        .map_err(|e| SemanError::Schema(format!("Failed to parse JSON schema: {e}")))
}

/// Parse a schema from TOML text
///
/// The document root is the root node, so it is typically `type = "object"`.
pub fn parse_schema_toml(contents: &str) -> Result<SchemaNode> {
    toml::from_str(contents)
        .map_err(|e| SemanError::Schema(format!("Failed to parse TOML schema: {e}")))
}
