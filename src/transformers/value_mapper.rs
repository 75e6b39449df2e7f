//! Discrete value mapping transformer

use super::{parse_options, BoundTransformer, Transformer, UNKNOWN_LABEL};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Options for [`ValueMapperTransformer`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueMapperOptions {
    /// Lookup table from canonical key to label
    #[serde(default)]
    pub mapping: BTreeMap<String, String>,

    /// Label for absent or unmapped values
    #[serde(default, alias = "default_value", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl ValueMapperOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mapping entry
    ///
    /// Keys are stored in canonical form, so `map(2, ..)` and `map("2", ..)`
    /// declare the same entry.
    pub fn map(mut self, key: impl Into<Value>, label: impl Into<String>) -> Self {
        if let Some(key) = mapping_key(&key.into()) {
            self.mapping.insert(key, label.into());
        }
        self
    }

    /// Set the fallback label
    pub fn default_value(mut self, label: impl Into<String>) -> Self {
        self.default_value = Some(label.into());
        self
    }

    /// Label for a value
    pub fn label_for(&self, value: &Value) -> &str {
        let mapped = match value {
            Value::String(key) => self.mapping.get(key.as_str()),
            other => mapping_key(other).and_then(|key| self.mapping.get(&key)),
        };
        if let Some(label) = mapped {
            return label;
        }

        match self.default_value.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => UNKNOWN_LABEL,
        }
    }
}

/// Canonical lookup key for a scalar value
///
/// Integral numbers lose any fractional notation (`2.0` becomes `"2"`), strings
/// are used verbatim and composite values have no key.
pub fn mapping_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                return Some(n.to_string());
            }
            let float = n.as_f64()?;
            if float.fract() == 0.0 && float.abs() < i64::MAX as f64 {
                Some((float as i64).to_string())
            } else {
                Some(float.to_string())
            }
        }
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Exact-match value mapping
///
/// Unmapped values never appear in the output; they become the default label.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueMapperTransformer;

impl BoundTransformer for ValueMapperOptions {
    fn apply(&self, value: &Value) -> Result<Value> {
        Ok(Value::String(self.label_for(value).to_string()))
    }
}

impl Transformer for ValueMapperTransformer {
    fn transform(&self, value: &Value, options: &Value) -> Result<Value> {
        parse_options::<ValueMapperOptions>(options, "ValueMapper")?.apply(value)
    }

    fn validate_options(&self, options: &Value) -> Result<()> {
        let options: ValueMapperOptions = parse_options(options, "ValueMapper")?;
        if options.mapping.is_empty() {
            tracing::warn!("ValueMapper has an empty mapping; every value maps to the default");
        }
        Ok(())
    }

    fn bind(&self, options: &Value) -> Result<Option<Box<dyn BoundTransformer>>> {
        let options: ValueMapperOptions = parse_options(options, "ValueMapper")?;
        Ok(Some(Box::new(options)))
    }
}
