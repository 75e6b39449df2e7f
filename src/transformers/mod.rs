//! Value transformers
//!
//! A transformer turns one value of the input tree into its anonymized
//! replacement. Transformers are pure functions of `(value, options)`, hold no
//! state and can be shared freely between threads.
//!
//! Three kinds are built in:
//! - [`RangeBucketTransformer`]: numeric value to a labelled range
//! - [`ValueMapperTransformer`]: discrete value to a label by exact lookup
//! - [`FuzzyDateTransformer`]: date reduced to year, quarter or decade
//!
//! Additional kinds can be registered under [`TransformerKind::Custom`] names.
//!
//! # Examples
//!
//! ```
//! use seman::transformers::{Transformer, RangeBucketTransformer};
//! use serde_json::json;
//!
//! let options = json!({"buckets": [30, 40], "labels": ["young", "middle", "senior"]});
//! let label = RangeBucketTransformer.transform(&json!(34), &options)?;
//! assert_eq!(label, json!("middle"));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod fuzzy_date;
pub mod range_bucket;
pub mod value_mapper;

pub use fuzzy_date::{DatePrecision, FuzzyDateOptions, FuzzyDateTransformer};
pub use range_bucket::{RangeBucketOptions, RangeBucketTransformer};
pub use value_mapper::{ValueMapperOptions, ValueMapperTransformer};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Label emitted when a transformer has nothing better to say
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Trait for transformer implementations
pub trait Transformer: Send + Sync {
    /// Transform a value using kind-specific options
    fn transform(&self, value: &Value, options: &Value) -> Result<Value>;

    /// Check options once, before any document is processed
    fn validate_options(&self, _options: &Value) -> Result<()> {
        Ok(())
    }

    /// Parse options once for a schema node
    ///
    /// The engine applies the returned transformer to every value of that
    /// node. Returning `None` makes it call [`transform`](Self::transform)
    /// with the raw options instead.
    fn bind(&self, _options: &Value) -> Result<Option<Box<dyn BoundTransformer>>> {
        Ok(None)
    }
}

/// Transformer with its options already applied
pub trait BoundTransformer: Send + Sync {
    /// Transform one value
    fn apply(&self, value: &Value) -> Result<Value>;
}

/// Transformer kind tag as written in schemas
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransformerKind {
    /// Numeric range bucketing
    RangeBucket,
    /// Discrete value mapping
    ValueMapper,
    /// Date precision reduction
    FuzzyDate,
    /// Caller-registered kind
    Custom(String),
}

impl TransformerKind {
    /// Name of the kind as used in schema files
    pub fn as_str(&self) -> &str {
        match self {
            Self::RangeBucket => "RangeBucket",
            Self::ValueMapper => "ValueMapper",
            Self::FuzzyDate => "FuzzyDate",
            Self::Custom(name) => name,
        }
    }

    /// Whether this kind ships with the crate
    pub fn is_builtin(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl From<&str> for TransformerKind {
    fn from(name: &str) -> Self {
        match name {
            "RangeBucket" => Self::RangeBucket,
            "ValueMapper" => Self::ValueMapper,
            "FuzzyDate" => Self::FuzzyDate,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl From<String> for TransformerKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "RangeBucket" | "ValueMapper" | "FuzzyDate" => Self::from(name.as_str()),
            _ => Self::Custom(name),
        }
    }
}

impl From<TransformerKind> for String {
    fn from(kind: TransformerKind) -> Self {
        match kind {
            TransformerKind::Custom(name) => name,
            builtin => builtin.as_str().to_string(),
        }
    }
}

impl fmt::Display for TransformerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registry mapping transformer kinds to implementations
///
/// [`TransformerRegistry::default`] holds the three built-in kinds. Callers can
/// add their own kinds, or replace a built-in, with [`register`](Self::register).
#[derive(Clone)]
pub struct TransformerRegistry {
    transformers: HashMap<TransformerKind, Arc<dyn Transformer>>,
}

impl TransformerRegistry {
    /// Registry without any transformer
    pub fn empty() -> Self {
        Self {
            transformers: HashMap::new(),
        }
    }

    /// Registry with `RangeBucket`, `ValueMapper` and `FuzzyDate`
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register(TransformerKind::RangeBucket, RangeBucketTransformer);
        registry.register(TransformerKind::ValueMapper, ValueMapperTransformer);
        registry.register(TransformerKind::FuzzyDate, FuzzyDateTransformer);
        registry
    }

    /// Register a transformer, returning the one it replaces
    pub fn register<T>(
        &mut self,
        kind: impl Into<TransformerKind>,
        transformer: T,
    ) -> Option<Arc<dyn Transformer>>
    where
        T: Transformer + 'static,
    {
        self.transformers.insert(kind.into(), Arc::new(transformer))
    }

    /// Look up the transformer for a kind
    pub fn get(&self, kind: &TransformerKind) -> Option<&dyn Transformer> {
        self.transformers.get(kind).map(|t| t.as_ref())
    }

    /// Shared handle to the transformer for a kind
    pub fn shared(&self, kind: &TransformerKind) -> Option<Arc<dyn Transformer>> {
        self.transformers.get(kind).cloned()
    }

    /// Check whether a kind is registered
    pub fn contains(&self, kind: &TransformerKind) -> bool {
        self.transformers.contains_key(kind)
    }

    /// Registered kind names, sorted
    pub fn kinds(&self) -> Vec<String> {
        let mut kinds: Vec<String> = self
            .transformers
            .keys()
            .map(|k| k.as_str().to_string())
            .collect();
        kinds.sort();
        kinds
    }
}

impl Default for TransformerRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for TransformerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformerRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

/// Deserialize kind-specific options; absent options read as an empty record
pub(crate) fn parse_options<T: DeserializeOwned>(options: &Value, kind: &str) -> Result<T> {
    let parsed = if options.is_null() {
        T::deserialize(&Value::Object(serde_json::Map::new()))
    } else {
        T::deserialize(options)
    };
    parsed.with_context(|| format!("Invalid {kind} options"))
}

/// String form of a value, without quotes for strings
pub(crate) fn display_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Redact;

    impl Transformer for Redact {
        fn transform(&self, _value: &Value, _options: &Value) -> Result<Value> {
            Ok(json!("[REDACTED]"))
        }
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!(TransformerKind::from("RangeBucket"), TransformerKind::RangeBucket);
        assert_eq!(TransformerKind::from("ValueMapper"), TransformerKind::ValueMapper);
        assert_eq!(TransformerKind::from("FuzzyDate"), TransformerKind::FuzzyDate);
        assert_eq!(
            TransformerKind::from("Hash"),
            TransformerKind::Custom("Hash".to_string())
        );
    }

    #[test]
    fn test_kind_serde_uses_plain_names() {
        let kind: TransformerKind = serde_json::from_value(json!("FuzzyDate")).unwrap();
        assert_eq!(kind, TransformerKind::FuzzyDate);

        let custom: TransformerKind = serde_json::from_value(json!("Hash")).unwrap();
        assert!(!custom.is_builtin());
        assert_eq!(serde_json::to_value(&custom).unwrap(), json!("Hash"));
    }

    #[test]
    fn test_builtin_registry() {
        let registry = TransformerRegistry::default();
        assert_eq!(registry.kinds(), vec!["FuzzyDate", "RangeBucket", "ValueMapper"]);
        assert!(registry.contains(&TransformerKind::FuzzyDate));
        assert!(!registry.contains(&TransformerKind::Custom("Hash".to_string())));
    }

    #[test]
    fn test_register_custom_kind() {
        let mut registry = TransformerRegistry::with_builtins();
        let replaced = registry.register("Redact", Redact);
        assert!(replaced.is_none());

        let transformer = registry
            .get(&TransformerKind::Custom("Redact".to_string()))
            .unwrap();
        assert_eq!(
            transformer.transform(&json!("secret"), &Value::Null).unwrap(),
            json!("[REDACTED]")
        );
    }

    #[test]
    fn test_register_replaces_builtin() {
        let mut registry = TransformerRegistry::with_builtins();
        let replaced = registry.register(TransformerKind::RangeBucket, Redact);
        assert!(replaced.is_some());
    }

    #[test]
    fn test_builtins_bind_their_options() {
        let registry = TransformerRegistry::with_builtins();
        let bucket = registry
            .shared(&TransformerKind::RangeBucket)
            .unwrap()
            .bind(&json!({"buckets": [10], "labels": ["low", "high"]}))
            .unwrap()
            .unwrap();

        assert_eq!(bucket.apply(&json!(3)).unwrap(), json!("low"));
        assert_eq!(bucket.apply(&json!(10)).unwrap(), json!("high"));
        assert!(registry
            .shared(&TransformerKind::FuzzyDate)
            .unwrap()
            .bind(&json!({"precision": 7}))
            .is_err());
    }

    #[test]
    fn test_custom_transformer_is_unbound_by_default() {
        assert!(Redact.bind(&Value::Null).unwrap().is_none());
    }

    #[test]
    fn test_display_string() {
        assert_eq!(display_string(&json!("abc")), "abc");
        assert_eq!(display_string(&json!(34)), "34");
        assert_eq!(display_string(&json!(2.5)), "2.5");
        assert_eq!(display_string(&json!(true)), "true");
        assert_eq!(display_string(&Value::Null), "null");
    }
}
