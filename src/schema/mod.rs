//! Schema model
//!
//! A schema is a tree of [`SchemaNode`]s mirroring the shape of the data to
//! anonymize. Object nodes name the only fields that survive anonymization;
//! array nodes describe every element with one item node. Any node may carry a
//! [`TransformerConfig`], applied to the node's value after its children have
//! been processed.
//!
//! # Serialized Form
//!
//! ```json
//! {
//!   "type": "object",
//!   "fields": {
//!     "age": {
//!       "type": "number",
//!       "transformer": {
//!         "kind": "RangeBucket",
//!         "options": {"buckets": [30, 40], "labels": ["<30", "30-39", "40+"]}
//!       }
//!     },
//!     "debts": {"type": "array", "items": {"type": "object", "fields": {"type": {"type": "string"}}}}
//!   }
//! }
//! ```

pub mod builder;
pub mod loader;

pub use builder::{Schema, SchemaBuilder};
pub use loader::{load_schema, parse_schema_json, parse_schema_toml};

use crate::transformers::{
    DatePrecision, RangeBucketOptions, TransformerKind, ValueMapperOptions,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Transformer attached to a schema node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransformerConfig {
    /// Registry key of the transformer
    pub kind: TransformerKind,

    /// Kind-specific options
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub options: Value,
}

impl TransformerConfig {
    /// Configuration for any registered kind
    pub fn new(kind: impl Into<TransformerKind>, options: Value) -> Self {
        Self {
            kind: kind.into(),
            options,
        }
    }

    /// `RangeBucket` configuration
    pub fn range_bucket(options: RangeBucketOptions) -> Self {
        Self::new(
            TransformerKind::RangeBucket,
            json!({ "buckets": options.buckets, "labels": options.labels }),
        )
    }

    /// `ValueMapper` configuration
    pub fn value_mapper(options: ValueMapperOptions) -> Self {
        let mut record = json!({ "mapping": options.mapping });
        if let Some(default_value) = options.default_value {
            record["defaultValue"] = Value::String(default_value);
        }
        Self::new(TransformerKind::ValueMapper, record)
    }

    /// `FuzzyDate` configuration
    pub fn fuzzy_date(precision: DatePrecision) -> Self {
        Self::new(
            TransformerKind::FuzzyDate,
            json!({ "precision": precision.as_str() }),
        )
    }
}

/// One position in the schema tree
///
/// Schema files may only use the keys each node type defines; a misspelled
/// key is an error rather than a silently missing rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", deny_unknown_fields)]
pub enum SchemaNode {
    /// String leaf
    String {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        transformer: Option<TransformerConfig>,
    },
    /// Number leaf
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        transformer: Option<TransformerConfig>,
    },
    /// Boolean leaf
    Boolean {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        transformer: Option<TransformerConfig>,
    },
    /// Object with an allowlist of named fields
    Object {
        fields: BTreeMap<String, SchemaNode>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        transformer: Option<TransformerConfig>,
    },
    /// Array whose elements all follow `items`
    Array {
        items: Box<SchemaNode>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        transformer: Option<TransformerConfig>,
    },
}

impl SchemaNode {
    pub fn string() -> Self {
        Self::String { transformer: None }
    }

    pub fn number() -> Self {
        Self::Number { transformer: None }
    }

    pub fn boolean() -> Self {
        Self::Boolean { transformer: None }
    }

    /// Object node allowing exactly the given fields
    pub fn object<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, SchemaNode)>,
        K: Into<String>,
    {
        Self::Object {
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            transformer: None,
        }
    }

    /// Array node with one item schema
    pub fn array(items: SchemaNode) -> Self {
        Self::Array {
            items: Box::new(items),
            transformer: None,
        }
    }

    /// Attach (or replace) the node's transformer
    pub fn with_transformer(mut self, config: TransformerConfig) -> Self {
        *self.transformer_slot() = Some(config);
        self
    }

    /// Transformer applied to this node's processed value
    pub fn transformer(&self) -> Option<&TransformerConfig> {
        match self {
            Self::String { transformer }
            | Self::Number { transformer }
            | Self::Boolean { transformer }
            | Self::Object { transformer, .. }
            | Self::Array { transformer, .. } => transformer.as_ref(),
        }
    }

    fn transformer_slot(&mut self) -> &mut Option<TransformerConfig> {
        match self {
            Self::String { transformer }
            | Self::Number { transformer }
            | Self::Boolean { transformer }
            | Self::Object { transformer, .. }
            | Self::Array { transformer, .. } => transformer,
        }
    }

    /// Allowed fields of an object node
    pub fn fields(&self) -> Option<&BTreeMap<String, SchemaNode>> {
        match self {
            Self::Object { fields, .. } => Some(fields),
            _ => None,
        }
    }

    /// Item schema of an array node
    pub fn items(&self) -> Option<&SchemaNode> {
        match self {
            Self::Array { items, .. } => Some(items),
            _ => None,
        }
    }

    /// Type name as written in schema files
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String { .. } => "string",
            Self::Number { .. } => "number",
            Self::Boolean { .. } => "boolean",
            Self::Object { .. } => "object",
            Self::Array { .. } => "array",
        }
    }

    /// Every node with its path, parents before children
    ///
    /// Paths start at `$`; fields append `.name`, array items append `[]`.
    /// Walks with an explicit stack so arbitrarily deep trees are safe.
    pub fn nodes(&self) -> Vec<(String, usize, &SchemaNode)> {
        let mut visited = Vec::new();
        let mut stack = vec![("$".to_string(), 1usize, self)];

        while let Some((path, depth, node)) = stack.pop() {
            match node {
                Self::Object { fields, .. } => {
                    for (name, child) in fields.iter().rev() {
                        stack.push((format!("{path}.{name}"), depth + 1, child));
                    }
                }
                Self::Array { items, .. } => {
                    stack.push((format!("{path}[]"), depth + 1, items));
                }
                _ => {}
            }
            visited.push((path, depth, node));
        }

        visited
    }

    /// Nesting depth; a single leaf has depth 1
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(1usize, self)];

        while let Some((depth, node)) = stack.pop() {
            deepest = deepest.max(depth);
            match node {
                Self::Object { fields, .. } => {
                    stack.extend(fields.values().map(|child| (depth + 1, child)));
                }
                Self::Array { items, .. } => stack.push((depth + 1, items.as_ref())),
                _ => {}
            }
        }

        deepest
    }

    /// Counts of node types and transformer kinds
    pub fn summary(&self) -> SchemaSummary {
        let mut summary = SchemaSummary::default();

        for (_, depth, node) in self.nodes() {
            summary.depth = summary.depth.max(depth);
            match node {
                Self::Object { fields, .. } => {
                    summary.object_nodes += 1;
                    summary.allowed_fields += fields.len();
                }
                Self::Array { .. } => summary.array_nodes += 1,
                _ => summary.leaf_nodes += 1,
            }
            if let Some(config) = node.transformer() {
                *summary
                    .transformers
                    .entry(config.kind.as_str().to_string())
                    .or_insert(0) += 1;
            }
        }

        summary
    }
}

/// Structural overview of a schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaSummary {
    /// Maximum nesting depth
    pub depth: usize,
    /// Number of object nodes
    pub object_nodes: usize,
    /// Number of array nodes
    pub array_nodes: usize,
    /// Number of primitive nodes
    pub leaf_nodes: usize,
    /// Total allowlisted field names over all objects
    pub allowed_fields: usize,
    /// Attached transformers by kind
    pub transformers: BTreeMap<String, usize>,
}
