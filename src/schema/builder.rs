//! Fluent schema construction
//!
//! ```
//! use seman::schema::Schema;
//! use seman::transformers::DatePrecision;
//!
//! let schema = Schema::object([
//!     ("age", Schema::number().range_bucket([30, 40, 50, 60], ["<30", "30s", "40s", "50s", "60+"])),
//!     ("birthDate", Schema::string().fuzzy_date(DatePrecision::Year)),
//!     ("debts", Schema::array(Schema::object([("type", Schema::string())]))),
//! ])
//! .build();
//!
//! assert_eq!(schema.depth(), 4);
//! ```

use super::{SchemaNode, TransformerConfig};
use crate::transformers::{DatePrecision, RangeBucketOptions, ValueMapperOptions};

/// Entry points for building schema nodes
pub struct Schema;

impl Schema {
    /// Object node allowing exactly the given fields
    pub fn object<I, K>(fields: I) -> SchemaBuilder
    where
        I: IntoIterator<Item = (K, SchemaBuilder)>,
        K: Into<String>,
    {
        SchemaBuilder::from(SchemaNode::object(
            fields.into_iter().map(|(name, field)| (name, field.build())),
        ))
    }

    /// Array node whose elements follow `items`
    pub fn array(items: SchemaBuilder) -> SchemaBuilder {
        SchemaBuilder::from(SchemaNode::array(items.build()))
    }

    pub fn number() -> SchemaBuilder {
        SchemaBuilder::from(SchemaNode::number())
    }

    pub fn string() -> SchemaBuilder {
        SchemaBuilder::from(SchemaNode::string())
    }

    pub fn boolean() -> SchemaBuilder {
        SchemaBuilder::from(SchemaNode::boolean())
    }
}

/// Builder for one schema node
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaBuilder {
    node: SchemaNode,
}

impl SchemaBuilder {
    /// Attach a transformer to the node
    pub fn transform(mut self, config: TransformerConfig) -> Self {
        self.node = self.node.with_transformer(config);
        self
    }

    /// Attach a `RangeBucket` transformer
    pub fn range_bucket<B, L>(self, buckets: B, labels: L) -> Self
    where
        B: IntoIterator,
        B::Item: Into<f64>,
        L: IntoIterator,
        L::Item: Into<String>,
    {
        self.transform(TransformerConfig::range_bucket(RangeBucketOptions::new(
            buckets, labels,
        )))
    }

    /// Attach a `ValueMapper` transformer
    pub fn value_mapper(self, options: ValueMapperOptions) -> Self {
        self.transform(TransformerConfig::value_mapper(options))
    }

    /// Attach a `FuzzyDate` transformer
    pub fn fuzzy_date(self, precision: DatePrecision) -> Self {
        self.transform(TransformerConfig::fuzzy_date(precision))
    }

    /// Finish the node
    pub fn build(self) -> SchemaNode {
        self.node
    }
}

impl From<SchemaNode> for SchemaBuilder {
    fn from(node: SchemaNode) -> Self {
        Self { node }
    }
}

impl From<SchemaBuilder> for SchemaNode {
    fn from(builder: SchemaBuilder) -> Self {
        builder.build()
    }
}
