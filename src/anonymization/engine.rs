//! Main anonymization engine
//!
//! This module provides the [`AnonymizationEngine`] that walks a document
//! against a [`SchemaNode`] tree, keeping only allowlisted fields and applying
//! transformers bottom-up.
//!
//! # Processing Rules
//!
//! For every node, in this order:
//! 1. `null` input yields `null`; nothing else happens for the node
//! 2. Object nodes rebuild the object from the schema's fields that the input
//!    has; every other input field is dropped
//! 3. Array nodes process each element against the item schema
//! 4. The node's transformer, if any, replaces the processed value
//!
//! A transformer on an object or array node therefore receives the already
//! filtered structure, never the raw input.
//!
//! # Examples
//!
//! ```
//! use seman::anonymization::AnonymizationEngine;
//! use seman::schema::Schema;
//! use serde_json::json;
//!
//! let schema = Schema::object([
//!     ("age", Schema::number().range_bucket([30, 40], ["young", "middle", "senior"])),
//! ]);
//! let engine = AnonymizationEngine::new(schema)?;
//!
//! let output = engine.anonymize(&json!({"name": "Max", "age": 34}));
//! assert_eq!(output, json!({"age": "middle"}));
//! # Ok::<(), seman::domain::SemanError>(())
//! ```

use crate::anonymization::report::{AnonymizationReport, AnonymizedDocument};
use crate::config::EngineConfig;
use crate::domain::errors::SemanError;
use crate::domain::result::Result;
use crate::schema::{SchemaNode, TransformerConfig};
use crate::transformers::{
    BoundTransformer, Transformer, TransformerKind, TransformerRegistry,
};
use serde_json::{Map, Value};
use std::collections::VecDeque;
use std::fmt;
use std::fmt::Write as _;
use std::sync::Arc;

/// Default limit on schema nesting
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Schema-driven anonymization engine
///
/// # Thread Safety
///
/// The engine only holds its schema, the transformer registry and the plan
/// compiled from both, none of which changes after construction. It is
/// `Send + Sync`; share it by reference or through an `Arc` to anonymize
/// documents from several threads at once.
pub struct AnonymizationEngine {
    schema: SchemaNode,
    registry: TransformerRegistry,
    max_depth: usize,
    plan: Vec<PlanNode>,
}

impl fmt::Debug for AnonymizationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnonymizationEngine")
            .field("schema", &self.schema)
            .field("registry", &self.registry)
            .field("max_depth", &self.max_depth)
            .field("plan_nodes", &self.plan.len())
            .finish()
    }
}

/// Builder for [`AnonymizationEngine`]
#[derive(Debug)]
pub struct EngineBuilder {
    schema: SchemaNode,
    registry: TransformerRegistry,
    max_depth: usize,
}

impl EngineBuilder {
    /// Limit on schema nesting depth
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Replace the whole transformer registry
    pub fn registry(mut self, registry: TransformerRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Register an additional (or replacement) transformer kind
    pub fn register<T>(mut self, kind: impl Into<TransformerKind>, transformer: T) -> Self
    where
        T: Transformer + 'static,
    {
        self.registry.register(kind, transformer);
        self
    }

    /// Validate the schema and create the engine
    ///
    /// Transformer options are parsed here, once per schema node.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The schema is nested deeper than the configured maximum
    /// - A registered transformer rejects the options attached to a node
    ///
    /// Transformer kinds missing from the registry are not an error; they are
    /// logged here and again whenever a value passes through them.
    pub fn build(self) -> Result<AnonymizationEngine> {
        let depth = self.schema.depth();
        if depth > self.max_depth {
            return Err(SemanError::SchemaTooDeep {
                depth,
                max_depth: self.max_depth,
            });
        }

        let plan = compile(&self.schema, &self.registry)?;

        tracing::debug!(
            depth,
            max_depth = self.max_depth,
            nodes = plan.len(),
            transformers = ?self.registry.kinds(),
            "Anonymization engine ready"
        );

        Ok(AnonymizationEngine {
            schema: self.schema,
            registry: self.registry,
            max_depth: self.max_depth,
            plan,
        })
    }
}

impl AnonymizationEngine {
    /// Create an engine with the built-in transformers
    ///
    /// # Errors
    ///
    /// See [`EngineBuilder::build`].
    pub fn new(schema: impl Into<SchemaNode>) -> Result<Self> {
        Self::builder(schema).build()
    }

    /// Start configuring an engine
    pub fn builder(schema: impl Into<SchemaNode>) -> EngineBuilder {
        EngineBuilder {
            schema: schema.into(),
            registry: TransformerRegistry::with_builtins(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Create an engine from the `[engine]` configuration section
    pub fn from_config(schema: impl Into<SchemaNode>, config: &EngineConfig) -> Result<Self> {
        Self::builder(schema).max_depth(config.max_depth).build()
    }

    /// Schema the engine applies
    pub fn schema(&self) -> &SchemaNode {
        &self.schema
    }

    /// Transformers available to the schema
    pub fn registry(&self) -> &TransformerRegistry {
        &self.registry
    }

    /// Maximum schema depth accepted at construction
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Anonymize one document
    ///
    /// Never fails: problems with individual values degrade that value only.
    pub fn anonymize(&self, data: &Value) -> Value {
        Walk::new(&self.plan, None).process_node(data, ROOT)
    }

    /// Anonymize one document and collect statistics about the walk
    pub fn anonymize_with_report(&self, data: &Value) -> AnonymizedDocument {
        let mut report = AnonymizationReport::new();
        let output = Walk::new(&self.plan, Some(&mut report)).process_node(data, ROOT);
        report.documents = 1;

        AnonymizedDocument {
            data: output,
            report,
        }
    }

    /// Anonymize documents independently, preserving order
    pub fn anonymize_batch(&self, documents: &[Value]) -> Vec<Value> {
        documents.iter().map(|doc| self.anonymize(doc)).collect()
    }

    /// Anonymize documents and merge their reports
    pub fn anonymize_batch_with_report(
        &self,
        documents: &[Value],
    ) -> (Vec<Value>, AnonymizationReport) {
        let mut report = AnonymizationReport::new();
        let outputs = documents
            .iter()
            .map(|doc| {
                let result = self.anonymize_with_report(doc);
                report.merge(&result.report);
                result.data
            })
            .collect();

        (outputs, report)
    }
}

const ROOT: usize = 0;

/// Schema node resolved against the registry
struct PlanNode {
    shape: Shape,
    step: Option<Step>,
}

/// Structure of a plan node; children are indices into the plan
enum Shape {
    Leaf,
    Object(Vec<(String, usize)>),
    Array(usize),
}

/// Transformer of a plan node
struct Step {
    kind: TransformerKind,
    action: Action,
}

enum Action {
    Bound(Box<dyn BoundTransformer>),
    PerValue {
        transformer: Arc<dyn Transformer>,
        options: Value,
    },
    Missing,
}

/// Flatten the schema breadth-first; the root is index 0
fn compile(schema: &SchemaNode, registry: &TransformerRegistry) -> Result<Vec<PlanNode>> {
    let mut plan = Vec::new();
    let mut pending = VecDeque::from([(schema, "$".to_string())]);

    while let Some((node, path)) = pending.pop_front() {
        // A queued node lands after the current one and everything queued before it
        let mut enqueue = |child, child_path: String| {
            pending.push_back((child, child_path));
            plan.len() + pending.len()
        };
        let shape = match node {
            SchemaNode::Object { fields, .. } => Shape::Object(
                fields
                    .iter()
                    .map(|(name, child)| (name.clone(), enqueue(child, format!("{path}.{name}"))))
                    .collect(),
            ),
            SchemaNode::Array { items, .. } => Shape::Array(enqueue(&**items, format!("{path}[]"))),
            _ => Shape::Leaf,
        };

        let step = node
            .transformer()
            .map(|config| resolve(config, &path, registry))
            .transpose()?;
        plan.push(PlanNode { shape, step });
    }

    Ok(plan)
}

fn resolve(config: &TransformerConfig, path: &str, registry: &TransformerRegistry) -> Result<Step> {
    let Some(transformer) = registry.shared(&config.kind) else {
        tracing::warn!(
            transformer = %config.kind,
            path = %path,
            "Transformer not registered; values will pass through untransformed"
        );
        return Ok(Step {
            kind: config.kind.clone(),
            action: Action::Missing,
        });
    };

    let invalid = |e: anyhow::Error| SemanError::InvalidTransformerOptions {
        path: path.to_string(),
        kind: config.kind.to_string(),
        message: format!("{e:#}"),
    };
    transformer.validate_options(&config.options).map_err(invalid)?;

    let action = match transformer.bind(&config.options).map_err(invalid)? {
        Some(bound) => Action::Bound(bound),
        None => Action::PerValue {
            transformer,
            options: config.options.clone(),
        },
    };

    Ok(Step {
        kind: config.kind.clone(),
        action,
    })
}

/// Position inside the document being walked
#[derive(Debug, Clone, Copy)]
enum Segment<'s> {
    Field(&'s str),
    Index(usize),
}

/// State of a single anonymization pass
struct Walk<'a, 's> {
    plan: &'s [PlanNode],
    report: Option<&'a mut AnonymizationReport>,
    path: Vec<Segment<'s>>,
}

impl<'a, 's> Walk<'a, 's> {
    fn new(plan: &'s [PlanNode], report: Option<&'a mut AnonymizationReport>) -> Self {
        Self {
            plan,
            report,
            path: Vec::new(),
        }
    }

    fn process_node(&mut self, value: &Value, index: usize) -> Value {
        if value.is_null() {
            self.record(|r| r.null_values += 1);
            return Value::Null;
        }

        let plan = self.plan;
        let node = &plan[index];
        let processed = match &node.shape {
            Shape::Object(fields) => self.process_object(value, fields),
            Shape::Array(items) => match value {
                Value::Array(elements) => Value::Array(
                    elements
                        .iter()
                        .enumerate()
                        .map(|(position, element)| {
                            self.path.push(Segment::Index(position));
                            let output = self.process_node(element, *items);
                            self.path.pop();
                            output
                        })
                        .collect(),
                ),
                _ => {
                    self.shape_mismatch("array", value);
                    value.clone()
                }
            },
            Shape::Leaf => value.clone(),
        };

        match &node.step {
            Some(step) => self.apply_step(processed, step),
            None => processed,
        }
    }

    fn process_object(&mut self, value: &Value, fields: &'s [(String, usize)]) -> Value {
        let Value::Object(input) = value else {
            // Nothing in a non-object input can match a field name
            self.shape_mismatch("object", value);
            return Value::Object(Map::new());
        };

        let mut output = Map::new();
        for (name, child) in fields {
            if let Some(child_value) = input.get(name) {
                self.path.push(Segment::Field(name));
                let processed = self.process_node(child_value, *child);
                self.path.pop();
                output.insert(name.clone(), processed);
            }
        }

        let kept = output.len();
        let dropped = input.len() - kept;
        self.record(|r| {
            r.fields_kept += kept;
            r.fields_dropped += dropped;
        });

        Value::Object(output)
    }

    fn apply_step(&mut self, value: Value, step: &Step) -> Value {
        let kind = step.kind.as_str();

        let result = match &step.action {
            Action::Bound(bound) => bound.apply(&value),
            Action::PerValue {
                transformer,
                options,
            } => transformer.transform(&value, options),
            Action::Missing => {
                let path = self.render_path();
                tracing::warn!(transformer = %kind, path = %path, "Transformer not found");
                self.record(|r| r.record_unknown_transformer(kind, &path));
                return value;
            }
        };

        match result {
            Ok(transformed) => {
                self.record(|r| r.record_transformation(kind));
                transformed
            }
            Err(e) => {
                let path = self.render_path();
                tracing::warn!(
                    transformer = %kind,
                    path = %path,
                    error = %e,
                    "Transformer failed, value left untransformed"
                );
                self.record(|r| r.record_transformer_failure(kind, &path));
                value
            }
        }
    }

    fn shape_mismatch(&mut self, expected: &'static str, value: &Value) {
        tracing::debug!(
            expected,
            found = json_type(value),
            path = %self.render_path(),
            "Input does not match schema shape"
        );
        self.record(|r| r.shape_mismatches += 1);
    }

    fn record(&mut self, update: impl FnOnce(&mut AnonymizationReport)) {
        if let Some(report) = self.report.as_deref_mut() {
            update(report);
        }
    }

    fn render_path(&self) -> String {
        let mut rendered = String::from("$");
        for segment in &self.path {
            let _ = match segment {
                Segment::Field(name) => write!(rendered, ".{name}"),
                Segment::Index(index) => write!(rendered, "[{index}]"),
            };
        }
        rendered
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
