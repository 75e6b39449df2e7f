//! Demo command implementation
//!
//! Anonymizes a sample financial profile and checks that no personal field
//! reaches the output.

use crate::anonymization::AnonymizationEngine;
use crate::config::SemanConfig;
use crate::schema::{Schema, SchemaNode};
use crate::transformers::ValueMapperOptions;
use anyhow::Context;
use clap::Args;
use serde_json::{json, Value};

/// Values from [`finavi_sample`] that must never appear in the output
const SENSITIVE_VALUES: [&str; 5] = ["Max Mustermann", "max@example.com", "Visa", "KfW", "user_123"];

/// Arguments for the demo command
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Print only the anonymized document
    #[arg(short, long)]
    pub quiet: bool,
}

impl DemoArgs {
    /// Execute the demo command
    pub fn execute(&self, config: &SemanConfig) -> anyhow::Result<i32> {
        let engine = AnonymizationEngine::from_config(finavi_schema(), &config.engine)
            .context("Failed to build demo engine")?;

        let input = finavi_sample();
        let output = engine.anonymize(&input);

        if !self.quiet {
            println!("--- Original Sensitive Data ---");
            println!("{}", serde_json::to_string_pretty(&input)?);
            println!();
            println!("--- Anonymized Context ---");
        }
        println!("{}", serde_json::to_string_pretty(&output)?);

        let leaked = leaked_values(&output);
        if !leaked.is_empty() {
            eprintln!();
            eprintln!("❌ FAILED: Personal data leaked: {}", leaked.join(", "));
            return Ok(5);
        }

        if output["age"] != "30bis39" || output["netWorth"] != "mittel" {
            eprintln!();
            eprintln!("❌ FAILED: Incorrect transformations");
            return Ok(5);
        }

        if !self.quiet {
            println!();
            println!("✅ SUCCESS: Data transformed and personal fields removed.");
        }
        Ok(0)
    }
}

/// Schema of a financial advisory profile
pub fn finavi_schema() -> SchemaNode {
    let indicator = || {
        Schema::number().value_mapper(
            ValueMapperOptions::new()
                .map(2, "gut")
                .map(1, "mittel")
                .map(0, "schlecht"),
        )
    };

    Schema::object([
        (
            "age",
            Schema::number().range_bucket(
                [30, 40, 50, 60],
                ["unter30", "30bis39", "40bis49", "50bis59", "60plus"],
            ),
        ),
        ("financialHealthScore", Schema::number()),
        (
            "healthIndicators",
            Schema::object([
                (
                    "ausgaben",
                    Schema::number().value_mapper(
                        ValueMapperOptions::new()
                            .map(2, "gut")
                            .map(1, "mittel")
                            .map(0, "schlecht")
                            .default_value("unbekannt"),
                    ),
                ),
                ("notgroschen", indicator()),
                ("schulden", indicator()),
            ]),
        ),
        (
            "netWorth",
            Schema::number().range_bucket(
                [50000, 150000, 500000],
                ["niedrig", "mittel", "hoch", "sehrHoch"],
            ),
        ),
        (
            "debts",
            Schema::array(Schema::object([
                ("type", Schema::string()),
                (
                    "amount",
                    Schema::number()
                        .range_bucket([1000, 5000, 10000], ["Small", "Medium", "Large", "Major"]),
                ),
            ])),
        ),
    ])
    .build()
}

/// Profile with personal fields the schema does not allow
pub fn finavi_sample() -> Value {
    json!({
        "name": "Max Mustermann",
        "email": "max@example.com",
        "age": 34,
        "financialHealthScore": 85,
        "healthIndicators": {
            "ausgaben": 2,
            "notgroschen": 0,
            "schulden": 1
        },
        "netWorth": 125000,
        "debts": [
            {"type": "Credit Card", "amount": 2500, "creditor": "Visa"},
            {"type": "Student Loan", "amount": 12000, "creditor": "KfW"}
        ],
        "internalId": "user_123"
    })
}

fn leaked_values(output: &Value) -> Vec<&'static str> {
    let rendered = output.to_string();
    SENSITIVE_VALUES
        .into_iter()
        .filter(|value| rendered.contains(value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finavi_output() {
        let engine = AnonymizationEngine::new(finavi_schema()).unwrap();
        let output = engine.anonymize(&finavi_sample());

        assert_eq!(
            output,
            json!({
                "age": "30bis39",
                "financialHealthScore": 85,
                "healthIndicators": {
                    "ausgaben": "gut",
                    "notgroschen": "schlecht",
                    "schulden": "mittel"
                },
                "netWorth": "mittel",
                "debts": [
                    {"type": "Credit Card", "amount": "Medium"},
                    {"type": "Student Loan", "amount": "Major"}
                ]
            })
        );
        assert!(leaked_values(&output).is_empty());
    }

    #[test]
    fn test_leak_detection() {
        assert_eq!(leaked_values(&finavi_sample()).len(), SENSITIVE_VALUES.len());
    }

    #[test]
    fn test_execute() {
        let args = DemoArgs { quiet: true };
        assert_eq!(args.execute(&SemanConfig::default()).unwrap(), 0);
    }
}
