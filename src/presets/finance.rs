//! Generalization rules for German personal-finance data
//!
//! Thresholds and labels follow the categories used by financial advisory
//! tooling in Germany; labels are German on purpose.

use crate::schema::{Schema, SchemaBuilder};
use crate::transformers::{DatePrecision, ValueMapperOptions};

/// Preset field rules for German financial profiles
///
/// # Examples
///
/// ```
/// use seman::anonymization::AnonymizationEngine;
/// use seman::presets::GermanFinancePreset;
/// use seman::schema::Schema;
/// use serde_json::json;
///
/// let engine = AnonymizationEngine::new(Schema::object([
///     ("age", GermanFinancePreset::age_class()),
///     ("income", GermanFinancePreset::income_category()),
/// ]))?;
///
/// let output = engine.anonymize(&json!({"age": 34, "income": 2400}));
/// assert_eq!(output, json!({"age": "30-34", "income": "mittel"}));
/// # Ok::<(), seman::domain::SemanError>(())
/// ```
pub struct GermanFinancePreset;

impl GermanFinancePreset {
    /// Age in 5-year classes from 20 to 80
    pub fn age_class() -> SchemaBuilder {
        Schema::number().range_bucket(
            [20, 25, 30, 35, 40, 45, 50, 55, 60, 65, 70, 75, 80],
            [
                "unter 20", "20-24", "25-29", "30-34", "35-39", "40-44", "45-49", "50-54",
                "55-59", "60-64", "65-69", "70-74", "75-79", "80+",
            ],
        )
    }

    /// Age as a career stage
    pub fn life_stage() -> SchemaBuilder {
        Schema::number().range_bucket(
            [30, 40, 50, 60],
            [
                "frühe Karriere",
                "Karriereaufbau",
                "Karrierehöhepunkt",
                "Spätkarriere",
                "Vorruhestand",
            ],
        )
    }

    /// Birth date reduced to the year
    pub fn birth_date() -> SchemaBuilder {
        Schema::string().fuzzy_date(DatePrecision::Year)
    }

    /// Contract date reduced to the quarter
    pub fn contract_date() -> SchemaBuilder {
        Schema::string().fuzzy_date(DatePrecision::Quarter)
    }

    /// Liquid assets
    pub fn wealth_category() -> SchemaBuilder {
        Schema::number().range_bucket(
            [25000, 75000, 200000, 500000],
            ["sehr niedrig", "niedrig", "mittel", "hoch", "sehr hoch"],
        )
    }

    /// Total assets including real estate
    pub fn net_worth_status() -> SchemaBuilder {
        Schema::number().range_bucket(
            [50000, 200000, 500000, 1000000],
            ["niedrig", "mittel", "gut", "hoch", "sehr hoch"],
        )
    }

    /// Monthly pension entitlement
    pub fn pension_category() -> SchemaBuilder {
        Schema::number().range_bucket(
            [1500, 2000, 3000, 4000, 5000],
            ["sehr niedrig", "niedrig", "mittel", "hoch", "sehr hoch", "exorbitant"],
        )
    }

    /// Monthly net income
    pub fn income_category() -> SchemaBuilder {
        Schema::number().range_bucket(
            [1000, 1500, 2250, 2750, 3500, 4500],
            [
                "extrem niedrig",
                "sehr niedrig",
                "niedrig",
                "mittel",
                "hoch",
                "sehr hoch",
                "extrem hoch",
            ],
        )
    }

    /// Absolute pension gap or surplus
    pub fn gap_category() -> SchemaBuilder {
        Schema::number().range_bucket(
            [500, 1000, 2000, 3000],
            ["sehr klein", "klein", "mittel", "groß", "sehr groß"],
        )
    }

    /// Self-reported health score 0 to 2
    pub fn health_indicator() -> SchemaBuilder {
        Schema::number().value_mapper(
            ValueMapperOptions::new()
                .map(2, "sehr gut")
                .map(1, "gut")
                .map(0, "mittel")
                .default_value("verbesserungsbedürftig"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transformers::{RangeBucketOptions, TransformerKind, TransformerRegistry};
    use serde_json::{json, Value};
    use test_case::test_case;

    fn apply(builder: SchemaBuilder, value: Value) -> Value {
        let node = builder.build();
        let config = node.transformer().unwrap();
        TransformerRegistry::with_builtins()
            .get(&config.kind)
            .unwrap()
            .transform(&value, &config.options)
            .unwrap()
    }

    #[test_case(json!(19), "unter 20" ; "below twenty")]
    #[test_case(json!(20), "20-24" ; "twenty")]
    #[test_case(json!(34), "30-34" ; "thirty four")]
    #[test_case(json!(79), "75-79" ; "seventy nine")]
    #[test_case(json!(80), "80+" ; "eighty")]
    #[test_case(json!(101), "80+" ; "above eighty")]
    fn test_age_class(age: Value, expected: &str) {
        assert_eq!(apply(GermanFinancePreset::age_class(), age), json!(expected));
    }

    #[test_case(json!(2), "sehr gut" ; "two")]
    #[test_case(json!(1), "gut" ; "one")]
    #[test_case(json!(0), "mittel" ; "zero")]
    #[test_case(json!(3), "verbesserungsbedürftig" ; "unmapped")]
    fn test_health_indicator(score: Value, expected: &str) {
        assert_eq!(
            apply(GermanFinancePreset::health_indicator(), score),
            json!(expected)
        );
    }

    #[test]
    fn test_dates() {
        assert_eq!(
            apply(GermanFinancePreset::birth_date(), json!("1985-07-14")),
            json!("1985")
        );
        assert_eq!(
            apply(GermanFinancePreset::contract_date(), json!("2024-11-27")),
            json!("2024-Q4")
        );
    }

    #[test]
    fn test_bucket_presets_are_well_formed() {
        let presets = [
            GermanFinancePreset::age_class(),
            GermanFinancePreset::life_stage(),
            GermanFinancePreset::wealth_category(),
            GermanFinancePreset::net_worth_status(),
            GermanFinancePreset::pension_category(),
            GermanFinancePreset::income_category(),
            GermanFinancePreset::gap_category(),
        ];

        for builder in presets {
            let node = builder.build();
            let config = node.transformer().unwrap();
            assert_eq!(config.kind, TransformerKind::RangeBucket);
            let options: RangeBucketOptions =
                serde_json::from_value(config.options.clone()).unwrap();
            assert!(options.is_well_formed());
        }
    }

    #[test]
    fn test_upper_buckets() {
        assert_eq!(
            apply(GermanFinancePreset::pension_category(), json!(5200)),
            json!("exorbitant")
        );
        assert_eq!(
            apply(GermanFinancePreset::net_worth_status(), json!(1000000)),
            json!("sehr hoch")
        );
        assert_eq!(
            apply(GermanFinancePreset::gap_category(), json!(2500)),
            json!("groß")
        );
    }
}
