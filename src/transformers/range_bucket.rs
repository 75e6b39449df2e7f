//! Range bucketing transformer
//!
//! Maps a number to one of `n + 1` labels delimited by `n` thresholds. A value
//! equal to a threshold belongs to the bucket above it.

use super::{display_string, parse_options, BoundTransformer, Transformer, UNKNOWN_LABEL};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Options for [`RangeBucketTransformer`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeBucketOptions {
    /// Thresholds, in any order
    pub buckets: Vec<f64>,
    /// One label per range, `buckets.len() + 1` in total
    pub labels: Vec<String>,
}

impl RangeBucketOptions {
    /// Create options from thresholds and labels
    pub fn new<B, L>(buckets: B, labels: L) -> Self
    where
        B: IntoIterator,
        B::Item: Into<f64>,
        L: IntoIterator,
        L::Item: Into<String>,
    {
        Self {
            buckets: buckets.into_iter().map(Into::into).collect(),
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether there is exactly one label per range
    pub fn is_well_formed(&self) -> bool {
        self.labels.len() == self.buckets.len() + 1
    }

    /// Label of the range containing `value`
    ///
    /// The range index is the number of thresholds at or below `value`, so
    /// threshold order does not matter.
    pub fn label_for(&self, value: f64) -> &str {
        let index = self
            .buckets
            .iter()
            .filter(|threshold| value >= **threshold)
            .count();

        match self.labels.get(index) {
            Some(label) if !label.is_empty() => label,
            _ => UNKNOWN_LABEL,
        }
    }
}

impl BoundTransformer for RangeBucketOptions {
    fn apply(&self, value: &Value) -> Result<Value> {
        match value.as_f64() {
            Some(number) => Ok(Value::String(self.label_for(number).to_string())),
            None => Ok(not_numeric(value)),
        }
    }
}

fn not_numeric(value: &Value) -> Value {
    crate::log_transformer_fallback!("RangeBucket", "value is not numeric");
    Value::String(display_string(value))
}

/// Numeric range bucketing
///
/// Non-numeric input is returned as its string form without bucketing.
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeBucketTransformer;

impl Transformer for RangeBucketTransformer {
    fn transform(&self, value: &Value, options: &Value) -> Result<Value> {
        if !value.is_number() {
            return Ok(not_numeric(value));
        }
        parse_options::<RangeBucketOptions>(options, "RangeBucket")?.apply(value)
    }

    fn validate_options(&self, options: &Value) -> Result<()> {
        let options: RangeBucketOptions = parse_options(options, "RangeBucket")?;
        if !options.is_well_formed() {
            tracing::warn!(
                buckets = options.buckets.len(),
                labels = options.labels.len(),
                "RangeBucket labels do not match buckets; unmatched ranges map to 'Unknown'"
            );
        }
        Ok(())
    }

    fn bind(&self, options: &Value) -> Result<Option<Box<dyn BoundTransformer>>> {
        let options: RangeBucketOptions = parse_options(options, "RangeBucket")?;
        Ok(Some(Box::new(options)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    fn age_options() -> Value {
        json!({
            "buckets": [30, 40, 50, 60],
            "labels": ["unter30", "30bis39", "40bis49", "50bis59", "60plus"]
        })
    }

    #[test_case(json!(18), "unter30" ; "below first threshold")]
    #[test_case(json!(-5), "unter30" ; "negative value")]
    #[test_case(json!(34), "30bis39" ; "inside range")]
    #[test_case(json!(30), "30bis39" ; "equal to threshold goes up")]
    #[test_case(json!(59.9), "50bis59" ; "fractional value")]
    #[test_case(json!(60), "60plus" ; "equal to last threshold")]
    #[test_case(json!(99), "60plus" ; "above all thresholds")]
    fn test_bucket_selection(value: Value, expected: &str) {
        let result = RangeBucketTransformer
            .transform(&value, &age_options())
            .unwrap();
        assert_eq!(result, json!(expected));
    }

    #[test]
    fn test_threshold_order_does_not_matter() {
        let options = json!({
            "buckets": [10000, 1000, 5000],
            "labels": ["Small", "Medium", "Large", "Major"]
        });
        let result = RangeBucketTransformer
            .transform(&json!(2500), &options)
            .unwrap();
        assert_eq!(result, json!("Medium"));
    }

    #[test]
    fn test_duplicate_thresholds_skip_a_label() {
        let options = RangeBucketOptions::new([10, 10], ["low", "never", "high"]);
        assert_eq!(options.label_for(9.0), "low");
        assert_eq!(options.label_for(10.0), "high");
    }

    #[test]
    fn test_bound_options_match_transform() {
        let bound = RangeBucketTransformer.bind(&age_options()).unwrap().unwrap();
        for value in [json!(18), json!(30), json!(61.5), json!("n/a"), json!(false)] {
            assert_eq!(
                bound.apply(&value).unwrap(),
                RangeBucketTransformer.transform(&value, &age_options()).unwrap()
            );
        }
    }

    #[test]
    fn test_missing_label_yields_unknown() {
        let options = json!({"buckets": [10, 20, 30], "labels": ["low", "mid"]});
        let transformer = RangeBucketTransformer;

        assert_eq!(transformer.transform(&json!(5), &options).unwrap(), json!("low"));
        assert_eq!(transformer.transform(&json!(25), &options).unwrap(), json!("Unknown"));
        assert_eq!(transformer.transform(&json!(50), &options).unwrap(), json!("Unknown"));
    }

    #[test]
    fn test_last_label_is_index_n() {
        // Surplus labels beyond buckets + 1 are never selected
        let options = RangeBucketOptions::new([10], ["low", "high", "extra"]);
        assert_eq!(options.label_for(100.0), "high");
    }

    #[test]
    fn test_empty_label_yields_unknown() {
        let options = RangeBucketOptions::new([10], ["", "high"]);
        assert_eq!(options.label_for(1.0), "Unknown");
    }

    #[test]
    fn test_non_numeric_passes_through_as_string() {
        let transformer = RangeBucketTransformer;
        assert_eq!(
            transformer.transform(&json!("34"), &age_options()).unwrap(),
            json!("34")
        );
        assert_eq!(
            transformer.transform(&json!(true), &age_options()).unwrap(),
            json!("true")
        );
    }

    #[test]
    fn test_no_buckets_uses_single_label() {
        let options = RangeBucketOptions::new(Vec::<f64>::new(), ["all"]);
        assert_eq!(options.label_for(42.0), "all");
    }

    #[test]
    fn test_validate_options() {
        let transformer = RangeBucketTransformer;
        assert!(transformer.validate_options(&age_options()).is_ok());
        // Mismatched label count is tolerated
        assert!(transformer
            .validate_options(&json!({"buckets": [1, 2], "labels": ["a"]}))
            .is_ok());
        assert!(transformer.validate_options(&json!({"buckets": [1]})).is_err());
        assert!(transformer.validate_options(&Value::Null).is_err());
    }
}
