//! Date precision reduction
//!
//! Input that cannot be read as a calendar date is returned as its string
//! form, unchanged. Malformed values therefore reach the output; this is a
//! known limitation, logged at debug level.

use super::{display_string, parse_options, BoundTransformer, Transformer, UNKNOWN_LABEL};
use anyhow::Result;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Precision kept by [`FuzzyDateTransformer`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DatePrecision {
    /// `"1990"`
    #[default]
    Year,
    /// `"2024-Q4"`
    Quarter,
    /// `"1990er"`
    Decade,
    /// Anything else; formats like [`DatePrecision::Year`]
    Other(String),
}

impl DatePrecision {
    /// Name as written in schema files
    pub fn as_str(&self) -> &str {
        match self {
            Self::Year => "year",
            Self::Quarter => "quarter",
            Self::Decade => "decade",
            Self::Other(name) => name,
        }
    }

    /// Format a date at this precision
    pub fn format(&self, date: NaiveDate) -> String {
        let year = date.year();
        match self {
            Self::Quarter => format!("{}-Q{}", year, date.month0() / 3 + 1),
            Self::Decade => format!("{}er", year.div_euclid(10) * 10),
            Self::Year | Self::Other(_) => year.to_string(),
        }
    }
}

impl From<String> for DatePrecision {
    fn from(name: String) -> Self {
        match name.as_str() {
            "year" => Self::Year,
            "quarter" => Self::Quarter,
            "decade" => Self::Decade,
            _ => Self::Other(name),
        }
    }
}

impl From<DatePrecision> for String {
    fn from(precision: DatePrecision) -> Self {
        precision.as_str().to_string()
    }
}

/// Options for [`FuzzyDateTransformer`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuzzyDateOptions {
    /// Precision to keep
    #[serde(default)]
    pub precision: DatePrecision,
}

impl BoundTransformer for FuzzyDateOptions {
    fn apply(&self, value: &Value) -> Result<Value> {
        if is_falsy(value) {
            return Ok(Value::String(UNKNOWN_LABEL.to_string()));
        }

        match value.as_str().and_then(parse_calendar_date) {
            Some(date) => Ok(Value::String(self.precision.format(date))),
            None => {
                crate::log_transformer_fallback!("FuzzyDate", "value is not a recognizable date");
                Ok(Value::String(display_string(value)))
            }
        }
    }
}

/// Reduces dates to year, quarter or decade
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzyDateTransformer;

impl Transformer for FuzzyDateTransformer {
    fn transform(&self, value: &Value, options: &Value) -> Result<Value> {
        if is_falsy(value) {
            return Ok(Value::String(UNKNOWN_LABEL.to_string()));
        }
        parse_options::<FuzzyDateOptions>(options, "FuzzyDate")?.apply(value)
    }

    fn validate_options(&self, options: &Value) -> Result<()> {
        let options: FuzzyDateOptions = parse_options(options, "FuzzyDate")?;
        if let DatePrecision::Other(name) = &options.precision {
            tracing::warn!(precision = %name, "Unrecognized FuzzyDate precision, using year");
        }
        Ok(())
    }

    fn bind(&self, options: &Value) -> Result<Option<Box<dyn BoundTransformer>>> {
        let options: FuzzyDateOptions = parse_options(options, "FuzzyDate")?;
        Ok(Some(Box::new(options)))
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Read a calendar date as written, ignoring any time and offset
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }

    const DATETIME_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];
    for format in DATETIME_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(timestamp.date());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    match raw.split_once('-') {
        // YYYY-MM
        Some((year, month)) if year.len() == 4 && all_digits(year) && all_digits(month) => {
            NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
        }
        // YYYY
        None if raw.len() == 4 && all_digits(raw) => NaiveDate::from_ymd_opt(raw.parse().ok()?, 1, 1),
        _ => None,
    }
}
