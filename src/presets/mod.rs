//! Reusable field rules
//!
//! Presets are ready-made [`SchemaBuilder`]s for recurring field types. They
//! can be used directly when building a schema, or looked up by their dotted
//! name (`finance.age_class`), which is how the command line exposes them.

pub mod finance;
pub mod health;
pub mod hr;

pub use finance::GermanFinancePreset;
pub use health::HealthPreset;
pub use hr::HrPreset;

use crate::schema::SchemaBuilder;

/// Named preset in the catalog
#[derive(Debug, Clone, Copy)]
pub struct PresetEntry {
    /// Dotted name, `<domain>.<field>`
    pub name: &'static str,
    /// One-line description
    pub description: &'static str,
    build: fn() -> SchemaBuilder,
}

impl PresetEntry {
    const fn new(name: &'static str, description: &'static str, build: fn() -> SchemaBuilder) -> Self {
        Self {
            name,
            description,
            build,
        }
    }

    /// Fresh builder for this preset
    pub fn builder(&self) -> SchemaBuilder {
        (self.build)()
    }
}

const CATALOG: &[PresetEntry] = &[
    PresetEntry::new("finance.age_class", "Age in 5-year classes", GermanFinancePreset::age_class),
    PresetEntry::new("finance.life_stage", "Age as career stage", GermanFinancePreset::life_stage),
    PresetEntry::new("finance.birth_date", "Birth date reduced to year", GermanFinancePreset::birth_date),
    PresetEntry::new(
        "finance.contract_date",
        "Contract date reduced to quarter",
        GermanFinancePreset::contract_date,
    ),
    PresetEntry::new(
        "finance.wealth_category",
        "Liquid assets category",
        GermanFinancePreset::wealth_category,
    ),
    PresetEntry::new(
        "finance.net_worth_status",
        "Total assets category",
        GermanFinancePreset::net_worth_status,
    ),
    PresetEntry::new(
        "finance.pension_category",
        "Monthly pension category",
        GermanFinancePreset::pension_category,
    ),
    PresetEntry::new(
        "finance.income_category",
        "Monthly net income category",
        GermanFinancePreset::income_category,
    ),
    PresetEntry::new(
        "finance.gap_category",
        "Pension gap or surplus category",
        GermanFinancePreset::gap_category,
    ),
    PresetEntry::new(
        "finance.health_indicator",
        "Health score 0-2 as label",
        GermanFinancePreset::health_indicator,
    ),
    PresetEntry::new("health.icd10_category", "ICD-10 code (kept as is)", HealthPreset::icd10_category),
    PresetEntry::new("hr.salary_band", "Annual salary (kept as is)", HrPreset::salary_band),
];

/// All presets, ordered by domain
pub fn catalog() -> &'static [PresetEntry] {
    CATALOG
}

/// Find a preset by dotted name
pub fn lookup(name: &str) -> Option<SchemaBuilder> {
    CATALOG
        .iter()
        .find(|entry| entry.name == name)
        .map(PresetEntry::builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lookup() {
        let node = lookup("finance.age_class").unwrap().build();
        assert_eq!(node.type_name(), "number");
        assert!(node.transformer().is_some());

        assert!(lookup("finance.unknown").is_none());
        assert!(lookup("age_class").is_none());
    }

    #[test]
    fn test_catalog_names_are_unique() {
        let names: HashSet<&str> = catalog().iter().map(|entry| entry.name).collect();
        assert_eq!(names.len(), catalog().len());
        assert_eq!(catalog().len(), 12);
    }

    #[test]
    fn test_every_entry_builds() {
        for entry in catalog() {
            assert_eq!(lookup(entry.name), Some(entry.builder()));
        }
    }
}
