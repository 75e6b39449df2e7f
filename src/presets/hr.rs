//! HR data rules

use crate::schema::{Schema, SchemaBuilder};

/// Preset field rules for HR records
pub struct HrPreset;

impl HrPreset {
    /// Annual salary, currently kept as is
    // TODO: bucket salaries into pay bands, e.g. 65000 -> "Band 3 (Senior)"
    pub fn salary_band() -> SchemaBuilder {
        Schema::number()
    }
}
