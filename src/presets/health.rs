//! Health data rules

use crate::schema::{Schema, SchemaBuilder};

/// Preset field rules for health records
pub struct HealthPreset;

impl HealthPreset {
    /// ICD-10 diagnosis code, currently kept as is
    // TODO: map codes to their chapter label, e.g. F32.9 -> "Affektive Störung"
    pub fn icd10_category() -> SchemaBuilder {
        Schema::string()
    }
}
