//! Presets command implementation
//!
//! Lists the preset catalog, or prints one preset as a schema node.

use crate::presets::{catalog, lookup};
use anyhow::Context;
use clap::Args;

/// Arguments for the presets command
#[derive(Args, Debug)]
pub struct PresetsArgs {
    /// Print this preset as JSON, e.g. `finance.age_class`
    #[arg(short, long)]
    pub name: Option<String>,
}

impl PresetsArgs {
    /// Execute the presets command
    pub fn execute(&self) -> anyhow::Result<i32> {
        let Some(name) = &self.name else {
            println!("Available presets:");
            for entry in catalog() {
                println!("  {:28} {}", entry.name, entry.description);
            }
            return Ok(0);
        };

        match lookup(name) {
            Some(builder) => {
                let json = serde_json::to_string_pretty(&builder.build())
                    .context("Failed to serialize preset")?;
                println!("{json}");
                Ok(0)
            }
            None => {
                eprintln!("❌ Unknown preset: {name}");
                eprintln!("   Run `seman presets` to list available presets");
                Ok(2)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_presets() {
        let args = PresetsArgs { name: None };
        assert_eq!(args.execute().unwrap(), 0);
    }

    #[test]
    fn test_known_preset() {
        let args = PresetsArgs {
            name: Some("finance.income_category".to_string()),
        };
        assert_eq!(args.execute().unwrap(), 0);
    }

    #[test]
    fn test_unknown_preset() {
        let args = PresetsArgs {
            name: Some("finance.iban".to_string()),
        };
        assert_eq!(args.execute().unwrap(), 2);
    }
}
