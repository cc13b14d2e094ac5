// ⚙️ Compensation Config - territory catalogue + defaults
//
// Parsed from a JSON document handed over by the caller (the crate never
// reads files itself):
//
// {
//   "default_fixed_salary": 1000.0,
//   "territories": [
//     { "id": 1, "name": "Occitanie", "meal_allowance": 200.0 }
//   ]
// }

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompensationConfig {
    /// Fixed salary given to representatives created through the config
    pub default_fixed_salary: f64,

    /// Known territories and their meal allowances
    pub territories: Vec<TerritoryConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerritoryConfig {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub meal_allowance: f64,
}

impl CompensationConfig {
    /// Parse and validate a JSON config document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: CompensationConfig =
            serde_json::from_str(json).context("Failed to parse compensation config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize compensation config")
    }

    /// Check amounts are usable and territory ids unique
    pub fn validate(&self) -> Result<()> {
        check_amount("default_fixed_salary", self.default_fixed_salary)?;

        let mut seen = HashSet::new();
        for territory in &self.territories {
            if territory.name.trim().is_empty() {
                return Err(anyhow!("Territory {} has an empty name", territory.id));
            }
            check_amount("meal_allowance", territory.meal_allowance)
                .with_context(|| format!("Invalid territory '{}'", territory.name))?;
            if !seen.insert(territory.id) {
                return Err(anyhow!("Duplicate territory id in config: {}", territory.id));
            }
        }

        Ok(())
    }
}

fn check_amount(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(anyhow!("{} must be a finite amount >= 0, got {}", field, value));
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
