use serde::Deserialize;

use crate::error::EngineError;
use crate::matcher::MatchThresholds;

// ---------------------------------------------------------------------------
// Top-level run config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct RunConfig {
    pub name: String,
    /// Reference catalog CSV path, relative to the config file.
    pub catalog: String,
    /// Inventory export CSV path, relative to the config file.
    pub inventory: String,
    pub columns: ColumnSelection,
    #[serde(default)]
    pub catalog_columns: CatalogColumns,
    #[serde(default)]
    pub thresholds: MatchThresholds,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Caller-selected inventory columns, by header name.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnSelection {
    pub model: String,
    #[serde(default)]
    pub count: Option<String>,
}

/// Catalog CSV header names. Firmware/notes columns are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogColumns {
    #[serde(default = "default_manufacturer_column")]
    pub manufacturer: String,
    #[serde(default = "default_model_column")]
    pub model: String,
    #[serde(default)]
    pub firmware: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_manufacturer_column() -> String {
    "Manufacturer".into()
}

fn default_model_column() -> String {
    "Model".into()
}

impl Default for CatalogColumns {
    fn default() -> Self {
        Self {
            manufacturer: default_manufacturer_column(),
            model: default_model_column(),
            firmware: None,
            notes: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub json: Option<String>,
    #[serde(default)]
    pub csv: Option<String>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl RunConfig {
    pub fn from_toml(input: &str) -> Result<Self, EngineError> {
        let config: RunConfig =
            toml::from_str(input).map_err(|e| EngineError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.name.trim().is_empty() {
            return Err(EngineError::ConfigValidation("name must not be empty".into()));
        }
        if self.columns.model.trim().is_empty() {
            return Err(EngineError::ConfigValidation(
                "columns.model must not be empty".into(),
            ));
        }
        if let Some(count) = &self.columns.count {
            if count.trim().is_empty() {
                return Err(EngineError::ConfigValidation(
                    "columns.count must not be empty when present".into(),
                ));
            }
        }
        for (field, value) in [
            ("thresholds.potential", self.thresholds.potential),
            ("thresholds.containment_floor", self.thresholds.containment_floor),
        ] {
            if !(0.0..1.0).contains(&value) {
                return Err(EngineError::ConfigValidation(format!(
                    "{field} must be in [0, 1), got {value}"
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
name = "Site survey"
catalog = "catalog.csv"
inventory = "export.csv"

[columns]
model = "Device Model"
count = "Qty"

[catalog_columns]
manufacturer = "Make"
model = "Model Name"
firmware = "Min FW"
notes = "Notes"

[output]
json = "result.json"
"#;

    #[test]
    fn parse_valid() {
        let config = RunConfig::from_toml(VALID).unwrap();
        assert_eq!(config.name, "Site survey");
        assert_eq!(config.columns.model, "Device Model");
        assert_eq!(config.columns.count.as_deref(), Some("Qty"));
        assert_eq!(config.catalog_columns.manufacturer, "Make");
        assert_eq!(config.catalog_columns.firmware.as_deref(), Some("Min FW"));
        assert_eq!(config.output.json.as_deref(), Some("result.json"));
        // Threshold defaults are the contract
        assert_eq!(config.thresholds.potential, 0.6);
        assert_eq!(config.thresholds.containment_floor, 0.5);
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let config = RunConfig::from_toml(
            r#"
name = "Minimal"
catalog = "catalog.csv"
inventory = "export.csv"

[columns]
model = "Model"
"#,
        )
        .unwrap();
        assert!(config.columns.count.is_none());
        assert_eq!(config.catalog_columns.manufacturer, "Manufacturer");
        assert_eq!(config.catalog_columns.model, "Model");
        assert!(config.catalog_columns.notes.is_none());
    }

    #[test]
    fn reject_empty_name() {
        let err = RunConfig::from_toml(
            r#"
name = "  "
catalog = "c.csv"
inventory = "i.csv"

[columns]
model = "Model"
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn reject_out_of_range_threshold() {
        let err = RunConfig::from_toml(
            r#"
name = "Bad"
catalog = "c.csv"
inventory = "i.csv"

[columns]
model = "Model"

[thresholds]
potential = 1.0
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("thresholds.potential"));
    }

    #[test]
    fn reject_missing_columns_table() {
        assert!(RunConfig::from_toml(
            r#"
name = "Bad"
catalog = "c.csv"
inventory = "i.csv"
"#,
        )
        .is_err());
    }
}
