//! General application configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Output formats the CLI knows how to render.
pub const OUTPUT_FORMATS: &[&str] = &["json", "table", "raw"];

/// Default row limit for `query`.
const fn default_limit() -> u32 {
    100
}

fn default_format() -> String {
    "table".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default row limit for query output.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Default output format: `json`, `table`, or `raw`.
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            format: default_format(),
        }
    }
}

impl GeneralConfig {
    /// Check field values that serde cannot constrain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an unknown output format.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !OUTPUT_FORMATS.contains(&self.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.format".into(),
                reason: format!(
                    "'{}' is not one of {}",
                    self.format,
                    OUTPUT_FORMATS.join(", ")
                ),
            });
        }
        Ok(())
    }
}
