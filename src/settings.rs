use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const SETTINGS_FILE: &str = "settings.json";
pub const DEFAULT_MAX_RESULTS: usize = 50;

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    /// When enabled the application initialises the logger at debug level.
    /// Defaults to `false` when the field is missing in the settings file.
    #[serde(default)]
    pub debug_logging: bool,
    /// Upper bound on the number of rows returned for a single query.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Per-plugin settings keyed by plugin name.
    #[serde(default)]
    pub plugin_settings: HashMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_logging: false,
            max_results: default_max_results(),
            plugin_settings: HashMap::new(),
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
