use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_INSTANCE_URL: &str = "http://localhost:8000";
pub const DEFAULT_CACHE_LENGTH: u64 = 15;

fn default_instance_url() -> String {
    DEFAULT_INSTANCE_URL.into()
}

fn default_cache_length() -> u64 {
    DEFAULT_CACHE_LENGTH
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadeckSettings {
    #[serde(default = "default_instance_url")]
    pub instance_url: String,
    #[serde(default)]
    pub api_key: String,
    /// Minutes between index refreshes.
    #[serde(default = "default_cache_length")]
    pub cache_length: u64,
}

impl Default for ReadeckSettings {
    fn default() -> Self {
        Self {
            instance_url: default_instance_url(),
            api_key: String::new(),
            cache_length: default_cache_length(),
        }
    }
}

impl ReadeckSettings {
    /// Parse a stored settings value, clamping the cache length to at least
    /// one minute.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        match serde_json::from_value::<Self>(value.clone()) {
            Ok(mut s) => {
                s.cache_length = s.cache_length.max(1);
                Some(s)
            }
            Err(e) => {
                tracing::warn!("ignoring invalid readeck settings: {e}");
                None
            }
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.cache_length.max(1) * 60)
    }
}
