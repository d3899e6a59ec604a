//! # Client configuration (`tracker.toml`)
//!
//! Defines the TOML configuration the front end reads at startup. The defaults
//! match a stock deployment (backend on port 8081, Docker service name
//! `backend_container_new`), so a missing or empty config is valid.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! local_base_url = "http://localhost:8081"
//! deployed_base_url = "http://backend_container_new:8081"
//!
//! [attendance]
//! default_pass_percentage = 75.0
//! warning_threshold = 75.0
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`TrackerConfig`] | Top-level config with TOML (de)serialisation and a loader reading the `trackerConfig` storage key. |
//! | [`ApiConfig`] | Backend base URLs for the local and deployed environments. |
//! | [`AttendanceConfig`] | Default pass percentage for new subject settings and the overall-attendance warning threshold. |

use serde::{Deserialize, Serialize};

use crate::kv::{keys, KeyValueStore};

/// Top-level client configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub attendance: AttendanceConfig,
}

/// Backend base URLs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Used when the page is served from `localhost` / `127.0.0.1`.
    #[serde(default = "default_local_base_url")]
    pub local_base_url: String,
    /// Used for every other hostname.
    #[serde(default = "default_deployed_base_url")]
    pub deployed_base_url: String,
}

fn default_local_base_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_deployed_base_url() -> String {
    "http://backend_container_new:8081".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            local_base_url: default_local_base_url(),
            deployed_base_url: default_deployed_base_url(),
        }
    }
}

/// Attendance page thresholds, in percent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttendanceConfig {
    #[serde(default = "default_percentage")]
    pub default_pass_percentage: f64,
    #[serde(default = "default_percentage")]
    pub warning_threshold: f64,
}

fn default_percentage() -> f64 {
    75.0
}

impl Default for AttendanceConfig {
    fn default() -> Self {
        Self {
            default_pass_percentage: default_percentage(),
            warning_threshold: default_percentage(),
        }
    }
}

impl TrackerConfig {
    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load the override stored under `trackerConfig`, falling back to defaults
    /// when the key is missing or does not parse.
    pub fn load<S: KeyValueStore>(store: &S) -> Self {
        store
            .get(keys::TRACKER_CONFIG)
            .and_then(|raw| Self::from_toml(&raw).ok())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[test]
    fn test_empty_toml_is_default() {
        let config = TrackerConfig::from_toml("").unwrap();
        assert_eq!(config, TrackerConfig::default());
        assert_eq!(config.api.local_base_url, "http://localhost:8081");
        assert_eq!(config.attendance.warning_threshold, 75.0);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = TrackerConfig::from_toml(
            r#"
            [api]
            deployed_base_url = "https://tracker.example.edu"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.deployed_base_url, "https://tracker.example.edu");
        assert_eq!(config.api.local_base_url, "http://localhost:8081");
        assert_eq!(config.attendance, AttendanceConfig::default());
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = TrackerConfig::default();
        config.attendance.default_pass_percentage = 80.0;
        let text = config.to_toml().unwrap();
        assert_eq!(TrackerConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_load_from_store() {
        let store = MemoryStore::new();

        // Nothing stored
        assert_eq!(TrackerConfig::load(&store), TrackerConfig::default());

        store.set(
            keys::TRACKER_CONFIG,
            "[attendance]\nwarning_threshold = 60.0\ndefault_pass_percentage = 80.0\n",
        );
        let loaded = TrackerConfig::load(&store);
        assert_eq!(loaded.attendance.warning_threshold, 60.0);
        assert_eq!(loaded.attendance.default_pass_percentage, 80.0);

        // Garbage falls back to defaults
        store.set(keys::TRACKER_CONFIG, "not = [valid");
        assert_eq!(TrackerConfig::load(&store), TrackerConfig::default());
    }
}
