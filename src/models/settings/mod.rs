// Settings module
// Application configuration persisted as TOML by the settings service

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the scheduling backend, without a trailing slash.
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub theme: String,
    /// When set, the OS preference overrides `theme` at startup.
    pub use_system_theme: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000/api/v1".to_string(),
            request_timeout_secs: 20,
            theme: "dark".to_string(),
            use_system_theme: false,
        }
    }
}
