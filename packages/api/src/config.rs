//! # Client configuration
//!
//! TOML-parsed settings for the remote surface. All fields have production
//! defaults, so a missing or empty config file is equivalent to the default
//! configuration.
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:3000/api"
//! timeout_secs = 30
//!
//! [timings]
//! booked_redirect_delay_ms = 1500   # pause so the success message is seen
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level client configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub timings: TimingConfig,
}

/// Remote endpoint configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL all endpoint paths are appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// UI timing knobs surfaced by the core.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Delay before navigating to booking history after a placed bet.
    #[serde(default = "default_redirect_delay_ms")]
    pub booked_redirect_delay_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_redirect_delay_ms() -> u64 {
    1500
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            booked_redirect_delay_ms: default_redirect_delay_ms(),
        }
    }
}

impl ClientConfig {
    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn booked_redirect_delay(&self) -> Duration {
        Duration::from_millis(self.timings.booked_redirect_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = ClientConfig::from_toml("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.timings.booked_redirect_delay_ms, 1500);
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = ClientConfig::from_toml("[api]\nbase_url = \"https://bets.example/api\"\n")
            .unwrap();
        assert_eq!(config.api.base_url, "https://bets.example/api");
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = ClientConfig::default();
        let text = config.to_toml().unwrap();
        assert_eq!(ClientConfig::from_toml(&text).unwrap(), config);
    }
}
