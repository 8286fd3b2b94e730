//! Client configuration

use std::env;
use std::time::Duration;

/// Production admin API
pub const DEFAULT_API_URL: &str = "https://be-foodiepe-rurh.onrender.com";

/// Request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration for connecting to the admin API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base URL (e.g., "https://api.example.com")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Read `CANTEEN_API_URL` and `CANTEEN_API_TIMEOUT`.
    ///
    /// Unset, unparsable or zero values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("CANTEEN_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let timeout = lookup("CANTEEN_API_TIMEOUT")
            .and_then(|v| v.trim().parse().ok())
            .filter(|t| *t > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Self::new(base_url).with_timeout(timeout)
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_lookup_defaults() {
        let config = ClientConfig::from_lookup(|_| None);
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.timeout, 30);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("CANTEEN_API_URL", "http://127.0.0.1:9000/"),
            ("CANTEEN_API_TIMEOUT", "5"),
        ]);
        let config = ClientConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.timeout_duration(), Duration::from_secs(5));
    }

    #[test]
    fn test_bad_timeout_falls_back() {
        let config = ClientConfig::from_lookup(|k| (k == "CANTEEN_API_TIMEOUT").then(|| "soon".to_string()));
        assert_eq!(config.timeout, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_zero_timeout_falls_back() {
        let config = ClientConfig::from_lookup(|k| (k == "CANTEEN_API_TIMEOUT").then(|| "0".to_string()));
        assert_eq!(config.timeout, DEFAULT_TIMEOUT_SECS);
        assert!(!config.timeout_duration().is_zero());
    }
}
