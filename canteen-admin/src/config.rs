//! Admin front end configuration
//!
//! Read from the environment (after `.env`), then overridden by CLI flags.

use std::env;
use std::path::PathBuf;

use canteen_client::ClientConfig;

/// Default admin home (session file lives here)
pub const DEFAULT_HOME: &str = "./.canteen-admin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminConfig {
    pub client: ClientConfig,
    /// `CANTEEN_ADMIN_HOME`
    pub home: PathBuf,
    /// `LOG_LEVEL`
    pub log_level: String,
    /// `LOG_DIR`; stdout when unset
    pub log_dir: Option<PathBuf>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            home: PathBuf::from(DEFAULT_HOME),
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl AdminConfig {
    pub fn from_env() -> Self {
        let non_empty = |key: &str| env::var(key).ok().filter(|v| !v.trim().is_empty());
        Self {
            client: ClientConfig::from_env(),
            home: non_empty("CANTEEN_ADMIN_HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_HOME)),
            log_level: non_empty("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_dir: non_empty("LOG_DIR").map(PathBuf::from),
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        let timeout = self.client.timeout;
        self.client = ClientConfig::new(url).with_timeout(timeout);
        self
    }

    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = home.into();
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_keep_timeout() {
        let mut config = AdminConfig::default();
        config.client.timeout = 7;
        let config = config
            .with_api_url("http://localhost:4000/")
            .with_home("/tmp/admin")
            .with_log_level("debug");
        assert_eq!(config.client.base_url, "http://localhost:4000");
        assert_eq!(config.client.timeout, 7);
        assert_eq!(config.home, PathBuf::from("/tmp/admin"));
        assert_eq!(config.log_level, "debug");
    }
}
