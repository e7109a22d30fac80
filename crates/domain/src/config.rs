//! Configuration management

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_KEYCHAIN_SERVICE, DEFAULT_LOGIN_PATH, DEFAULT_TIMEOUT_SECS,
    DEFAULT_TOKEN_FILE, DEFAULT_USER_AGENT,
};

/// Client configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to (e.g. "https://admin.example.com/api")
    pub base_url: String,
    /// Transport timeout per request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Path announced to the session listener when the session is lost
    #[serde(default = "default_login_path")]
    pub login_path: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl ApiConfig {
    /// Transport timeout as a [`Duration`]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Where session credentials are persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StorageConfig {
    /// Process memory only; credentials vanish with the process
    Memory,
    /// JSON document on disk
    File { path: PathBuf },
    /// Platform keychain entry
    Keychain { service: String },
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::File { path: PathBuf::from(DEFAULT_TOKEN_FILE) }
    }
}

impl StorageConfig {
    /// Keychain storage under the default service name
    #[must_use]
    pub fn default_keychain() -> Self {
        Self::Keychain { service: DEFAULT_KEYCHAIN_SERVICE.to_string() }
    }
}

/// Tracing subscriber settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), json: false }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_login_path() -> String {
    DEFAULT_LOGIN_PATH.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = Config::default();

        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
        assert_eq!(config.api.login_path, "/login");
        assert!(matches!(config.storage, StorageConfig::File { .. }));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn storage_backend_is_tagged() {
        let json = r#"{"backend":"keychain","service":"Desk.test"}"#;
        let storage: StorageConfig = serde_json::from_str(json).unwrap();
        assert_eq!(storage, StorageConfig::Keychain { service: "Desk.test".to_string() });

        let memory: StorageConfig = serde_json::from_str(r#"{"backend":"memory"}"#).unwrap();
        assert_eq!(memory, StorageConfig::Memory);
    }

    #[test]
    fn partial_api_section_uses_field_defaults() {
        let json = r#"{"api":{"base_url":"https://desk.example.com"}}"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.api.base_url, "https://desk.example.com");
        assert_eq!(config.api.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.api.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.storage, StorageConfig::default());
    }
}
