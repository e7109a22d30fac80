//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Reads a `.env` file from the working directory if one exists
//! 2. Attempts to load from environment variables
//! 3. If `IMPORTDESK_API_BASE_URL` is missing, falls back to a config file
//! 4. Probes multiple paths for config files
//! 5. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `IMPORTDESK_API_BASE_URL`: Backend base URL (required for env loading)
//! - `IMPORTDESK_API_TIMEOUT`: Request timeout in seconds
//! - `IMPORTDESK_LOGIN_PATH`: Path announced when the session expires
//! - `IMPORTDESK_TOKEN_STORE`: `memory`, `file` or `keychain`
//! - `IMPORTDESK_TOKEN_FILE`: Credential file for the `file` store
//! - `IMPORTDESK_KEYCHAIN_SERVICE`: Service name for the `keychain` store
//! - `IMPORTDESK_LOG_LEVEL`: Default tracing filter
//! - `IMPORTDESK_LOG_JSON`: Emit JSON logs (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./importdesk.json` or `./importdesk.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use importdesk_domain::constants::{
    DEFAULT_KEYCHAIN_SERVICE, DEFAULT_LOGIN_PATH, DEFAULT_TIMEOUT_SECS, DEFAULT_TOKEN_FILE,
};
use importdesk_domain::{ApiConfig, Config, ImportDeskError, LoggingConfig, Result, StorageConfig};

const BASE_URL_VAR: &str = "IMPORTDESK_API_BASE_URL";

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables (after reading `.env`).
/// If the base URL is not set there, falls back to a config file. An invalid
/// value in an environment that does set the base URL is an error.
///
/// # Errors
/// Returns `ImportDeskError::Config` if:
/// - Configuration cannot be loaded from either source
/// - An environment value or the file format is invalid
pub fn load() -> Result<Config> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    if env_opt(BASE_URL_VAR).is_none() {
        tracing::debug!("{} not set, trying file", BASE_URL_VAR);
        return load_from_file(None);
    }

    let config = load_from_env()?;
    tracing::info!("Configuration loaded from environment variables");
    Ok(config)
}

/// Load configuration from environment variables
///
/// Only `IMPORTDESK_API_BASE_URL` is required; every other setting falls back
/// to its default.
///
/// # Errors
/// Returns `ImportDeskError::Config` if the base URL is missing or a value is
/// invalid.
pub fn load_from_env() -> Result<Config> {
    let base_url = env_var(BASE_URL_VAR)?;

    let timeout_secs = match env_opt("IMPORTDESK_API_TIMEOUT") {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|e| ImportDeskError::Config(format!("Invalid API timeout: {}", e)))?,
        None => DEFAULT_TIMEOUT_SECS,
    };

    let login_path =
        env_opt("IMPORTDESK_LOGIN_PATH").unwrap_or_else(|| DEFAULT_LOGIN_PATH.to_string());

    let storage = match env_opt("IMPORTDESK_TOKEN_STORE").as_deref() {
        None | Some("file") => StorageConfig::File {
            path: env_opt("IMPORTDESK_TOKEN_FILE")
                .map_or_else(|| PathBuf::from(DEFAULT_TOKEN_FILE), PathBuf::from),
        },
        Some("keychain") => StorageConfig::Keychain {
            service: env_opt("IMPORTDESK_KEYCHAIN_SERVICE")
                .unwrap_or_else(|| DEFAULT_KEYCHAIN_SERVICE.to_string()),
        },
        Some("memory") => StorageConfig::Memory,
        Some(other) => {
            return Err(ImportDeskError::Config(format!("Unknown token store: {}", other)));
        }
    };

    let logging = LoggingConfig {
        level: env_opt("IMPORTDESK_LOG_LEVEL").unwrap_or_else(|| LoggingConfig::default().level),
        json: env_bool("IMPORTDESK_LOG_JSON", false),
    };

    validate(Config {
        api: ApiConfig { base_url, timeout_secs, login_path, ..ApiConfig::default() },
        storage,
        logging,
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `ImportDeskError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ImportDeskError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ImportDeskError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ImportDeskError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    let config = match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ImportDeskError::Config(format!("Invalid TOML format: {}", e)))?,
        "json" => serde_json::from_str(contents)
            .map_err(|e| ImportDeskError::Config(format!("Invalid JSON format: {}", e)))?,
        _ => {
            return Err(ImportDeskError::Config(format!(
                "Unsupported config format: {}",
                extension
            )));
        }
    };

    validate(config)
}

/// Reject settings that would make every request fail
fn validate(config: Config) -> Result<Config> {
    if config.api.timeout_secs == 0 {
        return Err(ImportDeskError::Config("API timeout must be at least 1 second".to_string()));
    }
    Ok(config)
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    const NAMES: [&str; 4] = ["config.json", "config.toml", "importdesk.json", "importdesk.toml"];

    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(NAMES.iter().map(|name| cwd.join(name)));
        candidates.push(cwd.join("../config.json"));
        candidates.push(cwd.join("../config.toml"));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(NAMES.iter().map(|name| exe_dir.join(name)));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    env_opt(key).ok_or_else(|| {
        ImportDeskError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Optional environment variable; empty values count as unset
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::Builder;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const VARS: [&str; 8] = [
        "IMPORTDESK_API_BASE_URL",
        "IMPORTDESK_API_TIMEOUT",
        "IMPORTDESK_LOGIN_PATH",
        "IMPORTDESK_TOKEN_STORE",
        "IMPORTDESK_TOKEN_FILE",
        "IMPORTDESK_KEYCHAIN_SERVICE",
        "IMPORTDESK_LOG_LEVEL",
        "IMPORTDESK_LOG_JSON",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_env_bool_parsing() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("IMPORTDESK_TEST_BOOL_YES", "YES");
        std::env::set_var("IMPORTDESK_TEST_BOOL_OFF", "off");

        assert!(env_bool("IMPORTDESK_TEST_BOOL_YES", false));
        assert!(!env_bool("IMPORTDESK_TEST_BOOL_OFF", true));
        assert!(env_bool("IMPORTDESK_TEST_BOOL_MISSING", true));

        std::env::remove_var("IMPORTDESK_TEST_BOOL_YES");
        std::env::remove_var("IMPORTDESK_TEST_BOOL_OFF");
    }

    #[test]
    fn test_load_from_env_minimal() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("IMPORTDESK_API_BASE_URL", "https://desk.example.com/api");

        let config = load_from_env().expect("base URL is enough");
        assert_eq!(config.api.base_url, "https://desk.example.com/api");
        assert_eq!(config.api.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.api.login_path, DEFAULT_LOGIN_PATH);
        assert_eq!(config.storage, StorageConfig::default());
        assert!(!config.logging.json);

        clear_env();
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("IMPORTDESK_API_BASE_URL", "http://localhost:4000/api");
        std::env::set_var("IMPORTDESK_API_TIMEOUT", "5");
        std::env::set_var("IMPORTDESK_LOGIN_PATH", "/admin/login");
        std::env::set_var("IMPORTDESK_TOKEN_STORE", "keychain");
        std::env::set_var("IMPORTDESK_KEYCHAIN_SERVICE", "Desk.test");
        std::env::set_var("IMPORTDESK_LOG_LEVEL", "debug");
        std::env::set_var("IMPORTDESK_LOG_JSON", "true");

        let config = load_from_env().expect("valid environment");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.api.login_path, "/admin/login");
        assert_eq!(config.storage, StorageConfig::Keychain { service: "Desk.test".to_string() });
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);

        clear_env();
    }

    #[test]
    fn test_load_from_env_missing_base_url() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, ImportDeskError::Config(_)), "Should be a Config error");
    }

    #[test]
    fn test_load_from_env_invalid_values() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("IMPORTDESK_API_BASE_URL", "http://localhost:4000/api");
        std::env::set_var("IMPORTDESK_API_TIMEOUT", "soon");
        assert!(matches!(load_from_env(), Err(ImportDeskError::Config(_))));

        std::env::remove_var("IMPORTDESK_API_TIMEOUT");
        std::env::set_var("IMPORTDESK_TOKEN_STORE", "clipboard");
        assert!(matches!(load_from_env(), Err(ImportDeskError::Config(_))));

        clear_env();
    }

    #[test]
    fn test_load_reports_invalid_env_instead_of_probing_files() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("IMPORTDESK_API_BASE_URL", "http://localhost:4000/api");
        std::env::set_var("IMPORTDESK_API_TIMEOUT", "abc");

        match load() {
            Err(ImportDeskError::Config(msg)) => {
                assert!(msg.contains("Invalid API timeout"), "unexpected error: {msg}");
            }
            other => panic!("Expected timeout error, got {:?}", other),
        }

        clear_env();
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("IMPORTDESK_API_BASE_URL", "http://localhost:4000/api");
        std::env::set_var("IMPORTDESK_API_TIMEOUT", "0");
        assert!(matches!(
            load_from_env(),
            Err(ImportDeskError::Config(msg)) if msg.contains("at least 1")
        ));

        clear_env();

        let mut file = Builder::new().suffix(".toml").tempfile().expect("temp file");
        write!(file, "[api]\nbase_url = \"http://localhost:4000/api\"\ntimeout_secs = 0\n")
            .expect("write config");
        assert!(matches!(
            load_from_file(Some(file.path().to_path_buf())),
            Err(ImportDeskError::Config(msg)) if msg.contains("at least 1")
        ));
    }

    #[test]
    fn test_load_from_file_toml() {
        let mut file = Builder::new().suffix(".toml").tempfile().expect("temp file");
        write!(
            file,
            r#"
[api]
base_url = "https://desk.example.com/api"
timeout_secs = 12

[storage]
backend = "memory"

[logging]
level = "warn"
"#
        )
        .expect("write config");

        let config = load_from_file(Some(file.path().to_path_buf())).expect("valid TOML");
        assert_eq!(config.api.base_url, "https://desk.example.com/api");
        assert_eq!(config.api.timeout_secs, 12);
        assert_eq!(config.storage, StorageConfig::Memory);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let err = parse_config("base_url: x", Path::new("config.yaml")).unwrap_err();
        assert!(matches!(err, ImportDeskError::Config(msg) if msg.contains("yaml")));
    }

    #[test]
    fn test_load_from_file_missing() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/importdesk.json")));
        assert!(matches!(result, Err(ImportDeskError::Config(_))));
    }
}
