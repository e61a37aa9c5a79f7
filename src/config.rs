//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub supabase: SupabaseSettings,

    #[serde(default)]
    pub dashboard: DashboardSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Supabase project configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseSettings {
    #[serde(default = "default_supabase_url")]
    pub url: String,

    #[serde(default)]
    pub anon_key: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_supabase_url() -> String {
    "http://localhost:54321".to_string()
}

fn default_request_timeout() -> u64 {
    10_000 // 10 seconds
}

impl Default for SupabaseSettings {
    fn default() -> Self {
        Self {
            url: default_supabase_url(),
            anon_key: String::new(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

/// Dashboard store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardSettings {
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: usize,

    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_recommendation_limit() -> usize {
    5
}

fn default_event_capacity() -> usize {
    64
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            recommendation_limit: default_recommendation_limit(),
            event_capacity: default_event_capacity(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        // Try default config locations
        let config_paths = [
            dirs::config_dir().map(|p| p.join("ecodash").join("config.toml")),
            Some(PathBuf::from("/etc/ecodash/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        // Fall back to environment-only config
        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Supabase overrides
        if let Ok(url) = std::env::var("ECODASH_SUPABASE_URL") {
            self.supabase.url = url;
        }
        if let Ok(key) = std::env::var("ECODASH_SUPABASE_ANON_KEY") {
            self.supabase.anon_key = key;
        }
        if let Ok(timeout) = std::env::var("ECODASH_REQUEST_TIMEOUT_MS") {
            if let Ok(t) = timeout.parse() {
                self.supabase.request_timeout_ms = t;
            }
        }

        // Dashboard overrides
        if let Ok(limit) = std::env::var("ECODASH_RECOMMENDATION_LIMIT") {
            if let Ok(l) = limit.parse() {
                self.dashboard.recommendation_limit = l;
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("ECODASH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("ECODASH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            supabase: SupabaseSettings::default(),
            dashboard: DashboardSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# EcoDash Configuration
#
# Environment variables override these settings:
# - ECODASH_SUPABASE_URL
# - ECODASH_SUPABASE_ANON_KEY
# - ECODASH_REQUEST_TIMEOUT_MS
# - ECODASH_RECOMMENDATION_LIMIT
# - ECODASH_LOG_LEVEL
# - ECODASH_LOG_FORMAT

[supabase]
# Supabase project URL
url = "http://localhost:54321"

# Supabase anon (public) API key
anon_key = ""

# Request timeout in milliseconds
request_timeout_ms = 10000

[dashboard]
# How many recent recommendations to keep in state
recommendation_limit = 5

# Capacity of the change-event broadcast channel
event_capacity = 64

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/ecodash/ecodash.log"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.supabase.url, "http://localhost:54321");
        assert_eq!(config.supabase.request_timeout_ms, 10_000);
        assert_eq!(config.dashboard.recommendation_limit, 5);
        assert_eq!(config.dashboard.event_capacity, 64);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[supabase]
url = "https://example.supabase.co"
anon_key = "anon-123"

[dashboard]
recommendation_limit = 3

[logging]
level = "debug"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.supabase.url, "https://example.supabase.co");
        assert_eq!(config.supabase.anon_key, "anon-123");
        // Unset fields fall back to defaults
        assert_eq!(config.supabase.request_timeout_ms, 10_000);
        assert_eq!(config.dashboard.recommendation_limit, 3);
        assert_eq!(config.dashboard.event_capacity, 64);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[supabase\nurl = ").unwrap();

        let result = Config::load(file.path());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_generated_config_parses() {
        let content = generate_default_config();
        let config: Config = toml::from_str(&content).unwrap();
        assert_eq!(config.dashboard.recommendation_limit, 5);
    }
}
