//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Base URL used when neither the config file nor the environment names one
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub recommend: RecommendConfig,

    #[serde(default)]
    pub profile: ProfileConfig,

    #[serde(default)]
    pub login: LoginConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl ApiConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Recommend screen configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendConfig {
    /// Client-side abort window for a single recommendation call
    #[serde(default = "default_recommend_timeout")]
    pub timeout_secs: u64,
}

fn default_recommend_timeout() -> u64 {
    120 // 2 minutes
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_recommend_timeout(),
        }
    }
}

impl RecommendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Profile screen configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileConfig {
    /// Delay between a successful save and the jump to the recommend screen
    #[serde(default = "default_redirect_delay")]
    pub redirect_delay_ms: u64,
}

fn default_redirect_delay() -> u64 {
    2000
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            redirect_delay_ms: default_redirect_delay(),
        }
    }
}

impl ProfileConfig {
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}

/// Login screen configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoginConfig {
    /// How long the "account created" banner stays visible
    #[serde(default = "default_banner_secs")]
    pub registered_banner_secs: u64,
}

fn default_banner_secs() -> u64 {
    5
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            registered_banner_secs: default_banner_secs(),
        }
    }
}

impl LoginConfig {
    pub fn registered_banner(&self) -> Duration {
        Duration::from_secs(self.registered_banner_secs)
    }
}

/// Session persistence configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionConfig {
    /// Override for the session file location
    pub file: Option<PathBuf>,
}

impl SessionConfig {
    /// Resolve the session file path, falling back to the platform data dir
    pub fn path(&self) -> PathBuf {
        self.file.clone().unwrap_or_else(default_session_file)
    }
}

fn default_session_file() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join("starrt").join("session.toml"))
        .unwrap_or_else(|| PathBuf::from("./starrt_session.toml"))
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
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

        Self::parse(path, &content)
    }

    fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        config.normalize();
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
        let config_paths = [
            dirs::config_dir().map(|p| p.join("starrt").join("config.toml")),
            Some(PathBuf::from("./starrt.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // API overrides; the web build's variable is honoured as a fallback
        if let Some(url) = lookup("STARRT_API_URL").or_else(|| lookup("NEXT_PUBLIC_API_URL")) {
            if !url.trim().is_empty() {
                self.api.base_url = url;
            }
        }

        if let Some(path) = lookup("STARRT_SESSION_FILE") {
            self.session.file = Some(PathBuf::from(path));
        }

        if let Some(secs) = lookup("STARRT_RECOMMEND_TIMEOUT_SECS") {
            if let Ok(s) = secs.parse() {
                self.recommend.timeout_secs = s;
            }
        }

        // Logging overrides
        if let Some(level) = lookup("STARRT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("STARRT_LOG_FORMAT") {
            self.logging.format = format;
        }

        self.normalize();
    }

    fn normalize(&mut self) {
        let trimmed = self.api.base_url.trim().trim_end_matches('/');
        self.api.base_url = if trimmed.is_empty() {
            default_base_url()
        } else {
            trimmed.to_string()
        };
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
    r#"# STARRT Configuration
#
# Environment variables override these settings:
# - STARRT_API_URL (or NEXT_PUBLIC_API_URL)
# - STARRT_SESSION_FILE
# - STARRT_RECOMMEND_TIMEOUT_SECS
# - STARRT_LOG_LEVEL
# - STARRT_LOG_FORMAT

[api]
# Recommendation service base URL
base_url = "http://127.0.0.1:8000"

# TCP connect timeout in seconds
connect_timeout_secs = 10

[recommend]
# Abort a recommendation call that has not answered after this many seconds
timeout_secs = 120

[profile]
# Pause after a successful save before moving to the recommend screen (ms)
redirect_delay_ms = 2000

[login]
# How long the "Account created" banner is shown (seconds)
registered_banner_secs = 5

[session]
# Where the session token is persisted
# file = "~/.local/share/starrt/session.toml"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
