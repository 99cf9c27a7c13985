use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;
use crate::services::history::MAX_HISTORY_CAPACITY;

/// Directory holding project-local configuration
pub const CONFIG_DIR: &str = ".starpulse";

/// Environment variables consulted, in order, when no API key is configured
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid rate limit: {0}. Must be positive")]
    InvalidRateLimit(f64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),

    #[error("Invalid history capacity: {0}. Must be between 1 and 10")]
    InvalidHistoryCapacity(usize),

    #[error("Invalid progress settings: increment {increment} must be positive and ceiling {ceiling} must be in (0, 100)")]
    InvalidProgress { increment: f64, ceiling: f64 },

    #[error("Invalid progress tick: must be at least 1ms")]
    InvalidProgressTick,

    #[error("Cache directory cannot be empty")]
    EmptyCacheDir,

    #[error("History key cannot be empty")]
    EmptyHistoryKey,

    #[error("Backend base URL cannot be empty")]
    EmptyBaseUrl,

    #[error("No API key configured. Set backend.api_key, STARPULSE_BACKEND__API_KEY or GEMINI_API_KEY")]
    MissingApiKey,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .starpulse/config.yaml (project config)
    /// 3. .starpulse/local.yaml (local overrides, optional)
    /// 4. Environment variables (STARPULSE_* prefix, `__` separates sections)
    pub fn load() -> Result<Config> {
        Self::load_from_dir(CONFIG_DIR)
    }

    /// Same layering as [`ConfigLoader::load`] with the YAML files read from `dir`
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Config> {
        let dir = dir.as_ref();
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(dir.join("config.yaml")))
            .merge(Yaml::file(dir.join("local.yaml")))
            .merge(Env::prefixed("STARPULSE_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honoring env overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("STARPULSE_").split("__"))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.as_ref().display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let backend = &config.backend;
        if backend.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if !backend.requests_per_second.is_finite() || backend.requests_per_second <= 0.0 {
            return Err(ConfigError::InvalidRateLimit(backend.requests_per_second));
        }

        let search = &config.search;
        if !(1..=MAX_HISTORY_CAPACITY).contains(&search.history_capacity) {
            return Err(ConfigError::InvalidHistoryCapacity(search.history_capacity));
        }
        if search.progress_tick_ms == 0 {
            return Err(ConfigError::InvalidProgressTick);
        }
        if !(search.progress_increment > 0.0 && search.progress_increment.is_finite())
            || !search.progress_ceiling.is_finite()
            || search.progress_ceiling <= 0.0
            || search.progress_ceiling >= 100.0
        {
            return Err(ConfigError::InvalidProgress {
                increment: search.progress_increment,
                ceiling: search.progress_ceiling,
            });
        }

        if config.cache.dir.trim().is_empty() {
            return Err(ConfigError::EmptyCacheDir);
        }
        if config.cache.history_key.trim().is_empty() {
            return Err(ConfigError::EmptyHistoryKey);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        Ok(())
    }

    /// API key from config, falling back to the conventional env variables
    pub fn api_key(config: &Config) -> Result<String, ConfigError> {
        config
            .backend
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                API_KEY_ENV_VARS
                    .iter()
                    .filter_map(|var| std::env::var(var).ok())
                    .find(|key| !key.trim().is_empty())
            })
            .ok_or(ConfigError::MissingApiKey)
    }
}
