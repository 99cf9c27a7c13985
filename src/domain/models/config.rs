use serde::{Deserialize, Serialize};

/// Main configuration structure for StarPulse
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Remote profile service configuration
    #[serde(default)]
    pub backend: BackendConfig,

    /// Search controller timings and limits
    #[serde(default)]
    pub search: SearchConfig,

    /// Local cache store configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Gemini backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BackendConfig {
    /// API key; falls back to `GEMINI_API_KEY` / `API_KEY` when unset
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the generative-language API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model used for name suggestions
    #[serde(default = "default_suggestion_model")]
    pub suggestion_model: String,

    /// Model used for full profile fetches
    #[serde(default = "default_profile_model")]
    pub profile_model: String,

    /// Requests per second allowed towards the backend
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: f64,

    /// Per-request timeout. Unset means a fetch may stay pending until cancelled.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Let the profile model ground its answer with web search
    #[serde(default = "default_true")]
    pub search_grounding: bool,
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_suggestion_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_profile_model() -> String {
    "gemini-3-pro-preview".to_string()
}

const fn default_requests_per_second() -> f64 {
    5.0
}

const fn default_true() -> bool {
    true
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            suggestion_model: default_suggestion_model(),
            profile_model: default_profile_model(),
            requests_per_second: default_requests_per_second(),
            request_timeout_secs: None,
            search_grounding: default_true(),
        }
    }
}

/// Timings and limits of the search request lifecycle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before suggestions are requested
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Minimum trimmed query length (in characters) that triggers suggestions
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,

    /// Period of the synthetic progress ticker
    #[serde(default = "default_progress_tick_ms")]
    pub progress_tick_ms: u64,

    /// Progress added on each tick
    #[serde(default = "default_progress_increment")]
    pub progress_increment: f64,

    /// Highest value the ticker may reach on its own
    #[serde(default = "default_progress_ceiling")]
    pub progress_ceiling: f64,

    /// Pause between progress hitting 100 and the result being published
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Maximum number of history entries kept
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

const fn default_debounce_ms() -> u64 {
    500
}

const fn default_min_query_chars() -> usize {
    2
}

const fn default_progress_tick_ms() -> u64 {
    100
}

const fn default_progress_increment() -> f64 {
    0.166
}

const fn default_progress_ceiling() -> f64 {
    99.5
}

const fn default_settle_delay_ms() -> u64 {
    600
}

const fn default_history_capacity() -> usize {
    10
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_query_chars: default_min_query_chars(),
            progress_tick_ms: default_progress_tick_ms(),
            progress_increment: default_progress_increment(),
            progress_ceiling: default_progress_ceiling(),
            settle_delay_ms: default_settle_delay_ms(),
            history_capacity: default_history_capacity(),
        }
    }
}

/// Local cache store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CacheConfig {
    /// Directory holding one file per cache key
    #[serde(default = "default_cache_dir")]
    pub dir: String,

    /// Key the history list is stored under
    #[serde(default = "default_history_key")]
    pub history_key: String,
}

fn default_cache_dir() -> String {
    ".starpulse/cache".to_string()
}

fn default_history_key() -> String {
    "starpulse_history".to_string()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: default_cache_dir(),
            history_key: default_history_key(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stderr only when unset
    #[serde(default)]
    pub log_dir: Option<String>,

    /// Rotation for file output: daily, hourly, never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}
