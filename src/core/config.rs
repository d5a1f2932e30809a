//! Sync core configuration
//!
//! Loaded from a `routeboard.yaml` file by host applications, or built
//! programmatically when the core is embedded. Everything except the backend
//! base URL has a sensible default.

use std::path::Path;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::identity::RequestIdentity;

/// Default config file name looked up by `SyncConfig::load_dir`
pub const CONFIG_FILE: &str = "routeboard.yaml";

/// Which of the backend's two path conventions to speak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PathStyle {
    /// `/{collection}`, `/{collection}/{id}`, `/{collection}/{id}/{action}`
    #[default]
    Flat,
    /// `/v1/{Controller}/{Action}` with the id passed as a query parameter
    Versioned,
}

impl std::fmt::Display for PathStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathStyle::Flat => write!(f, "flat"),
            PathStyle::Versioned => write!(f, "versioned"),
        }
    }
}

/// Synthetic clock used when deriving a route's stop sequence
///
/// Stop N is scheduled at `base + N * step`, where the base depends on the
/// route direction. The times are presentational placeholders, not a transit
/// plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StopClock {
    /// First pickup slot of the morning run
    pub pickup_base: NaiveTime,

    /// First dropoff slot of the afternoon run
    pub dropoff_base: NaiveTime,

    /// Minutes between consecutive stops
    pub step_minutes: u32,
}

impl StopClock {
    /// Time slot for the stop at `index` on a run starting at `base`
    pub fn slot_from(&self, base: NaiveTime, index: usize) -> NaiveTime {
        base + chrono::Duration::minutes(self.step_minutes as i64 * index as i64)
    }
}

impl Default for StopClock {
    fn default() -> Self {
        Self {
            pickup_base: hm(7, 30),
            dropoff_base: hm(15, 0),
            step_minutes: 5,
        }
    }
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// Top-level configuration for the sync core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Backend base URL, without a trailing slash (e.g. `https://ops.example.com/api`)
    pub base_url: String,

    /// Path convention the backend speaks
    #[serde(default)]
    pub path_style: PathStyle,

    /// Per-request timeout budget in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Caller identity forwarded on every request
    #[serde(default)]
    pub identity: RequestIdentity,

    /// Synthetic stop-sequence clock
    #[serde(default)]
    pub stop_clock: StopClock,
}

fn default_timeout_secs() -> u64 {
    30
}

impl SyncConfig {
    /// Create a config with defaults for everything but the base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: trim_base_url(base_url.into()),
            path_style: PathStyle::default(),
            timeout_secs: default_timeout_secs(),
            identity: RequestIdentity::anonymous(),
            stop_clock: StopClock::default(),
        }
    }

    /// Use the verb-styled `/v1/{Controller}/{Action}` convention
    pub fn with_path_style(mut self, style: PathStyle) -> Self {
        self.path_style = style;
        self
    }

    /// Replace the forwarded caller identity
    pub fn with_identity(mut self, identity: RequestIdentity) -> Self {
        self.identity = identity;
        self
    }

    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: SyncConfig =
            serde_yml::from_str(&content).map_err(|e| ConfigError::Parse {
                file: path.display().to_string(),
                message: e.to_string(),
            })?;
        config.base_url = trim_base_url(config.base_url);
        if config.base_url.is_empty() {
            return Err(ConfigError::MissingBaseUrl {
                file: path.display().to_string(),
            });
        }
        Ok(config)
    }

    /// Load `routeboard.yaml` from the given directory
    pub fn load_dir(dir: &Path) -> Result<Self, ConfigError> {
        Self::load(&dir.join(CONFIG_FILE))
    }
}

fn trim_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse {file}: {message}")]
    Parse { file: String, message: String },

    #[error("{file}: base_url must be set")]
    MissingBaseUrl { file: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
