//! Sensor configuration.
//!
//! Loaded from a TOML file:
//!
//! ```toml
//! key = "..."
//! secret = "..."
//!
//! [[departures]]
//! from = "Brunnsparken"
//! heading = "Centralstationen"
//! lines = ["6", "11"]
//! delay = 5
//!
//! [[planner]]
//! from = "Brunnsparken"
//! destination = "Chalmers"
//! skip = 1
//! ```
//!
//! Credentials can also come from `VASTTRAFIK_KEY` / `VASTTRAFIK_SECRET`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::one_or_many;
use crate::vasttrafik::PlannerConfig;

/// Environment variable overriding the API key.
pub const KEY_ENV: &str = "VASTTRAFIK_KEY";

/// Environment variable overriding the API secret.
pub const SECRET_ENV: &str = "VASTTRAFIK_SECRET";

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config parsed but violates a constraint
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// API key
    #[serde(default)]
    pub key: String,

    /// API secret
    #[serde(default)]
    pub secret: String,

    /// One departure sensor per entry.
    #[serde(default)]
    pub departures: Vec<DepartureConfig>,

    /// One trip planner sensor per entry.
    #[serde(default)]
    pub planner: Vec<TripConfig>,

    /// How often the runner polls the sensors (seconds).
    /// Sensors still throttle their own API calls.
    #[serde(default = "default_scan_interval_secs")]
    pub scan_interval_secs: u64,

    #[serde(default)]
    pub api: ApiConfig,
}

/// Overrides for the API endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub token_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            token_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// A departure board sensor.
#[derive(Debug, Clone, Deserialize)]
pub struct DepartureConfig {
    /// Station name or numeric id to watch.
    pub from: String,

    /// Only departures heading towards this station.
    pub heading: Option<String>,

    /// Only these lines; empty means any line.
    #[serde(default, deserialize_with = "one_or_many")]
    pub lines: Vec<String>,

    /// Look this many minutes ahead of now.
    #[serde(default)]
    pub delay: u32,

    /// Sensor name; defaults to `from`.
    pub name: Option<String>,
}

impl DepartureConfig {
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            heading: None,
            lines: Vec::new(),
            delay: 0,
            name: None,
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.from)
    }

    /// The heading filter, if one is set. A blank heading means none.
    pub fn heading(&self) -> Option<&str> {
        self.heading
            .as_deref()
            .filter(|heading| !heading.trim().is_empty())
    }
}

/// A trip planner sensor.
#[derive(Debug, Clone, Deserialize)]
pub struct TripConfig {
    /// Origin station name or id.
    pub from: String,

    /// Destination station name or id.
    pub destination: String,

    /// Plan from this many minutes ahead of now.
    #[serde(default)]
    pub delay: u32,

    /// Show the n-th suggested journey instead of the first.
    #[serde(default)]
    pub skip: usize,

    /// Sensor name; defaults to `from`.
    pub name: Option<String>,
}

impl TripConfig {
    pub fn new(from: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            destination: destination.into(),
            delay: 0,
            skip: 0,
            name: None,
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.from)
    }
}

fn default_scan_interval_secs() -> u64 {
    30
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load, apply environment overrides and validate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&contents)?.with_credentials(
            std::env::var(KEY_ENV).ok(),
            std::env::var(SECRET_ENV).ok(),
        );
        config.validate()?;
        Ok(config)
    }

    /// Parse without validating.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Replace credentials with any that are given.
    pub fn with_credentials(mut self, key: Option<String>, secret: Option<String>) -> Self {
        if let Some(key) = key {
            self.key = key;
        }
        if let Some(secret) = secret {
            self.secret = secret;
        }
        self
    }

    /// Check everything serde cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "key is required (or set {KEY_ENV})"
            )));
        }
        if self.secret.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "secret is required (or set {SECRET_ENV})"
            )));
        }
        if self.scan_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "scan_interval_secs must be greater than 0".to_string(),
            ));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "api.timeout_secs must be greater than 0".to_string(),
            ));
        }

        for (i, departure) in self.departures.iter().enumerate() {
            if departure.from.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "departures[{i}].from must not be empty"
                )));
            }
            if departure.lines.iter().any(|line| line.is_empty()) {
                return Err(ConfigError::Invalid(format!(
                    "departures[{i}].lines must not contain empty names"
                )));
            }
        }

        for (i, trip) in self.planner.iter().enumerate() {
            if trip.from.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "planner[{i}].from must not be empty"
                )));
            }
            if trip.destination.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "planner[{i}].destination must not be empty"
                )));
            }
        }

        Ok(())
    }

    /// Client configuration for these credentials and endpoints.
    pub fn planner_config(&self) -> PlannerConfig {
        let mut config =
            PlannerConfig::new(&self.key, &self.secret).with_timeout(self.api.timeout_secs);
        if let Some(url) = &self.api.base_url {
            config = config.with_base_url(url);
        }
        if let Some(url) = &self.api.token_url {
            config = config.with_token_url(url);
        }
        config
    }
}
