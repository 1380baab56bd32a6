//! Catalog client configuration.
//!
//! # Responsibility
//! - Hold the API key and endpoint coordinates used to build request URLs.
//! - Load settings from environment variables or a JSON file.
//!
//! # Invariants
//! - A validated config always has a non-empty key and host.
//! - The API key is never included in `Debug` output.

use serde::Deserialize;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_HOSTNAME: &str = "events.unimelb.edu.au";
pub const DEFAULT_API_PATH: &str = "api/v1";
pub const DEFAULT_FORMAT: &str = "json";
pub const DEFAULT_SCHEME: &str = "http";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

pub const ENV_API_KEY: &str = "EVENTS_API_KEY";
pub const ENV_HOSTNAME: &str = "EVENTS_API_HOST";
pub const ENV_API_PATH: &str = "EVENTS_API_PATH";
pub const ENV_SCHEME: &str = "EVENTS_API_SCHEME";
pub const ENV_TIMEOUT_MS: &str = "EVENTS_API_TIMEOUT_MS";

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration loading/validation error.
#[derive(Debug)]
pub enum ConfigError {
    /// Required setting was not provided.
    Missing(&'static str),
    /// Setting was provided but is unusable.
    Invalid {
        field: &'static str,
        message: String,
    },
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(field) => write!(f, "missing required setting `{field}`"),
            Self::Invalid { field, message } => write!(f, "invalid `{field}`: {message}"),
            Self::Io(err) => write!(f, "failed to read config: {err}"),
            Self::Json(err) => write!(f, "failed to decode config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Missing(_) | Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Endpoint coordinates and credentials for the events catalog.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    pub api_key: String,
    #[serde(default = "default_hostname")]
    pub hostname: String,
    /// Path prefix including the API version, e.g. `api/v1`.
    #[serde(default = "default_api_path")]
    pub api_path: String,
    /// Response format suffix appended to every endpoint path.
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_scheme")]
    pub scheme: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Debug for ClientConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("hostname", &self.hostname)
            .field("api_path", &self.api_path)
            .field("format", &self.format)
            .field("scheme", &self.scheme)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .finish()
    }
}

impl ClientConfig {
    /// Creates a config for the default catalog host.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            hostname: default_hostname(),
            api_path: default_api_path(),
            format: default_format(),
            scheme: default_scheme(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }

    /// Loads config from `EVENTS_API_*` environment variables.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads config using an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<L>(lookup: L) -> ConfigResult<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_key = read(ENV_API_KEY).ok_or(ConfigError::Missing(ENV_API_KEY))?;
        let mut config = Self::new(api_key);
        if let Some(hostname) = read(ENV_HOSTNAME) {
            config.hostname = hostname;
        }
        if let Some(api_path) = read(ENV_API_PATH) {
            config.api_path = api_path;
        }
        if let Some(scheme) = read(ENV_SCHEME) {
            config.scheme = scheme.to_ascii_lowercase();
        }
        if let Some(timeout) = read(ENV_TIMEOUT_MS) {
            config.request_timeout_ms =
                timeout.parse().map_err(|err| ConfigError::Invalid {
                    field: ENV_TIMEOUT_MS,
                    message: format!("`{timeout}` is not a millisecond count: {err}"),
                })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Loads config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the config can produce request URLs.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::Missing("api_key"));
        }
        if self.hostname.trim().is_empty() {
            return Err(ConfigError::Missing("hostname"));
        }
        if self.format.trim().is_empty() {
            return Err(ConfigError::Missing("format"));
        }
        if !matches!(self.scheme.as_str(), "http" | "https") {
            return Err(ConfigError::Invalid {
                field: "scheme",
                message: format!("expected http|https, got `{}`", self.scheme),
            });
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "request_timeout_ms",
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Per-request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn default_hostname() -> String {
    DEFAULT_HOSTNAME.to_string()
}

fn default_api_path() -> String {
    DEFAULT_API_PATH.to_string()
}

fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

fn default_scheme() -> String {
    DEFAULT_SCHEME.to_string()
}

fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}
