//! Client configuration.
//!
//! Loaded from `.partyrun/config.toml` (or the file given with `--config`),
//! then overridden by `PARTYRUN_*` environment variables:
//!
//! ```toml
//! base_url = "https://api.partyrun.online"
//! request_timeout_secs = 30
//! data_dir = ".partyrun/data"
//! log_format = "pretty"      # or "json"
//! log_filter = "info,network=debug"
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = ".partyrun/config.toml";

pub const ENV_BASE_URL: &str = "PARTYRUN_BASE_URL";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "PARTYRUN_REQUEST_TIMEOUT_SECS";
pub const ENV_DATA_DIR: &str = "PARTYRUN_DATA_DIR";
pub const ENV_LOG_FORMAT: &str = "PARTYRUN_LOG_FORMAT";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file {} does not exist", .path.display())]
    Missing { path: PathBuf },

    #[error("configuration file {} could not be read: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration file {} is not valid: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// LogFormat
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, multi-line events.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err("expected \"pretty\" or \"json\"".to_owned()),
        }
    }
}

// ---------------------------------------------------------------------------
// ClientConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub data_dir: PathBuf,
    pub log_format: LogFormat,
    pub log_filter: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.partyrun.online".to_owned(),
            request_timeout_secs: 30,
            data_dir: PathBuf::from(".partyrun/data"),
            log_format: LogFormat::Pretty,
            log_filter: "info,network=debug".to_owned(),
        }
    }
}

impl ClientConfig {
    /// Loads the configuration file at `path`, applies environment overrides
    /// read through `env`, and validates the result.
    ///
    /// A missing file is an error only when `required` is set; otherwise the
    /// defaults are used.
    pub fn load<F>(path: &Path, required: bool, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match std::fs::read_to_string(path) {
            Ok(text) => toml::from_str::<Self>(&text).map_err(|source| ConfigError::Parse {
                path: path.to_owned(),
                source,
            })?,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                if required {
                    return Err(ConfigError::Missing {
                        path: path.to_owned(),
                    });
                }
                Self::default()
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_owned(),
                    source,
                })
            }
        };
        config.apply_overrides(env)?;
        config.validate()?;
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn apply_overrides<F>(&mut self, env: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = env(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Some(raw) = env(ENV_REQUEST_TIMEOUT_SECS) {
            self.request_timeout_secs =
                raw.trim()
                    .parse()
                    .map_err(|error: std::num::ParseIntError| ConfigError::InvalidValue {
                        key: ENV_REQUEST_TIMEOUT_SECS,
                        value: raw.clone(),
                        reason: error.to_string(),
                    })?;
        }
        if let Some(data_dir) = env(ENV_DATA_DIR) {
            self.data_dir = PathBuf::from(data_dir);
        }
        if let Some(raw) = env(ENV_LOG_FORMAT) {
            self.log_format = raw.parse().map_err(|reason| ConfigError::InvalidValue {
                key: ENV_LOG_FORMAT,
                value: raw.clone(),
                reason,
            })?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                key: "base_url",
                value: self.base_url.clone(),
                reason: "must be an http:// or https:// URL".to_owned(),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout_secs",
                value: "0".to_owned(),
                reason: "must be greater than zero".to_owned(),
            });
        }
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "data_dir",
                value: String::new(),
                reason: "must not be empty".to_owned(),
            });
        }
        Ok(())
    }
}
