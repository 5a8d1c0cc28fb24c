//! Runtime configuration: defaults, then `predictor.toml`, then environment.

use std::{fs, io, path::Path, time::Duration};

use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_FILE: &str = "predictor.toml";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/";

pub const ENV_BASE_URL: &str = "FLIGHT_PREDICTOR_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "FLIGHT_PREDICTOR_TIMEOUT_SECS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value `{value}` for {key}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub estimator: EstimatorConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub base_url: String,
    /// Transport timeout; unset means the HTTP client never gives up on its own.
    pub timeout_secs: Option<u64>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl EstimatorConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl AppConfig {
    /// Loads `.env`, the config file at `path` (if present) and environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Ok(env_file) = dotenvy::dotenv() {
            tracing::debug!(path = %env_file.display(), "loaded .env");
        }

        let path = path.unwrap_or_else(|| Path::new(CONFIG_FILE));
        let mut config = if path.exists() {
            tracing::debug!(path = %path.display(), "reading config file");
            Self::from_toml_str(&fs::read_to_string(path)?)?
        } else {
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|value| !value.is_empty()) {
            self.estimator.base_url = base_url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS).filter(|value| !value.is_empty()) {
            let secs = raw.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                key: ENV_TIMEOUT_SECS,
                value: raw.clone(),
            })?;
            self.estimator.timeout_secs = Some(secs);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_local_service() {
        let config = AppConfig::default();
        assert_eq!(config.estimator.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.estimator.timeout(), None);
    }

    #[test]
    fn toml_overrides_only_what_it_names() {
        let config = AppConfig::from_toml_str("[estimator]\ntimeout_secs = 15\n").unwrap();
        assert_eq!(config.estimator.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.estimator.timeout(), Some(Duration::from_secs(15)));

        let config =
            AppConfig::from_toml_str("[estimator]\nbase_url = \"http://fares.local/api/\"\n")
                .unwrap();
        assert_eq!(config.estimator.base_url, "http://fares.local/api/");
    }

    #[test]
    fn environment_wins_over_file() {
        let mut config = AppConfig::from_toml_str("[estimator]\ntimeout_secs = 15\n").unwrap();
        config
            .apply_env(|key| match key {
                ENV_BASE_URL => Some("http://10.0.0.2:8000/".to_string()),
                ENV_TIMEOUT_SECS => Some("3".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.estimator.base_url, "http://10.0.0.2:8000/");
        assert_eq!(config.estimator.timeout_secs, Some(3));
    }

    #[test]
    fn bad_timeout_is_reported() {
        let mut config = AppConfig::default();
        let err = config
            .apply_env(|key| (key == ENV_TIMEOUT_SECS).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: ENV_TIMEOUT_SECS,
                ..
            }
        ));
    }
}
