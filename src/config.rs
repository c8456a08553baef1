use dotenv::dotenv;
use std::env;
use std::time::Duration;
use thiserror::Error;
use tracing::Level;

const FACE_ENGINE_URL: &str = "FACE_ENGINE_URL";
const FACE_ENGINE_TIMEOUT_SECS: &str = "FACE_ENGINE_TIMEOUT_SECS";
const LOG_LEVEL: &str = "LOG_LEVEL";

const DEFAULT_ENGINE_URL: &str = "http://127.0.0.1:5005";
const DEFAULT_ENGINE_TIMEOUT_SECS: u64 = 60;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("failed to parse environment variable {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub engine_url: String,
    pub engine_timeout: Duration,
    pub log_level: Level,
}

impl Config {
    /// Reads the configuration from `.env` and the process environment.
    pub fn try_from_env() -> Result<Config, ConfigError> {
        // Load .env file
        dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let engine_url = lookup(FACE_ENGINE_URL)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.engine_url);

        let engine_timeout = match lookup(FACE_ENGINE_TIMEOUT_SECS) {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidValue {
                    name: FACE_ENGINE_TIMEOUT_SECS,
                    value,
                })?,
            None => defaults.engine_timeout,
        };

        let log_level = match lookup(LOG_LEVEL) {
            Some(value) => value
                .trim()
                .parse::<Level>()
                .map_err(|_| ConfigError::InvalidValue {
                    name: LOG_LEVEL,
                    value,
                })?,
            None => defaults.log_level,
        };

        Ok(Config {
            engine_url,
            engine_timeout,
            log_level,
        })
    }
}

impl Default for Config {
    fn default() -> Config {
        Config {
            engine_url: DEFAULT_ENGINE_URL.to_string(),
            engine_timeout: Duration::from_secs(DEFAULT_ENGINE_TIMEOUT_SECS),
            log_level: Level::INFO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.engine_url, "http://127.0.0.1:5005");
        assert_eq!(config.engine_timeout, Duration::from_secs(60));
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    fn test_values_from_environment() {
        let config = Config::from_lookup(lookup(&[
            ("FACE_ENGINE_URL", " http://engine:8000 "),
            ("FACE_ENGINE_TIMEOUT_SECS", "5"),
            ("LOG_LEVEL", "debug"),
        ]))
        .unwrap();
        assert_eq!(config.engine_url, "http://engine:8000");
        assert_eq!(config.engine_timeout, Duration::from_secs(5));
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        let err = Config::from_lookup(lookup(&[("FACE_ENGINE_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                name: "FACE_ENGINE_TIMEOUT_SECS",
                value: "soon".to_string()
            }
        );
    }
}
