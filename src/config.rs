use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const API_URL_VAR: &str = "STUDY_BUDDY_API_URL";
pub const TIMEOUT_VAR: &str = "STUDY_BUDDY_TIMEOUT_SECS";
pub const LOG_FILE_VAR: &str = "STUDY_BUDDY_LOG";

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_LOG_FILE: &str = "study_buddy.log";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must start with http:// or https:// (got {value:?})")]
    InvalidUrl { var: &'static str, value: String },
    #[error("{var} must be a positive number of seconds (got {value:?})")]
    InvalidTimeout { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub timeout: Duration,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Config::default();

        if let Some(url) = get(API_URL_VAR) {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidUrl {
                    var: API_URL_VAR,
                    value: url,
                });
            }
            config.api_url = url.trim_end_matches('/').to_string();
        }

        if let Some(raw) = get(TIMEOUT_VAR) {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        var: TIMEOUT_VAR,
                        value: raw,
                    })
                }
            }
        }

        if let Some(path) = get(LOG_FILE_VAR) {
            config.log_file = PathBuf::from(path);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_overrides_and_trailing_slash() {
        let config = Config::from_lookup(lookup_from(&[
            (API_URL_VAR, "https://study.example.com/api/"),
            (TIMEOUT_VAR, "30"),
            (LOG_FILE_VAR, "/tmp/buddy.log"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "https://study.example.com/api");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.log_file, PathBuf::from("/tmp/buddy.log"));
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config =
            Config::from_lookup(lookup_from(&[(API_URL_VAR, "   "), (TIMEOUT_VAR, "")])).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_rejects_url_without_scheme() {
        let err = Config::from_lookup(lookup_from(&[(API_URL_VAR, "localhost:8000")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidUrl {
                var: API_URL_VAR,
                value: "localhost:8000".to_string()
            }
        );
    }

    #[test]
    fn test_rejects_bad_timeout() {
        assert!(matches!(
            Config::from_lookup(lookup_from(&[(TIMEOUT_VAR, "0")])),
            Err(ConfigError::InvalidTimeout { .. })
        ));
        assert!(matches!(
            Config::from_lookup(lookup_from(&[(TIMEOUT_VAR, "soon")])),
            Err(ConfigError::InvalidTimeout { .. })
        ));
    }
}
