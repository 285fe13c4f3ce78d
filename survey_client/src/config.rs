//! Client configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use ai_survey::security::{DEFAULT_COOLDOWN_SECS, DEFAULT_MAX_ATTEMPTS, ThrottleConfig};
use regex::Regex;
use std::{path::PathBuf, sync::OnceLock};

/// API address used when neither `SURVEY_API_URL` nor a linking URI is set
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";

/// Port the API listens on when the host comes from a linking URI
pub const DEFAULT_API_PORT: u16 = 8080;

/// Complete client configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the auth and survey API, without trailing slash
    pub api_base_url: String,
    /// Per-request timeout
    pub request_timeout_secs: u64,
    /// File backing the local survey log
    pub store_path: PathBuf,
    /// File backing the session credential store
    pub secure_store_path: PathBuf,
    /// Login throttle settings
    pub throttle: ThrottleConfig,
}

impl ClientConfig {
    /// Load `.env` if present, read the environment and validate
    ///
    /// # Errors
    ///
    /// Returns error if a variable holds an invalid value
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        let config = Self::from_env();
        config.validate()?;
        Ok(config)
    }

    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`
    ///
    /// The API URL is taken from `SURVEY_API_URL`; failing that, the host is
    /// recovered from the development server's `SURVEY_LINKING_URI` and
    /// combined with `SURVEY_API_PORT`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parse_or = |key: &str, default: u64| {
            lookup(key)
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        };

        let api_base_url = lookup("SURVEY_API_URL")
            .or_else(|| {
                let host = lookup("SURVEY_LINKING_URI")
                    .and_then(|uri| host_from_linking_uri(&uri))?;
                let port = lookup("SURVEY_API_PORT")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_API_PORT);
                Some(format!("http://{host}:{port}"))
            })
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let throttle = ThrottleConfig {
            max_attempts: parse_or("LOGIN_MAX_ATTEMPTS", u64::from(DEFAULT_MAX_ATTEMPTS))
                .try_into()
                .unwrap_or(DEFAULT_MAX_ATTEMPTS),
            cooldown_secs: parse_or("LOGIN_COOLDOWN_SECS", u64::from(DEFAULT_COOLDOWN_SECS))
                .try_into()
                .unwrap_or(DEFAULT_COOLDOWN_SECS),
        };

        Self {
            api_base_url,
            request_timeout_secs: parse_or("SURVEY_REQUEST_TIMEOUT_SECS", 10),
            store_path: lookup("SURVEY_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("survey_store.json")),
            secure_store_path: lookup("SURVEY_SECURE_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("secure_store.json")),
            throttle,
        }
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
        {
            return Err(ConfigError::Invalid {
                var: "SURVEY_API_URL".to_string(),
                reason: format!("Must start with http:// or https:// (got {})", self.api_base_url),
            });
        }

        if self.store_path == self.secure_store_path {
            return Err(ConfigError::Invalid {
                var: "SURVEY_SECURE_STORE_PATH".to_string(),
                reason: "Must differ from SURVEY_STORE_PATH".to_string(),
            });
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "SURVEY_REQUEST_TIMEOUT_SECS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.throttle.max_attempts == 0 {
            return Err(ConfigError::Invalid {
                var: "LOGIN_MAX_ATTEMPTS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.throttle.cooldown_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "LOGIN_COOLDOWN_SECS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

static IPV4_RE: OnceLock<Regex> = OnceLock::new();

fn ipv4_regex() -> &'static Regex {
    IPV4_RE.get_or_init(|| {
        Regex::new(r"(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})")
            .unwrap_or_else(|error| panic!("ipv4 regex failed to compile: {error}"))
    })
}

/// First dotted IPv4 address in a development linking URI
///
/// `exp://192.168.1.20:8081` yields `192.168.1.20`.
pub fn host_from_linking_uri(uri: &str) -> Option<String> {
    ipv4_regex().find(uri).map(|m| m.as_str().to_string())
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}
