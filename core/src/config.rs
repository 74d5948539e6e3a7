//! Client configuration.
//!
//! The base URL is required; timeout and credential mode have defaults that
//! match the remote API's expectations.

use std::env;

use crate::error::ConfigError;

pub const BASE_URL_VAR: &str = "CINEMA_API_BASE_URL";
pub const TIMEOUT_VAR: &str = "CINEMA_API_TIMEOUT_MS";
pub const WITH_CREDENTIALS_VAR: &str = "CINEMA_API_WITH_CREDENTIALS";

pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Settings shared by every request the client sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Root of the remote API, e.g. `http://localhost:8080/api`.
    pub base_url: String,
    /// Whole-call timeout in milliseconds.
    pub timeout_ms: u64,
    /// Keep cookies between calls.
    pub with_credentials: bool,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            with_credentials: true,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_credentials(mut self, with_credentials: bool) -> Self {
        self.with_credentials = with_credentials;
        self
    }

    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingBaseUrl(BASE_URL_VAR))?;

        let timeout_ms = match lookup(TIMEOUT_VAR) {
            None => DEFAULT_TIMEOUT_MS,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => ms,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: TIMEOUT_VAR,
                        value: raw,
                    })
                }
            },
        };

        let with_credentials = match lookup(WITH_CREDENTIALS_VAR) {
            None => true,
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidValue {
                name: WITH_CREDENTIALS_VAR,
                value: raw,
            })?,
        };

        Ok(Self {
            base_url,
            timeout_ms,
            with_credentials,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
