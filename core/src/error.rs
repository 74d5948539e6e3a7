//! Error types for the cinema API client.
//!
//! # Design
//! Every failure the HTTP layer can produce is an `ApiError`. A non-2xx reply
//! lands in `ApiError::Http` with the raw status and body plus the `message`
//! field of a JSON body when the server supplied one, so callers read one
//! typed field instead of probing the body shape themselves.
//!
//! `ValidationError` never touches the network: it is produced by form views
//! before any request is built.

use thiserror::Error;

/// Errors returned by `ApiClient` and the resource modules built on it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (DNS, refused connection, reset).
    #[error("network error: {0}")]
    Network(String),

    /// No response arrived within the configured timeout.
    #[error("request timed out after {after_ms} ms")]
    Timeout { after_ms: u64 },

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http {
        status: u16,
        body: String,
        message: Option<String>,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Build an `Http` error, lifting a string `message` field out of a JSON body.
    pub fn from_status(status: u16, body: String) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|value| value.get("message")?.as_str().map(str::to_string))
            .filter(|message| !message.is_empty());
        ApiError::Http {
            status,
            body,
            message,
        }
    }

    /// Server-provided human readable message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            ApiError::Http { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Text a view shows for this failure: the server message, else `fallback`.
    pub fn display_message(&self, fallback: &str) -> String {
        self.message().unwrap_or(fallback).to_string()
    }

    /// Short label used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Network(_) => "network",
            ApiError::Timeout { .. } => "timeout",
            ApiError::Http { .. } => "http",
            ApiError::Deserialization(_) => "deserialization",
            ApiError::Serialization(_) => "serialization",
        }
    }
}

/// Client-side form validation failures.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

/// Problems reading `ClientConfig` from the environment.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set to the API base URL")]
    MissingBaseUrl(&'static str),

    #[error("invalid value {value:?} for {name}")]
    InvalidValue { name: &'static str, value: String },
}
