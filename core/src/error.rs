//! Error types for the Rivaq request layer.
//!
//! # Design
//! Every failure a caller can see from `RequestClient` is a `RequestError`.
//! The user only ever sees one "connection error" message, but the caller
//! gets the kind back so it can branch on it.

use std::path::PathBuf;

use thiserror::Error;

/// Failure reported by a `Transport` before any response was received.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors returned by `RequestClient`.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The transport could not complete the round trip.
    #[error("network failure: {0}")]
    NetworkFailure(#[from] TransportError),

    /// The response body is not valid JSON (an empty body included).
    #[error("response is not valid JSON: {0}")]
    ParseFailure(String),

    /// The request payload could not be serialized to JSON.
    #[error("payload serialization failed: {0}")]
    Serialization(String),

    /// The request URL is empty or cannot be resolved against the base URL.
    #[error("invalid request url {url:?}")]
    InvalidUrl {
        url: String,
        #[source]
        source: Option<url::ParseError>,
    },

    /// Non-2xx status, only produced under `StatusPolicy::Strict`.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Discriminant of a `RequestError`, for callers that only need to branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NetworkFailure,
    ParseFailure,
    Serialization,
    InvalidUrl,
    Status,
}

impl RequestError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RequestError::NetworkFailure(_) => ErrorKind::NetworkFailure,
            RequestError::ParseFailure(_) => ErrorKind::ParseFailure,
            RequestError::Serialization(_) => ErrorKind::Serialization,
            RequestError::InvalidUrl { .. } => ErrorKind::InvalidUrl,
            RequestError::Status { .. } => ErrorKind::Status,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read the configuration file from {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse the configuration file")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read the settings store at {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write the settings store at {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Settings store at {path:?} is not a JSON object of strings")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode the settings store")]
    Encode(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write CSV record")]
    Csv(#[from] csv::Error),

    #[error("Failed to flush CSV output")]
    Flush(#[source] std::io::Error),

    #[error("CSV output is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}
