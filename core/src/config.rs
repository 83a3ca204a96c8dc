//! Client configuration, passed explicitly to `RequestClient::new`.

use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};
use tokio::fs;
use url::Url;

use crate::error::ConfigError;

/// Message shown to the user when any request fails ("a connection error occurred").
pub const DEFAULT_FAILURE_MESSAGE: &str = "حدث خطأ في الاتصال";

/// How `RequestClient` treats non-2xx responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusPolicy {
    /// Any response with a JSON body is a success, whatever its status.
    #[default]
    Lenient,
    /// Non-2xx responses become `RequestError::Status`.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: Url,
    pub notification_ttl_ms: u64,
    pub poll_interval_ms: u64,
    pub failure_message: String,
    pub status_policy: StatusPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("http://localhost:3000/").expect("static url is valid"),
            notification_ttl_ms: 5000,
            poll_interval_ms: 30_000,
            failure_message: DEFAULT_FAILURE_MESSAGE.to_string(),
            status_policy: StatusPolicy::Lenient,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            base_url,
            ..Self::default()
        }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).await.map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_toml_str(&raw)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
