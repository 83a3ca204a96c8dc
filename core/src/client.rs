//! Uniform JSON-over-HTTP round trip for the Rivaq API.
//!
//! # Design
//! `RequestClient` splits every call the same way the wire does:
//! `build_request` produces an `HttpRequest`, the injected `Transport`
//! executes it, and `parse_response` turns the `HttpResponse` into JSON.
//! Both halves are synchronous and pure, so they are tested without I/O.
//!
//! `request` adds the user-facing contract on top: any failure is logged and
//! reported once to the injected `NotificationSink`, then handed back to the
//! caller as a typed `RequestError`. Nothing is retried, cached or ordered;
//! concurrent calls are independent.

use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::config::{ClientConfig, StatusPolicy};
use crate::error::RequestError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::notify::{NotificationLevel, NotificationSink};
use crate::transport::Transport;

pub(crate) const JSON_CONTENT_TYPE: (&str, &str) = ("content-type", "application/json");

#[derive(Debug)]
pub struct RequestClient<T, N> {
    base_url: Url,
    status_policy: StatusPolicy,
    failure_message: String,
    transport: T,
    notifier: N,
}

impl<T, N> RequestClient<T, N> {
    pub fn new(config: &ClientConfig, transport: T, notifier: N) -> Self {
        Self {
            base_url: config.base_url.clone(),
            status_policy: config.status_policy,
            failure_message: config.failure_message.clone(),
            transport,
            notifier,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Resolve `url` against the base URL and attach the payload.
    ///
    /// `content-type: application/json` is always declared. The payload is
    /// dropped for `GET` and when it is JSON `null`.
    pub fn build_request(
        &self,
        url: &str,
        method: HttpMethod,
        payload: Option<&Value>,
    ) -> Result<HttpRequest, RequestError> {
        if url.trim().is_empty() {
            return Err(RequestError::InvalidUrl {
                url: url.to_string(),
                source: None,
            });
        }
        let resolved = self
            .base_url
            .join(url)
            .map_err(|e| RequestError::InvalidUrl {
                url: url.to_string(),
                source: Some(e),
            })?;

        let body = match payload {
            None | Some(Value::Null) => None,
            Some(_) if method == HttpMethod::Get => {
                tracing::warn!(url = %resolved, "dropping payload on GET request");
                None
            }
            Some(value) => Some(
                serde_json::to_string(value).map_err(|e| RequestError::Serialization(e.to_string()))?,
            ),
        };

        Ok(HttpRequest {
            method,
            path: resolved.into(),
            headers: vec![(JSON_CONTENT_TYPE.0.to_string(), JSON_CONTENT_TYPE.1.to_string())],
            body,
        })
    }

    pub fn parse_response(&self, response: HttpResponse) -> Result<Value, RequestError> {
        if self.status_policy == StatusPolicy::Strict && !response.is_success() {
            return Err(RequestError::Status {
                status: response.status,
                body: response.body,
            });
        }
        serde_json::from_str(&response.body).map_err(|e| RequestError::ParseFailure(e.to_string()))
    }
}

impl<T: Transport, N: NotificationSink> RequestClient<T, N> {
    /// One round trip with no user-facing side effects.
    pub async fn execute(
        &self,
        url: &str,
        method: HttpMethod,
        payload: Option<&Value>,
    ) -> Result<Value, RequestError> {
        let request = self.build_request(url, method, payload)?;
        tracing::debug!(method = %request.method, url = %request.path, "sending request");

        let response = self.transport.send(request).await?;
        tracing::debug!(status = response.status, url, "received response");

        self.parse_response(response)
    }

    /// One round trip; failures are logged and shown to the user once.
    pub async fn request(
        &self,
        url: &str,
        method: HttpMethod,
        payload: Option<&Value>,
    ) -> Result<Value, RequestError> {
        let result = self.execute(url, method, payload).await;
        if let Err(err) = &result {
            self.report(url, method, err);
        }
        result
    }

    /// Like `request`, with a typed payload.
    pub async fn send<P: Serialize + ?Sized>(
        &self,
        url: &str,
        method: HttpMethod,
        payload: &P,
    ) -> Result<Value, RequestError> {
        let payload = match serde_json::to_value(payload) {
            Ok(payload) => payload,
            Err(e) => {
                let err = RequestError::Serialization(e.to_string());
                self.report(url, method, &err);
                return Err(err);
            }
        };
        self.request(url, method, Some(&payload)).await
    }

    fn report(&self, url: &str, method: HttpMethod, err: &RequestError) {
        tracing::error!(%method, url, error = %err, kind = ?err.kind(), "request failed");
        self.notifier.notify(NotificationLevel::Danger, &self.failure_message);
    }
}
