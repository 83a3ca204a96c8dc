//! The network seam between `RequestClient` and the outside world.
//!
//! # Design
//! `RequestClient` only ever hands a `Transport` an `HttpRequest` and gets an
//! `HttpResponse` back. Status codes are data here, never errors; whether a
//! 4xx/5xx is a failure is the client's decision, not the transport's.

use std::future::Future;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// Blocking ureq agent driven from tokio's blocking pool.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    pub fn from_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl Transport for UreqTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || execute(&agent, request))
            .await
            .map_err(|e| TransportError::new(format!("transport task failed: {e}")))?
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (key, value) in headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    builder
}

fn execute(agent: &ureq::Agent, request: HttpRequest) -> Result<HttpResponse, TransportError> {
    let url = request.path.as_str();
    let headers = request.headers.as_slice();

    let result = match (request.method, request.body) {
        (HttpMethod::Get, _) => with_headers(agent.get(url), headers).call(),
        (HttpMethod::Delete, None) => with_headers(agent.delete(url), headers).call(),
        (HttpMethod::Delete, Some(body)) => with_headers(agent.delete(url), headers)
            .force_send_body()
            .send(body.as_bytes()),
        (HttpMethod::Post, Some(body)) => with_headers(agent.post(url), headers).send(body.as_bytes()),
        (HttpMethod::Post, None) => with_headers(agent.post(url), headers).send_empty(),
        (HttpMethod::Put, Some(body)) => with_headers(agent.put(url), headers).send(body.as_bytes()),
        (HttpMethod::Put, None) => with_headers(agent.put(url), headers).send_empty(),
        (HttpMethod::Patch, Some(body)) => with_headers(agent.patch(url), headers).send(body.as_bytes()),
        (HttpMethod::Patch, None) => with_headers(agent.patch(url), headers).send_empty(),
    };
    let mut response = result.map_err(|e| TransportError::new(e.to_string()))?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| TransportError::new(format!("failed to read response body: {e}")))?;

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}
