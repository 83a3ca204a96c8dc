//! Scripted transport shared by the integration tests.

#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::Duration,
};

use rivaq_core::{
    ClientConfig, HttpRequest, HttpResponse, NotificationCenter, RequestClient, Transport,
    TransportError,
};

pub enum Scripted {
    Respond(u16, String),
    Fail(String),
    /// Respond after the given delay on the tokio clock.
    Delayed(Duration, u16, String),
}

pub fn json(status: u16, body: &str) -> Scripted {
    Scripted::Respond(status, body.to_string())
}

pub fn network_error() -> Scripted {
    Scripted::Fail("connection refused".to_string())
}

/// Records every request and answers from a queue. An empty queue fails
/// like a dropped connection.
#[derive(Clone, Default)]
pub struct MockTransport {
    script: Arc<Mutex<VecDeque<Scripted>>>,
    sent: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub fn new(script: impl IntoIterator<Item = Scripted>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into_iter().collect())),
            sent: Arc::default(),
        }
    }

    pub fn push(&self, step: Scripted) {
        self.script.lock().unwrap().push_back(step);
    }

    pub fn sent(&self) -> Vec<HttpRequest> {
        self.sent.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.sent.lock().unwrap().push(request);
        let step = self.script.lock().unwrap().pop_front();

        let (status, body) = match step {
            Some(Scripted::Respond(status, body)) => (status, body),
            Some(Scripted::Delayed(delay, status, body)) => {
                tokio::time::sleep(delay).await;
                (status, body)
            }
            Some(Scripted::Fail(message)) => return Err(TransportError::new(message)),
            None => return Err(TransportError::new("script exhausted")),
        };
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

pub type TestClient = RequestClient<MockTransport, NotificationCenter>;

pub fn client_with(config: ClientConfig, transport: MockTransport) -> TestClient {
    let center = NotificationCenter::new(config.notification_ttl());
    RequestClient::new(&config, transport, center)
}

pub fn client(transport: MockTransport) -> TestClient {
    client_with(ClientConfig::default(), transport)
}
