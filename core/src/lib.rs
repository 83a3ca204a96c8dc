//! Client-side request layer for the Rivaq task, user and meeting API.
//!
//! # Overview
//! `RequestClient` performs one JSON-over-HTTP round trip per call through an
//! injected `Transport`, and reports every failure once to an injected
//! `NotificationSink` while still returning a typed `RequestError`. Domain
//! helpers (`create_task`, `delete_user`, ...) fix a URL and method and
//! delegate to it.
//!
//! # Design
//! - Requests and responses are plain data (`HttpRequest` / `HttpResponse`);
//!   building and parsing are pure and tested without I/O.
//! - Nothing lives in globals; everything is passed in explicitly:
//!   `ClientConfig`, the notification container, the settings store.
//! - Periodic work (`NotificationPoller`, notification dismissal) runs as
//!   tokio tasks so tests can drive them with a paused clock.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod notify;
pub mod poller;
pub mod settings;
pub mod table;
pub mod transport;
pub mod types;

pub use client::RequestClient;
pub use config::{ClientConfig, StatusPolicy};
pub use error::{ConfigError, ErrorKind, ExportError, RequestError, StoreError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use notify::{Notification, NotificationCenter, NotificationEvent, NotificationLevel, NotificationSink};
pub use poller::NotificationPoller;
pub use settings::{FileStore, KeyValueStore, MemoryStore, Settings};
pub use transport::{Transport, UreqTransport};
pub use types::{
    MeetingUpdate, NewMeeting, NewTask, NewUser, NotificationFeed, TaskUpdate, UserUpdate,
};
