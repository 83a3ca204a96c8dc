//! Domain helpers for tasks, users, meetings and notifications.
//!
//! Each helper fixes a URL template and method and forwards to
//! `RequestClient::send` / `RequestClient::request`; they add no contract of
//! their own.

use serde::Serialize;
use serde_json::Value;

use crate::client::RequestClient;
use crate::error::RequestError;
use crate::http::HttpMethod;
use crate::notify::NotificationSink;
use crate::transport::Transport;
use crate::types::NotificationFeed;

pub const TASKS_PATH: &str = "/api/tasks";
pub const USERS_PATH: &str = "/api/users";
pub const MEETINGS_PATH: &str = "/api/meetings";
pub const NOTIFICATIONS_PATH: &str = "/api/notifications";

fn item_path(collection: &str, id: i64) -> String {
    format!("{collection}/{id}")
}

impl<T: Transport, N: NotificationSink> RequestClient<T, N> {
    pub async fn create_task<P: Serialize + ?Sized>(&self, task: &P) -> Result<Value, RequestError> {
        self.send(TASKS_PATH, HttpMethod::Post, task).await
    }

    pub async fn update_task<P: Serialize + ?Sized>(
        &self,
        id: i64,
        task: &P,
    ) -> Result<Value, RequestError> {
        self.send(&item_path(TASKS_PATH, id), HttpMethod::Put, task).await
    }

    pub async fn delete_task(&self, id: i64) -> Result<Value, RequestError> {
        self.request(&item_path(TASKS_PATH, id), HttpMethod::Delete, None).await
    }

    pub async fn create_user<P: Serialize + ?Sized>(&self, user: &P) -> Result<Value, RequestError> {
        self.send(USERS_PATH, HttpMethod::Post, user).await
    }

    pub async fn update_user<P: Serialize + ?Sized>(
        &self,
        id: i64,
        user: &P,
    ) -> Result<Value, RequestError> {
        self.send(&item_path(USERS_PATH, id), HttpMethod::Put, user).await
    }

    pub async fn delete_user(&self, id: i64) -> Result<Value, RequestError> {
        self.request(&item_path(USERS_PATH, id), HttpMethod::Delete, None).await
    }

    pub async fn create_meeting<P: Serialize + ?Sized>(
        &self,
        meeting: &P,
    ) -> Result<Value, RequestError> {
        self.send(MEETINGS_PATH, HttpMethod::Post, meeting).await
    }

    pub async fn update_meeting<P: Serialize + ?Sized>(
        &self,
        id: i64,
        meeting: &P,
    ) -> Result<Value, RequestError> {
        self.send(&item_path(MEETINGS_PATH, id), HttpMethod::Put, meeting).await
    }

    /// Fetch the notification feed. Quiet: failures are not shown to the user.
    ///
    /// Stricter than `execute` whatever the status policy: a non-2xx status
    /// or a body without a `notifications` array is an error, so an error
    /// reply never reads as an empty feed.
    pub async fn poll_notifications(&self) -> Result<NotificationFeed, RequestError> {
        let request = self.build_request(NOTIFICATIONS_PATH, HttpMethod::Get, None)?;
        let response = self.transport().send(request).await?;
        if !response.is_success() {
            return Err(RequestError::Status {
                status: response.status,
                body: response.body,
            });
        }
        serde_json::from_str(&response.body).map_err(|e| RequestError::ParseFailure(e.to_string()))
    }
}
