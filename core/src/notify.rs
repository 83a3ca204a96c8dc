//! Transient user notifications.
//!
//! # Design
//! `NotificationCenter` is the container notifications are appended to. It
//! never renders anything; a presentation layer subscribes to
//! `NotificationEvent`s and draws alerts from them. Each notification is
//! dismissed by a tokio timer at exactly `shown_at + ttl`, or earlier if the
//! user closes it.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use tokio::{sync::broadcast, time::Instant};
use uuid::Uuid;

const EVENT_BUFFER: usize = 64;

/// Severity of a notification, mirroring the alert styles the UI offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,
    pub level: NotificationLevel,
    pub message: String,
    pub shown_at: Instant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationEvent {
    Shown(Notification),
    Dismissed { id: Uuid },
}

/// Anything a `RequestClient` can report failures to.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, level: NotificationLevel, message: &str);
}

impl<S: NotificationSink + ?Sized> NotificationSink for Arc<S> {
    fn notify(&self, level: NotificationLevel, message: &str) {
        (**self).notify(level, message);
    }
}

#[derive(Debug, Clone)]
pub struct NotificationCenter {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    ttl: Duration,
    open: Mutex<Vec<Notification>>,
    events: broadcast::Sender<NotificationEvent>,
}

impl NotificationCenter {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                ttl,
                open: Mutex::new(Vec::new()),
                events: broadcast::Sender::new(EVENT_BUFFER),
            }),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.inner.ttl
    }

    /// Append a notification and schedule its dismissal.
    ///
    /// Outside a tokio runtime the notification stays open until
    /// `dismiss` is called.
    pub fn show(&self, level: NotificationLevel, message: impl Into<String>) -> Uuid {
        let shown_at = Instant::now();
        let notification = Notification {
            id: Uuid::new_v4(),
            level,
            message: message.into(),
            shown_at,
        };
        let id = notification.id;

        self.lock_open().push(notification.clone());
        // No subscribers is fine.
        let _ = self.inner.events.send(NotificationEvent::Shown(notification));

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let center = self.clone();
                let deadline = shown_at + self.inner.ttl;
                handle.spawn(async move {
                    tokio::time::sleep_until(deadline).await;
                    center.dismiss(id);
                });
            }
            Err(_) => {
                tracing::warn!(%id, "no tokio runtime, notification will not auto-dismiss");
            }
        }

        id
    }

    /// Close a notification. Returns `false` if it was already closed.
    pub fn dismiss(&self, id: Uuid) -> bool {
        let removed = {
            let mut open = self.lock_open();
            let before = open.len();
            open.retain(|n| n.id != id);
            open.len() != before
        };

        if removed {
            let _ = self.inner.events.send(NotificationEvent::Dismissed { id });
        }
        removed
    }

    /// Notifications currently displayed, oldest first.
    pub fn open(&self) -> Vec<Notification> {
        self.lock_open().clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.inner.events.subscribe()
    }

    fn lock_open(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.inner.open.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NotificationSink for NotificationCenter {
    fn notify(&self, level: NotificationLevel, message: &str) {
        self.show(level, message);
    }
}
