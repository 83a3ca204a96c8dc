//! Periodic notification polling with an explicit start/stop lifecycle.
//!
//! # Design
//! The poller owns one tokio task that wakes every `interval` (first poll one
//! interval after `start`), fetches the feed quietly and publishes the unread
//! count on a `watch` channel the badge renders from. A failed poll leaves
//! the last count in place. Cancellation goes through a `CancellationToken`,
//! also triggered on drop.

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::client::RequestClient;
use crate::notify::NotificationSink;
use crate::transport::Transport;

pub struct NotificationPoller {
    handle: JoinHandle<()>,
    badge: watch::Receiver<usize>,
    cancel: DropGuard,
}

impl NotificationPoller {
    pub fn start<T, N>(client: Arc<RequestClient<T, N>>, interval: Duration) -> Self
    where
        T: Transport + 'static,
        N: NotificationSink + 'static,
    {
        let token = CancellationToken::new();
        let (tx, rx) = watch::channel(0);
        let handle = tokio::spawn(poll_loop(client, interval, token.clone(), tx));

        Self {
            handle,
            badge: rx,
            cancel: token.drop_guard(),
        }
    }

    /// Unread count as of the last successful poll. 0 means the badge is hidden.
    pub fn unread(&self) -> usize {
        *self.badge.borrow()
    }

    pub fn badge(&self) -> watch::Receiver<usize> {
        self.badge.clone()
    }

    /// Cancel the loop and wait for it to finish.
    pub async fn stop(self) {
        let Self { handle, cancel, .. } = self;
        drop(cancel);
        if let Err(e) = handle.await {
            tracing::warn!(error = %e, "notification poller ended abnormally");
        }
    }
}

async fn poll_loop<T, N>(
    client: Arc<RequestClient<T, N>>,
    interval: Duration,
    token: CancellationToken,
    badge: watch::Sender<usize>,
) where
    T: Transport,
    N: NotificationSink,
{
    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            () = token.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let result = tokio::select! {
            () = token.cancelled() => break,
            result = client.poll_notifications() => result,
        };
        match result {
            Ok(feed) => {
                badge.send_replace(feed.notifications.len());
            }
            Err(e) => {
                tracing::debug!(error = %e, "notification check failed");
            }
        }
    }

    tracing::debug!("notification poller stopped");
}
