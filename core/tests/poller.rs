//! Notification polling lifecycle, driven by tokio's paused clock.

mod common;

use std::{sync::Arc, time::Duration};

use common::{client, json, network_error, MockTransport};
use rivaq_core::{HttpMethod, NotificationPoller, RequestError};

const INTERVAL: Duration = Duration::from_secs(30);

/// Advance past the next tick and let the poll finish.
async fn next_tick() {
    tokio::time::sleep(INTERVAL).await;
    tokio::task::yield_now().await;
}

#[tokio::test(start_paused = true)]
async fn first_poll_waits_one_interval() {
    let transport = MockTransport::new([json(200, r#"{"notifications":[{"id":1}]}"#)]);
    let poller = NotificationPoller::start(Arc::new(client(transport.clone())), INTERVAL);

    tokio::time::sleep(INTERVAL - Duration::from_millis(1)).await;
    assert!(transport.sent().is_empty());
    assert_eq!(poller.unread(), 0);

    tokio::time::sleep(Duration::from_millis(1)).await;
    tokio::task::yield_now().await;
    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, HttpMethod::Get);
    assert_eq!(sent[0].path, "http://localhost:3000/api/notifications");
    assert_eq!(poller.unread(), 1);

    poller.stop().await;
}

#[tokio::test(start_paused = true)]
async fn badge_follows_feed_and_survives_failures() {
    let transport = MockTransport::new([
        json(200, r#"{"notifications":[{"id":1},{"id":2},{"id":3}]}"#),
        network_error(),
        json(200, "garbage"),
        json(200, r#"{"notifications":[]}"#),
    ]);
    let client = Arc::new(client(transport.clone()));
    let poller = NotificationPoller::start(Arc::clone(&client), INTERVAL);
    let mut badge = poller.badge();

    next_tick().await;
    assert_eq!(poller.unread(), 3);
    assert!(badge.has_changed().unwrap());
    badge.mark_unchanged();

    next_tick().await;
    assert_eq!(poller.unread(), 3);
    next_tick().await;
    assert_eq!(poller.unread(), 3);
    assert!(!badge.has_changed().unwrap());

    next_tick().await;
    assert_eq!(poller.unread(), 0);

    // Poll failures are logged, never shown to the user.
    assert!(client.notifier().open().is_empty());
    poller.stop().await;
}

#[tokio::test(start_paused = true)]
async fn stop_ends_polling() {
    let transport = MockTransport::new([json(200, r#"{"notifications":[]}"#)]);
    let poller = NotificationPoller::start(Arc::new(client(transport.clone())), INTERVAL);

    next_tick().await;
    assert_eq!(transport.sent().len(), 1);

    poller.stop().await;
    tokio::time::sleep(INTERVAL * 3).await;
    assert_eq!(transport.sent().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn drop_cancels_polling() {
    let transport = MockTransport::new([]);
    let poller = NotificationPoller::start(Arc::new(client(transport.clone())), INTERVAL);
    drop(poller);

    tokio::time::sleep(INTERVAL * 2).await;
    assert!(transport.sent().is_empty());
}

#[tokio::test(start_paused = true)]
async fn error_replies_keep_the_badge() {
    let transport = MockTransport::new([
        json(200, r#"{"notifications":[{"id":1},{"id":2}]}"#),
        json(500, r#"{"error":"database locked"}"#),
        json(200, "{}"),
        json(200, r#"{"notifications":[{"id":1}]}"#),
    ]);
    let poller = NotificationPoller::start(Arc::new(client(transport)), Duration::from_secs(5));

    tokio::time::sleep(Duration::from_secs(5)).await;
    tokio::task::yield_now().await;
    assert_eq!(poller.unread(), 2);

    // 500 with a JSON body.
    tokio::time::sleep(Duration::from_secs(5)).await;
    tokio::task::yield_now().await;
    assert_eq!(poller.unread(), 2);

    // 200 without a notifications array.
    tokio::time::sleep(Duration::from_secs(5)).await;
    tokio::task::yield_now().await;
    assert_eq!(poller.unread(), 2);

    tokio::time::sleep(Duration::from_secs(5)).await;
    tokio::task::yield_now().await;
    assert_eq!(poller.unread(), 1);

    poller.stop().await;
}

#[tokio::test(start_paused = true)]
async fn fetch_rejects_error_status_even_when_lenient() {
    let client = client(MockTransport::new([json(503, r#"{"notifications":[]}"#)]));

    let err = client.poll_notifications().await.unwrap_err();
    assert!(matches!(err, RequestError::Status { status: 503, .. }));
    assert!(client.notifier().open().is_empty());
}

#[tokio::test(start_paused = true)]
async fn explicit_fetch_shares_the_endpoint() {
    let transport = MockTransport::new([json(200, r#"{"notifications":[{"id":9}]}"#)]);
    let client = client(transport);

    let feed = client.poll_notifications().await.unwrap();
    assert_eq!(feed.notifications.len(), 1);
    assert_eq!(feed.notifications[0]["id"], 9);
}
