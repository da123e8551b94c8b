//! Notification stream parsing and routing into the store.

use std::sync::Arc;

use fundhub_client::config::ClientConfig;
use fundhub_client::notifications::{
    NotificationListener, NotificationStore, SseEvent, SseParser,
};
use fundhub_client::session::SessionStore;

fn listener() -> NotificationListener {
    let config = ClientConfig::from_lookup(|_| None).unwrap();
    NotificationListener::new(
        &config,
        Arc::new(SessionStore::new()),
        Arc::new(NotificationStore::default()),
    )
    .unwrap()
}

fn event(event: Option<&str>, data: &str) -> SseEvent {
    SseEvent {
        event: event.map(str::to_string),
        data: data.to_string(),
        id: None,
    }
}

#[tokio::test]
async fn stream_frames_end_up_in_store() {
    let listener = listener();
    let mut parser = SseParser::new();

    let stream: &[&[u8]] = &[
        b"event: connect\ndata: connected\n\n",
        b": heartbeat comment\n\n",
        b"event: notification\nid: 11\ndata: {\"notificationId\": 11, \"message\": \"",
        "펀딩이 성공했습니다\", \"url\": \"/projects/3\"}\n\n".as_bytes(),
        b"event: notification\nid: 12\r\ndata: {\"notificationId\": 12, \"message\": \"new backer\"}\r\n\r\n",
    ];

    let mut stored = 0;
    for chunk in stream {
        for event in parser.feed(chunk) {
            if listener.handle_event(&event).await {
                stored += 1;
            }
        }
    }

    assert_eq!(stored, 2);
    assert_eq!(parser.last_event_id(), Some("12"));

    let items = listener.store().list().await;
    assert_eq!(items[0].notification_id, 12);
    assert_eq!(items[1].message, "펀딩이 성공했습니다");
    assert_eq!(items[1].url.as_deref(), Some("/projects/3"));
    assert_eq!(listener.store().unread_count().await, 2);
}

#[tokio::test]
async fn heartbeats_and_unknown_events_are_ignored() {
    let listener = listener();
    assert!(!listener.handle_event(&event(Some("heartbeat"), "{}")).await);
    assert!(!listener.handle_event(&event(Some("ping"), "")).await);
    let order = event(Some("order"), r#"{"notificationId": 1, "message": "x"}"#);
    assert!(!listener.handle_event(&order).await);
    assert!(listener.store().is_empty().await);
}

#[tokio::test]
async fn default_event_type_is_decoded_and_bad_payloads_skipped() {
    let listener = listener();
    assert!(!listener.handle_event(&event(None, "not json")).await);
    let read = event(None, r#"{"notificationId": 5, "message": "hi", "isRead": true}"#);
    assert!(listener.handle_event(&read).await);
    // Redelivery after reconnect is deduplicated.
    let again = event(Some("notification"), r#"{"notificationId": 5, "message": "hi"}"#);
    assert!(!listener.handle_event(&again).await);

    assert_eq!(listener.store().len().await, 1);
    assert_eq!(listener.store().unread_count().await, 0);
}
