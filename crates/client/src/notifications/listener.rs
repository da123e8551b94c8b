//! Notification stream listener.
//!
//! [`NotificationListener::run`] keeps a `text/event-stream` connection to
//! the notification endpoint open, feeds decoded notifications into the
//! shared [`NotificationStore`] and reconnects with exponential backoff
//! until the [`CancellationToken`] is triggered.

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::SessionStore;

use super::sse::{SseEvent, SseParser};
use super::store::NotificationStore;
use super::Notification;

const LAST_EVENT_ID: &str = "Last-Event-ID";

/// Event types that only keep the connection alive.
const KEEPALIVE_EVENTS: &[&str] = &["heartbeat", "ping", "connect"];

// ---------------------------------------------------------------------------
// Backoff
// ---------------------------------------------------------------------------

/// Tunable parameters for the exponential-backoff strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconnectConfig {
    /// Delay before the first reconnection attempt.
    pub initial_delay: Duration,
    /// Upper bound on the delay between attempts.
    pub max_delay: Duration,
    /// Factor by which the delay grows after each failure.
    pub multiplier: f64,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
        }
    }
}

/// Calculate the next backoff delay, clamped to [`ReconnectConfig::max_delay`].
pub fn next_delay(current: Duration, config: &ReconnectConfig) -> Duration {
    let next_ms = (current.as_millis() as f64 * config.multiplier) as u64;
    Duration::from_millis(next_ms).min(config.max_delay)
}

/// First delay of a backoff run. A server `retry:` hint replaces the
/// configured initial delay; the run still grows from there.
pub fn initial_delay(config: &ReconnectConfig, retry_hint: Option<Duration>) -> Duration {
    retry_hint.unwrap_or(config.initial_delay)
}

// ---------------------------------------------------------------------------
// Listener
// ---------------------------------------------------------------------------

pub struct NotificationListener {
    http: reqwest::Client,
    stream_url: String,
    session: Arc<SessionStore>,
    store: Arc<NotificationStore>,
    reconnect: ReconnectConfig,
}

impl NotificationListener {
    /// Build a listener for the configured stream.
    ///
    /// The HTTP client has no overall timeout since the response body is
    /// expected to stay open indefinitely.
    pub fn new(
        config: &ClientConfig,
        session: Arc<SessionStore>,
        store: Arc<NotificationStore>,
    ) -> ClientResult<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            stream_url: config.notification_stream_url(),
            session,
            store,
            reconnect: ReconnectConfig {
                max_delay: Duration::from_secs(config.sse_reconnect_max_secs),
                ..Default::default()
            },
        })
    }

    pub fn with_reconnect(mut self, reconnect: ReconnectConfig) -> Self {
        self.reconnect = reconnect;
        self
    }

    pub fn store(&self) -> &Arc<NotificationStore> {
        &self.store
    }

    /// Listen until cancelled.
    ///
    /// Returns `Ok(())` on cancellation and `Err(ClientError::Unauthorized)`
    /// if the stream rejects the session; every other failure is retried.
    pub async fn run(&self, cancel: CancellationToken) -> ClientResult<()> {
        let mut parser = SseParser::new();
        let mut delay = self.reconnect.initial_delay;
        let mut retry_hint = None;
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            let outcome = tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Notification listener cancelled");
                    return Ok(());
                }
                result = self.connect_and_read(&mut parser) => result,
            };

            match outcome {
                Ok(received) => {
                    tracing::info!(attempt, received, "Notification stream closed");
                    if received > 0 {
                        attempt = 0;
                        delay = initial_delay(&self.reconnect, parser.retry());
                    }
                }
                Err(ClientError::Unauthorized) => {
                    tracing::warn!("Notification stream rejected the session");
                    return Err(ClientError::Unauthorized);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Notification stream attempt {attempt} failed");
                }
            }
            parser.reset();

            if parser.retry() != retry_hint {
                retry_hint = parser.retry();
                delay = initial_delay(&self.reconnect, retry_hint);
            }
            tracing::info!(
                delay_ms = delay.as_millis() as u64,
                "Reconnecting to notification stream",
            );

            tokio::select! {
                _ = cancel.cancelled() => return Ok(()),
                _ = tokio::time::sleep(delay) => {}
            }

            delay = next_delay(delay, &self.reconnect);
        }
    }

    /// One connection: returns the number of events read before the body
    /// ended.
    async fn connect_and_read(&self, parser: &mut SseParser) -> ClientResult<usize> {
        let mut request = self
            .http
            .get(&self.stream_url)
            .header(ACCEPT, "text/event-stream")
            .header(CACHE_CONTROL, "no-cache");
        if let Some(token) = self.session.token().await {
            request = request.bearer_auth(token);
        }
        if let Some(id) = parser.last_event_id() {
            request = request.header(LAST_EVENT_ID, id);
        }

        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }
        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: "notification stream refused the connection".into(),
            });
        }
        tracing::info!(url = %self.stream_url, "Notification stream connected");

        let mut body = response.bytes_stream();
        let mut received = 0usize;
        while let Some(chunk) = body.next().await {
            let chunk = chunk?;
            for event in parser.feed(&chunk) {
                received += 1;
                self.handle_event(&event).await;
            }
        }
        Ok(received)
    }

    /// Route one event. Returns `true` if a notification was stored.
    pub async fn handle_event(&self, event: &SseEvent) -> bool {
        let event_type = event.event_type();
        if KEEPALIVE_EVENTS.contains(&event_type) {
            tracing::trace!(event_type, "Keep-alive event");
            return false;
        }
        if event_type != "notification" && event_type != "message" {
            tracing::debug!(event_type, "Unhandled event type ignored");
            return false;
        }

        match serde_json::from_str::<Notification>(&event.data) {
            Ok(notification) => self.store.push(notification).await,
            Err(e) => {
                tracing::warn!(event_type, error = %e, "Undecodable notification payload");
                false
            }
        }
    }
}
