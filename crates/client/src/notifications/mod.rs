//! Real-time notifications: the shared store, the `text/event-stream`
//! parser and the reconnecting listener that connects the two.

pub mod listener;
pub mod sse;
pub mod store;

use serde::{Deserialize, Serialize};

use fundhub_core::types::DbId;

pub use listener::{initial_delay, next_delay, NotificationListener, ReconnectConfig};
pub use sse::{SseEvent, SseParser};
pub use store::NotificationStore;

/// A notification addressed to the signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub notification_id: DbId,
    pub message: String,
    /// In-app link the notification points to.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}
