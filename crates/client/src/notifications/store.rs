//! In-memory notification store with broadcast fan-out.
//!
//! [`NotificationStore`] keeps notifications newest first and unique by id.
//! It is designed to be shared via `Arc<NotificationStore>` between the
//! stream listener (producer) and any number of readers.

use tokio::sync::{broadcast, RwLock};

use fundhub_core::types::DbId;

use super::Notification;

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

pub struct NotificationStore {
    items: RwLock<Vec<Notification>>,
    sender: broadcast::Sender<Notification>,
}

impl NotificationStore {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            items: RwLock::new(Vec::new()),
            sender,
        }
    }

    /// Insert a newly received notification at the front.
    ///
    /// Returns `false` (and broadcasts nothing) if a notification with the
    /// same id is already stored.
    pub async fn push(&self, notification: Notification) -> bool {
        {
            let mut items = self.items.write().await;
            if items
                .iter()
                .any(|n| n.notification_id == notification.notification_id)
            {
                tracing::debug!(
                    notification_id = notification.notification_id,
                    "Duplicate notification ignored",
                );
                return false;
            }
            items.insert(0, notification.clone());
        }
        tracing::debug!(notification_id = notification.notification_id, "Notification stored");
        // Zero receivers is not an error.
        let _ = self.sender.send(notification);
        true
    }

    /// Replace the whole list, e.g. after fetching history over REST.
    ///
    /// The incoming order is kept; later duplicates are dropped.
    pub async fn replace_all(&self, notifications: Vec<Notification>) {
        let mut seen = std::collections::HashSet::new();
        let deduped: Vec<Notification> = notifications
            .into_iter()
            .filter(|n| seen.insert(n.notification_id))
            .collect();
        *self.items.write().await = deduped;
    }

    pub async fn list(&self) -> Vec<Notification> {
        self.items.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    pub async fn unread_count(&self) -> usize {
        self.items.read().await.iter().filter(|n| !n.is_read).count()
    }

    /// Mark one notification read. Returns `false` for an unknown id.
    pub async fn mark_read(&self, notification_id: DbId) -> bool {
        let mut items = self.items.write().await;
        match items
            .iter_mut()
            .find(|n| n.notification_id == notification_id)
        {
            Some(n) => {
                n.is_read = true;
                true
            }
            None => false,
        }
    }

    pub async fn mark_all_read(&self) {
        for n in self.items.write().await.iter_mut() {
            n.is_read = true;
        }
    }

    pub async fn clear(&self) {
        self.items.write().await.clear();
    }

    /// Subscribe to notifications pushed after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
