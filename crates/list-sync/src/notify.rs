//! Transient user notifications.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationLevel {
    Success,
    Error,
    Info,
}

impl NotificationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationLevel::Success => "success",
            NotificationLevel::Error => "error",
            NotificationLevel::Info => "info",
        }
    }
}

impl std::fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A dismissible message that expires after its time to live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub ttl: Duration,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>, ttl: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            message: message.into(),
            created_at: Utc::now(),
            ttl,
        }
    }

    pub fn success(message: impl Into<String>, ttl: Duration) -> Self {
        Self::new(NotificationLevel::Success, message, ttl)
    }

    pub fn error(message: impl Into<String>, ttl: Duration) -> Self {
        Self::new(NotificationLevel::Error, message, ttl)
    }

    /// Returns true once the time to live has elapsed at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        chrono::Duration::from_std(self.ttl)
            .map(|ttl| now - self.created_at >= ttl)
            .unwrap_or(false)
    }
}

/// Receives notifications for display.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}

/// Holds the currently visible notifications.
///
/// Expired entries are filtered out on read. When posted from inside a
/// tokio runtime, a removal task also drops the entry once it expires.
#[derive(Debug, Clone, Default)]
pub struct NotificationBoard {
    entries: Arc<RwLock<Vec<Notification>>>,
}

impl NotificationBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications still visible at `now`, oldest first.
    pub fn active_at(&self, now: DateTime<Utc>) -> Vec<Notification> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|n| !n.is_expired_at(now))
            .cloned()
            .collect()
    }

    /// Notifications visible right now.
    pub fn active(&self) -> Vec<Notification> {
        self.active_at(Utc::now())
    }

    /// Every notification posted and not yet removed, expired or not.
    pub fn all(&self) -> Vec<Notification> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Messages of every notification posted and not yet removed.
    pub fn messages(&self) -> Vec<String> {
        self.all().into_iter().map(|n| n.message).collect()
    }

    /// Removes a notification. Returns false if it was already gone.
    pub fn dismiss(&self, id: Uuid) -> bool {
        remove(&self.entries, id)
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

fn remove(entries: &RwLock<Vec<Notification>>, id: Uuid) -> bool {
    let mut entries = entries.write().unwrap_or_else(PoisonError::into_inner);
    let before = entries.len();
    entries.retain(|n| n.id != id);
    entries.len() != before
}

impl Notifier for NotificationBoard {
    fn notify(&self, notification: Notification) {
        let id = notification.id;
        let ttl = notification.ttl;
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let entries = Arc::clone(&self.entries);
            handle.spawn(async move {
                tokio::time::sleep(ttl).await;
                if remove(&entries, id) {
                    tracing::trace!(%id, "notification expired");
                }
            });
        }
    }
}
