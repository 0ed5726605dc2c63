use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

pub const DEFAULT_NOTIFICATION_TTL_SECS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Failure,
}

/// A transient toast shown to the admin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Notification {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Queue of auto-dismissing notifications.
#[derive(Debug, Clone)]
pub struct Notifier {
    ttl: Duration,
    queue: Vec<Notification>,
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            queue: Vec::new(),
        }
    }

    pub fn success(&mut self, description: impl Into<String>) -> Uuid {
        self.push(NotificationKind::Success, "Success", description.into())
    }

    pub fn failure(&mut self, description: impl Into<String>) -> Uuid {
        self.push(NotificationKind::Failure, "Error", description.into())
    }

    fn push(&mut self, kind: NotificationKind, title: &str, description: String) -> Uuid {
        let created_at = Utc::now();
        self.queue.retain(|notification| !notification.is_expired(created_at));
        let notification = Notification {
            id: Uuid::new_v4(),
            kind,
            title: title.to_string(),
            description,
            created_at,
            expires_at: created_at + self.ttl,
        };
        let id = notification.id;
        self.queue.push(notification);
        id
    }

    /// Drops expired entries and returns what is still on screen.
    pub fn active(&mut self, now: DateTime<Utc>) -> &[Notification] {
        self.queue.retain(|notification| !notification.is_expired(now));
        &self.queue
    }

    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.queue.len();
        self.queue.retain(|notification| notification.id != id);
        before != self.queue.len()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.queue.last()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_NOTIFICATION_TTL_SECS))
    }
}
