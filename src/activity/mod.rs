//! Read-only view over the most recent edits.

mod relative;

use crate::core::{ActivityEntry, Result, Section, UserId};
use crate::store::AuditLog;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

pub use relative::format_distance;

pub const DEFAULT_ACTIVITY_LIMIT: usize = 50;

/// One line of the activity list as shown to the admin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityRow {
    pub id: Uuid,
    pub user_id: UserId,
    pub action: String,
    pub section: Section,
    pub summary: String,
    pub timestamp: DateTime<Utc>,
    pub relative_time: String,
}

impl ActivityRow {
    fn from_entry(entry: &ActivityEntry, now: DateTime<Utc>) -> Self {
        Self {
            id: entry.id,
            user_id: entry.user_id,
            action: entry.action.label(),
            section: entry.section,
            summary: format!("Updated {} section content", entry.section),
            timestamp: entry.timestamp,
            relative_time: format_distance(entry.timestamp, now),
        }
    }
}

pub struct ActivityViewer {
    audit: Arc<dyn AuditLog>,
    limit: usize,
    entries: Vec<ActivityEntry>,
}

impl ActivityViewer {
    pub fn new(audit: Arc<dyn AuditLog>, limit: usize) -> Self {
        Self {
            audit,
            limit,
            entries: Vec::new(),
        }
    }

    /// Fetches the newest entries. A failed fetch leaves the list empty.
    pub async fn load(&mut self) -> Result<()> {
        match self.audit.list_recent(self.limit).await {
            Ok(entries) => {
                self.entries = entries;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "failed to load activity log");
                self.entries.clear();
                Err(e)
            }
        }
    }

    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }

    pub fn rows(&self, now: DateTime<Utc>) -> Vec<ActivityRow> {
        self.entries
            .iter()
            .map(|entry| ActivityRow::from_entry(entry, now))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
