//! Content store and audit log collaborators.
//!
//! The dashboard only talks to these traits. Two implementations ship with the
//! crate: in-memory maps for tests and ephemeral servers, and a file-backed
//! pair (atomic JSON snapshot + append-only MessagePack journal).

mod file;
mod memory;

use crate::core::{ActivityEntry, ContentRecord, Result};
use async_trait::async_trait;

pub use file::{FileAuditLog, FileContentStore};
pub use memory::{MemoryAuditLog, MemoryContentStore};

/// Key/value table of one [`ContentRecord`] per section.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<ContentRecord>>;

    /// Inserts or overwrites the record for `record.section`. Last writer wins.
    async fn upsert(&self, record: ContentRecord) -> Result<()>;
}

/// Append-only table of edit events.
#[async_trait]
pub trait AuditLog: Send + Sync {
    async fn append(&self, entry: ActivityEntry) -> Result<()>;

    /// Most recent entries first, at most `limit` of them.
    async fn list_recent(&self, limit: usize) -> Result<Vec<ActivityEntry>>;
}

/// Orders entries newest-first and truncates to `limit`.
///
/// Entries arrive in append order, so ties on the timestamp keep the later
/// append first.
pub(crate) fn newest_first(mut entries: Vec<ActivityEntry>, limit: usize) -> Vec<ActivityEntry> {
    entries.reverse();
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    entries.truncate(limit);
    entries
}
