use super::{AuditLog, ContentStore, newest_first};
use crate::core::{ActivityEntry, ContentRecord, Result, Section};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryContentStore {
    records: RwLock<BTreeMap<Section, ContentRecord>>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates the store, e.g. with the page's shipped copy.
    pub fn with_records(records: impl IntoIterator<Item = ContentRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.section, record))
            .collect();
        Self {
            records: RwLock::new(records),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn list_all(&self) -> Result<Vec<ContentRecord>> {
        let records = self.records.read().await;
        Ok(records.values().cloned().collect())
    }

    async fn upsert(&self, record: ContentRecord) -> Result<()> {
        let mut records = self.records.write().await;
        records.insert(record.section, record);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryAuditLog {
    entries: RwLock<Vec<ActivityEntry>>,
}

impl MemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl AuditLog for MemoryAuditLog {
    async fn append(&self, entry: ActivityEntry) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.push(entry);
        Ok(())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<ActivityEntry>> {
        let entries = self.entries.read().await;
        Ok(newest_first(entries.clone(), limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use serde_json::json;
    use uuid::Uuid;

    #[tokio::test]
    async fn upsert_overwrites_in_place() {
        let store = MemoryContentStore::new();
        let user = Uuid::new_v4();

        store
            .upsert(ContentRecord::new(Section::Hero, json!({"title": "A"}), user))
            .await
            .unwrap();
        store
            .upsert(ContentRecord::new(Section::Hero, json!({"title": "B"}), user))
            .await
            .unwrap();

        let records = store.list_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].content, json!({"title": "B"}));
    }

    #[tokio::test]
    async fn recent_entries_are_newest_first_and_capped() {
        let log = MemoryAuditLog::new();
        let user = Uuid::new_v4();
        let now = Utc::now();

        for (offset, section) in [(3, Section::Hero), (1, Section::About), (2, Section::Skills)] {
            let mut entry = ActivityEntry::update_content(user, section, json!({}));
            entry.timestamp = now - Duration::minutes(offset);
            log.append(entry).await.unwrap();
        }

        let recent = log.list_recent(2).await.unwrap();
        let sections: Vec<Section> = recent.iter().map(|entry| entry.section).collect();
        assert_eq!(sections, vec![Section::About, Section::Skills]);
        assert_eq!(log.len().await, 3);
    }
}
