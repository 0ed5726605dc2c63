use super::{AuditLog, ContentStore, newest_first};
use crate::core::{ActivityEntry, AdminError, ContentRecord, Result, Section};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

const CONTENT_FILE: &str = "content.json";
const ACTIVITY_FILE: &str = "activity.log";

// ============================================================================
// Content snapshot
// ============================================================================

/// Content store persisted as one JSON snapshot, rewritten atomically per upsert.
#[derive(Debug)]
pub struct FileContentStore {
    path: PathBuf,
    records: Mutex<BTreeMap<Section, ContentRecord>>,
}

impl FileContentStore {
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir).map_err(|e| {
            AdminError::storage(format!("Failed to create data directory: {}", e))
        })?;

        let path = data_dir.join(CONTENT_FILE);
        let records = Self::load(&path)?;

        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> Result<BTreeMap<Section, ContentRecord>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let data = fs::read(path)
            .map_err(|e| AdminError::storage(format!("Failed to read content snapshot: {}", e)))?;
        let records: Vec<ContentRecord> = serde_json::from_slice(&data).map_err(|e| {
            AdminError::storage(format!("Failed to parse content snapshot: {}", e))
        })?;
        Ok(records
            .into_iter()
            .map(|record| (record.section, record))
            .collect())
    }

    fn save(&self, records: &BTreeMap<Section, ContentRecord>) -> Result<()> {
        let rows: Vec<&ContentRecord> = records.values().collect();
        let serialized = serde_json::to_vec_pretty(&rows)?;

        let temp_path = self.path.with_extension("tmp");
        let temp_file = File::create(&temp_path)
            .map_err(|e| AdminError::storage(format!("Failed to create temp file: {}", e)))?;
        let mut writer = BufWriter::new(temp_file);
        writer
            .write_all(&serialized)
            .map_err(|e| AdminError::storage(format!("Failed to write content snapshot: {}", e)))?;
        writer
            .flush()
            .map_err(|e| AdminError::storage(format!("Failed to flush content snapshot: {}", e)))?;
        writer
            .get_mut()
            .sync_all()
            .map_err(|e| AdminError::storage(format!("Failed to sync content snapshot: {}", e)))?;
        fs::rename(&temp_path, &self.path)
            .map_err(|e| AdminError::storage(format!("Failed to rename content snapshot: {}", e)))?;
        Ok(())
    }
}

#[async_trait]
impl ContentStore for FileContentStore {
    async fn list_all(&self) -> Result<Vec<ContentRecord>> {
        let records = self.records.lock()?;
        Ok(records.values().cloned().collect())
    }

    async fn upsert(&self, record: ContentRecord) -> Result<()> {
        let mut records = self.records.lock()?;
        let mut next = records.clone();
        next.insert(record.section, record);
        // Memory only moves forward once the snapshot is on disk.
        self.save(&next)?;
        *records = next;
        Ok(())
    }
}

// ============================================================================
// Activity journal
// ============================================================================

/// Append-only journal of `u32` little-endian length-prefixed MessagePack frames.
///
/// A frame cut short by a crash is trimmed on open, and a failed append rolls
/// the file back to its previous length, so every frame after the first one
/// always starts on a frame boundary.
#[derive(Debug)]
pub struct FileAuditLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileAuditLog {
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir).map_err(|e| {
            AdminError::audit_log(format!("Failed to create data directory: {}", e))
        })?;

        let path = data_dir.join(ACTIVITY_FILE);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| AdminError::audit_log(format!("Failed to open activity journal: {}", e)))?;

        let log = Self {
            path,
            file: Mutex::new(file),
        };
        log.trim_torn_tail()?;
        Ok(log)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_all(&self) -> Result<Vec<ActivityEntry>> {
        Ok(self.scan()?.0)
    }

    /// Cuts the file back to the end of the last complete frame.
    fn trim_torn_tail(&self) -> Result<()> {
        let (entries, valid_len) = self.scan()?;
        let file = self.file.lock()?;
        let len = file
            .metadata()
            .map_err(|e| AdminError::audit_log(format!("Failed to stat activity journal: {}", e)))?
            .len();

        if len > valid_len {
            warn!(
                path = %self.path.display(),
                entries = entries.len(),
                dropped_bytes = len - valid_len,
                "trimming torn activity journal frame"
            );
            file.set_len(valid_len)
                .map_err(|e| AdminError::audit_log(format!("Failed to trim activity journal: {}", e)))?;
            file.sync_data()
                .map_err(|e| AdminError::audit_log(format!("Failed to sync activity journal: {}", e)))?;
        }
        Ok(())
    }

    /// Decodes every complete frame and returns the byte length they cover.
    fn scan(&self) -> Result<(Vec<ActivityEntry>, u64)> {
        let file = File::open(&self.path).map_err(|e| {
            AdminError::audit_log(format!("Failed to open activity journal for reading: {}", e))
        })?;
        let mut reader = BufReader::new(file);
        let mut entries = Vec::new();
        let mut valid_len = 0u64;

        loop {
            let mut len_bytes = [0u8; 4];
            match reader.read_exact(&mut len_bytes) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
                Err(e) => {
                    return Err(AdminError::audit_log(format!(
                        "Failed to read journal frame length: {}",
                        e
                    )));
                }
            }

            let len = u32::from_le_bytes(len_bytes) as usize;
            let mut data = vec![0u8; len];
            match reader.read_exact(&mut data) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                    warn!(path = %self.path.display(), "ignoring truncated activity journal frame");
                    break;
                }
                Err(e) => {
                    return Err(AdminError::audit_log(format!(
                        "Failed to read journal frame: {}",
                        e
                    )));
                }
            }

            let entry: ActivityEntry = rmp_serde::from_slice(&data).map_err(|e| {
                AdminError::audit_log(format!("Failed to decode journal frame: {}", e))
            })?;
            entries.push(entry);
            valid_len += 4 + len as u64;
        }

        Ok((entries, valid_len))
    }
}

fn encode_frame(entry: &ActivityEntry) -> Result<Vec<u8>> {
    let payload = rmp_serde::to_vec_named(entry)
        .map_err(|e| AdminError::audit_log(format!("Failed to encode activity entry: {}", e)))?;
    let len = u32::try_from(payload.len())
        .map_err(|_| AdminError::audit_log("Activity entry too large"))?;

    let mut frame = Vec::with_capacity(4 + payload.len());
    frame.extend_from_slice(&len.to_le_bytes());
    frame.extend_from_slice(&payload);
    Ok(frame)
}

/// Writes one whole frame, or leaves the file exactly as it was.
fn write_frame(file: &mut File, frame: &[u8]) -> Result<()> {
    let start = file
        .metadata()
        .map_err(|e| AdminError::audit_log(format!("Failed to stat activity journal: {}", e)))?
        .len();

    let written = file.write_all(frame).and_then(|()| file.sync_data());
    if let Err(e) = written {
        if let Err(rollback) = file.set_len(start) {
            warn!(error = %rollback, "failed to roll back activity journal after write error");
        }
        return Err(AdminError::audit_log(format!("Failed to write journal: {}", e)));
    }
    Ok(())
}

#[async_trait]
impl AuditLog for FileAuditLog {
    async fn append(&self, entry: ActivityEntry) -> Result<()> {
        let frame = encode_frame(&entry)?;
        let mut file = self.file.lock()?;
        write_frame(&mut file, &frame)
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<ActivityEntry>> {
        Ok(newest_first(self.read_all()?, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;
    use uuid::Uuid;

    #[tokio::test]
    async fn content_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let user = Uuid::new_v4();
        {
            let store = FileContentStore::open(temp_dir.path()).unwrap();
            store
                .upsert(ContentRecord::new(Section::About, json!({"title": "Me"}), user))
                .await
                .unwrap();
        }

        let store = FileContentStore::open(temp_dir.path()).unwrap();
        let records = store.list_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].content["title"], "Me");
        assert_eq!(records[0].updated_by, user);
        assert!(!store.path().with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn journal_round_trips_entries() {
        let temp_dir = TempDir::new().unwrap();
        let log = FileAuditLog::open(temp_dir.path()).unwrap();
        let entry = ActivityEntry::update_content(
            Uuid::new_v4(),
            Section::Experience,
            json!({"experiences": [{"company": "Acme", "achievements": ["x"]}]}),
        );
        log.append(entry.clone()).await.unwrap();

        let reopened = FileAuditLog::open(temp_dir.path()).unwrap();
        let entries = reopened.list_recent(10).await.unwrap();
        assert_eq!(entries, vec![entry]);
    }

    #[tokio::test]
    async fn truncated_tail_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let log = FileAuditLog::open(temp_dir.path()).unwrap();
        log.append(ActivityEntry::update_content(Uuid::new_v4(), Section::Hero, json!({})))
            .await
            .unwrap();

        let mut file = OpenOptions::new().append(true).open(log.path()).unwrap();
        file.write_all(&64u32.to_le_bytes()).unwrap();
        file.write_all(&[1, 2, 3]).unwrap();

        assert_eq!(log.read_all().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn torn_tail_is_trimmed_before_the_next_append() {
        let temp_dir = TempDir::new().unwrap();
        let user = Uuid::new_v4();
        {
            let log = FileAuditLog::open(temp_dir.path()).unwrap();
            log.append(ActivityEntry::update_content(user, Section::Hero, json!({"title": "A"})))
                .await
                .unwrap();

            let mut file = OpenOptions::new().append(true).open(log.path()).unwrap();
            file.write_all(&64u32.to_le_bytes()).unwrap();
            file.write_all(&[1, 2, 3]).unwrap();
        }

        let log = FileAuditLog::open(temp_dir.path()).unwrap();
        log.append(ActivityEntry::update_content(user, Section::Hero, json!({"title": "B"})))
            .await
            .unwrap();

        let entries = log.list_recent(10).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].details.content, json!({"title": "B"}));
    }

    #[tokio::test]
    async fn failed_append_leaves_the_journal_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let log = FileAuditLog::open(temp_dir.path()).unwrap();
        log.append(ActivityEntry::update_content(Uuid::new_v4(), Section::About, json!({})))
            .await
            .unwrap();
        let len_before = fs::metadata(log.path()).unwrap().len();

        // A read-only handle makes every write fail.
        *log.file.lock().unwrap() = File::open(log.path()).unwrap();
        let failed = ActivityEntry::update_content(Uuid::new_v4(), Section::Skills, json!({}));
        assert!(log.append(failed.clone()).await.is_err());
        assert_eq!(fs::metadata(log.path()).unwrap().len(), len_before);

        let reopened = FileAuditLog::open(temp_dir.path()).unwrap();
        reopened
            .append(ActivityEntry::update_content(Uuid::new_v4(), Section::Contact, json!({})))
            .await
            .unwrap();
        let entries = reopened.list_recent(10).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|entry| entry.id != failed.id));
    }
}
