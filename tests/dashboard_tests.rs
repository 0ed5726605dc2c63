//! Integration tests for the dashboard controller: round-trips, last-writer-wins
//! and failure isolation against the store and audit log collaborators.

use async_trait::async_trait;
use folio_admin::{
    ActivityEntry, AdminError, AuditLog, AuthUser, ContentRecord, ContentStore, DashboardController,
    FieldPath, MemoryAuditLog, MemoryContentStore, NotificationKind, Notifier, Result, Section,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

struct FailingStore;

#[async_trait]
impl ContentStore for FailingStore {
    async fn list_all(&self) -> Result<Vec<ContentRecord>> {
        Ok(Vec::new())
    }

    async fn upsert(&self, _record: ContentRecord) -> Result<()> {
        Err(AdminError::storage("write rejected"))
    }
}

struct FailingAudit;

#[async_trait]
impl AuditLog for FailingAudit {
    async fn append(&self, _entry: ActivityEntry) -> Result<()> {
        Err(AdminError::audit_log("insert rejected"))
    }

    async fn list_recent(&self, _limit: usize) -> Result<Vec<ActivityEntry>> {
        Ok(Vec::new())
    }
}

fn admin() -> AuthUser {
    AuthUser {
        id: Uuid::new_v4(),
        email: "admin@example.com".to_string(),
    }
}

fn dashboard(store: Arc<dyn ContentStore>, audit: Arc<dyn AuditLog>) -> DashboardController {
    DashboardController::new(store, audit, admin(), Notifier::default())
}

#[tokio::test]
async fn test_save_then_load_round_trips_every_section() {
    let store = Arc::new(MemoryContentStore::new());
    let audit = Arc::new(MemoryAuditLog::new());
    let mut writer = dashboard(store.clone(), audit.clone());

    for section in Section::ALL {
        let committed = writer.editor(section).submit().unwrap();
        writer.save_section(section, committed).await.unwrap();
    }

    let mut reader = dashboard(store.clone(), audit.clone());
    reader.load_all().await.unwrap();

    assert_eq!(reader.content_map(), writer.content_map());
    assert_eq!(audit.len().await, Section::ALL.len());
}

#[tokio::test]
async fn test_last_writer_wins() {
    let store = Arc::new(MemoryContentStore::new());
    let audit = Arc::new(MemoryAuditLog::new());
    let mut first = dashboard(store.clone(), audit.clone());
    let mut second = dashboard(store.clone(), audit.clone());

    first.save_section(Section::Hero, json!({"title": "A"})).await.unwrap();
    second.save_section(Section::Hero, json!({"title": "B"})).await.unwrap();

    let mut reader = dashboard(store, audit.clone());
    reader.load_all().await.unwrap();
    assert_eq!(reader.content(Section::Hero), Some(&json!({"title": "B"})));

    // The first session keeps its own view until it reloads.
    assert_eq!(first.content(Section::Hero), Some(&json!({"title": "A"})));
    assert_eq!(audit.len().await, 2);
}

#[tokio::test]
async fn test_failed_upsert_leaves_mapping_unchanged() {
    let mut controller = dashboard(Arc::new(FailingStore), Arc::new(MemoryAuditLog::new()));
    let before = controller.content_map().clone();

    let err = controller
        .save_section(Section::About, json!({"title": "About me"}))
        .await
        .unwrap_err();

    assert!(matches!(err, AdminError::Storage(_)));
    assert_eq!(controller.content_map(), &before);
    let toast = controller.notifier().latest().unwrap();
    assert_eq!(toast.kind, NotificationKind::Failure);
    assert_eq!(toast.description, "Failed to save changes");
}

#[tokio::test]
async fn test_failed_audit_append_reports_failure() {
    let store = Arc::new(MemoryContentStore::new());
    let mut controller = dashboard(store.clone(), Arc::new(FailingAudit));
    controller
        .save_section(Section::Hero, json!({"title": "Old"}))
        .await
        .unwrap_err();

    assert!(controller.content(Section::Hero).is_none());
    // The upsert already landed; only the mapping is held back.
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_failed_submit_keeps_draft() {
    let mut controller = dashboard(Arc::new(FailingStore), Arc::new(MemoryAuditLog::new()));
    let mut editor = controller.editor(Section::Hero);
    editor.set_text(FieldPath::field("title"), "Unsaved").unwrap();

    assert!(controller.submit(&mut editor).await.is_err());
    assert_eq!(editor.draft()["title"], "Unsaved");
    assert!(controller.content(Section::Hero).is_none());
}

#[tokio::test]
async fn test_all_blank_rows_clean_to_empty_list() {
    let mut controller = dashboard(Arc::new(MemoryContentStore::new()), Arc::new(MemoryAuditLog::new()));
    let mut editor = controller.editor(Section::Experience);
    editor.push_item("experiences").unwrap();
    editor
        .set_text(FieldPath::item("experiences", 1, "location"), "Remote")
        .unwrap();

    let committed = controller.submit(&mut editor).await.unwrap();

    assert_eq!(
        committed,
        json!({"title": "Professional Experience", "experiences": []})
    );
    // Reseeding brings back one blank row to type into.
    assert_eq!(editor.draft()["experiences"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_cleaning_is_idempotent() {
    let controller = dashboard(Arc::new(MemoryContentStore::new()), Arc::new(MemoryAuditLog::new()));
    let mut editor = controller.editor(Section::Projects);
    editor.set_text(FieldPath::item("projects", 0, "title"), "Folio").unwrap();
    editor
        .set_entry(FieldPath::item("projects", 0, "technologies"), 0, "Rust")
        .unwrap();
    editor
        .push_entry(FieldPath::item("projects", 0, "technologies"))
        .unwrap();
    editor.push_item("projects").unwrap();

    let once = editor.cleaned();
    let mut again = controller.editor(Section::Projects);
    again.reseed(&once);

    assert_eq!(again.cleaned(), once);
    assert_eq!(once["projects"].as_array().unwrap().len(), 1);
    assert_eq!(once["projects"][0]["technologies"], json!(["Rust"]));
}
