//! Dashboard controller.
//!
//! Owns the in-memory `section -> content` mapping for one signed-in admin,
//! routes saves through the content store and audit log, and raises a
//! notification for every load or save outcome.

mod notify;

use crate::auth::AuthUser;
use crate::core::{ActivityEntry, ContentDocument, ContentMap, ContentRecord, Result, Section};
use crate::editor::SectionEditor;
use crate::store::{AuditLog, ContentStore};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::{error, info};

pub use notify::{DEFAULT_NOTIFICATION_TTL_SECS, Notification, NotificationKind, Notifier};

const LOAD_FAILED: &str = "Failed to load portfolio data";
const SAVE_FAILED: &str = "Failed to save changes";

pub struct DashboardController {
    store: Arc<dyn ContentStore>,
    audit: Arc<dyn AuditLog>,
    user: AuthUser,
    content: ContentMap,
    notifier: Notifier,
}

impl DashboardController {
    pub fn new(
        store: Arc<dyn ContentStore>,
        audit: Arc<dyn AuditLog>,
        user: AuthUser,
        notifier: Notifier,
    ) -> Self {
        Self {
            store,
            audit,
            user,
            content: ContentMap::new(),
            notifier,
        }
    }

    pub fn user(&self) -> &AuthUser {
        &self.user
    }

    /// Replaces the mapping with whatever the store currently holds.
    ///
    /// On failure the mapping is left empty so editors seed from their
    /// built-in defaults.
    pub async fn load_all(&mut self) -> Result<()> {
        match self.store.list_all().await {
            Ok(records) => {
                self.content = records
                    .into_iter()
                    .map(|record| (record.section, record.content))
                    .collect();
                info!(sections = self.content.len(), "portfolio content loaded");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "failed to load portfolio content");
                self.content.clear();
                self.notifier.failure(LOAD_FAILED);
                Err(e)
            }
        }
    }

    /// Upserts the section, then records the edit. The mapping only changes
    /// when both writes succeed.
    pub async fn save_section(&mut self, section: Section, content: ContentDocument) -> Result<()> {
        match self.write_through(section, &content).await {
            Ok(()) => {
                info!(%section, user_id = %self.user.id, "section saved");
                self.content.insert(section, content);
                self.notifier
                    .success(format!("{} section updated successfully", section));
                Ok(())
            }
            Err(e) => {
                error!(%section, error = %e, "failed to save section");
                self.notifier.failure(SAVE_FAILED);
                Err(e)
            }
        }
    }

    async fn write_through(&self, section: Section, content: &ContentDocument) -> Result<()> {
        let record = ContentRecord::new(section, content.clone(), self.user.id);
        self.store.upsert(record).await?;

        let entry = ActivityEntry::update_content(self.user.id, section, content.clone());
        self.audit.append(entry).await
    }

    /// Cleans, validates and saves the editor's draft.
    ///
    /// On success the editor is reseeded from the committed value. On any
    /// failure the draft stays as the user left it.
    pub async fn submit(&mut self, editor: &mut SectionEditor) -> Result<ContentDocument> {
        let section = editor.section();
        let document = match editor.submit() {
            Ok(document) => document,
            Err(e) => {
                info!(%section, error = %e, "draft rejected");
                self.notifier.failure(SAVE_FAILED);
                return Err(e);
            }
        };

        self.save_section(section, document.clone()).await?;
        editor.reseed(&document);
        Ok(document)
    }

    /// Editor seeded from the current mapping, or from defaults when the
    /// section has never been saved.
    pub fn editor(&self, section: Section) -> SectionEditor {
        match self.content.get(&section) {
            Some(content) => SectionEditor::new(section, content),
            None => SectionEditor::new(section, &JsonValue::Null),
        }
    }

    pub fn content(&self, section: Section) -> Option<&ContentDocument> {
        self.content.get(&section)
    }

    pub fn content_map(&self) -> &ContentMap {
        &self.content
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut Notifier {
        &mut self.notifier
    }
}
