use super::{AdminError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Structured content of one section. Its shape depends on the section.
pub type ContentDocument = serde_json::Value;

/// Identifier handed out by the auth provider.
pub type UserId = Uuid;

/// In-memory view of every section's committed content.
pub type ContentMap = BTreeMap<Section, ContentDocument>;

/// One editable area of the portfolio page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Hero,
    About,
    Experience,
    Education,
    Skills,
    Projects,
    PersonalProjects,
    Contact,
}

impl Section {
    /// All sections in dashboard tab order.
    pub const ALL: [Section; 8] = [
        Section::Hero,
        Section::About,
        Section::Experience,
        Section::Education,
        Section::Skills,
        Section::Projects,
        Section::PersonalProjects,
        Section::Contact,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Hero => "hero",
            Section::About => "about",
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Skills => "skills",
            Section::Projects => "projects",
            Section::PersonalProjects => "personal_projects",
            Section::Contact => "contact",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| AdminError::UnknownSection(s.to_string()))
    }
}

/// The single stored row for a section. Overwritten in place on every save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub section: Section,
    pub content: ContentDocument,
    pub updated_by: UserId,
    pub last_updated: DateTime<Utc>,
}

impl ContentRecord {
    pub fn new(section: Section, content: ContentDocument, updated_by: UserId) -> Self {
        Self {
            section,
            content,
            updated_by,
            last_updated: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    UpdateContent,
}

impl ActivityAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityAction::UpdateContent => "update_content",
        }
    }

    /// Human label, underscores replaced by spaces.
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityDetails {
    pub content: ContentDocument,
}

/// Append-only audit event, written once per successful save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: Uuid,
    pub user_id: UserId,
    pub action: ActivityAction,
    pub section: Section,
    pub details: ActivityDetails,
    pub timestamp: DateTime<Utc>,
}

impl ActivityEntry {
    pub fn update_content(user_id: UserId, section: Section, content: ContentDocument) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            action: ActivityAction::UpdateContent,
            section,
            details: ActivityDetails { content },
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn section_names_round_trip() {
        for section in Section::ALL {
            assert_eq!(section.as_str().parse::<Section>().unwrap(), section);
            assert_eq!(
                serde_json::to_value(section).unwrap(),
                json!(section.as_str())
            );
        }
    }

    #[test]
    fn unknown_section_is_rejected() {
        let err = "footer".parse::<Section>().unwrap_err();
        assert!(matches!(err, AdminError::UnknownSection(name) if name == "footer"));
    }

    #[test]
    fn activity_entry_serializes_action_as_snake_case() {
        let entry = ActivityEntry::update_content(Uuid::new_v4(), Section::Hero, json!({"title": "A"}));
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["action"], "update_content");
        assert_eq!(value["section"], "hero");
        assert_eq!(value["details"]["content"]["title"], "A");
        assert_eq!(entry.action.label(), "update content");
    }
}
