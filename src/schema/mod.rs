//! Field schemas driving the generic section editor.
//!
//! Every section is described by a flat list of [`FieldSpec`]s. Repeatable
//! structured rows (jobs, degrees, projects, skill categories) nest an
//! [`ItemSchema`] which also carries the rules used when a draft is cleaned.

mod sections;

use crate::core::Section;
use serde::Serialize;
use serde_json::{Map as JsonMap, Value as JsonValue};

pub use sections::{PROJECT_STATUSES, schema_for};

/// What kind of input a field is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// Single-line text.
    Text { default: &'static str },
    /// Multi-line text.
    LongText { default: &'static str },
    /// Single-line text checked against an email pattern when non-empty.
    Email,
    /// Boolean toggle.
    Flag { default: bool },
    /// One value out of a fixed option set.
    Choice {
        options: &'static [&'static str],
        default: &'static str,
    },
    /// Repeatable list of strings.
    TextList,
    /// Repeatable list of structured rows.
    StructList(ItemSchema),
}

/// Shape of one row inside a [`FieldKind::StructList`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ItemSchema {
    pub fields: &'static [FieldSpec],
    /// A row survives cleaning when at least one of these fields is non-blank.
    pub identity: &'static [&'static str],
    /// A row is dropped after cleaning if any of these lists ended up empty.
    pub require_nonempty: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: FieldKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SectionSchema {
    pub section: Section,
    pub title: &'static str,
    pub fields: &'static [FieldSpec],
}

impl FieldSpec {
    const fn with_kind(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            required: false,
            placeholder: None,
        }
    }

    pub const fn text(key: &'static str, label: &'static str) -> Self {
        Self::with_kind(key, label, FieldKind::Text { default: "" })
    }

    pub const fn text_or(key: &'static str, label: &'static str, default: &'static str) -> Self {
        Self::with_kind(key, label, FieldKind::Text { default })
    }

    pub const fn long_text(key: &'static str, label: &'static str) -> Self {
        Self::with_kind(key, label, FieldKind::LongText { default: "" })
    }

    pub const fn email(key: &'static str, label: &'static str) -> Self {
        Self::with_kind(key, label, FieldKind::Email)
    }

    pub const fn flag(key: &'static str, label: &'static str, default: bool) -> Self {
        Self::with_kind(key, label, FieldKind::Flag { default })
    }

    pub const fn choice(
        key: &'static str,
        label: &'static str,
        options: &'static [&'static str],
        default: &'static str,
    ) -> Self {
        Self::with_kind(key, label, FieldKind::Choice { options, default })
    }

    pub const fn text_list(key: &'static str, label: &'static str) -> Self {
        Self::with_kind(key, label, FieldKind::TextList)
    }

    pub const fn struct_list(key: &'static str, label: &'static str, item: ItemSchema) -> Self {
        Self::with_kind(key, label, FieldKind::StructList(item))
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn is_repeatable(&self) -> bool {
        matches!(self.kind, FieldKind::TextList | FieldKind::StructList(_))
    }

    /// Value a freshly added or missing field starts with.
    pub fn blank_value(&self) -> JsonValue {
        match self.kind {
            FieldKind::Text { default } | FieldKind::LongText { default } => {
                JsonValue::String(default.to_string())
            }
            FieldKind::Email => JsonValue::String(String::new()),
            FieldKind::Flag { default } => JsonValue::Bool(default),
            FieldKind::Choice { default, .. } => JsonValue::String(default.to_string()),
            FieldKind::TextList => JsonValue::Array(vec![JsonValue::String(String::new())]),
            FieldKind::StructList(item) => JsonValue::Array(vec![item.blank_item()]),
        }
    }
}

impl ItemSchema {
    pub fn field(&self, key: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|field| field.key == key)
    }

    pub fn blank_item(&self) -> JsonValue {
        let row: JsonMap<String, JsonValue> = self
            .fields
            .iter()
            .map(|field| (field.key.to_string(), field.blank_value()))
            .collect();
        JsonValue::Object(row)
    }
}

impl SectionSchema {
    pub fn field(&self, key: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|field| field.key == key)
    }
}
