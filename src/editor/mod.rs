//! Generic section editor.
//!
//! One [`SectionEditor`] covers every section: the section's schema decides
//! which fields exist, how a draft is seeded, which rows are repeatable and
//! what cleaning does on submit. The editor only ever touches its local draft;
//! persisting is the dashboard's job.

mod clean;
mod draft;
mod preview;

use crate::core::{AdminError, ContentDocument, Result, Section};
use crate::schema::{FieldKind, FieldSpec, SectionSchema, schema_for};
use draft::Fill;
use serde_json::{Map as JsonMap, Value as JsonValue};

pub use preview::{Preview, PreviewBlock};

/// Address of one value inside a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath<'a> {
    /// Top-level field of the section.
    Field(&'a str),
    /// Field of one row of a repeatable struct list.
    Item {
        list: &'a str,
        index: usize,
        field: &'a str,
    },
}

impl<'a> FieldPath<'a> {
    pub fn field(key: &'a str) -> Self {
        FieldPath::Field(key)
    }

    pub fn item(list: &'a str, index: usize, field: &'a str) -> Self {
        FieldPath::Item { list, index, field }
    }
}

#[derive(Debug, Clone)]
pub struct SectionEditor {
    schema: &'static SectionSchema,
    draft: JsonMap<String, JsonValue>,
}

impl SectionEditor {
    /// Seeds a draft from committed content, filling blanks with defaults.
    pub fn new(section: Section, initial: &ContentDocument) -> Self {
        let schema = schema_for(section);
        Self {
            schema,
            draft: draft::normalize(schema.fields, initial, Fill::Defaults),
        }
    }

    /// Adopts a draft produced elsewhere (e.g. a client form) without applying defaults.
    pub fn from_draft(section: Section, draft: &JsonValue) -> Result<Self> {
        if !draft.is_object() {
            return Err(AdminError::InvalidContent(
                section,
                "draft must be a JSON object".to_string(),
            ));
        }
        let schema = schema_for(section);
        Ok(Self {
            schema,
            draft: draft::normalize(schema.fields, draft, Fill::MissingOnly),
        })
    }

    /// Replaces the draft after the committed content changed.
    pub fn reseed(&mut self, initial: &ContentDocument) {
        self.draft = draft::normalize(self.schema.fields, initial, Fill::Defaults);
    }

    pub fn section(&self) -> Section {
        self.schema.section
    }

    pub fn schema(&self) -> &'static SectionSchema {
        self.schema
    }

    pub fn draft(&self) -> &JsonMap<String, JsonValue> {
        &self.draft
    }

    pub fn draft_document(&self) -> ContentDocument {
        JsonValue::Object(self.draft.clone())
    }

    pub fn set_text(&mut self, path: FieldPath<'_>, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        let (spec, slot) = self.slot_mut(path)?;
        match spec.kind {
            FieldKind::Text { .. } | FieldKind::LongText { .. } | FieldKind::Email => {}
            FieldKind::Choice { options, .. } => {
                if !options.iter().any(|option| *option == value) {
                    return Err(AdminError::draft_path(format!(
                        "'{}' is not one of the options for '{}'",
                        value, spec.key
                    )));
                }
            }
            _ => return Err(kind_mismatch(spec, "text")),
        }
        *slot = JsonValue::String(value);
        Ok(())
    }

    pub fn set_flag(&mut self, path: FieldPath<'_>, value: bool) -> Result<()> {
        let (spec, slot) = self.slot_mut(path)?;
        if !matches!(spec.kind, FieldKind::Flag { .. }) {
            return Err(kind_mismatch(spec, "flag"));
        }
        *slot = JsonValue::Bool(value);
        Ok(())
    }

    /// Appends a blank row to a struct list. Returns the new row count.
    pub fn push_item(&mut self, list: &str) -> Result<usize> {
        let (spec, slot) = self.slot_mut(FieldPath::Field(list))?;
        let FieldKind::StructList(item) = spec.kind else {
            return Err(kind_mismatch(spec, "struct list"));
        };
        let rows = array_mut(spec, slot)?;
        rows.push(item.blank_item());
        Ok(rows.len())
    }

    /// Removes one row of a struct list. The last remaining row is never removed.
    pub fn remove_item(&mut self, list: &str, index: usize) -> Result<bool> {
        let (spec, slot) = self.slot_mut(FieldPath::Field(list))?;
        if !matches!(spec.kind, FieldKind::StructList(_)) {
            return Err(kind_mismatch(spec, "struct list"));
        }
        remove_row(spec, array_mut(spec, slot)?, index)
    }

    /// Appends an empty entry to a text list. Returns the new entry count.
    pub fn push_entry(&mut self, path: FieldPath<'_>) -> Result<usize> {
        let (spec, slot) = self.text_list_mut(path)?;
        let entries = array_mut(spec, slot)?;
        entries.push(JsonValue::String(String::new()));
        Ok(entries.len())
    }

    /// Removes one entry of a text list. The last remaining entry is never removed.
    pub fn remove_entry(&mut self, path: FieldPath<'_>, index: usize) -> Result<bool> {
        let (spec, slot) = self.text_list_mut(path)?;
        remove_row(spec, array_mut(spec, slot)?, index)
    }

    pub fn set_entry(&mut self, path: FieldPath<'_>, index: usize, value: impl Into<String>) -> Result<()> {
        let (spec, slot) = self.text_list_mut(path)?;
        let entries = array_mut(spec, slot)?;
        let entry = entries.get_mut(index).ok_or_else(|| out_of_range(spec, index))?;
        *entry = JsonValue::String(value.into());
        Ok(())
    }

    /// Cleaned copy of the draft. The draft itself keeps its blank rows.
    pub fn cleaned(&self) -> ContentDocument {
        JsonValue::Object(clean::clean(self.schema.fields, &self.draft))
    }

    pub fn validate(&self, document: &ContentDocument) -> Result<()> {
        let object = document.as_object().ok_or_else(|| {
            AdminError::InvalidContent(self.section(), "content must be a JSON object".to_string())
        })?;
        clean::validate(self.section(), self.schema.fields, object)
    }

    /// Cleans and validates the draft, yielding the document to persist.
    pub fn submit(&self) -> Result<ContentDocument> {
        let cleaned = self.cleaned();
        self.validate(&cleaned)?;
        Ok(cleaned)
    }

    pub fn preview(&self) -> Preview {
        Preview::build(self.section(), self.schema.fields, &self.draft)
    }

    fn slot_mut(&mut self, path: FieldPath<'_>) -> Result<(&'static FieldSpec, &mut JsonValue)> {
        match path {
            FieldPath::Field(key) => {
                let spec = self.schema.field(key).ok_or_else(|| {
                    AdminError::draft_path(format!(
                        "section '{}' has no field '{}'",
                        self.schema.section, key
                    ))
                })?;
                let slot = self
                    .draft
                    .entry(key.to_string())
                    .or_insert_with(|| spec.blank_value());
                Ok((spec, slot))
            }
            FieldPath::Item { list, index, field } => {
                let (list_spec, rows) = self.slot_mut(FieldPath::Field(list))?;
                let FieldKind::StructList(item) = list_spec.kind else {
                    return Err(kind_mismatch(list_spec, "struct list"));
                };
                let spec = item.field(field).ok_or_else(|| {
                    AdminError::draft_path(format!("'{}' rows have no field '{}'", list, field))
                })?;
                let row = array_mut(list_spec, rows)?
                    .get_mut(index)
                    .and_then(JsonValue::as_object_mut)
                    .ok_or_else(|| out_of_range(list_spec, index))?;
                let slot = row
                    .entry(field.to_string())
                    .or_insert_with(|| spec.blank_value());
                Ok((spec, slot))
            }
        }
    }

    fn text_list_mut(&mut self, path: FieldPath<'_>) -> Result<(&'static FieldSpec, &mut JsonValue)> {
        let (spec, slot) = self.slot_mut(path)?;
        if !matches!(spec.kind, FieldKind::TextList) {
            return Err(kind_mismatch(spec, "text list"));
        }
        Ok((spec, slot))
    }
}

fn array_mut<'v>(spec: &FieldSpec, slot: &'v mut JsonValue) -> Result<&'v mut Vec<JsonValue>> {
    if !slot.is_array() {
        *slot = JsonValue::Array(Vec::new());
    }
    slot.as_array_mut()
        .ok_or_else(|| AdminError::draft_path(format!("'{}' is not a list", spec.key)))
}

fn remove_row(spec: &FieldSpec, rows: &mut Vec<JsonValue>, index: usize) -> Result<bool> {
    if index >= rows.len() {
        return Err(out_of_range(spec, index));
    }
    if rows.len() <= 1 {
        return Ok(false);
    }
    rows.remove(index);
    Ok(true)
}

fn kind_mismatch(spec: &FieldSpec, expected: &str) -> AdminError {
    AdminError::draft_path(format!("field '{}' is not a {}", spec.key, expected))
}

fn out_of_range(spec: &FieldSpec, index: usize) -> AdminError {
    AdminError::draft_path(format!("'{}' has no row {}", spec.key, index))
}
