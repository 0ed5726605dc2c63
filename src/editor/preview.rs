use super::clean::is_blank;
use crate::core::Section;
use crate::schema::{FieldKind, FieldSpec, ItemSchema};
use serde::Serialize;
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::fmt;

/// Read-only rendering of an uncommitted draft.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preview {
    pub section: Section,
    pub blocks: Vec<PreviewBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PreviewBlock {
    Heading { text: String },
    Field { label: String, text: String },
    List { label: String, entries: Vec<String> },
    Item { title: String, blocks: Vec<PreviewBlock> },
}

impl Preview {
    pub(crate) fn build(section: Section, fields: &[FieldSpec], draft: &JsonMap<String, JsonValue>) -> Self {
        Self {
            section,
            blocks: blocks_for(fields, draft, &[], true),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

fn blocks_for(
    fields: &[FieldSpec],
    values: &JsonMap<String, JsonValue>,
    skip: &[&str],
    top_level: bool,
) -> Vec<PreviewBlock> {
    let mut blocks = Vec::new();

    for field in fields.iter().filter(|field| !skip.contains(&field.key)) {
        let value = values.get(field.key);
        match field.kind {
            FieldKind::Text { .. }
            | FieldKind::LongText { .. }
            | FieldKind::Email
            | FieldKind::Choice { .. } => {
                let text = match value.and_then(JsonValue::as_str) {
                    Some(text) if !text.trim().is_empty() => text.to_string(),
                    _ => match field.placeholder {
                        Some(placeholder) => placeholder.to_string(),
                        None => continue,
                    },
                };
                if top_level && field.key == "title" {
                    blocks.push(PreviewBlock::Heading { text });
                } else {
                    blocks.push(PreviewBlock::Field {
                        label: field.label.to_string(),
                        text,
                    });
                }
            }
            FieldKind::Flag { .. } => {
                if value.and_then(JsonValue::as_bool).unwrap_or(false) {
                    blocks.push(PreviewBlock::Field {
                        label: field.label.to_string(),
                        text: "yes".to_string(),
                    });
                }
            }
            FieldKind::TextList => {
                let entries: Vec<String> = value
                    .and_then(JsonValue::as_array)
                    .into_iter()
                    .flatten()
                    .filter(|entry| !is_blank(Some(*entry)))
                    .filter_map(|entry| entry.as_str().map(str::to_string))
                    .collect();
                if !entries.is_empty() {
                    blocks.push(PreviewBlock::List {
                        label: field.label.to_string(),
                        entries,
                    });
                }
            }
            FieldKind::StructList(item) => {
                let rows = value.and_then(JsonValue::as_array).into_iter().flatten();
                blocks.extend(rows.filter_map(|row| item_block(&item, row)));
            }
        }
    }

    blocks
}

fn item_block(item: &ItemSchema, row: &JsonValue) -> Option<PreviewBlock> {
    let row = row.as_object()?;
    let title: Vec<&str> = item
        .identity
        .iter()
        .filter_map(|key| row.get(*key).and_then(JsonValue::as_str))
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect();
    if title.is_empty() {
        return None;
    }

    Some(PreviewBlock::Item {
        title: title.join(" · "),
        blocks: blocks_for(item.fields, row, item.identity, false),
    })
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for block in &self.blocks {
            write_block(f, block, 0)?;
        }
        Ok(())
    }
}

fn write_block(f: &mut fmt::Formatter<'_>, block: &PreviewBlock, depth: usize) -> fmt::Result {
    let indent = "  ".repeat(depth);
    match block {
        PreviewBlock::Heading { text } => writeln!(f, "{indent}# {text}"),
        PreviewBlock::Field { label, text } => writeln!(f, "{indent}{label}: {text}"),
        PreviewBlock::List { label, entries } => {
            writeln!(f, "{indent}{label}:")?;
            for entry in entries {
                writeln!(f, "{indent}  - {entry}")?;
            }
            Ok(())
        }
        PreviewBlock::Item { title, blocks } => {
            writeln!(f, "{indent}* {title}")?;
            for block in blocks {
                write_block(f, block, depth + 1)?;
            }
            Ok(())
        }
    }
}
