use crate::core::{AdminError, Result, Section};
use crate::schema::{FieldKind, FieldSpec, ItemSchema};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map as JsonMap, Value as JsonValue};

lazy_static! {
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid");
}

pub(crate) fn is_blank(value: Option<&JsonValue>) -> bool {
    value
        .and_then(JsonValue::as_str)
        .map(|text| text.trim().is_empty())
        .unwrap_or(true)
}

/// Drops blank list entries and rows without identity. The draft is not touched.
pub(crate) fn clean(fields: &[FieldSpec], draft: &JsonMap<String, JsonValue>) -> JsonMap<String, JsonValue> {
    fields
        .iter()
        .map(|field| {
            let value = match draft.get(field.key) {
                Some(value) => clean_field(field, value),
                None => JsonValue::Null,
            };
            (field.key.to_string(), value)
        })
        .filter(|(_, value)| !value.is_null())
        .collect()
}

fn clean_field(field: &FieldSpec, value: &JsonValue) -> JsonValue {
    match field.kind {
        FieldKind::TextList => JsonValue::Array(
            value
                .as_array()
                .map(|entries| {
                    entries
                        .iter()
                        .filter(|entry| !is_blank(Some(*entry)))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default(),
        ),
        FieldKind::StructList(item) => JsonValue::Array(
            value
                .as_array()
                .map(|rows| rows.iter().filter_map(|row| clean_row(&item, row)).collect())
                .unwrap_or_default(),
        ),
        _ => value.clone(),
    }
}

fn clean_row(item: &ItemSchema, row: &JsonValue) -> Option<JsonValue> {
    let row = row.as_object()?;
    if item.identity.iter().all(|key| is_blank(row.get(*key))) {
        return None;
    }

    let cleaned = clean(item.fields, row);
    let starved = item.require_nonempty.iter().any(|key| {
        cleaned
            .get(*key)
            .and_then(JsonValue::as_array)
            .map(Vec::is_empty)
            .unwrap_or(true)
    });
    if starved {
        return None;
    }

    Some(JsonValue::Object(cleaned))
}

/// Checks required fields, email formats and choice options, reporting every
/// problem at once.
pub(crate) fn validate(section: Section, fields: &[FieldSpec], document: &JsonMap<String, JsonValue>) -> Result<()> {
    let mut problems = Vec::new();
    collect_problems(fields, document, "", &mut problems);

    if problems.is_empty() {
        Ok(())
    } else {
        Err(AdminError::InvalidContent(section, problems.join("; ")))
    }
}

fn collect_problems(
    fields: &[FieldSpec],
    document: &JsonMap<String, JsonValue>,
    prefix: &str,
    problems: &mut Vec<String>,
) {
    for field in fields {
        let value = document.get(field.key);

        if field.required && !field.is_repeatable() && is_blank(value) {
            problems.push(format!("{prefix}{} is required", field.label));
        }

        match field.kind {
            FieldKind::Email => {
                let text = value.and_then(JsonValue::as_str).unwrap_or_default();
                if !text.is_empty() && !EMAIL_PATTERN.is_match(text) {
                    problems.push(format!("{prefix}{} must be a valid email address", field.label));
                }
            }
            FieldKind::Choice { options, .. } => {
                let text = value.and_then(JsonValue::as_str).unwrap_or_default();
                if !options.iter().any(|option| *option == text) {
                    problems.push(format!(
                        "{prefix}{} must be one of: {}",
                        field.label,
                        options.join(", ")
                    ));
                }
            }
            FieldKind::StructList(item) => {
                let rows = value.and_then(JsonValue::as_array).map(Vec::as_slice).unwrap_or_default();
                for (index, row) in rows.iter().enumerate() {
                    if let Some(row) = row.as_object() {
                        let prefix = format!("{prefix}{} #{}: ", field.label, index + 1);
                        collect_problems(item.fields, row, &prefix, problems);
                    }
                }
            }
            _ => {}
        }
    }
}
