use crate::schema::{FieldKind, FieldSpec};
use serde_json::{Map as JsonMap, Value as JsonValue};

/// How strictly incoming content is mapped onto a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fill {
    /// Blank text takes the field default and empty lists get one blank row.
    Defaults,
    /// Only missing or mistyped values are replaced; blank values are kept.
    MissingOnly,
}

/// Maps arbitrary JSON onto `fields`, dropping keys the schema does not know.
pub(crate) fn normalize(fields: &[FieldSpec], source: &JsonValue, fill: Fill) -> JsonMap<String, JsonValue> {
    fields
        .iter()
        .map(|field| {
            let value = normalize_field(field, source.get(field.key), fill);
            (field.key.to_string(), value)
        })
        .collect()
}

fn normalize_field(field: &FieldSpec, value: Option<&JsonValue>, fill: Fill) -> JsonValue {
    match field.kind {
        FieldKind::Text { .. }
        | FieldKind::LongText { .. }
        | FieldKind::Email
        | FieldKind::Choice { .. } => match value.and_then(JsonValue::as_str) {
            Some(text) if !text.is_empty() || fill == Fill::MissingOnly => {
                JsonValue::String(text.to_string())
            }
            _ => field.blank_value(),
        },
        FieldKind::Flag { .. } => value
            .and_then(JsonValue::as_bool)
            .map(JsonValue::Bool)
            .unwrap_or_else(|| field.blank_value()),
        FieldKind::TextList => {
            let Some(entries) = value.and_then(JsonValue::as_array) else {
                return field.blank_value();
            };
            let entries: Vec<JsonValue> = entries
                .iter()
                .filter_map(|entry| entry.as_str())
                .map(|entry| JsonValue::String(entry.to_string()))
                .collect();
            if entries.is_empty() && fill == Fill::Defaults {
                return field.blank_value();
            }
            JsonValue::Array(entries)
        }
        FieldKind::StructList(item) => {
            let Some(rows) = value.and_then(JsonValue::as_array) else {
                return field.blank_value();
            };
            let rows: Vec<JsonValue> = rows
                .iter()
                .filter(|row| row.is_object())
                .map(|row| JsonValue::Object(normalize(item.fields, row, fill)))
                .collect();
            if rows.is_empty() && fill == Fill::Defaults {
                return field.blank_value();
            }
            JsonValue::Array(rows)
        }
    }
}
