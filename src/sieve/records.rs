//! JSON record collections.
//!
//! The engine itself is record-agnostic. This module gives it a concrete record
//! type for JSON input: an object per record, read from a file holding a JSON
//! array, with [`json_field`] as the accessor and [`infer_columns`] deriving a
//! column set from the data.

use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use crate::error::{Result, SieveError};
use crate::model::Column;

pub type JsonRecord = Map<String, Value>;

/// Read a JSON array of objects from `path`.
pub fn load_records(path: &Path) -> Result<Vec<JsonRecord>> {
    let content = fs::read_to_string(path).map_err(SieveError::Io)?;
    parse_records(&content)
}

pub fn parse_records(content: &str) -> Result<Vec<JsonRecord>> {
    let value: Value = serde_json::from_str(content).map_err(SieveError::Serialization)?;
    let Value::Array(items) = value else {
        return Err(SieveError::Api(
            "records must be a JSON array of objects".to_string(),
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(map) => Ok(map),
            _ => Err(SieveError::Api(format!("record {} is not an object", i + 1))),
        })
        .collect()
}

/// Accessor for JSON records.
///
/// `null` and missing keys are absent. Strings are taken verbatim, numbers and
/// booleans in their JSON text form, arrays as their elements joined with
/// `,`, and objects as compact JSON.
pub fn json_field(record: &JsonRecord, field: &str) -> Option<String> {
    record.get(field).and_then(stringify)
}

fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|v| stringify(v).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Some(value.to_string()),
    }
}

/// Columns in the order their keys are first encountered. A column is numeric
/// when it holds at least one JSON number and nothing else but `null`.
pub fn infer_columns(records: &[JsonRecord]) -> Vec<Column> {
    #[derive(Default)]
    struct Seen {
        number: bool,
        other: bool,
    }

    let mut columns: Vec<Column> = Vec::new();
    let mut seen: Vec<Seen> = Vec::new();

    for record in records {
        for (key, value) in record {
            let pos = match columns.iter().position(|c| &c.id == key) {
                Some(pos) => pos,
                None => {
                    columns.push(Column::new(key.clone(), label_for(key)));
                    seen.push(Seen::default());
                    columns.len() - 1
                }
            };
            match value {
                Value::Null => {}
                Value::Number(_) => seen[pos].number = true,
                _ => seen[pos].other = true,
            }
        }
    }

    columns
        .into_iter()
        .zip(seen)
        .map(|(column, seen)| {
            if seen.number && !seen.other {
                column.numeric()
            } else {
                column
            }
        })
        .collect()
}

/// `createdAt` / `lead_source` -> `Created At` / `Lead Source`.
fn label_for(id: &str) -> String {
    let mut label = String::with_capacity(id.len() + 4);
    let mut prev_lower = false;
    for ch in id.chars() {
        if ch == '_' || ch == '-' {
            label.push(' ');
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower {
            label.push(' ');
        }
        if label.is_empty() || label.ends_with(' ') {
            label.extend(ch.to_uppercase());
        } else {
            label.push(ch);
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
    }
    label
}
