//! JSON and NDJSON tables.
//!
//! A grid is an array of arrays, an item list an array of objects. In
//! NDJSON each line holds one row or one object. Scalars are read as text:
//! `null` becomes `""`, numbers and booleans keep their JSON spelling, and
//! nested values are kept as compact JSON text.

use std::io::Write;

use serde_json::{Map, Value};

use crate::error::{CodecError, CodecResult};
use crate::models::{Grid, Item, Record};

/// Whole-document JSON or one value per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Document,
    Lines,
}

pub fn read_grid(text: &str, layout: Layout) -> CodecResult<Grid> {
    grid_from_values(read_values(text, layout)?)
}

pub fn read_items(text: &str, layout: Layout) -> CodecResult<Vec<Item>> {
    items_from_values(read_values(text, layout)?)
}

/// Rows from located top-level values; each must be an array.
pub(crate) fn grid_from_values(values: Vec<(String, Value)>) -> CodecResult<Grid> {
    values
        .into_iter()
        .map(|(location, value)| match value {
            Value::Array(cells) => Ok(cells.into_iter().map(cell_text).collect::<Record>()),
            other => Err(unexpected(location, "a row", &other)),
        })
        .collect()
}

/// Items from located top-level values; each must be an object.
pub(crate) fn items_from_values(values: Vec<(String, Value)>) -> CodecResult<Vec<Item>> {
    values
        .into_iter()
        .map(|(location, value)| match value {
            Value::Object(fields) => Ok(fields
                .into_iter()
                .map(|(key, value)| (key, cell_text(value)))
                .collect::<Item>()),
            other => Err(unexpected(location, "an object", &other)),
        })
        .collect()
}

/// Number the elements of a root sequence, or reject any other root.
pub(crate) fn root_elements(root: Value) -> CodecResult<Vec<(String, Value)>> {
    match root {
        Value::Array(values) => Ok(values
            .into_iter()
            .enumerate()
            .map(|(i, value)| (format!("element {}", i), value))
            .collect()),
        other => Err(unexpected("document root".to_string(), "an array", &other)),
    }
}

pub fn write_grid<W: Write>(mut writer: W, records: &[Record], layout: Layout) -> CodecResult<()> {
    match layout {
        Layout::Document => {
            serde_json::to_writer_pretty(&mut writer, records)?;
            writeln!(writer)?;
        }
        Layout::Lines => {
            for record in records {
                serde_json::to_writer(&mut writer, record)?;
                writeln!(writer)?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}

/// Write items with their keys in `header` order; keys the header does not
/// name follow in lexicographic order.
pub fn write_items<W: Write>(
    mut writer: W,
    items: &[Item],
    header: Option<&[String]>,
    layout: Layout,
) -> CodecResult<()> {
    let objects = ordered_objects(items, header);
    match layout {
        Layout::Document => {
            serde_json::to_writer_pretty(&mut writer, &objects)?;
            writeln!(writer)?;
        }
        Layout::Lines => {
            for object in &objects {
                serde_json::to_writer(&mut writer, object)?;
                writeln!(writer)?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}

/// Items as JSON objects with keys in `header` order first.
pub(crate) fn ordered_objects(items: &[Item], header: Option<&[String]>) -> Vec<Value> {
    items.iter().map(|item| ordered_object(item, header)).collect()
}

fn ordered_object(item: &Item, header: Option<&[String]>) -> Value {
    let mut object = Map::new();
    for key in header.unwrap_or_default() {
        if let Some(value) = item.get(key) {
            object.insert(key.clone(), Value::String(value.clone()));
        }
    }
    for (key, value) in item {
        if !object.contains_key(key) {
            object.insert(key.clone(), Value::String(value.clone()));
        }
    }
    Value::Object(object)
}

/// Top-level values with a human-readable location for error messages.
fn read_values(text: &str, layout: Layout) -> CodecResult<Vec<(String, Value)>> {
    match layout {
        Layout::Document => {
            if text.trim().is_empty() {
                return Ok(Vec::new());
            }
            root_elements(serde_json::from_str(text)?)
        }
        Layout::Lines => {
            let mut values = Vec::new();
            for (i, line) in text.lines().enumerate() {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                values.push((format!("line {}", i + 1), serde_json::from_str(line)?));
            }
            Ok(values)
        }
    }
}

fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn unexpected(location: String, expected: &str, found: &Value) -> CodecError {
    let found = match found {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    };
    CodecError::UnexpectedShape {
        location,
        message: format!("expected {}, found {}", expected, found),
    }
}
