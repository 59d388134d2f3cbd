//! TOML tables.
//!
//! A TOML document is always a table, so records live under one key,
//! `records`: an array of arrays for a grid, an array of tables for items.
//!
//! ```toml
//! records = [["name", "age"], ["Alice", "30"]]
//!
//! # or, for items
//! [[records]]
//! name = "Alice"
//! age = "30"
//! ```

use std::io::Write;

use serde::Serialize;
use serde_json::Value;

use super::json::{grid_from_values, items_from_values, ordered_objects};
use crate::error::{CodecError, CodecResult};
use crate::models::{Grid, Item, Record};

/// Key holding the records in a TOML document.
pub const RECORDS_KEY: &str = "records";

#[derive(Serialize)]
struct Document<T> {
    records: T,
}

pub fn read_grid(text: &str) -> CodecResult<Grid> {
    grid_from_values(read_values(text)?)
}

pub fn read_items(text: &str) -> CodecResult<Vec<Item>> {
    items_from_values(read_values(text)?)
}

pub fn write_grid<W: Write>(writer: W, records: &[Record]) -> CodecResult<()> {
    write_document(writer, &Document { records })
}

/// Write items as an array of tables, keys in `header` order first.
pub fn write_items<W: Write>(
    writer: W,
    items: &[Item],
    header: Option<&[String]>,
) -> CodecResult<()> {
    write_document(
        writer,
        &Document {
            records: ordered_objects(items, header),
        },
    )
}

fn write_document<W: Write, T: Serialize>(mut writer: W, document: &T) -> CodecResult<()> {
    let text = toml::to_string(document)?;
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}

fn read_values(text: &str) -> CodecResult<Vec<(String, Value)>> {
    let mut table: toml::Table = toml::from_str(text)?;
    let records = table.remove(RECORDS_KEY);
    if let Some(key) = table.keys().next() {
        return Err(shape_error(format!("unexpected key '{}'", key)));
    }
    match records {
        None => Ok(Vec::new()),
        Some(toml::Value::Array(values)) => Ok(values
            .into_iter()
            .enumerate()
            .map(|(i, value)| (format!("{}[{}]", RECORDS_KEY, i), to_json(value)))
            .collect()),
        Some(other) => Err(shape_error(format!(
            "expected '{}' to be an array, found {}",
            RECORDS_KEY,
            other.type_str()
        ))),
    }
}

fn shape_error(message: String) -> CodecError {
    CodecError::UnexpectedShape {
        location: "document root".to_string(),
        message,
    }
}

fn to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map_or_else(|| Value::String(f.to_string()), Value::Number),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(d) => Value::String(d.to_string()),
        toml::Value::Array(values) => Value::Array(values.into_iter().map(to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, to_json(value)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grid_of;

    fn item(pairs: &[(&str, &str)]) -> Item {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_read_grid_stringifies_scalars() {
        let text = "records = [[\"a\", 1, true], [2.5, 1979-05-27]]\n";
        let grid = read_grid(text).unwrap();
        assert_eq!(grid, grid_of(&[&["a", "1", "true"], &["2.5", "1979-05-27"]]));
    }

    #[test]
    fn test_read_items_array_of_tables() {
        let text = "[[records]]\nname = \"Alice\"\nage = 30\n\n[[records]]\nname = \"Bob\"\n";
        let items = read_items(text).unwrap();
        assert_eq!(
            items,
            vec![item(&[("age", "30"), ("name", "Alice")]), item(&[("name", "Bob")])]
        );
    }

    #[test]
    fn test_read_empty_document() {
        assert!(read_items("").unwrap().is_empty());
    }

    #[test]
    fn test_read_rejects_other_keys() {
        let err = read_grid("rows = [[\"a\"]]\n").unwrap_err();
        assert!(err.to_string().contains("unexpected key 'rows'"));
    }

    #[test]
    fn test_read_rejects_scalar_records() {
        let err = read_grid("records = 3\n").unwrap_err();
        assert!(err.to_string().contains("found integer"));
    }

    #[test]
    fn test_read_items_rejects_rows() {
        let err = read_items("records = [[\"a\"]]\n").unwrap_err();
        assert!(err.to_string().contains("records[0]"));
    }

    #[test]
    fn test_grid_survives_write_and_read() {
        let grid = grid_of(&[&["a", "b"], &["1"], &[]]);
        let mut out = Vec::new();
        write_grid(&mut out, &grid).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("records = "));
        assert_eq!(read_grid(&text).unwrap(), grid);
    }

    #[test]
    fn test_write_items_in_header_order() {
        let items = vec![item(&[("A", "1"), ("B", "2"), ("C", "3")])];
        let header = vec!["C".to_string(), "A".to_string(), "B".to_string()];
        let mut out = Vec::new();
        write_items(&mut out, &items, Some(&header)).unwrap();
        let text = String::from_utf8(out).unwrap();
        let (c, a) = (text.find("C = ").unwrap(), text.find("A = ").unwrap());
        assert!(c < a);
        assert_eq!(read_items(&text).unwrap(), items);
    }
}
