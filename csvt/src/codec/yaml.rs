//! YAML tables.
//!
//! Same shapes as JSON documents: a grid is a sequence of sequences, an item
//! list a sequence of mappings. Values go through `serde_json::Value`, so
//! scalars are read as text the same way JSON scalars are.

use std::io::Write;

use serde_json::Value;

use super::json::{grid_from_values, items_from_values, ordered_objects, root_elements};
use crate::error::CodecResult;
use crate::models::{Grid, Item, Record};

pub fn read_grid(text: &str) -> CodecResult<Grid> {
    grid_from_values(read_values(text)?)
}

pub fn read_items(text: &str) -> CodecResult<Vec<Item>> {
    items_from_values(read_values(text)?)
}

pub fn write_grid<W: Write>(mut writer: W, records: &[Record]) -> CodecResult<()> {
    serde_yaml::to_writer(&mut writer, records)?;
    writer.flush()?;
    Ok(())
}

/// Write items as a sequence of mappings, keys in `header` order first.
pub fn write_items<W: Write>(
    mut writer: W,
    items: &[Item],
    header: Option<&[String]>,
) -> CodecResult<()> {
    serde_yaml::to_writer(&mut writer, &ordered_objects(items, header))?;
    writer.flush()?;
    Ok(())
}

fn read_values(text: &str) -> CodecResult<Vec<(String, Value)>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    root_elements(serde_yaml::from_str(text)?)
}
