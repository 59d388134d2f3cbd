//! Delimited text (CSV, TSV) as grids.
//!
//! Records may differ in length; nothing is padded or truncated. A record
//! with no cells is written as an empty line. Readers skip empty lines, so
//! such a record does not come back when the text is read again.

use std::io::Write;

use csv::{ReaderBuilder, WriterBuilder};

use crate::error::CodecResult;
use crate::models::Grid;

/// Parse delimited text into a grid. Every row, including the first, is data.
pub fn read_grid(text: &str, delimiter: u8) -> CodecResult<Grid> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        records.push(record.iter().map(str::to_string).collect());
    }
    Ok(records)
}

pub fn write_grid<W: Write>(writer: W, records: &[Vec<String>], delimiter: u8) -> CodecResult<()> {
    let mut builder = WriterBuilder::new();
    builder.flexible(true).delimiter(delimiter);
    let mut writer = builder.from_writer(writer);
    for record in records {
        if record.is_empty() {
            // The csv writer would emit `""`, a record with one empty cell.
            // csv::Writer has no `get_mut`; unwrap (flushing) and rebuild instead.
            let mut inner = writer.into_inner().map_err(|e| e.into_error())?;
            inner.write_all(b"\n")?;
            writer = builder.from_writer(inner);
            continue;
        }
        writer.write_record(record)?;
    }
    writer.flush()?;
    Ok(())
}
