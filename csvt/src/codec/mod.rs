//! Table formats: reading bytes into grids or items, and writing them back.
//!
//! | Format   | Grid               | Items             |
//! |----------|--------------------|-------------------|
//! | `csv`    | delimited rows     | -                 |
//! | `tsv`    | tab-delimited rows | -                 |
//! | `json`   | array of arrays    | array of objects  |
//! | `ndjson` | one array per line | one object per line |
//! | `yaml`   | sequence of sequences | sequence of mappings |
//! | `toml`   | `records` array of arrays | `records` array of tables |
//!
//! Delimited formats carry no keys, so items need one of the structured
//! formats.

pub mod delimited;
pub mod encoding;
pub mod json;
pub mod toml_doc;
pub mod yaml;

use std::fmt;
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use encoding::{decode_content, decode_text, detect_encoding};
pub use json::Layout;

use crate::error::{CodecError, CodecResult};
use crate::models::{Grid, Item};

/// Supported table formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Csv,
    Tsv,
    Json,
    Ndjson,
    Yaml,
    Toml,
}

impl Format {
    /// Parse a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "tsv" | "tab" => Some(Self::Tsv),
            "json" => Some(Self::Json),
            "ndjson" | "jsonl" => Some(Self::Ndjson),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Format implied by a path's extension, if any.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Whether the format can hold keyed items.
    pub fn is_keyed(self) -> bool {
        !matches!(self, Self::Csv | Self::Tsv)
    }

    /// Delimiter actually used: TSV always splits on tabs.
    pub fn delimiter(self, configured: u8) -> u8 {
        match self {
            Self::Tsv => b'\t',
            _ => configured,
        }
    }

    fn layout(self) -> Layout {
        match self {
            Self::Ndjson => Layout::Lines,
            _ => Layout::Document,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
            Self::Yaml => "yaml",
            Self::Toml => "toml",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s).ok_or_else(|| {
            format!("unknown format '{}' (expected csv, tsv, json, ndjson, yaml or toml)", s)
        })
    }
}

/// Read the whole stream as a grid.
pub fn read_grid<R: Read>(mut reader: R, format: Format, delimiter: u8) -> CodecResult<Grid> {
    let text = read_text(&mut reader)?;
    match format {
        Format::Csv | Format::Tsv => delimited::read_grid(&text, format.delimiter(delimiter)),
        Format::Json | Format::Ndjson => json::read_grid(&text, format.layout()),
        Format::Yaml => yaml::read_grid(&text),
        Format::Toml => toml_doc::read_grid(&text),
    }
}

/// Read the whole stream as items. Only keyed formats are accepted.
pub fn read_items<R: Read>(mut reader: R, format: Format) -> CodecResult<Vec<Item>> {
    if !format.is_keyed() {
        return Err(not_keyed(format));
    }
    let text = read_text(&mut reader)?;
    match format {
        Format::Yaml => yaml::read_items(&text),
        Format::Toml => toml_doc::read_items(&text),
        _ => json::read_items(&text, format.layout()),
    }
}

pub fn write_grid<W: Write>(
    writer: W,
    records: &[Vec<String>],
    format: Format,
    delimiter: u8,
) -> CodecResult<()> {
    match format {
        Format::Csv | Format::Tsv => {
            delimited::write_grid(writer, records, format.delimiter(delimiter))
        }
        Format::Json | Format::Ndjson => json::write_grid(writer, records, format.layout()),
        Format::Yaml => yaml::write_grid(writer, records),
        Format::Toml => toml_doc::write_grid(writer, records),
    }
}

/// Write items. Only keyed formats are accepted.
pub fn write_items<W: Write>(
    writer: W,
    items: &[Item],
    header: Option<&[String]>,
    format: Format,
) -> CodecResult<()> {
    if !format.is_keyed() {
        return Err(not_keyed(format));
    }
    match format {
        Format::Yaml => yaml::write_items(writer, items, header),
        Format::Toml => toml_doc::write_items(writer, items, header),
        _ => json::write_items(writer, items, header, format.layout()),
    }
}

fn not_keyed(format: Format) -> CodecError {
    CodecError::UnexpectedShape {
        location: format!("{} stream", format),
        message: "keyed items need json, ndjson, yaml or toml".to_string(),
    }
}

fn read_text<R: Read>(reader: &mut R) -> CodecResult<String> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    decode_text(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grid_of;

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("a/b.CSV")), Some(Format::Csv));
        assert_eq!(Format::from_path(Path::new("x.jsonl")), Some(Format::Ndjson));
        assert_eq!(Format::from_path(Path::new("x.txt")), None);
        assert_eq!(Format::from_path(Path::new("-")), None);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("tsv".parse::<Format>().unwrap(), Format::Tsv);
        assert_eq!("YML".parse::<Format>().unwrap(), Format::Yaml);
        assert_eq!("toml".parse::<Format>().unwrap(), Format::Toml);
        assert!("xml".parse::<Format>().unwrap_err().contains("xml"));
    }

    #[test]
    fn test_tsv_ignores_configured_delimiter() {
        let grid = read_grid("a\tb\n".as_bytes(), Format::Tsv, b',').unwrap();
        assert_eq!(grid, grid_of(&[&["a", "b"]]));
    }

    #[test]
    fn test_items_need_keyed_format() {
        let err = read_items("a,b\n".as_bytes(), Format::Csv).unwrap_err();
        assert!(err.to_string().contains("csv stream"));
        let err = write_items(Vec::new(), &[], None, Format::Tsv).unwrap_err();
        assert!(err.to_string().contains("yaml or toml"));
    }

    #[test]
    fn test_grid_csv_to_json() {
        let grid = read_grid("a,b\n1,2\n".as_bytes(), Format::Csv, b',').unwrap();
        let mut out = Vec::new();
        write_grid(&mut out, &grid, Format::Ndjson, b',').unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[\"a\",\"b\"]\n[\"1\",\"2\"]\n");
    }

    #[test]
    fn test_structured_formats_are_keyed() {
        assert!(Format::Yaml.is_keyed());
        assert!(Format::Toml.is_keyed());
        assert!(!Format::Tsv.is_keyed());
        assert_eq!(Format::from_path(Path::new("conf.yaml")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("table.toml")), Some(Format::Toml));
    }

    #[test]
    fn test_grid_csv_to_yaml_and_back() {
        let grid = read_grid("a,b\n1,2\n".as_bytes(), Format::Csv, b',').unwrap();
        let mut out = Vec::new();
        write_grid(&mut out, &grid, Format::Yaml, b',').unwrap();
        assert_eq!(read_grid(out.as_slice(), Format::Yaml, b',').unwrap(), grid);
    }

    #[test]
    fn test_items_through_toml() {
        let items = read_items(
            "[[records]]\nA = \"1\"\n[[records]]\nB = \"2\"\n".as_bytes(),
            Format::Toml,
        )
        .unwrap();
        assert_eq!(items.len(), 2);
        let mut out = Vec::new();
        write_items(&mut out, &items, None, Format::Toml).unwrap();
        assert_eq!(read_items(out.as_slice(), Format::Toml).unwrap(), items);
    }
}
