//! Application layer: decode, transform by mode, encode.
//!
//! # Example
//!
//! ```rust
//! use csvt::{Application, Format, Mode};
//!
//! let mut app = Application::new(Mode::Map);
//! app.from_format = Format::Csv;
//! app.to_format = Format::Ndjson;
//!
//! let mut out = Vec::new();
//! app.run("A,B\n1,2\n".as_bytes(), &mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "{\"A\":\"1\",\"B\":\"2\"}\n");
//! ```

use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, info_span};

use crate::codec::{self, Format};
use crate::error::{AppError, AppResult};
use crate::models::column_count;
use crate::transform::{Mapper, Slicer, Transposer, Unmapper};

/// What to do between decoding and encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Re-encode the grid unchanged.
    #[default]
    Convert,
    /// Swap rows and columns.
    Transpose,
    /// Grid with a header row to keyed items.
    Map,
    /// Keyed items to a grid with a header row.
    Unmap,
    /// Select rows and columns by range lists.
    Slice,
}

impl Mode {
    /// Input format when neither a flag nor an extension names one.
    pub fn default_from_format(self) -> Format {
        match self {
            Mode::Unmap => Format::Json,
            _ => Format::Csv,
        }
    }

    /// Output format when neither a flag nor an extension names one.
    pub fn default_to_format(self) -> Format {
        match self {
            Mode::Map => Format::Json,
            _ => Format::Csv,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Convert => "convert",
            Mode::Transpose => "transpose",
            Mode::Map => "map",
            Mode::Unmap => "unmap",
            Mode::Slice => "slice",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" | "convert" => Ok(Mode::Convert),
            "transpose" => Ok(Mode::Transpose),
            "map" => Ok(Mode::Map),
            "unmap" => Ok(Mode::Unmap),
            "slice" => Ok(Mode::Slice),
            other => Err(format!(
                "unknown mode '{}' (expected convert, transpose, map, unmap or slice)",
                other
            )),
        }
    }
}

/// Counts reported after a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub mode: Mode,
    /// Records (grid rows or items) read.
    pub records_in: usize,
    /// Records (grid rows or items) written.
    pub records_out: usize,
}

/// One configured conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub mode: Mode,
    pub from_format: Format,
    pub to_format: Format,
    pub from_delimiter: u8,
    pub to_delimiter: u8,
    /// Strict shape checks for transpose and map.
    pub length_checked: bool,
    /// Strict key checks for unmap.
    pub key_checked: bool,
    /// Row range list for slice mode.
    pub rows: String,
    /// Column range list for slice mode.
    pub cols: String,
}

impl Application {
    /// Application with the mode's default formats and comma delimiters.
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            from_format: mode.default_from_format(),
            to_format: mode.default_to_format(),
            from_delimiter: b',',
            to_delimiter: b',',
            length_checked: false,
            key_checked: false,
            rows: String::new(),
            cols: String::new(),
        }
    }

    /// Reject format combinations the mode cannot produce or consume.
    pub fn check(&self) -> AppResult<()> {
        if self.mode == Mode::Map && !self.to_format.is_keyed() {
            return Err(AppError::Config(format!(
                "map mode writes keyed items; cannot write them as {}",
                self.to_format
            )));
        }
        if self.mode == Mode::Unmap && !self.from_format.is_keyed() {
            return Err(AppError::Config(format!(
                "unmap mode reads keyed items; cannot read them from {}",
                self.from_format
            )));
        }
        Ok(())
    }

    /// Decode everything from `reader`, transform, and encode to `writer`.
    /// Nothing is written unless decoding and transforming succeed.
    pub fn run<R: Read, W: Write>(&self, reader: R, writer: W) -> AppResult<RunSummary> {
        let _span = info_span!("run", mode = %self.mode, from = %self.from_format, to = %self.to_format)
            .entered();
        self.check()?;

        let summary = match self.mode {
            Mode::Convert => {
                let records = codec::read_grid(reader, self.from_format, self.from_delimiter)?;
                self.write_grid(writer, &records)?;
                self.summary(records.len(), records.len())
            }
            Mode::Transpose => {
                let records = codec::read_grid(reader, self.from_format, self.from_delimiter)?;
                let transposed = Transposer::new(self.length_checked).transpose(&records)?;
                self.write_grid(writer, &transposed)?;
                self.summary(records.len(), transposed.len())
            }
            Mode::Slice => {
                let slicer = Slicer::parse(&self.rows, &self.cols)?;
                let records = codec::read_grid(reader, self.from_format, self.from_delimiter)?;
                let sliced = slicer.slice(&records)?;
                self.write_grid(writer, &sliced)?;
                self.summary(records.len(), sliced.len())
            }
            Mode::Map => {
                let records = codec::read_grid(reader, self.from_format, self.from_delimiter)?;
                let mut mapper = Mapper::new(self.length_checked);
                let items = mapper.map_all(&records)?;
                codec::write_items(writer, &items, mapper.header(), self.to_format)?;
                self.summary(records.len(), items.len())
            }
            Mode::Unmap => {
                let items = codec::read_items(reader, self.from_format)?;
                let records = Unmapper::new(self.key_checked).unmap_all(&items)?;
                self.write_grid(writer, &records)?;
                self.summary(items.len(), records.len())
            }
        };

        info!(
            records_in = summary.records_in,
            records_out = summary.records_out,
            "conversion finished"
        );
        Ok(summary)
    }

    fn write_grid<W: Write>(&self, writer: W, records: &[Vec<String>]) -> AppResult<()> {
        info!(
            rows = records.len(),
            columns = column_count(records),
            "writing grid"
        );
        codec::write_grid(writer, records, self.to_format, self.to_delimiter)?;
        Ok(())
    }

    fn summary(&self, records_in: usize, records_out: usize) -> RunSummary {
        RunSummary {
            mode: self.mode,
            records_in,
            records_out,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(app: &Application, input: &str) -> AppResult<String> {
        let mut out = Vec::new();
        app.run(input.as_bytes(), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_mode_defaults() {
        assert_eq!(Application::new(Mode::Map).to_format, Format::Json);
        assert_eq!(Application::new(Mode::Unmap).from_format, Format::Json);
        assert_eq!(Application::new(Mode::Slice).from_format, Format::Csv);
        assert_eq!("".parse::<Mode>().unwrap(), Mode::Convert);
        assert!("titled".parse::<Mode>().is_err());
    }

    #[test]
    fn test_convert_changes_delimiter() {
        let mut app = Application::new(Mode::Convert);
        app.to_delimiter = b';';
        assert_eq!(run(&app, "a,b\n1,2\n").unwrap(), "a;b\n1;2\n");
    }

    #[test]
    fn test_transpose_csv() {
        let app = Application::new(Mode::Transpose);
        assert_eq!(run(&app, "a\nb,c,d\ne,f\n").unwrap(), "a,b,e\n,c,f\n,d,\n");
    }

    #[test]
    fn test_slice_csv() {
        let mut app = Application::new(Mode::Slice);
        app.rows = "2:4".into();
        app.cols = "1:3".into();
        let out = run(&app, "A,B,C\n1,2,3\n4,5,6\n7,8,9\n").unwrap();
        assert_eq!(out, "5,6\n8,9\n");
    }

    #[test]
    fn test_slice_bad_range_fails_before_output() {
        let mut app = Application::new(Mode::Slice);
        app.rows = "x".into();
        let mut out = Vec::new();
        let err = app.run("a\n".as_bytes(), &mut out).unwrap_err();
        assert!(matches!(err, AppError::Manipulate(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_unmap_json_to_csv() {
        let app = Application::new(Mode::Unmap);
        let out = run(&app, r#"[{"a": "b"}, {"c": "d"}]"#).unwrap();
        assert_eq!(out, "a,c\nb,\n,d\n");
    }

    #[test]
    fn test_unmap_key_checked_fails() {
        let mut app = Application::new(Mode::Unmap);
        app.key_checked = true;
        let err = run(&app, r#"[{"a": "b"}, {"c": "d"}]"#).unwrap_err();
        assert_eq!(err.to_string(), "invalid key: c");
    }

    #[test]
    fn test_map_to_csv_is_rejected() {
        let mut app = Application::new(Mode::Map);
        app.to_format = Format::Csv;
        let err = run(&app, "a\n1\n").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_summary_counts() {
        let app = Application::new(Mode::Map);
        let mut out = Vec::new();
        let summary = app.run("A,B\n1,2\n3,4\n".as_bytes(), &mut out).unwrap();
        assert_eq!(
            summary,
            RunSummary {
                mode: Mode::Map,
                records_in: 3,
                records_out: 2,
            }
        );
    }
}
