//! Layered configuration resolved into an [`Application`].
//!
//! Sources, lowest precedence first:
//!
//! 1. built-in defaults (see [`Mode::default_from_format`])
//! 2. a JSON config file (`--config`)
//! 3. `CSVT_*` environment variables and command-line flags (merged by clap)
//!
//! Formats not named anywhere are inferred from the input/output file
//! extensions before falling back to the mode's defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::app::{Application, Mode};
use crate::codec::Format;
use crate::error::{AppError, AppResult};

/// Partial settings; `None` means "not given at this layer".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub mode: Option<Mode>,
    pub from_type: Option<Format>,
    pub to_type: Option<Format>,
    pub from_delimiter: Option<String>,
    pub to_delimiter: Option<String>,
    pub rows: Option<String>,
    pub cols: Option<String>,
    pub length_checked: Option<bool>,
    pub key_checked: Option<bool>,
}

impl Config {
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            AppError::Config(format!("invalid config file {}: {}", path.display(), e))
        })
    }

    /// Values set in `other` win.
    pub fn merge(self, other: Config) -> Config {
        Config {
            mode: other.mode.or(self.mode),
            from_type: other.from_type.or(self.from_type),
            to_type: other.to_type.or(self.to_type),
            from_delimiter: other.from_delimiter.or(self.from_delimiter),
            to_delimiter: other.to_delimiter.or(self.to_delimiter),
            rows: other.rows.or(self.rows),
            cols: other.cols.or(self.cols),
            length_checked: other.length_checked.or(self.length_checked),
            key_checked: other.key_checked.or(self.key_checked),
        }
    }

    /// Resolve into a runnable application for the given input and output
    /// paths (`None` or `-` for the standard streams).
    pub fn into_application(
        self,
        input: Option<&Path>,
        output: Option<&Path>,
    ) -> AppResult<Application> {
        let mode = self.mode.unwrap_or_default();
        let mut app = Application::new(mode);

        app.from_format = self
            .from_type
            .or_else(|| input.and_then(Format::from_path))
            .unwrap_or_else(|| mode.default_from_format());
        app.to_format = self
            .to_type
            .or_else(|| output.and_then(Format::from_path))
            .unwrap_or_else(|| mode.default_to_format());

        if let Some(d) = &self.from_delimiter {
            app.from_delimiter = parse_delimiter(d)?;
        }
        if let Some(d) = &self.to_delimiter {
            app.to_delimiter = parse_delimiter(d)?;
        }
        app.length_checked = self.length_checked.unwrap_or(false);
        app.key_checked = self.key_checked.unwrap_or(false);
        app.rows = self.rows.unwrap_or_default();
        app.cols = self.cols.unwrap_or_default();

        app.check()?;
        Ok(app)
    }
}

/// A delimiter must be exactly one ASCII character. `\t` is accepted as an
/// escape for tab.
pub fn parse_delimiter(s: &str) -> AppResult<u8> {
    if s == "\\t" {
        return Ok(b'\t');
    }
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c as u8),
        _ => Err(AppError::Config(format!(
            "delimiter must be a single character: {}",
            s
        ))),
    }
}
