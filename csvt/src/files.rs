//! Input/output plumbing for the command line.
//!
//! `-` or no path selects the standard streams. File output is written to a
//! temporary file in the destination directory and moved into place only
//! once the whole run has succeeded.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::AppResult;

fn is_stdio(path: Option<&Path>) -> bool {
    path.map_or(true, |p| p.as_os_str() == "-")
}

/// Open the input stream.
pub fn open_input(path: Option<&Path>) -> AppResult<Box<dyn Read>> {
    match path {
        Some(path) if !is_stdio(Some(path)) => {
            let file = File::open(path)?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(io::stdin().lock())),
    }
}

/// Run `write` against the output stream. For a file destination the
/// content lands at `path` only if `write` returns `Ok`.
pub fn with_output<T, F>(path: Option<&Path>, write: F) -> AppResult<T>
where
    F: FnOnce(&mut dyn Write) -> AppResult<T>,
{
    match path {
        Some(path) if !is_stdio(Some(path)) => {
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            let tmp = NamedTempFile::new_in(dir)?;
            let mut writer = BufWriter::new(tmp);
            let value = write(&mut writer)?;
            let tmp = writer.into_inner().map_err(|e| e.into_error())?;
            tmp.persist(path).map_err(|e| e.error)?;
            debug!(path = %path.display(), "output persisted");
            Ok(value)
        }
        _ => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            let value = write(&mut writer)?;
            writer.flush()?;
            Ok(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_stdio() {
        assert!(is_stdio(None));
        assert!(is_stdio(Some(Path::new("-"))));
        assert!(!is_stdio(Some(Path::new("out.csv"))));
    }
}
