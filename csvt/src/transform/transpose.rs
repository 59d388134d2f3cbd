//! Swap rows and columns of a grid.

use tracing::debug;

use crate::error::{ManipulateError, ManipulateResult};
use crate::models::{cell_at, column_count, Grid, Record};

/// Transposes grids, right-padding short rows with empty cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct Transposer {
    /// Reject grids whose non-empty records differ in length.
    pub length_checked: bool,
}

impl Transposer {
    pub fn new(length_checked: bool) -> Self {
        Self { length_checked }
    }

    /// Output has one row per input column and one column per input row.
    /// Cells missing from ragged input come out as `""`.
    pub fn transpose(&self, records: &[Record]) -> ManipulateResult<Grid> {
        if self.length_checked {
            check_lengths(records)?;
        }

        let old_column_n = column_count(records);
        let old_row_n = records.len();
        let transposed: Grid = (0..old_column_n)
            .map(|i| {
                (0..old_row_n)
                    .map(|j| cell_at(records, j, i).to_string())
                    .collect()
            })
            .collect();

        debug!(
            rows = old_row_n,
            columns = old_column_n,
            "transposed grid"
        );
        Ok(transposed)
    }
}

fn check_lengths(records: &[Record]) -> ManipulateResult<()> {
    let mut expected: Option<usize> = None;
    for (row, record) in records.iter().enumerate() {
        if record.is_empty() {
            continue;
        }
        match expected {
            None => expected = Some(record.len()),
            Some(n) if n != record.len() => {
                return Err(ManipulateError::Shape {
                    row,
                    expected: n,
                    found: record.len(),
                })
            }
            Some(_) => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::grid_of;

    fn records01() -> Grid {
        grid_of(&[
            &["A", "B", "C"],
            &["1", "2", "3"],
            &["4", "5", "6"],
            &["7", "8", "9"],
        ])
    }

    #[test]
    fn test_transpose_rectangular() {
        let transposed = Transposer::default().transpose(&records01()).unwrap();
        assert_eq!(
            transposed,
            grid_of(&[
                &["A", "1", "4", "7"],
                &["B", "2", "5", "8"],
                &["C", "3", "6", "9"],
            ])
        );
    }

    #[test]
    fn test_transpose_is_involution_on_rectangles() {
        let transposer = Transposer::new(true);
        let once = transposer.transpose(&records01()).unwrap();
        let twice = transposer.transpose(&once).unwrap();
        assert_eq!(twice, records01());
    }

    #[test]
    fn test_transpose_pads_ragged() {
        let records = grid_of(&[&["a"], &["b", "c", "d"], &["e", "f"]]);
        let transposed = Transposer::default().transpose(&records).unwrap();
        assert_eq!(
            transposed,
            grid_of(&[&["a", "b", "e"], &["", "c", "f"], &["", "d", ""]])
        );
    }

    #[test]
    fn test_double_transpose_of_ragged_keeps_padding() {
        let records = grid_of(&[&["a"], &["b", "c", "d"], &["e", "f"]]);
        let transposer = Transposer::default();
        let twice = transposer
            .transpose(&transposer.transpose(&records).unwrap())
            .unwrap();
        assert_ne!(twice, records);
        assert_eq!(
            twice,
            grid_of(&[&["a", "", ""], &["b", "c", "d"], &["e", "f", ""]])
        );
    }

    #[test]
    fn test_transpose_length_checked_rejects_ragged() {
        let records = grid_of(&[&["a"], &["b", "c", "d"], &["e", "f"]]);
        let err = Transposer::new(true).transpose(&records).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
    }

    #[test]
    fn test_transpose_length_checked_ignores_empty_records() {
        let records = vec![
            vec!["a".to_string(), "b".to_string()],
            Vec::new(),
            vec!["c".to_string(), "d".to_string()],
        ];
        let transposed = Transposer::new(true).transpose(&records).unwrap();
        assert_eq!(transposed, grid_of(&[&["a", "", "c"], &["b", "", "d"]]));
    }

    #[test]
    fn test_transpose_empty() {
        assert!(Transposer::default().transpose(&[]).unwrap().is_empty());
    }
}
