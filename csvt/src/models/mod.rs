//! Table data model shared by the codecs and the manipulators.
//!
//! Cells are always text. Rows may be ragged: reading past the end of a
//! short record yields an empty cell.

use std::collections::BTreeMap;

/// A single text value.
pub type Cell = String;

/// One row of cells.
pub type Record = Vec<Cell>;

/// An ordered sequence of records. Row 0 may be a header.
pub type Grid = Vec<Record>;

/// Ordered list of column names.
pub type Header = Vec<String>;

/// A keyed record: column name to cell.
pub type Item = BTreeMap<String, Cell>;

/// Width of a possibly ragged grid (length of its longest record).
pub fn column_count(grid: &[Record]) -> usize {
    grid.iter().map(Vec::len).max().unwrap_or(0)
}

/// Cell at `row`/`col`, or `""` when the position lies outside the record.
pub fn cell_at(grid: &[Record], row: usize, col: usize) -> &str {
    grid.get(row)
        .and_then(|record| record.get(col))
        .map(String::as_str)
        .unwrap_or("")
}

/// Build a grid from string slices.
pub fn grid_of(rows: &[&[&str]]) -> Grid {
    rows.iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_count_ragged() {
        let grid = grid_of(&[&["a"], &["b", "c", "d"], &["e", "f"]]);
        assert_eq!(column_count(&grid), 3);
        assert_eq!(column_count(&[]), 0);
    }

    #[test]
    fn test_cell_at_pads_with_empty() {
        let grid = grid_of(&[&["a"], &["b", "c"]]);
        assert_eq!(cell_at(&grid, 1, 1), "c");
        assert_eq!(cell_at(&grid, 0, 1), "");
        assert_eq!(cell_at(&grid, 5, 0), "");
    }
}
