//! Row/column selection by range lists.

use tracing::debug;

use super::range::{RangeSet, Ranges};
use crate::error::ManipulateResult;
use crate::models::{column_count, Grid, Record};

/// Extracts the rows and columns selected by two range lists.
///
/// An empty [`RangeSet`] selects everything along its dimension. Order is
/// preserved and ragged rows stay ragged.
#[derive(Debug, Clone, Default)]
pub struct Slicer {
    pub rows: RangeSet,
    pub cols: RangeSet,
}

impl Slicer {
    pub fn new(rows: RangeSet, cols: RangeSet) -> Self {
        Self { rows, cols }
    }

    /// Parse both range lists. See [`RangeSet::parse`] for the grammar.
    pub fn parse(rows: &str, cols: &str) -> ManipulateResult<Self> {
        Ok(Self::new(RangeSet::parse(rows)?, RangeSet::parse(cols)?))
    }

    pub fn slice(&self, records: &[Record]) -> ManipulateResult<Grid> {
        let rows = selection(&self.rows, records.len())?;
        let cols = selection(&self.cols, column_count(records))?;

        let sliced: Grid = records
            .iter()
            .enumerate()
            .filter(|(i, _)| selected(rows.as_ref(), *i))
            .map(|(_, record)| {
                record
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| selected(cols.as_ref(), *j))
                    .map(|(_, cell)| cell.clone())
                    .collect()
            })
            .collect();

        debug!(
            rows = %self.rows,
            cols = %self.cols,
            selected = sliced.len(),
            "sliced grid"
        );
        Ok(sliced)
    }
}

fn selection(set: &RangeSet, max: usize) -> ManipulateResult<Option<Ranges>> {
    if set.is_empty() {
        Ok(None)
    } else {
        set.normalize(max).map(Some)
    }
}

fn selected(ranges: Option<&Ranges>, i: usize) -> bool {
    ranges.map_or(true, |r| r.includes(i))
}
