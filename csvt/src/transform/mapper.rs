//! Grid to keyed items, using the first record as the header.

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::{ManipulateError, ManipulateResult};
use crate::models::{Header, Item, Record};

/// Outcome of feeding one record to a [`Mapper`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mapped {
    /// The record was captured as the header.
    Header,
    /// A body record zipped against the header.
    Body(Item),
}

/// Turns records into items keyed by the header.
///
/// The first record ever passed becomes the header; every later record is
/// zipped against it by position. Columns past the end of a short record
/// are absent from the item rather than set to `""`.
#[derive(Debug, Clone, Default)]
pub struct Mapper {
    /// Reject body records whose length differs from the header's, and
    /// headers that repeat a name.
    pub length_checked: bool,
    header: Option<Header>,
    row: usize,
}

impl Mapper {
    pub fn new(length_checked: bool) -> Self {
        Self {
            length_checked,
            ..Self::default()
        }
    }

    /// Header captured so far, if any.
    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    pub fn map(&mut self, record: &[String]) -> ManipulateResult<Mapped> {
        let row = self.row;
        self.row += 1;

        let header = match &self.header {
            Some(header) => header,
            None => {
                if self.length_checked {
                    check_unique(record)?;
                }
                self.header = Some(record.to_vec());
                return Ok(Mapped::Header);
            }
        };

        if self.length_checked && header.len() != record.len() {
            return Err(ManipulateError::Shape {
                row,
                expected: header.len(),
                found: record.len(),
            });
        }

        let item: Item = header
            .iter()
            .zip(record)
            .map(|(title, cell)| (title.clone(), cell.clone()))
            .collect();
        Ok(Mapped::Body(item))
    }

    /// Map a whole grid, starting from a fresh header. The header row itself
    /// produces no item.
    pub fn map_all(&mut self, records: &[Record]) -> ManipulateResult<Vec<Item>> {
        self.header = None;
        self.row = 0;

        let mut items = Vec::with_capacity(records.len().saturating_sub(1));
        for record in records {
            if let Mapped::Body(item) = self.map(record)? {
                items.push(item);
            }
        }
        debug!(
            columns = self.header.as_ref().map_or(0, Vec::len),
            items = items.len(),
            "mapped grid to items"
        );
        Ok(items)
    }
}

fn check_unique(header: &[String]) -> ManipulateResult<()> {
    let mut seen = BTreeSet::new();
    for title in header {
        if !seen.insert(title.as_str()) {
            return Err(ManipulateError::DuplicateKey(title.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::grid_of;

    fn item(pairs: &[(&str, &str)]) -> Item {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_map_all_simple() {
        let records = grid_of(&[&["A", "B", "C"], &["1", "2", "3"]]);
        let items = Mapper::default().map_all(&records).unwrap();
        assert_eq!(items, vec![item(&[("A", "1"), ("B", "2"), ("C", "3")])]);
    }

    #[test]
    fn test_map_first_record_is_header() {
        let mut mapper = Mapper::default();
        let header = vec!["a".to_string(), "b".to_string()];
        assert_eq!(mapper.map(&header).unwrap(), Mapped::Header);
        assert_eq!(mapper.header(), Some(header.as_slice()));

        let body = vec!["1".to_string(), "2".to_string()];
        assert_eq!(
            mapper.map(&body).unwrap(),
            Mapped::Body(item(&[("a", "1"), ("b", "2")]))
        );
    }

    #[test]
    fn test_map_short_record_omits_keys() {
        let records = grid_of(&[&["a"], &["b", "c", "d"], &["e", "f"]]);
        let items = Mapper::default().map_all(&records).unwrap();
        assert_eq!(items, vec![item(&[("a", "b")]), item(&[("a", "e")])]);

        let records = grid_of(&[&["a", "b", "c"], &["1"]]);
        let items = Mapper::default().map_all(&records).unwrap();
        assert_eq!(items, vec![item(&[("a", "1")])]);
        assert!(!items[0].contains_key("b"));
    }

    #[test]
    fn test_map_length_checked() {
        let records = grid_of(&[&["a", "b"], &["1", "2"], &["3"]]);
        let err = Mapper::new(true).map_all(&records).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn test_map_length_checked_rejects_duplicate_header() {
        let records = grid_of(&[&["a", "a"], &["1", "2"]]);
        let err = Mapper::new(true).map_all(&records).unwrap_err();
        assert_eq!(err.to_string(), "duplicate key: a");

        let items = Mapper::default().map_all(&records).unwrap();
        assert_eq!(items, vec![item(&[("a", "2")])]);
    }

    #[test]
    fn test_map_all_resets_header() {
        let mut mapper = Mapper::default();
        mapper.map_all(&grid_of(&[&["x"], &["1"]])).unwrap();
        let items = mapper.map_all(&grid_of(&[&["y"], &["2"]])).unwrap();
        assert_eq!(items, vec![item(&[("y", "2")])]);
    }

    #[test]
    fn test_map_all_empty_grid() {
        let mut mapper = Mapper::default();
        assert!(mapper.map_all(&[]).unwrap().is_empty());
        assert!(mapper.header().is_none());
    }
}
