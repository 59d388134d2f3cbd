//! Keyed items back to a grid with a synthesized header row.

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::{ManipulateError, ManipulateResult};
use crate::models::{Grid, Header, Item, Record};

/// Turns items into records ordered by a header.
///
/// Unless a header is supplied, it is synthesized from the items as the
/// sorted set of their keys, so output does not depend on key iteration
/// order.
#[derive(Debug, Clone, Default)]
pub struct Unmapper {
    /// Require every key to appear in the first item, and every item to
    /// carry exactly the header's keys.
    pub key_checked: bool,
    header: Option<Header>,
}

impl Unmapper {
    pub fn new(key_checked: bool) -> Self {
        Self {
            key_checked,
            header: None,
        }
    }

    /// Use `header` instead of synthesizing one.
    pub fn with_header(mut self, header: Header) -> Self {
        self.header = Some(header);
        self
    }

    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    /// Collect the keys of all items, sorted ascending.
    ///
    /// Under key checking, a key first seen after the first item is an error.
    pub fn make_header(&self, items: &[Item]) -> ManipulateResult<Header> {
        let mut keys: BTreeSet<&str> = BTreeSet::new();
        for (i, item) in items.iter().enumerate() {
            for key in item.keys() {
                if keys.insert(key.as_str()) && self.key_checked && i > 0 {
                    return Err(ManipulateError::InvalidKey(key.clone()));
                }
            }
        }
        Ok(keys.into_iter().map(str::to_string).collect())
    }

    pub fn prepare_header(&mut self, items: &[Item]) -> ManipulateResult<()> {
        self.header = Some(self.make_header(items)?);
        Ok(())
    }

    /// Lay out one item in header order. Without a header, one is
    /// synthesized from this item alone.
    pub fn unmap(&mut self, item: &Item) -> ManipulateResult<Record> {
        if self.header.is_none() {
            self.prepare_header(std::slice::from_ref(item))?;
        }
        let header = self.header.as_deref().unwrap_or_default();

        if self.key_checked && header.len() != item.len() {
            if let Some(key) = item.keys().find(|key| !header.contains(key)) {
                return Err(ManipulateError::InvalidKey(key.clone()));
            }
        }

        header
            .iter()
            .map(|key| match item.get(key) {
                Some(value) => Ok(value.clone()),
                None if self.key_checked => Err(ManipulateError::MissingEntry(key.clone())),
                None => Ok(String::new()),
            })
            .collect()
    }

    /// Header row followed by one record per item.
    pub fn unmap_all(&mut self, items: &[Item]) -> ManipulateResult<Grid> {
        if self.header.is_none() {
            self.prepare_header(items)?;
        }

        let mut records = Vec::with_capacity(items.len() + 1);
        records.push(self.header.clone().unwrap_or_default());
        for item in items {
            records.push(self.unmap(item)?);
        }
        debug!(
            columns = records[0].len(),
            items = items.len(),
            "unmapped items to grid"
        );
        Ok(records)
    }
}
