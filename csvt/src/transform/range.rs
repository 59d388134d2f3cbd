//! Range-list mini-language used to select rows and columns.
//!
//! A range list is a comma-separated sequence of tokens:
//!
//! ```text
//! 3        single index            [3, 4)
//! 2:5      explicit bounds         [2, 5)
//! :4       open begin (0)          [0, 4)
//! 1:       open end                [1, max)
//! -2:      relative to the end     [max-2, max)
//! -1       last element            [max-1, max)
//! ```
//!
//! Parsing never needs the size of the grid. Negative bounds stay
//! unresolved in a [`RangeSet`] until [`RangeSet::normalize`] is called with
//! the concrete size, which yields sorted, merged [`Ranges`].

use std::fmt;
use std::str::FromStr;

use tracing::trace;

use crate::error::{ManipulateError, ManipulateResult};

/// End of a parsed span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Explicit end, possibly negative.
    At(i64),
    /// No end given: extends to the size of the dimension.
    Open,
}

/// One parsed token, not yet resolved against a size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSpec {
    /// `N`: just that element. `-N` counts from the end.
    Index(i64),
    /// `A:B`, with an empty `A` parsed as `0`.
    Span { begin: i64, end: Bound },
}

impl RangeSpec {
    fn parse(token: &str) -> ManipulateResult<Self> {
        match token.split_once(':') {
            None => Ok(RangeSpec::Index(parse_index(token, token)?)),
            Some((begin, end)) => {
                let begin = if begin.is_empty() {
                    0
                } else {
                    parse_index(begin, token)?
                };
                let end = if end.is_empty() {
                    Bound::Open
                } else {
                    Bound::At(parse_index(end, token)?)
                };
                Ok(RangeSpec::Span { begin, end })
            }
        }
    }

    /// Resolve to signed `(begin, end)` for a dimension of `max` elements.
    fn resolve(self, max: i64) -> (i64, i64) {
        match self {
            RangeSpec::Index(i) => {
                let begin = relative(i, max);
                (begin, begin.saturating_add(1))
            }
            RangeSpec::Span { begin, end } => {
                let begin = relative(begin, max);
                let end = match end {
                    Bound::At(end) => relative(end, max),
                    Bound::Open => max.max(begin),
                };
                (begin, end)
            }
        }
    }
}

impl fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeSpec::Index(i) => write!(f, "{}", i),
            RangeSpec::Span { begin, end: Bound::At(end) } => write!(f, "{}:{}", begin, end),
            RangeSpec::Span { begin, end: Bound::Open } => write!(f, "{}:", begin),
        }
    }
}

fn parse_index(s: &str, token: &str) -> ManipulateResult<i64> {
    s.parse::<i64>().map_err(|source| ManipulateError::Parse {
        token: token.to_string(),
        source,
    })
}

fn relative(i: i64, max: i64) -> i64 {
    if i < 0 {
        max.saturating_add(i)
    } else {
        i
    }
}

fn to_index(i: i64) -> usize {
    usize::try_from(i.max(0)).unwrap_or(usize::MAX)
}

/// Parsed, unresolved range list.
///
/// An empty set means "no restriction"; callers decide what that selects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeSet {
    specs: Vec<RangeSpec>,
}

impl RangeSet {
    /// Parse a comma-separated range list. Whitespace around each token is
    /// ignored; an empty (or blank) string gives an empty set.
    pub fn parse(s: &str) -> ManipulateResult<Self> {
        if s.trim().is_empty() {
            return Ok(Self::default());
        }
        let specs = s
            .split(',')
            .map(|token| RangeSpec::parse(token.trim()))
            .collect::<ManipulateResult<Vec<_>>>()?;
        Ok(Self { specs })
    }

    pub fn from_specs(specs: Vec<RangeSpec>) -> Self {
        Self { specs }
    }

    pub fn specs(&self) -> &[RangeSpec] {
        &self.specs
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Resolve every spec against `max`, then sort and merge.
    ///
    /// Negative bounds count back from `max`. A range whose begin lies after
    /// its end is an error. Overlapping and touching ranges are coalesced and
    /// empty ranges are dropped, so the result is strictly ascending with
    /// gaps between neighbours.
    pub fn normalize(&self, max: usize) -> ManipulateResult<Ranges> {
        let size = i64::try_from(max).unwrap_or(i64::MAX);
        let mut resolved = Vec::with_capacity(self.specs.len());
        for spec in &self.specs {
            let (begin, end) = spec.resolve(size);
            if begin > end {
                return Err(ManipulateError::Range { begin, end });
            }
            resolved.push(Range::new(to_index(begin), to_index(end)));
        }

        resolved.sort_by(|a, b| a.begin.cmp(&b.begin).then(b.end.cmp(&a.end)));

        let mut merged: Vec<Range> = Vec::with_capacity(resolved.len());
        for range in resolved.into_iter().filter(|r| !r.is_empty()) {
            match merged.last_mut() {
                Some(prev) if range.begin <= prev.end => prev.end = prev.end.max(range.end),
                _ => merged.push(range),
            }
        }
        trace!(specs = %self, max, ranges = merged.len(), "normalized range set");
        Ok(Ranges(merged))
    }
}

impl FromStr for RangeSet {
    type Err = ManipulateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, spec) in self.specs.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", spec)?;
        }
        Ok(())
    }
}

/// Resolved half-open interval `[begin, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub begin: usize,
    pub end: usize,
}

impl Range {
    pub fn new(begin: usize, end: usize) -> Self {
        Self { begin, end }
    }

    pub fn size(&self) -> usize {
        self.end.saturating_sub(self.begin)
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn includes(&self, i: usize) -> bool {
        self.begin <= i && i < self.end
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.begin, self.end)
    }
}

/// Normalized ranges: ascending, non-overlapping, non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ranges(Vec<Range>);

impl Ranges {
    pub fn includes(&self, i: usize) -> bool {
        self.0.iter().any(|r| r.includes(i))
    }

    pub fn as_slice(&self) -> &[Range] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
