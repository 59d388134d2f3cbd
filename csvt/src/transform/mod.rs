//! Grid manipulators.
//!
//! - `range`: the range-list mini-language and its normalization
//! - `transpose`: swap rows and columns
//! - `mapper` / `unmapper`: grid to keyed items and back
//! - `slicer`: select rows and columns by range lists
//!
//! Every manipulator is a small value type; stateful ones (mapper and
//! unmapper keep the header) should be constructed fresh per grid.

pub mod mapper;
pub mod range;
pub mod slicer;
pub mod transpose;
pub mod unmapper;

pub use mapper::{Mapped, Mapper};
pub use range::{Bound, Range, RangeSet, RangeSpec, Ranges};
pub use slicer::Slicer;
pub use transpose::Transposer;
pub use unmapper::Unmapper;
