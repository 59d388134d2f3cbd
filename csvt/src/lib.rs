//! # csvt - tabular record conversion and reshaping
//!
//! csvt converts tables between delimited text and JSON, and reshapes them
//! on the way: transpose, map rows to keyed objects, unmap objects back to
//! rows, and slice rows/columns with a small range language.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Input bytes │────▶│    Codec    │────▶│  Transform  │────▶│    Codec    │
//! │ (CSV/JSON)  │     │  (decode)   │     │ (by mode)   │     │  (encode)   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use csvt::{grid_of, Slicer, Transposer};
//!
//! let grid = grid_of(&[&["A", "B", "C"], &["1", "2", "3"], &["4", "5", "6"]]);
//!
//! let transposed = Transposer::default().transpose(&grid).unwrap();
//! assert_eq!(transposed[0], vec!["A", "1", "4"]);
//!
//! let sliced = Slicer::parse("1:", "-1").unwrap().slice(&grid).unwrap();
//! assert_eq!(sliced, vec![vec!["3"], vec!["6"]]);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Layered error types
//! - [`models`] - Grid, record and item types
//! - [`transform`] - Range language, transposer, mapper, unmapper, slicer
//! - [`codec`] - CSV/TSV/JSON/NDJSON/YAML/TOML reading and writing
//! - [`app`] - Mode dispatch between decoding and encoding
//! - [`config`] - Layered settings resolved into an application
//! - [`files`] - Standard streams and atomic file output
//! - [`logging`] - `tracing` subscriber setup

// Core modules
pub mod error;
pub mod models;

// Manipulation
pub mod transform;

// Formats
pub mod codec;

// Orchestration
pub mod app;
pub mod config;
pub mod files;
pub mod logging;

// =============================================================================
// Re-exports - Errors
// =============================================================================

pub use error::{
    AppError, AppResult, CodecError, CodecResult, ErrorKind, ManipulateError, ManipulateResult,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{cell_at, column_count, grid_of, Cell, Grid, Header, Item, Record};

// =============================================================================
// Re-exports - Manipulators
// =============================================================================

pub use transform::{
    Bound, Mapped, Mapper, Range, RangeSet, RangeSpec, Ranges, Slicer, Transposer, Unmapper,
};

// =============================================================================
// Re-exports - Application
// =============================================================================

pub use app::{Application, Mode, RunSummary};
pub use codec::Format;
pub use config::Config;
