//! # gridcalc-core
//!
//! Core data structures for the gridcalc spreadsheet engine.
//!
//! This crate provides the fundamental types used throughout gridcalc:
//! - [`Value`] - The result of evaluating a formula (number, text or invalid)
//! - [`CellAddress`] and [`CellRange`] - Cell addressing and ranges
//! - [`FormulaTriple`] - The `(row, column, formula)` unit of persistence
//! - [`Error`] - Errors raised by grid-level operations
//!
//! ## Example
//!
//! ```rust
//! use gridcalc_core::{CellAddress, Value};
//!
//! let addr = CellAddress::parse("B3").unwrap();
//! assert_eq!(addr.row, 2);
//! assert_eq!(addr.col, 1);
//!
//! let sum = Value::Number(1.5) + Value::Number(2.0);
//! assert_eq!(sum, Value::Number(3.5));
//! assert!((Value::Number(1.0) / Value::Number(0.0)).is_invalid());
//! ```

pub mod cell;
pub mod error;

// Re-exports for convenience
pub use cell::{
    CellAddress, CellRange, CellRangeIterator, FormulaTriple, HorizontalAlignment, Value,
};
pub use error::{Error, Result};

/// Default number of rows in a grid
pub const DEFAULT_ROWS: u32 = 999;

/// Default number of columns in a grid
pub const DEFAULT_COLUMNS: u16 = 26;

/// Highest row number (1-based) a formula reference can spell
pub const MAX_REFERENCE_ROWS: u32 = 999;

/// Number of columns a formula reference can address (`A`..=`Z`)
pub const MAX_REFERENCE_COLUMNS: u16 = 26;
