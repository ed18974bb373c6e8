//! Cell-related types and utilities
//!
//! This module contains:
//! - [`Value`] - The evaluated result of a cell's formula
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellRange`] - A rectangular block of cells (e.g., "A1:B10")
//! - [`FormulaTriple`] - A cell's coordinates and formula as persisted

mod address;
mod triple;
mod value;

pub use address::{CellAddress, CellRange, CellRangeIterator};
pub use triple::FormulaTriple;
pub use value::{HorizontalAlignment, Value};
