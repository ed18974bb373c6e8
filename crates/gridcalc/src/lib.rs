//! # gridcalc
//!
//! A spreadsheet grid whose cells hold formula text and compute their values
//! lazily.
//!
//! ## Features
//!
//! - Arithmetic formulas over numbers and A1-style cell references
//! - Per-cell value caching with explicit or automatic recalculation
//! - Circular references and division by zero evaluate to an invalid value
//!   instead of failing
//! - Clipboard text, range sorting and text search
//! - Loading and saving grids as `(row, column, formula)` triples
//!
//! ## Example
//!
//! ```rust
//! use gridcalc::prelude::*;
//!
//! let mut grid = Grid::default();
//! let a1 = CellAddress::parse("A1").unwrap();
//! let b1 = CellAddress::parse("B1").unwrap();
//!
//! grid.set_formula(a1, "4").unwrap();
//! grid.set_formula(b1, "=A1*(2+1)").unwrap();
//!
//! assert_eq!(grid.value(b1), Some(Value::Number(12.0)));
//! assert_eq!(grid.display_text(b1), "12");
//! ```

pub mod calculation;
pub mod cell;
pub mod clipboard;
pub mod find;
pub mod grid;
pub mod prelude;
pub mod sort;

pub use calculation::{CalculationStats, RecalcPolicy};
pub use cell::{CacheState, CachedValue, Cell};
pub use find::CaseSensitivity;
pub use grid::{Grid, GridOptions, LoadStats};
pub use sort::{SortKey, SortKeys};

// Re-export core types
pub use gridcalc_core::{
    CellAddress, CellRange, Error, FormulaTriple, HorizontalAlignment, Result, Value,
    DEFAULT_COLUMNS, DEFAULT_ROWS,
};

// Re-export formula types
pub use gridcalc_formula::{
    classify, evaluate, parse_formula, CellContent, EvaluationContext, FormulaError, FormulaExpr,
    FormulaResult,
};

// Re-export I/O types
pub use gridcalc_csv::{
    CsvError, LineTerminator, TripleReadOptions, TripleReader, TripleWriteOptions, TripleWriter,
};

use std::path::Path;

/// Extension trait for Grid to add file I/O
pub trait GridExt: Sized {
    /// Load a triple file into a default-sized grid
    fn open<P: AsRef<Path>>(path: P) -> Result<Self>;

    /// Load a triple file into a grid built from `options`
    fn open_with<P: AsRef<Path>>(
        path: P,
        options: GridOptions,
        read_options: &TripleReadOptions,
    ) -> Result<Self>;

    /// Save every non-empty cell as a triple file
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    /// Save with custom write options
    fn save_with<P: AsRef<Path>>(&self, path: P, options: &TripleWriteOptions) -> Result<()>;
}

impl GridExt for Grid {
    fn open<P: AsRef<Path>>(path: P) -> Result<Grid> {
        Self::open_with(path, GridOptions::default(), &TripleReadOptions::default())
    }

    fn open_with<P: AsRef<Path>>(
        path: P,
        options: GridOptions,
        read_options: &TripleReadOptions,
    ) -> Result<Grid> {
        let path = path.as_ref();
        let triples = TripleReader::read_file(path, read_options)
            .map_err(|e| Error::other(format!("{}: {}", path.display(), e)))?;

        let mut grid = Grid::new(options)?;
        grid.load_triples(triples);
        Ok(grid)
    }

    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.save_with(path, &TripleWriteOptions::default())
    }

    fn save_with<P: AsRef<Path>>(&self, path: P, options: &TripleWriteOptions) -> Result<()> {
        let path = path.as_ref();
        TripleWriter::write_file(&self.triples(), path, options)
            .map_err(|e| Error::other(format!("{}: {}", path.display(), e)))
    }
}
