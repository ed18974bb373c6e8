//! # gridcalc-csv
//!
//! Reads and writes `(row, column, formula)` triples as delimited text.
//!
//! Each record holds a 0-based row, a 0-based column and the cell's raw
//! formula text. Only non-empty cells are written.

mod error;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{LineTerminator, TripleReadOptions, TripleWriteOptions};
pub use reader::TripleReader;
pub use writer::TripleWriter;
