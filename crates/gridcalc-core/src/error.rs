//! Error types for gridcalc-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in grid-level operations
///
/// Formula evaluation never produces one of these; a failed evaluation is a
/// [`Value::Invalid`](crate::Value::Invalid) instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Row or column outside the grid
    #[error("Cell ({row}, {col}) out of bounds (grid is {rows}x{columns})")]
    OutOfBounds {
        row: u32,
        col: u16,
        rows: u32,
        columns: u16,
    },

    /// A grid needs at least one row and one column
    #[error("Invalid grid dimensions: {rows}x{columns}")]
    InvalidDimensions { rows: u32, columns: u16 },

    /// Evaluation needs room for at least one level of references
    #[error("Reference depth limit must be at least 1")]
    InvalidDepthLimit,

    /// Pasted text does not fit the selected range
    #[error(
        "Paste area is {text_rows}x{text_columns} but the selection is {range_rows}x{range_columns}"
    )]
    PasteSizeMismatch {
        text_rows: usize,
        text_columns: usize,
        range_rows: u32,
        range_columns: u16,
    },

    /// Sort key refers to a column outside the sorted range
    #[error("Sort key column {column} is outside a range {width} columns wide")]
    SortKeyOutOfRange { column: u16, width: u16 },

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }
}
