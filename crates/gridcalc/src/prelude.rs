//! Prelude module - common imports for gridcalc users
//!
//! ```rust
//! use gridcalc::prelude::*;
//! ```

pub use crate::{
    // Calculation types
    CalculationStats,
    CaseSensitivity,
    CellAddress,
    CellRange,
    // Error types
    Error,
    FormulaTriple,
    // Main types
    Grid,
    // Extension traits
    GridExt,
    GridOptions,
    HorizontalAlignment,
    RecalcPolicy,
    Result,
    SortKey,
    SortKeys,
    Value,
};
