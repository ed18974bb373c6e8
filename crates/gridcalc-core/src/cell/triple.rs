//! Persistence triples

/// One non-empty cell as stored on disk: its coordinates and formula text
///
/// Coordinates are 0-based. Loading a grid replays these through formula
/// assignment; saving enumerates them row by row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormulaTriple {
    pub row: u16,
    pub column: u16,
    pub formula: String,
}

impl FormulaTriple {
    /// Create a new triple
    pub fn new<S: Into<String>>(row: u16, column: u16, formula: S) -> Self {
        Self {
            row,
            column,
            formula: formula.into(),
        }
    }
}

impl<S: Into<String>> From<(u16, u16, S)> for FormulaTriple {
    fn from((row, column, formula): (u16, u16, S)) -> Self {
        Self::new(row, column, formula)
    }
}
