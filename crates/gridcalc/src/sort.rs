//! Sorting the rows of a range by formula text

use std::cmp::Ordering;

use crate::grid::Grid;
use gridcalc_core::{CellAddress, CellRange, Error, Result};
use log::debug;

/// One sort criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    /// Column offset within the sorted range
    pub column: u16,
    /// Sort direction
    pub ascending: bool,
}

impl SortKey {
    /// Ascending key on a column offset
    pub fn ascending(column: u16) -> Self {
        Self {
            column,
            ascending: true,
        }
    }

    /// Descending key on a column offset
    pub fn descending(column: u16) -> Self {
        Self {
            column,
            ascending: false,
        }
    }
}

/// Ordered sort criteria; later keys only break ties left by earlier ones
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortKeys {
    keys: Vec<SortKey>,
}

impl SortKeys {
    /// Start with a single key
    pub fn by(key: SortKey) -> Self {
        Self { keys: vec![key] }
    }

    /// Add a tie-breaking key
    pub fn then_by(mut self, key: SortKey) -> Self {
        self.keys.push(key);
        self
    }

    /// The keys in priority order
    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// Compare two rows of formula text
    ///
    /// The first key whose fields differ decides. Rows equal under every key
    /// compare equal.
    pub fn compare<S: AsRef<str>>(&self, a: &[S], b: &[S]) -> Ordering {
        for key in &self.keys {
            let column = key.column as usize;
            let left = a.get(column).map_or("", AsRef::as_ref);
            let right = b.get(column).map_or("", AsRef::as_ref);
            let ordering = left.cmp(right);
            if ordering != Ordering::Equal {
                return if key.ascending {
                    ordering
                } else {
                    ordering.reverse()
                };
            }
        }
        Ordering::Equal
    }
}

impl Grid {
    /// Reorder the rows of `range` by the formula text in its key columns
    ///
    /// The sort is stable and only moves cells within the range.
    pub fn sort_range(&mut self, range: &CellRange, keys: &SortKeys) -> Result<()> {
        self.check_bounds(range.end)?;

        let width = range.col_count();
        if let Some(key) = keys.keys().iter().find(|key| key.column >= width) {
            return Err(Error::SortKeyOutOfRange {
                column: key.column,
                width,
            });
        }

        let mut rows: Vec<Vec<String>> = (range.start.row..=range.end.row)
            .map(|row| {
                (range.start.col..=range.end.col)
                    .map(|col| self.formula(CellAddress::new(row, col)).to_string())
                    .collect()
            })
            .collect();

        rows.sort_by(|a, b| keys.compare(a.as_slice(), b.as_slice()));

        let mut edited = Vec::with_capacity(range.cell_count() as usize);
        for (row, fields) in (range.start.row..).zip(rows) {
            for (col, formula) in (range.start.col..).zip(fields) {
                let addr = CellAddress::new(row, col);
                if self.formula(addr) != formula {
                    self.write_formula(addr, formula);
                    edited.push(addr);
                }
            }
        }

        debug!("Sorted {} ({} cells moved)", range, edited.len());
        self.after_edit(&edited);
        Ok(())
    }
}
