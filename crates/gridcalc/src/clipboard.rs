//! Clipboard text and range edits
//!
//! Ranges travel as plain text: formulas separated by tabs within a row and
//! by newlines between rows.

use crate::grid::Grid;
use gridcalc_core::{CellAddress, CellRange, Error, Result};

const COLUMN_SEPARATOR: char = '\t';
const ROW_SEPARATOR: char = '\n';

impl Grid {
    /// Formulas in `range` as clipboard text
    ///
    /// Empty cells contribute empty fields.
    pub fn copy_range(&self, range: &CellRange) -> String {
        let mut text = String::new();
        for row in range.start.row..=range.end.row {
            if row > range.start.row {
                text.push(ROW_SEPARATOR);
            }
            for col in range.start.col..=range.end.col {
                if col > range.start.col {
                    text.push(COLUMN_SEPARATOR);
                }
                text.push_str(self.formula(CellAddress::new(row, col)));
            }
        }
        text
    }

    /// Write clipboard text into the grid starting at `range`'s top-left cell
    ///
    /// The text must have the same shape as `range` unless `range` is a
    /// single cell, in which case the text extends from it as far as it
    /// needs. Cells that would land outside the grid are dropped.
    pub fn paste_text(&mut self, range: &CellRange, text: &str) -> Result<()> {
        let rows: Vec<Vec<&str>> = text
            .split(ROW_SEPARATOR)
            .map(|line| {
                line.strip_suffix('\r')
                    .unwrap_or(line)
                    .split(COLUMN_SEPARATOR)
                    .collect()
            })
            .collect();
        let text_rows = rows.len();
        let text_columns = rows.first().map_or(0, Vec::len);

        if !range.is_single()
            && (range.row_count() as usize != text_rows
                || range.col_count() as usize != text_columns)
        {
            return Err(Error::PasteSizeMismatch {
                text_rows,
                text_columns,
                range_rows: range.row_count(),
                range_columns: range.col_count(),
            });
        }

        let mut edited = Vec::new();
        for (i, fields) in rows.iter().enumerate() {
            for j in 0..text_columns {
                let (Ok(row_offset), Ok(col_offset)) = (u32::try_from(i), u16::try_from(j))
                else {
                    continue;
                };
                let (Some(row), Some(col)) = (
                    range.start.row.checked_add(row_offset),
                    range.start.col.checked_add(col_offset),
                ) else {
                    continue;
                };
                let addr = CellAddress::new(row, col);
                if !self.in_bounds(addr) {
                    continue;
                }
                let formula = fields.get(j).copied().unwrap_or_default();
                self.write_formula(addr, formula.to_string());
                edited.push(addr);
            }
        }

        self.after_edit(&edited);
        Ok(())
    }

    /// Copy `range` to clipboard text, then delete it
    pub fn cut_range(&mut self, range: &CellRange) -> String {
        let text = self.copy_range(range);
        self.delete_range(range);
        text
    }

    /// Drop every cell in `range`
    pub fn delete_range(&mut self, range: &CellRange) {
        let doomed: Vec<CellAddress> = self
            .cells
            .range(range.start..=range.end)
            .map(|(addr, _)| *addr)
            .filter(|addr| range.contains(addr))
            .collect();
        if doomed.is_empty() {
            return;
        }

        for addr in &doomed {
            self.remove_slot(*addr);
        }
        self.after_edit(&doomed);
    }
}
