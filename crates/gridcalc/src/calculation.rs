//! Grid recalculation
//!
//! Values are computed lazily: a cell is evaluated the first time it is read
//! after being marked dirty. What an edit marks dirty is set by the grid's
//! [`RecalcPolicy`]. The default only dirties the edited cell, so cells that
//! read it keep showing their old value until [`Grid::recalculate`] runs.
//!
//! # Example
//!
//! ```rust
//! use gridcalc::prelude::*;
//!
//! let mut grid = Grid::default();
//! grid.set_formula(CellAddress::parse("A1").unwrap(), "10").unwrap();
//! grid.set_formula(CellAddress::parse("A2").unwrap(), "=A1*2").unwrap();
//!
//! let stats = grid.recalculate();
//! assert_eq!(stats.cells_calculated, 2);
//! ```

use crate::grid::Grid;
use gridcalc_core::{CellAddress, Value};
use gridcalc_formula::classify;
use log::debug;

/// What an edit invalidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RecalcPolicy {
    /// Only the edited cell; dependents stay stale until a full recalculation
    #[default]
    Manual,
    /// Every cell is recalculated after each edit
    Automatic,
    /// The edited cell and everything that reads it, directly or indirectly
    Dependents,
}

/// Statistics from a recalculation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalculationStats {
    /// Number of non-empty cells
    pub cells: usize,
    /// Number of formula evaluations the run performed
    pub cells_calculated: usize,
    /// Number of cells whose value came out invalid
    pub invalid: usize,
    /// Number of times evaluation ran into a cell it was already computing
    pub circular_references: usize,
}

impl Grid {
    /// The active recalculation policy
    pub fn policy(&self) -> RecalcPolicy {
        self.policy
    }

    /// Change the recalculation policy
    ///
    /// Switching to [`RecalcPolicy::Automatic`] brings every cell up to date;
    /// switching to [`RecalcPolicy::Dependents`] builds the dependency graph
    /// from the current formulas.
    pub fn set_policy(&mut self, policy: RecalcPolicy) {
        if self.policy == policy {
            return;
        }
        self.policy = policy;

        match policy {
            RecalcPolicy::Manual => self.dependencies.clear(),
            RecalcPolicy::Automatic => {
                self.dependencies.clear();
                self.recalculate();
            }
            RecalcPolicy::Dependents => self.rebuild_dependencies(),
        }
    }

    /// Mark every cell dirty, then evaluate each one in row-major order
    ///
    /// Afterwards every cell's cached value reflects the current formulas.
    pub fn recalculate(&mut self) -> CalculationStats {
        for cell in self.cells.values_mut() {
            cell.invalidate();
        }

        let evaluations_before = self.evaluations;
        let circular_before = self.circular_hits;
        let addresses: Vec<CellAddress> = self.cells.keys().copied().collect();

        let mut stats = CalculationStats {
            cells: addresses.len(),
            ..Default::default()
        };

        for addr in addresses {
            if let Some(Value::Invalid) = self.value(addr) {
                stats.invalid += 1;
            }
        }

        stats.cells_calculated = (self.evaluations - evaluations_before) as usize;
        stats.circular_references = (self.circular_hits - circular_before) as usize;

        debug!(
            "Recalculated {} cells ({} evaluations, {} invalid, {} circular)",
            stats.cells, stats.cells_calculated, stats.invalid, stats.circular_references
        );
        stats
    }

    /// Rebuild the dependency graph from every cell's formula
    pub fn rebuild_dependencies(&mut self) {
        self.dependencies.clear();
        for (addr, cell) in &self.cells {
            self.dependencies
                .set_precedents(*addr, classify(cell.formula()).references());
        }
    }

    /// Apply the recalculation policy to a set of edited addresses
    ///
    /// The edited cells themselves are already dirty.
    pub(crate) fn after_edit(&mut self, edited: &[CellAddress]) {
        match self.policy {
            RecalcPolicy::Manual => {}
            RecalcPolicy::Automatic => {
                self.recalculate();
            }
            RecalcPolicy::Dependents => {
                let mut stale = Vec::new();
                for addr in edited {
                    stale.extend(self.dependencies.dependents_closure(*addr));
                }
                for addr in stale {
                    self.invalidate(addr);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridOptions;
    use pretty_assertions::assert_eq;

    fn addr(a1: &str) -> CellAddress {
        CellAddress::parse(a1).unwrap()
    }

    fn grid(policy: RecalcPolicy) -> Grid {
        Grid::new(GridOptions {
            policy,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_manual_leaves_dependents_stale() {
        let mut grid = grid(RecalcPolicy::Manual);
        grid.set_formula(addr("A1"), "1").unwrap();
        grid.set_formula(addr("B1"), "=A1+1").unwrap();
        assert_eq!(grid.value(addr("B1")), Some(Value::Number(2.0)));

        grid.set_formula(addr("A1"), "5").unwrap();
        assert_eq!(grid.value(addr("A1")), Some(Value::Number(5.0)));
        assert_eq!(grid.value(addr("B1")), Some(Value::Number(2.0)));

        grid.recalculate();
        assert_eq!(grid.value(addr("B1")), Some(Value::Number(6.0)));
    }

    #[test]
    fn test_automatic_keeps_everything_fresh() {
        let mut grid = grid(RecalcPolicy::Automatic);
        grid.set_formula(addr("A1"), "1").unwrap();
        grid.set_formula(addr("B1"), "=A1+1").unwrap();
        grid.set_formula(addr("C1"), "=B1*10").unwrap();

        grid.set_formula(addr("A1"), "2").unwrap();
        assert!(grid.cells().all(|(_, cell)| !cell.is_dirty()));
        assert_eq!(grid.value(addr("C1")), Some(Value::Number(30.0)));
    }

    #[test]
    fn test_dependents_invalidates_transitively() {
        let mut grid = grid(RecalcPolicy::Dependents);
        grid.set_formula(addr("A1"), "1").unwrap();
        grid.set_formula(addr("B1"), "=A1+1").unwrap();
        grid.set_formula(addr("C1"), "=B1*10").unwrap();
        grid.set_formula(addr("D1"), "=7").unwrap();
        grid.recalculate();

        grid.set_formula(addr("A1"), "2").unwrap();
        assert!(grid.cell(addr("B1")).unwrap().is_dirty());
        assert!(grid.cell(addr("C1")).unwrap().is_dirty());
        assert!(!grid.cell(addr("D1")).unwrap().is_dirty());
        assert_eq!(grid.value(addr("C1")), Some(Value::Number(30.0)));
    }

    #[test]
    fn test_switching_to_dependents_builds_graph() {
        let mut grid = grid(RecalcPolicy::Manual);
        grid.set_formula(addr("A1"), "1").unwrap();
        grid.set_formula(addr("A2"), "=A1").unwrap();
        grid.recalculate();

        grid.set_policy(RecalcPolicy::Dependents);
        grid.set_formula(addr("A1"), "3").unwrap();
        assert_eq!(grid.value(addr("A2")), Some(Value::Number(3.0)));
    }

    #[test]
    fn test_recalculate_stats() {
        let mut grid = grid(RecalcPolicy::Manual);
        grid.set_formula(addr("A1"), "=B1").unwrap();
        grid.set_formula(addr("B1"), "=A1").unwrap();
        grid.set_formula(addr("C1"), "4").unwrap();

        let stats = grid.recalculate();
        assert_eq!(stats.cells, 3);
        assert_eq!(stats.cells_calculated, 3);
        assert_eq!(stats.invalid, 2);
        assert_eq!(stats.circular_references, 1);
    }
}
