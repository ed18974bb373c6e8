//! The cell grid
//!
//! A fixed-size, sparsely stored coordinate space of [`Cell`]s. The grid is
//! the lookup authority for formula references and the only place values
//! are computed: [`Grid::value`] evaluates a dirty cell, asking the grid in
//! turn for every cell its formula references, and caches the result.

use std::collections::BTreeMap;

use crate::calculation::RecalcPolicy;
use crate::cell::{CacheState, Cell};
use gridcalc_core::{
    CellAddress, Error, FormulaTriple, HorizontalAlignment, Result, Value,
    DEFAULT_COLUMNS, DEFAULT_ROWS,
};
use gridcalc_formula::{classify, DependencyGraph, EvaluationContext};
use log::{debug, warn};

/// Options for building a grid
#[derive(Debug, Clone)]
pub struct GridOptions {
    /// Number of rows (default: 999)
    pub rows: u32,
    /// Number of columns (default: 26)
    pub columns: u16,
    /// What an edit invalidates (default: only the edited cell)
    pub policy: RecalcPolicy,
    /// Deepest chain of nested cell references evaluated before giving up
    /// with an invalid value (default: 256)
    pub max_depth: usize,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            policy: RecalcPolicy::Manual,
            max_depth: 256,
        }
    }
}

/// Counts from loading a grid from triples
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Triples written into the grid
    pub loaded: usize,
    /// Triples outside the grid's dimensions
    pub skipped: usize,
}

/// A fixed-size grid of formula cells
///
/// Slots are stored sparsely; an absent slot behaves exactly like a cell
/// with an empty formula.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: u32,
    columns: u16,
    pub(crate) cells: BTreeMap<CellAddress, Cell>,
    pub(crate) policy: RecalcPolicy,
    max_depth: usize,
    pub(crate) dependencies: DependencyGraph,
    pub(crate) evaluations: u64,
    pub(crate) circular_hits: u64,
}

impl Grid {
    /// Create an empty grid
    pub fn new(options: GridOptions) -> Result<Self> {
        if options.rows == 0 || options.columns == 0 {
            return Err(Error::InvalidDimensions {
                rows: options.rows,
                columns: options.columns,
            });
        }
        if options.max_depth == 0 {
            return Err(Error::InvalidDepthLimit);
        }

        Ok(Self {
            rows: options.rows,
            columns: options.columns,
            cells: BTreeMap::new(),
            policy: options.policy,
            max_depth: options.max_depth,
            dependencies: DependencyGraph::new(),
            evaluations: 0,
            circular_hits: 0,
        })
    }

    /// Create an empty grid with default options and the given size
    pub fn with_size(rows: u32, columns: u16) -> Result<Self> {
        Self::new(GridOptions {
            rows,
            columns,
            ..Default::default()
        })
    }

    /// Number of rows
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns
    pub fn columns(&self) -> u16 {
        self.columns
    }

    /// Number of non-empty cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if no cell holds a formula
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of formula evaluations performed so far
    ///
    /// Reading a cell whose value is cached does not count.
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Check if an address lies inside the grid
    pub fn in_bounds(&self, addr: CellAddress) -> bool {
        addr.row < self.rows && addr.col < self.columns
    }

    /// Ensure an address lies inside the grid
    pub fn check_bounds(&self, addr: CellAddress) -> Result<()> {
        if self.in_bounds(addr) {
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                row: addr.row,
                col: addr.col,
                rows: self.rows,
                columns: self.columns,
            })
        }
    }

    // === Formula access ===

    /// Assign formula text to a cell
    ///
    /// Creates the cell if the slot was empty and marks it dirty. Empty text
    /// drops the slot. What else gets invalidated depends on the grid's
    /// [`RecalcPolicy`].
    pub fn set_formula<S: Into<String>>(&mut self, addr: CellAddress, formula: S) -> Result<()> {
        self.check_bounds(addr)?;
        self.write_formula(addr, formula.into());
        self.after_edit(&[addr]);
        Ok(())
    }

    /// The formula text at `addr`, empty when there is no cell
    pub fn formula(&self, addr: CellAddress) -> &str {
        self.cells.get(&addr).map_or("", |cell| cell.formula())
    }

    /// The cell at `addr`, if there is one
    pub fn cell(&self, addr: CellAddress) -> Option<&Cell> {
        self.cells.get(&addr)
    }

    /// Iterate over non-empty cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (CellAddress, &Cell)> + '_ {
        self.cells.iter().map(|(addr, cell)| (*addr, cell))
    }

    /// Mark one cell dirty without changing its formula
    ///
    /// Returns false when there is no cell at `addr`.
    pub fn invalidate(&mut self, addr: CellAddress) -> bool {
        match self.cells.get_mut(&addr) {
            Some(cell) => {
                cell.invalidate();
                true
            }
            None => false,
        }
    }

    /// Drop the cell at `addr`
    pub fn remove(&mut self, addr: CellAddress) -> Option<Cell> {
        let removed = self.remove_slot(addr);
        if removed.is_some() {
            self.after_edit(&[addr]);
        }
        removed
    }

    /// Drop every cell
    pub fn clear(&mut self) {
        self.cells.clear();
        self.dependencies.clear();
    }

    /// Write a formula without running the edit policy
    pub(crate) fn write_formula(&mut self, addr: CellAddress, formula: String) {
        if formula.is_empty() {
            self.remove_slot(addr);
            return;
        }

        if self.policy == RecalcPolicy::Dependents {
            self.dependencies
                .set_precedents(addr, classify(&formula).references());
        }

        match self.cells.get_mut(&addr) {
            Some(cell) => cell.set_formula(formula),
            None => {
                self.cells.insert(addr, Cell::new(formula));
            }
        }
    }

    pub(crate) fn remove_slot(&mut self, addr: CellAddress) -> Option<Cell> {
        self.dependencies.clear_precedents(addr);
        self.cells.remove(&addr)
    }

    // === Values ===

    /// The value of the cell at `addr`
    ///
    /// `None` when the slot is empty or outside the grid. A dirty cell is
    /// evaluated (recursively evaluating whatever it references) and its
    /// result cached; a clean cell answers from its cache.
    pub fn value(&mut self, addr: CellAddress) -> Option<Value> {
        if !self.in_bounds(addr) || !self.cells.contains_key(&addr) {
            return None;
        }
        Some(self.compute(addr, 0))
    }

    /// Text shown for a cell: empty for no cell, `####` for an invalid value
    pub fn display_text(&mut self, addr: CellAddress) -> String {
        self.value(addr).map(|v| v.to_string()).unwrap_or_default()
    }

    /// Alignment of the cell's value, `None` for no cell
    pub fn alignment(&mut self, addr: CellAddress) -> Option<HorizontalAlignment> {
        self.value(addr).map(|v| v.alignment())
    }

    /// Resolve a cell for evaluation, `depth` references below the cell
    /// that started the read
    fn compute(&mut self, addr: CellAddress, depth: usize) -> Value {
        let formula = match self.cells.get(&addr) {
            None => return Value::Number(0.0),
            Some(cell) => match cell.cache().state() {
                CacheState::Fresh(value) => return value.clone(),
                CacheState::InFlight => {
                    warn!("Circular reference through {}", addr);
                    self.circular_hits += 1;
                    return Value::Invalid;
                }
                CacheState::Dirty => cell.formula().to_string(),
            },
        };

        if depth >= self.max_depth {
            warn!(
                "Reference chain deeper than {} at {}, giving up",
                self.max_depth, addr
            );
            return Value::Invalid;
        }

        if let Some(cell) = self.cells.get_mut(&addr) {
            cell.cache_mut().begin();
        }
        self.evaluations += 1;

        let content = classify(&formula);
        let value = content.evaluate(&mut GridContext {
            grid: self,
            depth: depth + 1,
        });

        if let Some(cell) = self.cells.get_mut(&addr) {
            cell.cache_mut().store(value.clone());
        }
        value
    }

    // === Persistence ===

    /// Replace the grid's contents with `triples`
    ///
    /// Triples outside the grid are skipped.
    pub fn load_triples<I, T>(&mut self, triples: I) -> LoadStats
    where
        I: IntoIterator<Item = T>,
        T: Into<FormulaTriple>,
    {
        self.clear();

        let mut stats = LoadStats::default();
        let mut edited = Vec::new();

        for triple in triples {
            let triple = triple.into();
            let addr = CellAddress::new(triple.row as u32, triple.column);
            if !self.in_bounds(addr) {
                warn!(
                    "Skipping triple at ({}, {}) outside a {}x{} grid",
                    triple.row, triple.column, self.rows, self.columns
                );
                stats.skipped += 1;
                continue;
            }
            self.write_formula(addr, triple.formula);
            edited.push(addr);
            stats.loaded += 1;
        }

        debug!(
            "Loaded {} triples ({} skipped)",
            stats.loaded, stats.skipped
        );
        self.after_edit(&edited);
        stats
    }

    /// Every non-empty cell as a triple, row by row
    ///
    /// Cells whose coordinates do not fit in 16 bits cannot be persisted and
    /// are left out.
    pub fn triples(&self) -> Vec<FormulaTriple> {
        self.cells
            .iter()
            .filter_map(|(addr, cell)| match u16::try_from(addr.row) {
                Ok(row) => Some(FormulaTriple::new(row, addr.col, cell.formula())),
                Err(_) => {
                    warn!("Cell {} is beyond the persistable row range", addr);
                    None
                }
            })
            .collect()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            cells: BTreeMap::new(),
            policy: RecalcPolicy::Manual,
            max_depth: GridOptions::default().max_depth,
            dependencies: DependencyGraph::new(),
            evaluations: 0,
            circular_hits: 0,
        }
    }
}

/// Resolves references for a formula being evaluated in a grid
struct GridContext<'a> {
    grid: &'a mut Grid,
    depth: usize,
}

impl EvaluationContext for GridContext<'_> {
    /// Absent cells and addresses outside the grid read as `0`
    fn cell_value(&mut self, address: CellAddress) -> Value {
        if !self.grid.in_bounds(address) {
            return Value::Number(0.0);
        }
        self.grid.compute(address, self.depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn addr(a1: &str) -> CellAddress {
        CellAddress::parse(a1).unwrap()
    }

    fn grid_with(entries: &[(&str, &str)]) -> Grid {
        let mut grid = Grid::default();
        for (a1, formula) in entries {
            grid.set_formula(addr(a1), *formula).unwrap();
        }
        grid
    }

    #[test]
    fn test_dimensions() {
        let grid = Grid::default();
        assert_eq!(grid.rows(), 999);
        assert_eq!(grid.columns(), 26);
        assert!(grid.is_empty());

        assert!(matches!(
            Grid::with_size(0, 5),
            Err(Error::InvalidDimensions { rows: 0, columns: 5 })
        ));

        let no_depth = Grid::new(GridOptions {
            max_depth: 0,
            ..Default::default()
        });
        assert_eq!(no_depth.unwrap_err(), Error::InvalidDepthLimit);

        let shallow = Grid::new(GridOptions {
            max_depth: 1,
            ..Default::default()
        });
        assert!(shallow.is_ok());
    }

    #[test]
    fn test_set_and_read() {
        let mut grid = grid_with(&[("A1", "5"), ("B1", "=A1*2"), ("C1", "'5")]);

        assert_eq!(grid.value(addr("A1")), Some(Value::Number(5.0)));
        assert_eq!(grid.value(addr("B1")), Some(Value::Number(10.0)));
        assert_eq!(grid.value(addr("C1")), Some(Value::text("5")));
        assert_eq!(grid.value(addr("D1")), None);
        assert_eq!(grid.formula(addr("B1")), "=A1*2");
        assert_eq!(grid.formula(addr("D1")), "");
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut grid = Grid::with_size(2, 2).unwrap();
        let err = grid.set_formula(CellAddress::new(2, 0), "1").unwrap_err();
        assert_eq!(
            err,
            Error::OutOfBounds {
                row: 2,
                col: 0,
                rows: 2,
                columns: 2
            }
        );
    }

    #[test]
    fn test_empty_formula_drops_slot() {
        let mut grid = grid_with(&[("A1", "3"), ("B1", "=A1+1")]);
        grid.set_formula(addr("A1"), "").unwrap();

        assert!(grid.cell(addr("A1")).is_none());
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_out_of_grid_reference_reads_zero() {
        let mut grid = Grid::with_size(3, 3).unwrap();
        grid.set_formula(addr("A1"), "=Z999+1").unwrap();

        assert_eq!(grid.value(addr("A1")), Some(Value::Number(1.0)));
    }

    #[test]
    fn test_display_and_alignment() {
        let mut grid = grid_with(&[("A1", "=1/0"), ("A2", "hello"), ("A3", "2.5")]);

        assert_eq!(grid.display_text(addr("A1")), "####");
        assert_eq!(grid.display_text(addr("A2")), "hello");
        assert_eq!(grid.display_text(addr("A3")), "2.5");
        assert_eq!(grid.display_text(addr("A4")), "");

        assert_eq!(grid.alignment(addr("A2")), Some(HorizontalAlignment::Left));
        assert_eq!(grid.alignment(addr("A3")), Some(HorizontalAlignment::Right));
        assert_eq!(grid.alignment(addr("A4")), None);
    }

    #[test]
    fn test_depth_limit() {
        let mut grid = Grid::new(GridOptions {
            max_depth: 4,
            ..Default::default()
        })
        .unwrap();
        for row in 1..=10 {
            grid.set_formula(CellAddress::new(row - 1, 0), format!("=A{}+1", row + 1))
                .unwrap();
        }

        assert_eq!(grid.value(addr("A1")), Some(Value::Invalid));
        // The tail of the chain is still computable on its own
        assert_eq!(grid.value(addr("A10")), Some(Value::Number(1.0)));
    }

    #[test]
    fn test_triples_are_row_major() {
        let grid = grid_with(&[("B2", "x"), ("A2", "=1"), ("C1", "3")]);

        assert_eq!(
            grid.triples(),
            vec![
                FormulaTriple::new(0, 2, "3"),
                FormulaTriple::new(1, 0, "=1"),
                FormulaTriple::new(1, 1, "x"),
            ]
        );
    }

    #[test]
    fn test_load_triples_replaces_contents() {
        let mut grid = grid_with(&[("A1", "old")]);
        let stats = grid.load_triples([(1u16, 1u16, "=2*3"), (2000, 0, "lost")]);

        assert_eq!(stats, LoadStats { loaded: 1, skipped: 1 });
        assert_eq!(grid.formula(addr("A1")), "");
        assert_eq!(grid.value(addr("B2")), Some(Value::Number(6.0)));
    }
}
