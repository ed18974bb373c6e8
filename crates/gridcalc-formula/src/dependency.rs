//! Dependency tracking for propagated invalidation
//!
//! Plain grids never consult this: an edit only dirties the edited cell.
//! A grid that opts into dependent invalidation records, for each formula
//! cell, the cells it reads, and asks for the transitive dependents of an
//! edited cell.

use ahash::{AHashMap, AHashSet};
use gridcalc_core::CellAddress;
use std::collections::VecDeque;

/// Dependency graph for formula cells
///
/// Tracks which cells depend on which other cells.
#[derive(Debug, Default, Clone)]
pub struct DependencyGraph {
    /// Cell → Cells that depend on it (dependents)
    dependents: AHashMap<CellAddress, AHashSet<CellAddress>>,
    /// Cell → Cells it depends on (precedents)
    precedents: AHashMap<CellAddress, AHashSet<CellAddress>>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dependency: dependent depends on precedent
    pub fn add_dependency(&mut self, precedent: CellAddress, dependent: CellAddress) {
        self.dependents
            .entry(precedent)
            .or_default()
            .insert(dependent);
        self.precedents
            .entry(dependent)
            .or_default()
            .insert(precedent);
    }

    /// Replace everything `cell` reads with `precedents`
    pub fn set_precedents<I>(&mut self, cell: CellAddress, precedents: I)
    where
        I: IntoIterator<Item = CellAddress>,
    {
        self.clear_precedents(cell);
        for precedent in precedents {
            self.add_dependency(precedent, cell);
        }
    }

    /// Forget what `cell` reads
    ///
    /// Cells that read `cell` keep their edges; they still depend on the
    /// address even once it is empty.
    pub fn clear_precedents(&mut self, cell: CellAddress) {
        if let Some(precedents) = self.precedents.remove(&cell) {
            for precedent in precedents {
                if let Some(deps) = self.dependents.get_mut(&precedent) {
                    deps.remove(&cell);
                    if deps.is_empty() {
                        self.dependents.remove(&precedent);
                    }
                }
            }
        }
    }

    /// Get cells that directly depend on the given cell
    pub fn get_dependents(&self, cell: CellAddress) -> impl Iterator<Item = CellAddress> + '_ {
        self.dependents
            .get(&cell)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Get cells that the given cell directly depends on
    pub fn get_precedents(&self, cell: CellAddress) -> impl Iterator<Item = CellAddress> + '_ {
        self.precedents
            .get(&cell)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Every cell that reads `cell`, directly or through other cells
    ///
    /// Breadth-first, sorted by address within each level so the result is
    /// deterministic. `cell` itself is only included when it sits on a cycle.
    pub fn dependents_closure(&self, cell: CellAddress) -> Vec<CellAddress> {
        let mut result = Vec::new();
        let mut visited = AHashSet::new();
        let mut queue = VecDeque::from([cell]);

        while let Some(current) = queue.pop_front() {
            let mut next: Vec<CellAddress> = self
                .get_dependents(current)
                .filter(|dep| !visited.contains(dep))
                .collect();
            next.sort();

            for dep in next {
                if visited.insert(dep) {
                    result.push(dep);
                    queue.push_back(dep);
                }
            }
        }

        result
    }

    /// Clear the entire graph
    pub fn clear(&mut self) {
        self.dependents.clear();
        self.precedents.clear();
    }
}
