//! Searching displayed cell text

use crate::grid::Grid;
use gridcalc_core::CellAddress;
use std::ops::Bound;

/// Whether a search distinguishes letter case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseSensitivity {
    #[default]
    Sensitive,
    Insensitive,
}

impl CaseSensitivity {
    fn matches(self, haystack: &str, needle: &str) -> bool {
        match self {
            CaseSensitivity::Sensitive => haystack.contains(needle),
            CaseSensitivity::Insensitive => haystack
                .to_lowercase()
                .contains(&needle.to_lowercase()),
        }
    }
}

impl Grid {
    /// First cell after `from`, in row-major order, whose displayed text
    /// contains `needle`
    ///
    /// Displaying a cell computes its value, so searching can evaluate
    /// dirty cells. An empty needle matches nothing.
    pub fn find_next(
        &mut self,
        from: CellAddress,
        needle: &str,
        case: CaseSensitivity,
    ) -> Option<CellAddress> {
        if needle.is_empty() {
            return None;
        }
        let candidates: Vec<CellAddress> = self
            .cells
            .range((Bound::Excluded(from), Bound::Unbounded))
            .map(|(addr, _)| *addr)
            .collect();
        self.first_match(candidates, needle, case)
    }

    /// Last cell before `from`, in row-major order, whose displayed text
    /// contains `needle`
    pub fn find_previous(
        &mut self,
        from: CellAddress,
        needle: &str,
        case: CaseSensitivity,
    ) -> Option<CellAddress> {
        if needle.is_empty() {
            return None;
        }
        let candidates: Vec<CellAddress> = self
            .cells
            .range(..from)
            .rev()
            .map(|(addr, _)| *addr)
            .collect();
        self.first_match(candidates, needle, case)
    }

    fn first_match(
        &mut self,
        candidates: Vec<CellAddress>,
        needle: &str,
        case: CaseSensitivity,
    ) -> Option<CellAddress> {
        candidates
            .into_iter()
            .find(|addr| case.matches(&self.display_text(*addr), needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(a1: &str) -> CellAddress {
        CellAddress::parse(a1).unwrap()
    }

    fn sample() -> Grid {
        let mut grid = Grid::default();
        grid.set_formula(addr("A1"), "Apple").unwrap();
        grid.set_formula(addr("C1"), "=2*21").unwrap();
        grid.set_formula(addr("B2"), "pineapple").unwrap();
        grid.set_formula(addr("A3"), "=1/0").unwrap();
        grid
    }

    #[test]
    fn test_find_next_wraps_rows() {
        let mut grid = sample();

        assert_eq!(
            grid.find_next(addr("A1"), "apple", CaseSensitivity::Sensitive),
            Some(addr("B2"))
        );
        assert_eq!(
            grid.find_next(addr("B2"), "apple", CaseSensitivity::Sensitive),
            None
        );
    }

    #[test]
    fn test_find_matches_display_text() {
        let mut grid = sample();

        // Computed values are searched, not formulas
        assert_eq!(
            grid.find_next(addr("A1"), "42", CaseSensitivity::Sensitive),
            Some(addr("C1"))
        );
        assert_eq!(grid.find_next(addr("A1"), "*", CaseSensitivity::Sensitive), None);
        assert_eq!(
            grid.find_next(addr("A1"), "##", CaseSensitivity::Sensitive),
            Some(addr("A3"))
        );
    }

    #[test]
    fn test_find_previous_case_insensitive() {
        let mut grid = sample();

        assert_eq!(
            grid.find_previous(addr("B2"), "APPLE", CaseSensitivity::Insensitive),
            Some(addr("A1"))
        );
        assert_eq!(
            grid.find_previous(addr("B2"), "APPLE", CaseSensitivity::Sensitive),
            None
        );
        assert_eq!(
            grid.find_previous(addr("Z999"), "apple", CaseSensitivity::Sensitive),
            Some(addr("B2"))
        );
    }

    #[test]
    fn test_empty_needle() {
        let mut grid = sample();
        assert_eq!(grid.find_next(addr("A1"), "", CaseSensitivity::Sensitive), None);
    }
}
