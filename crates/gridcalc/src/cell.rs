//! Grid cells and their value cache

use gridcalc_core::Value;

/// Where a cell's cached value stands
#[derive(Debug, Clone, PartialEq)]
pub enum CacheState {
    /// The cached value may not reflect the formula; recompute before reading
    Dirty,
    /// The cell is being evaluated right now. Meeting it again while in this
    /// state means its formula reaches itself.
    InFlight,
    /// The value of the formula under the grid state it was computed against
    Fresh(Value),
}

/// Memoized result of a cell's formula
///
/// A read computes at most once per invalidation: `begin` marks the
/// computation as started, `store` records its result, `invalidate` throws
/// it away. The grid drives these steps itself so that evaluation can read
/// other cells in between.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedValue {
    state: CacheState,
}

impl CachedValue {
    /// A cache with nothing in it
    pub fn new() -> Self {
        Self {
            state: CacheState::Dirty,
        }
    }

    /// Current state
    pub fn state(&self) -> &CacheState {
        &self.state
    }

    /// The cached value, if it is fresh
    pub fn get(&self) -> Option<&Value> {
        match &self.state {
            CacheState::Fresh(v) => Some(v),
            _ => None,
        }
    }

    /// Check if the value must be recomputed before it is read
    pub fn is_dirty(&self) -> bool {
        matches!(self.state, CacheState::Dirty)
    }

    /// Check if the value is being computed
    pub fn is_in_flight(&self) -> bool {
        matches!(self.state, CacheState::InFlight)
    }

    /// Discard the cached value
    ///
    /// A computation that is in flight is left alone; it stores its result
    /// when it finishes.
    pub fn invalidate(&mut self) {
        if !self.is_in_flight() {
            self.state = CacheState::Dirty;
        }
    }

    /// Mark the start of a computation
    pub fn begin(&mut self) {
        self.state = CacheState::InFlight;
    }

    /// Record a computed value
    pub fn store(&mut self, value: Value) {
        self.state = CacheState::Fresh(value);
    }
}

impl Default for CachedValue {
    fn default() -> Self {
        Self::new()
    }
}

/// A grid slot: formula text plus its cached value
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    formula: String,
    cache: CachedValue,
}

impl Cell {
    /// Create a cell holding `formula`, not yet evaluated
    pub fn new<S: Into<String>>(formula: S) -> Self {
        Self {
            formula: formula.into(),
            cache: CachedValue::new(),
        }
    }

    /// The raw formula text
    pub fn formula(&self) -> &str {
        &self.formula
    }

    /// Replace the formula; the cached value becomes dirty
    pub fn set_formula<S: Into<String>>(&mut self, formula: S) {
        self.formula = formula.into();
        self.cache.invalidate();
    }

    /// Mark the cached value dirty without touching the formula
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    /// Check if the cell must be recomputed before it is read
    pub fn is_dirty(&self) -> bool {
        self.cache.is_dirty()
    }

    /// The cached value, if it is fresh
    pub fn cached_value(&self) -> Option<&Value> {
        self.cache.get()
    }

    pub(crate) fn cache(&self) -> &CachedValue {
        &self.cache
    }

    pub(crate) fn cache_mut(&mut self) -> &mut CachedValue {
        &mut self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_is_dirty() {
        let cell = Cell::new("=1+1");
        assert!(cell.is_dirty());
        assert_eq!(cell.cached_value(), None);
        assert_eq!(cell.formula(), "=1+1");
    }

    #[test]
    fn test_cache_lifecycle() {
        let mut cache = CachedValue::new();
        assert!(cache.is_dirty());
        assert_eq!(cache.get(), None);

        cache.begin();
        assert!(cache.is_in_flight());
        assert_eq!(cache.get(), None);

        cache.store(Value::Number(4.0));
        assert_eq!(cache.state(), &CacheState::Fresh(Value::Number(4.0)));
        assert_eq!(cache.get(), Some(&Value::Number(4.0)));

        cache.invalidate();
        assert!(cache.is_dirty());
    }

    #[test]
    fn test_set_formula_marks_dirty() {
        let mut cell = Cell::new("1");
        cell.cache_mut().store(Value::Number(1.0));
        assert!(!cell.is_dirty());

        cell.set_formula("2");
        assert!(cell.is_dirty());
        assert_eq!(cell.formula(), "2");
    }

    #[test]
    fn test_invalidate_keeps_formula() {
        let mut cell = Cell::new("'x");
        cell.cache_mut().store(Value::text("x"));

        cell.invalidate();
        assert!(cell.is_dirty());
        assert_eq!(cell.formula(), "'x");
    }

    #[test]
    fn test_invalidate_leaves_in_flight_alone() {
        let mut cache = CachedValue::new();
        cache.begin();
        cache.invalidate();
        assert!(cache.is_in_flight());
    }
}
