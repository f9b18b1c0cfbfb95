use rustc_hash::FxHashMap;

use crate::grid::Grid;

/// Follow backpointers from `from` back to the chain's origin, returning
/// cell indices in origin-first order. A cell with no backpointer yields
/// just `[from]`.
///
/// Backpointer chains always descend toward the start, so the walk cannot
/// cycle.
pub fn backtrace(grid: &Grid, from: usize) -> Vec<usize> {
    let mut cells = vec![from];
    let mut cursor = from;
    while let Some(prev) = grid.cell(cursor).backpointer {
        cells.push(prev);
        cursor = prev;
    }
    cells.reverse();
    cells
}

/// Cost accounting for a finished search: the start-to-goal cell chain, its
/// total terrain cost, and that cost broken down by terrain name.
#[derive(Debug, Clone, Default)]
pub struct PathMetrics {
    cells: Vec<usize>,
    total_cost: f64,
    by_terrain: FxHashMap<&'static str, f64>,
}

impl PathMetrics {
    /// Walk the goal's backpointer chain and accumulate the terrain cost of
    /// every cell on it except the start. Recomputing overwrites the
    /// previous walk entirely, so calling it again is harmless.
    pub fn recompute(&mut self, grid: &Grid) {
        self.cells = backtrace(grid, grid.goal_index());
        self.total_cost = 0.0;
        self.by_terrain.clear();
        for &index in self.cells.iter().skip(1) {
            let cost = grid.terrain_cost(index);
            self.total_cost += cost;
            *self.by_terrain.entry(grid.terrain_name(index)).or_insert(0.0) += cost;
        }
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.total_cost = 0.0;
        self.by_terrain.clear();
    }

    /// Cell indices start → goal; empty until a goal walk has run.
    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    pub fn by_terrain(&self) -> &FxHashMap<&'static str, f64> {
        &self.by_terrain
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
