use std::collections::VecDeque;

use crate::grid::Grid;

/// Where a cell stands in the current search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStatus {
    Unseen,
    Frontier,
    Visited,
}

/// Bookkeeping shared by every strategy: the frontier, a per-cell status
/// vector indexed like the grid, the last expanded cell, and the visit count.
#[derive(Debug, Clone)]
pub struct SearchState {
    pub frontier: VecDeque<usize>,
    pub status: Vec<CellStatus>,
    pub current: Option<usize>,
    pub visited: usize,
}

impl SearchState {
    pub fn new(cells: usize) -> Self {
        SearchState {
            frontier: VecDeque::new(),
            status: vec![CellStatus::Unseen; cells],
            current: None,
            visited: 0,
        }
    }

    /// Put the start cell on the frontier; the first `step()` pops it.
    pub fn seed(&mut self, start: usize) {
        self.frontier.push_back(start);
        self.status[start] = CellStatus::Frontier;
    }

    pub fn reset(&mut self) {
        self.frontier.clear();
        self.status.fill(CellStatus::Unseen);
        self.current = None;
        self.visited = 0;
    }

    pub fn status(&self, index: usize) -> CellStatus {
        self.status[index]
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }
}

/// Per-algorithm policy plugged into the engine's stepping loop.
///
/// The engine owns the loop (pop, goal test, wall-discard, expansion); a
/// strategy only decides which frontier entry comes out next and what happens
/// when an expanded cell looks at one neighbor.
pub trait Strategy {
    /// Seed the start cell's score fields before the first step.
    fn prepare(&self, _grid: &mut Grid) {}

    /// Remove and return the next cell to expand under this policy.
    fn pop_next(&self, grid: &Grid, frontier: &mut VecDeque<usize>) -> Option<usize>;

    /// Consider one neighbor of the cell just expanded.
    fn relax(&self, grid: &mut Grid, state: &mut SearchState, current: usize, neighbor: usize);
}

/// Remove the frontier entry with the smallest key. Strict `<` during the
/// scan keeps the earliest-inserted entry among equal keys, which is what
/// makes priority runs reproducible.
pub(crate) fn take_min<K>(frontier: &mut VecDeque<usize>, key: K) -> Option<usize>
where
    K: Fn(usize) -> f64,
{
    if frontier.is_empty() {
        return None;
    }
    let mut best = 0;
    for slot in 1..frontier.len() {
        if key(frontier[slot]) < key(frontier[best]) {
            best = slot;
        }
    }
    frontier.remove(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_min_prefers_earliest_on_ties() {
        let keys = [3.0, 1.0, 1.0, 2.0];
        let mut frontier: VecDeque<usize> = (0..4).collect();
        assert_eq!(take_min(&mut frontier, |i| keys[i]), Some(1));
        assert_eq!(take_min(&mut frontier, |i| keys[i]), Some(2));
        assert_eq!(take_min(&mut frontier, |i| keys[i]), Some(3));
        assert_eq!(take_min(&mut frontier, |i| keys[i]), Some(0));
        assert_eq!(take_min(&mut frontier, |i| keys[i]), None);
    }

    #[test]
    fn seed_marks_start_as_frontier() {
        let mut state = SearchState::new(9);
        state.seed(4);
        assert_eq!(state.frontier_len(), 1);
        assert_eq!(state.status(4), CellStatus::Frontier);
        assert_eq!(state.status(0), CellStatus::Unseen);

        state.reset();
        assert_eq!(state.frontier_len(), 0);
        assert_eq!(state.status(4), CellStatus::Unseen);
        assert_eq!(state.visited, 0);
    }
}
