use std::collections::VecDeque;

use crate::algorithms::common::{CellStatus, SearchState, Strategy};
use crate::grid::Grid;

/// Depth-first search: the frontier is a stack, so the most recently
/// discovered cell is expanded first. Ignores terrain cost entirely.
pub struct Dfs;

impl Strategy for Dfs {
    fn pop_next(&self, _grid: &Grid, frontier: &mut VecDeque<usize>) -> Option<usize> {
        frontier.pop_back()
    }

    fn relax(&self, grid: &mut Grid, state: &mut SearchState, current: usize, neighbor: usize) {
        if grid.is_wall(neighbor) || state.status[neighbor] != CellStatus::Unseen {
            return;
        }
        grid.cell_mut(neighbor).backpointer = Some(current);
        state.status[neighbor] = CellStatus::Frontier;
        state.frontier.push_back(neighbor);
    }
}
