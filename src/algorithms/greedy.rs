use std::collections::VecDeque;

use crate::algorithms::common::{take_min, CellStatus, SearchState, Strategy};
use crate::grid::Grid;

/// Greedy best-first search: expands the frontier cell closest to the goal
/// by straight-line distance. Fast, but blind to terrain cost and happy to
/// walk into dead ends.
pub struct GreedyBestFirst;

impl Strategy for GreedyBestFirst {
    fn prepare(&self, grid: &mut Grid) {
        let start = grid.start_index();
        let h = grid.start().distance(&grid.goal());
        grid.cell_mut(start).h = h;
    }

    fn pop_next(&self, grid: &Grid, frontier: &mut VecDeque<usize>) -> Option<usize> {
        take_min(frontier, |i| grid.cell(i).h)
    }

    fn relax(&self, grid: &mut Grid, state: &mut SearchState, current: usize, neighbor: usize) {
        if grid.is_wall(neighbor) || state.status[neighbor] != CellStatus::Unseen {
            return;
        }
        let h = grid.pos(neighbor).distance(&grid.goal());
        let cell = grid.cell_mut(neighbor);
        cell.h = h;
        cell.backpointer = Some(current);
        state.status[neighbor] = CellStatus::Frontier;
        state.frontier.push_back(neighbor);
    }
}
