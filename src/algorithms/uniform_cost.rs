use std::collections::VecDeque;

use crate::algorithms::common::{take_min, CellStatus, SearchState, Strategy};
use crate::grid::Grid;

/// Uniform-cost search: expands the frontier cell with the smallest
/// accumulated terrain cost `g`. Entering a neighbor costs that neighbor's
/// terrain cost, with no distance factor.
pub struct UniformCost;

impl Strategy for UniformCost {
    fn prepare(&self, grid: &mut Grid) {
        let start = grid.start_index();
        grid.cell_mut(start).g = 0.0;
    }

    fn pop_next(&self, grid: &Grid, frontier: &mut VecDeque<usize>) -> Option<usize> {
        take_min(frontier, |i| grid.cell(i).g)
    }

    fn relax(&self, grid: &mut Grid, state: &mut SearchState, current: usize, neighbor: usize) {
        if grid.is_wall(neighbor) {
            return;
        }
        let tentative = grid.cell(current).g + grid.terrain_cost(neighbor);
        match state.status[neighbor] {
            CellStatus::Unseen => {
                let cell = grid.cell_mut(neighbor);
                cell.g = tentative;
                cell.backpointer = Some(current);
                state.status[neighbor] = CellStatus::Frontier;
                state.frontier.push_back(neighbor);
            }
            CellStatus::Frontier => {
                if tentative < grid.cell(neighbor).g {
                    let cell = grid.cell_mut(neighbor);
                    cell.g = tentative;
                    cell.backpointer = Some(current);
                }
            }
            CellStatus::Visited => {}
        }
    }
}
