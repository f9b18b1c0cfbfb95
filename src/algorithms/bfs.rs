use std::collections::VecDeque;

use crate::algorithms::common::{CellStatus, SearchState, Strategy};
use crate::grid::Grid;

/// Breadth-first search: FIFO frontier, so cells are expanded in discovery
/// order and the found path minimizes hop count (not terrain cost).
pub struct Bfs;

impl Strategy for Bfs {
    fn pop_next(&self, _grid: &Grid, frontier: &mut VecDeque<usize>) -> Option<usize> {
        frontier.pop_front()
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_fifo_order() {
        let grid = crate::grid::Grid::generate(
            &crate::settings::Settings::default(),
            (400.0, 400.0),
            &mut <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(1),
        );
        let mut frontier: VecDeque<usize> = VecDeque::from([5, 9, 2]);
        assert_eq!(Bfs.pop_next(&grid, &mut frontier), Some(5));
        assert_eq!(Bfs.pop_next(&grid, &mut frontier), Some(9));
        assert_eq!(Bfs.pop_next(&grid, &mut frontier), Some(2));
    }

    #[test]
    fn relax_skips_walls_and_seen_cells() {
        let settings = crate::settings::Settings {
            cols: 3,
            rows: 3,
            wall_probability: 0.0,
            ..crate::settings::Settings::default()
        };
        let mut grid = crate::grid::Grid::generate(
            &settings,
            (400.0, 400.0),
            &mut <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(1),
        );
        let mut state = SearchState::new(grid.len());

        grid.set_wall(4);
        Bfs.relax(&mut grid, &mut state, 0, 4);
        assert_eq!(state.frontier_len(), 0);

        Bfs.relax(&mut grid, &mut state, 0, 1);
        assert_eq!(state.frontier_len(), 1);
        assert_eq!(grid.cell(1).backpointer, Some(0));

        // a second discovery of the same cell is a no-op
        Bfs.relax(&mut grid, &mut state, 3, 1);
        assert_eq!(state.frontier_len(), 1);
        assert_eq!(grid.cell(1).backpointer, Some(0));
    }
}
