use std::collections::VecDeque;

use crate::algorithms::common::{take_min, CellStatus, SearchState, Strategy};
use crate::grid::Grid;

/// A* search: expands the frontier cell with the smallest `f = g + h`, where
/// `g` accumulates straight-line step length times the entered cell's terrain
/// cost and `h` is the straight-line distance to the goal.
///
/// A cheaper route to an already visited cell reopens it: the cell's scores
/// are rewritten and it goes back on the frontier.
pub struct AStar;

impl Strategy for AStar {
    fn prepare(&self, grid: &mut Grid) {
        let start = grid.start_index();
        let h = grid.start().distance(&grid.goal());
        let cell = grid.cell_mut(start);
        cell.g = 0.0;
        cell.h = h;
        cell.f = h;
    }

    fn pop_next(&self, grid: &Grid, frontier: &mut VecDeque<usize>) -> Option<usize> {
        take_min(frontier, |i| grid.cell(i).f)
    }

    fn relax(&self, grid: &mut Grid, state: &mut SearchState, current: usize, neighbor: usize) {
        if grid.is_wall(neighbor) {
            return;
        }
        let step = grid.pos(current).distance(&grid.pos(neighbor));
        let tentative = grid.cell(current).g + step * grid.terrain_cost(neighbor);
        match state.status[neighbor] {
            CellStatus::Unseen => {
                let h = grid.pos(neighbor).distance(&grid.goal());
                let cell = grid.cell_mut(neighbor);
                cell.g = tentative;
                cell.h = h;
                cell.f = tentative + h;
                cell.backpointer = Some(current);
                state.status[neighbor] = CellStatus::Frontier;
                state.frontier.push_back(neighbor);
            }
            CellStatus::Frontier => {
                if tentative < grid.cell(neighbor).g {
                    let cell = grid.cell_mut(neighbor);
                    cell.g = tentative;
                    cell.f = tentative + cell.h;
                    cell.backpointer = Some(current);
                }
            }
            CellStatus::Visited => {
                if tentative < grid.cell(neighbor).g {
                    let cell = grid.cell_mut(neighbor);
                    cell.g = tentative;
                    cell.f = tentative + cell.h;
                    cell.backpointer = Some(current);
                    state.status[neighbor] = CellStatus::Frontier;
                    state.frontier.push_back(neighbor);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn open_grid(cols: usize, rows: usize) -> Grid {
        // all-plain terrain so step costs reduce to plain distance
        let settings = Settings {
            cols,
            rows,
            wall_probability: 0.0,
            terrain_thresholds: crate::terrain::TerrainThresholds {
                plain: 1.0,
                forest: 1.0,
                water: 1.0,
            },
            ..Settings::default()
        };
        Grid::generate(&settings, (400.0, 400.0), &mut StdRng::seed_from_u64(1))
    }

    #[test]
    fn prepare_scores_the_start_cell() {
        let mut grid = open_grid(4, 3);
        AStar.prepare(&mut grid);
        let start = grid.cell(grid.start_index());
        assert_eq!(start.g, 0.0);
        assert_eq!(start.h, grid.start().distance(&grid.goal()));
        assert_eq!(start.f, start.h);
    }

    #[test]
    fn diagonal_steps_cost_sqrt_two_times_terrain() {
        let mut grid = open_grid(3, 3);
        let mut state = SearchState::new(grid.len());
        AStar.prepare(&mut grid);

        let diagonal = grid.index_of(1, 1);
        AStar.relax(&mut grid, &mut state, 0, diagonal);
        let expected = 2.0_f64.sqrt() * grid.terrain_cost(diagonal);
        assert!((grid.cell(diagonal).g - expected).abs() < 1e-9);
    }

    #[test]
    fn improved_route_reopens_a_visited_cell() {
        let mut grid = open_grid(3, 3);
        let mut state = SearchState::new(grid.len());
        AStar.prepare(&mut grid);

        let target = grid.index_of(1, 0);
        grid.cell_mut(target).g = 50.0;
        grid.cell_mut(target).h = 1.0;
        grid.cell_mut(target).f = 51.0;
        state.status[target] = CellStatus::Visited;

        AStar.relax(&mut grid, &mut state, 0, target);
        assert_eq!(state.status[target], CellStatus::Frontier);
        assert_eq!(state.frontier_len(), 1);
        assert!(grid.cell(target).g < 50.0);
        assert_eq!(grid.cell(target).f, grid.cell(target).g + grid.cell(target).h);
        assert_eq!(grid.cell(target).backpointer, Some(0));
    }

    #[test]
    fn worse_route_leaves_a_visited_cell_closed() {
        let mut grid = open_grid(3, 3);
        let mut state = SearchState::new(grid.len());
        AStar.prepare(&mut grid);

        let target = grid.index_of(1, 0);
        grid.cell_mut(target).g = 0.1;
        state.status[target] = CellStatus::Visited;

        AStar.relax(&mut grid, &mut state, 0, target);
        assert_eq!(state.status[target], CellStatus::Visited);
        assert_eq!(state.frontier_len(), 0);
    }
}
