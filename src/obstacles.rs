use rand::rngs::StdRng;
use rand::Rng;
use tracing::warn;

use crate::grid::Grid;

/// A fixed pool of moving obstacles, each materialized as a wall on the cell
/// it currently occupies.
///
/// The pool draws from its own RNG stream so obstacle motion never perturbs
/// the grid-generation sequence, which keeps seeded replays exact.
pub struct ObstaclePool {
    positions: Vec<usize>,
    rng: StdRng,
}

impl ObstaclePool {
    /// Scatter `count` obstacles over free non-start/non-goal cells, walling
    /// each one. Placement draws random cells and gives up after
    /// `count * 10` failed attempts, so a crowded grid yields a smaller pool
    /// rather than a hang.
    pub fn scatter(grid: &mut Grid, count: usize, mut rng: StdRng) -> Self {
        let mut positions = Vec::with_capacity(count);
        let mut attempts = 0;
        while positions.len() < count && attempts < count * 10 {
            attempts += 1;
            let col = rng.gen_range(0..grid.cols());
            let row = rng.gen_range(0..grid.rows());
            let index = grid.index_of(col, row);
            if grid.is_wall(index) {
                continue;
            }
            if grid.set_wall(index) {
                positions.push(index);
            }
        }
        if positions.len() < count {
            warn!(
                placed = positions.len(),
                requested = count,
                "obstacle pool came up short of the requested size"
            );
        }
        ObstaclePool { positions, rng }
    }

    /// Random-walk every obstacle one step: clear the wall it sits on, add
    /// an independent per-axis offset in `{-1, 0, 1}`, clamp to the grid,
    /// and wall the landing cell. The grid itself refuses to wall start or
    /// goal, so an obstacle crossing them passes through harmlessly.
    ///
    /// Moves are unconditional: obstacles can cross each other and walk over
    /// static walls, and a departing obstacle clears whatever wall flag its
    /// old cell carried. Frontier bookkeeping tolerates the resulting races.
    pub fn advance(&mut self, grid: &mut Grid) {
        for slot in 0..self.positions.len() {
            let from = self.positions[slot];
            grid.clear_wall(from);
            let pos = grid.pos(from);
            let dc = self.rng.gen_range(-1i64..=1);
            let dr = self.rng.gen_range(-1i64..=1);
            let nc = (pos.col as i64 + dc).clamp(0, grid.cols() as i64 - 1) as usize;
            let nr = (pos.row as i64 + dr).clamp(0, grid.rows() as i64 - 1) as usize;
            let target = grid.index_of(nc, nr);
            grid.set_wall(target);
            self.positions[slot] = target;
        }
    }

    /// Lift every obstacle's wall and empty the pool.
    pub fn clear(&mut self, grid: &mut Grid) {
        for &index in &self.positions {
            grid.clear_wall(index);
        }
        self.positions.clear();
    }

    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
