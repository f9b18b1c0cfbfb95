use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::algorithms::{Algorithm, CellStatus, SearchState, Strategy};
use crate::error::ConfigError;
use crate::grid::{Grid, Pos};
use crate::metrics::{backtrace, PathMetrics};
use crate::obstacles::ObstaclePool;
use crate::settings::{Settings, DEFAULT_GRID_AREA};

/// Engine lifecycle: `Idle` until the first step, `Running` while the
/// frontier is alive, then exactly one terminal phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Running,
    GoalReached,
    Exhausted,
}

impl SearchPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, SearchPhase::GoalReached | SearchPhase::Exhausted)
    }
}

/// Stream tag XORed into the engine seed for the obstacle pool's RNG, so
/// obstacle motion and grid generation draw from independent sequences.
const OBSTACLE_STREAM: u64 = 0x6f62_7374;

fn build_environment(
    settings: &Settings,
    area: (f32, f32),
    seed: u64,
) -> (Grid, Option<ObstaclePool>) {
    let mut grid_rng = StdRng::seed_from_u64(seed);
    let mut grid = Grid::generate(settings, area, &mut grid_rng);
    let obstacles = (settings.dynamic_obstacles && settings.num_dynamic_obstacles > 0).then(|| {
        ObstaclePool::scatter(
            &mut grid,
            settings.num_dynamic_obstacles,
            StdRng::seed_from_u64(seed ^ OBSTACLE_STREAM),
        )
    });
    (grid, obstacles)
}

/// One incremental search over one seeded environment.
///
/// `step()` advances the search by a single expansion, which is what lets a
/// driver animate frame by frame. Everything about a run is derived from the
/// seed: the maze, the obstacle placement, and the obstacle walk, so two
/// engines built from the same settings and seed behave identically step for
/// step.
pub struct SearchEngine {
    settings: Settings,
    area: (f32, f32),
    seed: u64,
    algorithm: Algorithm,
    strategy: Box<dyn Strategy>,
    grid: Grid,
    state: SearchState,
    phase: SearchPhase,
    obstacles: Option<ObstaclePool>,
    metrics: PathMetrics,
    steps: usize,
    elapsed: Duration,
}

impl SearchEngine {
    /// Engine over a fresh environment at the default pixel area. A `None`
    /// seed draws one from entropy.
    pub fn new(
        settings: Settings,
        algorithm: Algorithm,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        Self::with_area(settings, DEFAULT_GRID_AREA, algorithm, seed)
    }

    pub fn with_area(
        settings: Settings,
        area: (f32, f32),
        algorithm: Algorithm,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        if !(area.0 > 0.0 && area.1 > 0.0) {
            return Err(ConfigError::InvalidGridArea { width: area.0, height: area.1 });
        }
        let seed = seed.unwrap_or_else(rand::random);
        let (mut grid, obstacles) = build_environment(&settings, area, seed);
        let mut state = SearchState::new(grid.len());
        state.seed(grid.start_index());
        let strategy = algorithm.strategy();
        strategy.prepare(&mut grid);
        debug!(
            algorithm = %algorithm,
            seed,
            cols = settings.cols,
            rows = settings.rows,
            "engine constructed"
        );
        Ok(SearchEngine {
            settings,
            area,
            seed,
            algorithm,
            strategy,
            grid,
            state,
            phase: SearchPhase::Idle,
            obstacles,
            metrics: PathMetrics::default(),
            steps: 0,
            elapsed: Duration::ZERO,
        })
    }

    /// Advance the search by at most one expansion.
    ///
    /// Frontier entries are popped under the strategy's policy until a live
    /// cell appears; entries walled over by an obstacle since discovery are
    /// discarded without counting as visited. A live pop is marked visited
    /// and counted; popping the goal then ends the search and computes the
    /// path metrics, and any other cell has each neighbor relaxed. After
    /// the expansion the obstacle pool takes its random-walk step. Stepping
    /// a finished engine is a no-op.
    pub fn step(&mut self) -> SearchPhase {
        if self.phase.is_terminal() {
            return self.phase;
        }
        let started = Instant::now();
        self.phase = SearchPhase::Running;
        self.steps += 1;

        let current = loop {
            match self.strategy.pop_next(&self.grid, &mut self.state.frontier) {
                None => {
                    self.phase = SearchPhase::Exhausted;
                    self.elapsed += started.elapsed();
                    info!(
                        algorithm = %self.algorithm,
                        visited = self.state.visited,
                        "frontier exhausted with no route to the goal"
                    );
                    return self.phase;
                }
                Some(index) if self.grid.is_wall(index) => {
                    // an obstacle moved onto this cell after discovery
                    self.state.status[index] = CellStatus::Unseen;
                }
                Some(index) => break index,
            }
        };

        self.state.current = Some(current);
        self.state.status[current] = CellStatus::Visited;
        self.state.visited += 1;

        if current == self.grid.goal_index() {
            self.phase = SearchPhase::GoalReached;
            self.metrics.recompute(&self.grid);
            self.elapsed += started.elapsed();
            info!(
                algorithm = %self.algorithm,
                visited = self.state.visited,
                cost = self.metrics.total_cost(),
                length = self.metrics.len(),
                "goal reached"
            );
            return self.phase;
        }

        for slot in 0..self.grid.neighbors(current).len() {
            let neighbor = self.grid.neighbors(current)[slot];
            self.strategy.relax(&mut self.grid, &mut self.state, current, neighbor);
        }

        if let Some(pool) = &mut self.obstacles {
            pool.advance(&mut self.grid);
        }

        self.elapsed += started.elapsed();
        self.phase
    }

    /// Step until a terminal phase or the budget runs out.
    pub fn run(&mut self, max_steps: usize) -> SearchPhase {
        for _ in 0..max_steps {
            if self.step().is_terminal() {
                break;
            }
        }
        self.phase
    }

    /// Throw away all progress and rebuild the run's initial environment
    /// from the stored seed: same maze, same obstacle placement, and the
    /// same obstacle walk on replay.
    pub fn reset(&mut self) {
        let (grid, obstacles) = build_environment(&self.settings, self.area, self.seed);
        self.grid = grid;
        self.obstacles = obstacles;
        self.restart_search();
    }

    /// Jump to a brand-new maze on a fresh seed derived from the current
    /// one, then reset onto it.
    pub fn new_maze(&mut self) {
        self.seed = StdRng::seed_from_u64(self.seed).gen();
        self.reset();
    }

    /// Switch strategy and restart the search over the grid as it stands
    /// now, walls included wherever the obstacles currently sit.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
        self.strategy = algorithm.strategy();
        self.restart_search();
    }

    /// Restart the current strategy over the current grid.
    pub fn restart_search(&mut self) {
        self.grid.reset_search_fields();
        self.state.reset();
        self.state.seed(self.grid.start_index());
        self.strategy.prepare(&mut self.grid);
        self.phase = SearchPhase::Idle;
        self.metrics.clear();
        self.steps = 0;
        self.elapsed = Duration::ZERO;
    }

    /// Wall the cell under a pixel click. Start, goal, and out-of-bounds
    /// clicks are ignored; clicks never clear a wall.
    pub fn handle_click(&mut self, px: f32, py: f32) {
        if let Some(pos) = self.grid.cell_at_pixel(px, py) {
            let index = self.grid.index_of(pos.col, pos.row);
            self.grid.set_wall(index);
        }
    }

    pub fn set_speed(&mut self, speed: f64) -> Result<(), ConfigError> {
        if !(speed > 0.0) {
            return Err(ConfigError::InvalidSpeed(speed));
        }
        self.settings.speed = speed;
        Ok(())
    }

    /// Toggle the obstacle pool. Enabling scatters a fresh pool over the
    /// current grid; disabling lifts every obstacle wall.
    pub fn set_dynamic_obstacles(&mut self, enabled: bool) {
        self.settings.dynamic_obstacles = enabled;
        if enabled {
            if self.obstacles.is_none() && self.settings.num_dynamic_obstacles > 0 {
                self.obstacles = Some(ObstaclePool::scatter(
                    &mut self.grid,
                    self.settings.num_dynamic_obstacles,
                    StdRng::seed_from_u64(self.seed ^ OBSTACLE_STREAM),
                ));
            }
        } else if let Some(mut pool) = self.obstacles.take() {
            pool.clear(&mut self.grid);
        }
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// True once the search hit either terminal phase.
    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    /// True only for the exhausted outcome; an unfinished search is not yet
    /// a failure.
    pub fn no_solution(&self) -> bool {
        self.phase == SearchPhase::Exhausted
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn speed(&self) -> f64 {
        self.settings.speed
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn search_state(&self) -> &SearchState {
        &self.state
    }

    pub fn obstacles(&self) -> Option<&ObstaclePool> {
        self.obstacles.as_ref()
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn nodes_visited(&self) -> usize {
        self.state.visited
    }

    /// Visited cells as a percentage of the whole grid, capped at 100 since
    /// reopening can revisit cells.
    pub fn visited_percentage(&self) -> f64 {
        (self.state.visited as f64 / self.grid.len() as f64 * 100.0).min(100.0)
    }

    pub fn total_path_cost(&self) -> f64 {
        self.metrics.total_cost()
    }

    pub fn terrain_cost_breakdown(&self) -> &FxHashMap<&'static str, f64> {
        self.metrics.by_terrain()
    }

    pub fn metrics(&self) -> &PathMetrics {
        &self.metrics
    }

    /// The finished start-to-goal path; empty until the goal is reached.
    pub fn final_path(&self) -> &[usize] {
        self.metrics.cells()
    }

    /// Backpointer walk from the most recently expanded cell, start first.
    /// This is the partial route a renderer draws mid-search.
    pub fn current_path(&self) -> Vec<usize> {
        match self.state.current {
            Some(current) => backtrace(&self.grid, current),
            None => Vec::new(),
        }
    }

    pub fn current(&self) -> Option<Pos> {
        self.state.current.map(|index| self.grid.pos(index))
    }

    pub fn frontier_len(&self) -> usize {
        self.state.frontier_len()
    }

    /// Wall-clock seconds spent inside `step()` so far.
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}
