use std::thread;
use std::time::Duration;

use tracing::debug;

use crate::algorithms::Algorithm;
use crate::engine::{SearchEngine, SearchPhase};
use crate::render;

/// How a driven search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The goal cell was popped from the frontier.
    GoalReached,
    /// The frontier drained without reaching the goal.
    Exhausted,
    /// The step budget ran out first (only plausible under heavy
    /// obstacle churn, where discarded cells keep re-entering the
    /// frontier).
    OutOfSteps,
}

impl RunOutcome {
    pub fn reached_goal(self) -> bool {
        matches!(self, RunOutcome::GoalReached)
    }
}

impl std::fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RunOutcome::GoalReached => "goal reached",
            RunOutcome::Exhausted => "no path (frontier exhausted)",
            RunOutcome::OutOfSteps => "out of steps",
        };
        f.write_str(label)
    }
}

/// Everything a finished run is judged by.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub algorithm: Algorithm,
    pub seed: u64,
    pub outcome: RunOutcome,
    pub steps: usize,
    pub nodes_visited: usize,
    pub visited_percentage: f64,
    pub path_cells: usize,
    pub path_cost: f64,
    pub elapsed_seconds: f64,
}

/// Drives a [`SearchEngine`] to completion, optionally drawing each
/// frame to the terminal at the configured pace.
pub struct Runner {
    engine: SearchEngine,
    delay: Duration,
    visualize: bool,
    quiet: bool,
}

impl Runner {
    /// The base delay is divided by the engine's speed factor, so
    /// `--speed 2.0` plays frames twice as fast.
    pub fn new(engine: SearchEngine, delay_ms: u64, visualize: bool, quiet: bool) -> Self {
        let delay = Duration::from_millis(delay_ms).div_f64(engine.speed());
        Runner { engine, delay, visualize, quiet }
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    pub fn into_engine(self) -> SearchEngine {
        self.engine
    }

    /// Upper bound on steps for one run, scaled to the grid size.
    pub fn step_budget(&self) -> usize {
        let settings = self.engine.settings();
        settings.cols * settings.rows * 4
    }

    /// Step until the search finishes or the budget runs out, then
    /// print a summary unless quiet.
    pub fn run(&mut self) -> RunReport {
        let budget = self.step_budget();
        debug!(algorithm = %self.engine.algorithm(), budget, "starting run");

        if self.visualize {
            self.draw_frame(budget);
            thread::sleep(self.delay);
        }

        while !self.engine.is_finished() && self.engine.steps() < budget {
            self.engine.step();
            if self.visualize {
                self.draw_frame(budget);
                thread::sleep(self.delay);
            }
        }

        let report = self.report();
        if !self.quiet {
            print_summary(&report);
        }
        report
    }

    /// Snapshot of the engine's current standing as a report.
    pub fn report(&self) -> RunReport {
        let outcome = match self.engine.phase() {
            SearchPhase::GoalReached => RunOutcome::GoalReached,
            SearchPhase::Exhausted => RunOutcome::Exhausted,
            SearchPhase::Idle | SearchPhase::Running => RunOutcome::OutOfSteps,
        };
        RunReport {
            algorithm: self.engine.algorithm(),
            seed: self.engine.seed(),
            outcome,
            steps: self.engine.steps(),
            nodes_visited: self.engine.nodes_visited(),
            visited_percentage: self.engine.visited_percentage(),
            path_cells: self.engine.final_path().len(),
            path_cost: self.engine.total_path_cost(),
            elapsed_seconds: self.engine.elapsed_seconds(),
        }
    }

    fn draw_frame(&self, budget: usize) {
        clear_screen();
        println!("=== TERRAIN SEARCH ===");
        println!(
            "Algorithm: {} | Step: {}/{} | Visited: {} ({:.1}%) | Frontier: {}",
            self.engine.algorithm(),
            self.engine.steps(),
            budget,
            self.engine.nodes_visited(),
            self.engine.visited_percentage(),
            self.engine.frontier_len(),
        );
        if let Some(current) = self.engine.current() {
            println!("Current: ({}, {})", current.col, current.row);
        }
        println!();
        println!("{}", render::render_frame(&self.engine));
    }
}

/// Teardown summary for a single finished run.
pub fn print_summary(report: &RunReport) {
    println!();
    println!("=== SEARCH COMPLETE: {} ===", report.algorithm);
    println!("Outcome: {}", report.outcome);
    println!(
        "Steps: {} | Nodes visited: {} ({:.1}% of grid)",
        report.steps, report.nodes_visited, report.visited_percentage
    );
    if report.outcome.reached_goal() {
        println!(
            "Path: {} cells, total cost {:.1}",
            report.path_cells, report.path_cost
        );
    }
    println!("Elapsed: {:.4}s", report.elapsed_seconds);
    println!("Seed: {} (pass --seed {} to replay)", report.seed, report.seed);
}

fn clear_screen() {
    print!("\x1B[2J\x1B[1;1H");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn open_settings(cols: usize, rows: usize) -> Settings {
        Settings {
            cols,
            rows,
            wall_probability: 0.0,
            dynamic_obstacles: false,
            ..Settings::default()
        }
    }

    #[test]
    fn budget_scales_with_grid_dimensions() {
        let engine = SearchEngine::new(open_settings(7, 9), Algorithm::Bfs, Some(1)).unwrap();
        let runner = Runner::new(engine, 0, false, true);
        assert_eq!(runner.step_budget(), 7 * 9 * 4);
    }

    #[test]
    fn open_grid_run_reaches_the_goal() {
        let engine = SearchEngine::new(open_settings(10, 10), Algorithm::AStar, Some(3)).unwrap();
        let mut runner = Runner::new(engine, 0, false, true);
        let report = runner.run();
        assert_eq!(report.outcome, RunOutcome::GoalReached);
        assert!(report.steps <= runner.step_budget());
        assert!(report.path_cells >= 2);
        assert!(report.path_cost > 0.0);
        assert!(report.nodes_visited >= report.path_cells);
    }

    #[test]
    fn severed_grid_reports_exhausted() {
        // 3x1 corridor with the middle cell walled off by a click.
        let engine = SearchEngine::new(open_settings(3, 1), Algorithm::Bfs, Some(5)).unwrap();
        let mut runner = Runner::new(engine, 0, false, true);
        // area is 400x400, so each of the 3 columns is ~133px wide
        runner.engine.handle_click(200.0, 5.0);
        let report = runner.run();
        assert_eq!(report.outcome, RunOutcome::Exhausted);
        assert!(!report.outcome.reached_goal());
        assert_eq!(report.path_cells, 0);
    }

    #[test]
    fn speed_divides_the_frame_delay() {
        let mut settings = open_settings(4, 4);
        settings.speed = 4.0;
        let engine = SearchEngine::new(settings, Algorithm::Dfs, Some(2)).unwrap();
        let runner = Runner::new(engine, 100, false, true);
        assert_eq!(runner.delay, Duration::from_millis(25));
    }
}
