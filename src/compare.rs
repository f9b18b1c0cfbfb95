//! Side-by-side runs of several algorithms over one shared maze, plus the
//! batch driver that streams results to CSV.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use pathfinding::prelude::astar;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use tracing::info;

use crate::algorithms::Algorithm;
use crate::engine::SearchEngine;
use crate::error::{BatchError, ConfigError};
use crate::grid::Grid;
use crate::runner::{RunReport, Runner};
use crate::settings::{Adjacency, Settings};

/// Shortest hop count from start to goal over the static maze, ignoring
/// terrain weights. Serves as the yardstick the per-algorithm routes are
/// measured against; `None` means the maze is severed.
pub fn optimal_hops(grid: &Grid) -> Option<usize> {
    let goal = grid.goal_index();
    let goal_pos = grid.pos(goal);
    let (_, hops) = astar(
        &grid.start_index(),
        |&index| {
            grid.neighbors(index)
                .iter()
                .filter(|&&n| !grid.is_wall(n))
                .map(|&n| (n, 1usize))
                .collect::<Vec<_>>()
        },
        |&index| {
            let pos = grid.pos(index);
            // admissible for unit-cost steps in either neighborhood
            match grid.adjacency() {
                Adjacency::Four => pos.manhattan(&goal_pos),
                Adjacency::Eight => pos.chebyshev(&goal_pos),
            }
        },
        |&index| index == goal,
    )?;
    Some(hops)
}

/// A finished route measured against the optimal hop count: 1.0 means the
/// route takes exactly as many hops as the best possible one. `None` when
/// the run failed or no baseline exists.
pub fn route_efficiency(report: &RunReport, optimal_hops: Option<usize>) -> Option<f64> {
    let optimal = optimal_hops?;
    if !report.outcome.reached_goal() || optimal == 0 {
        return None;
    }
    Some(report.path_cells.saturating_sub(1) as f64 / optimal as f64)
}

#[derive(Debug, Clone)]
pub struct ComparisonReport {
    pub seed: u64,
    pub optimal_hops: Option<usize>,
    pub runs: Vec<RunReport>,
}

/// Run every requested algorithm over the same seeded maze and collect the
/// reports. Dynamic obstacles replay identically for each algorithm because
/// the pool draws from its own seeded stream.
pub fn run_comparison(
    settings: &Settings,
    algorithms: &[Algorithm],
    seed: Option<u64>,
    quiet: bool,
) -> Result<ComparisonReport, ConfigError> {
    let seed = seed.unwrap_or_else(rand::random);

    // Baseline over the walls-only maze; obstacles are left out so the
    // yardstick does not depend on where they happen to start.
    let mut baseline_settings = settings.clone();
    baseline_settings.dynamic_obstacles = false;
    let probe = SearchEngine::new(baseline_settings, Algorithm::AStar, Some(seed))?;
    let optimal = optimal_hops(probe.grid());

    if !quiet {
        println!("Running comparison of {} algorithms...", algorithms.len());
        println!("Maze seed: {} (shared across all algorithms)", seed);
        println!(
            "Environment: {}x{} grid, wall probability {:.2}, dynamic obstacles: {}",
            settings.cols,
            settings.rows,
            settings.wall_probability,
            if settings.dynamic_obstacles {
                settings.num_dynamic_obstacles
            } else {
                0
            },
        );
        match optimal {
            Some(hops) => println!("Optimal route (hops, walls only): {}", hops),
            None => println!("Optimal route (hops, walls only): unreachable"),
        }
        println!();
    }

    let mut runs = Vec::with_capacity(algorithms.len());
    for (i, &algorithm) in algorithms.iter().enumerate() {
        if !quiet {
            println!(
                "Running algorithm {} of {}: {}",
                i + 1,
                algorithms.len(),
                algorithm
            );
        }
        let engine = SearchEngine::new(settings.clone(), algorithm, Some(seed))?;
        let mut runner = Runner::new(engine, 0, false, true);
        let report = runner.run();
        if !quiet {
            println!(
                "Completed: {} - {}, steps: {}, visited: {}",
                algorithm, report.outcome, report.steps, report.nodes_visited
            );
        }
        runs.push(report);
    }

    info!(seed, algorithms = runs.len(), "comparison finished");
    Ok(ComparisonReport {
        seed,
        optimal_hops: optimal,
        runs,
    })
}

/// Print comparison results in a table, followed by a short analysis of
/// the successful runs.
pub fn print_comparison(report: &ComparisonReport) {
    println!("\n=== ALGORITHM COMPARISON RESULTS ===");
    println!();

    println!(
        "{:<18} {:<8} {:<9} {:<9} {:<11} {:<11} {:<8} {:<11} {:<10}",
        "Algorithm",
        "Success",
        "Visited",
        "Visit %",
        "Path cells",
        "Path cost",
        "Steps",
        "Elapsed",
        "Efficiency"
    );
    println!("{}", "-".repeat(100));

    for run in &report.runs {
        let success_str = if run.outcome.reached_goal() { "✓" } else { "✗" };
        let cost_str = if run.outcome.reached_goal() {
            format!("{:.1}", run.path_cost)
        } else {
            "-".to_string()
        };
        let efficiency_str = match route_efficiency(run, report.optimal_hops) {
            Some(e) => format!("{:.3}", e),
            None => "-".to_string(),
        };

        println!(
            "{:<18} {:<8} {:<9} {:<9} {:<11} {:<11} {:<8} {:<11} {:<10}",
            run.algorithm,
            success_str,
            run.nodes_visited,
            format!("{:.1}%", run.visited_percentage),
            run.path_cells,
            cost_str,
            run.steps,
            format!("{:.4}s", run.elapsed_seconds),
            efficiency_str,
        );
    }

    println!();

    let successful: Vec<&RunReport> = report
        .runs
        .iter()
        .filter(|r| r.outcome.reached_goal())
        .collect();

    if successful.is_empty() {
        println!("No algorithm reached the goal on this maze.");
        return;
    }

    println!("=== PERFORMANCE ANALYSIS ===");
    if let Some(hops) = report.optimal_hops {
        println!("Optimal hop count (walls only, terrain ignored): {}", hops);
    }
    if let Some(best) = successful
        .iter()
        .min_by(|a, b| a.path_cost.total_cmp(&b.path_cost))
    {
        println!("Cheapest route: {} (cost {:.1})", best.algorithm, best.path_cost);
    }
    if let Some(best) = successful.iter().min_by_key(|r| r.nodes_visited) {
        println!(
            "Fewest nodes visited: {} ({} cells, {:.1}% of grid)",
            best.algorithm, best.nodes_visited, best.visited_percentage
        );
    }
    if let Some(best) = successful
        .iter()
        .min_by(|a, b| a.elapsed_seconds.total_cmp(&b.elapsed_seconds))
    {
        println!("Fastest: {} ({:.4}s)", best.algorithm, best.elapsed_seconds);
    }

    if successful.len() > 1 {
        let min = successful
            .iter()
            .map(|r| r.path_cost)
            .fold(f64::INFINITY, f64::min);
        let max = successful
            .iter()
            .map(|r| r.path_cost)
            .fold(f64::NEG_INFINITY, f64::max);
        if max > min && min > 0.0 {
            println!(
                "Cost spread: {:.1} to {:.1} ({:.1}% above the cheapest)",
                min,
                max,
                (max - min) / min * 100.0
            );
        }
    }
}

/// One CSV row: a single algorithm's run over a single seeded maze.
#[derive(Debug, Clone)]
pub struct BatchRow {
    pub run_id: usize,
    pub algorithm: Algorithm,
    pub seed: u64,
    pub cols: usize,
    pub rows: usize,
    pub success: bool,
    pub steps: usize,
    pub nodes_visited: usize,
    pub visited_percentage: f64,
    pub path_cells: usize,
    pub path_cost: f64,
    pub optimal_hops: usize,
    pub route_efficiency: f64,
    pub elapsed_seconds: f64,
}

pub const CSV_HEADER: &str = "run_id,algorithm,seed,cols,rows,success,steps,nodes_visited,\
visited_percentage,path_cells,path_cost,optimal_hops,route_efficiency,elapsed_seconds";

impl BatchRow {
    pub fn to_csv(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{},{:.2},{},{:.2},{},{:.4},{:.6}",
            self.run_id,
            self.algorithm,
            self.seed,
            self.cols,
            self.rows,
            self.success,
            self.steps,
            self.nodes_visited,
            self.visited_percentage,
            self.path_cells,
            self.path_cost,
            self.optimal_hops,
            self.route_efficiency,
            self.elapsed_seconds,
        )
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct AlgorithmTally {
    runs: usize,
    successes: usize,
    total_cost: f64,
    total_visited: usize,
    total_efficiency: f64,
    efficiency_samples: usize,
}

/// Repeats the comparison over freshly derived seeds and appends every
/// result to a CSV file, flushing in batches.
pub struct BatchRunner {
    settings: Settings,
    algorithms: Vec<Algorithm>,
    runs: usize,
    base_seed: u64,
    output_file: PathBuf,
    quiet: bool,
    results: Vec<BatchRow>,
    tallies: FxHashMap<Algorithm, AlgorithmTally>,
    total_written: usize,
    batch_size: usize,
    started: Instant,
}

impl BatchRunner {
    pub fn new(
        settings: Settings,
        algorithms: Vec<Algorithm>,
        runs: usize,
        seed: Option<u64>,
        output_file: impl Into<PathBuf>,
        quiet: bool,
    ) -> Self {
        BatchRunner {
            settings,
            algorithms,
            runs,
            base_seed: seed.unwrap_or_else(rand::random),
            output_file: output_file.into(),
            quiet,
            results: Vec::new(),
            tallies: FxHashMap::default(),
            total_written: 0,
            batch_size: 100,
            started: Instant::now(),
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    pub fn run(&mut self) -> Result<(), BatchError> {
        self.initialize_csv_file()?;

        if !self.quiet {
            println!("=== BATCH RUN STARTED ===");
            println!("Grid: {}x{}", self.settings.cols, self.settings.rows);
            println!("Runs per algorithm: {}", self.runs);
            println!(
                "Algorithms: {}",
                self.algorithms
                    .iter()
                    .map(|a| a.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            println!("Base seed: {}", self.base_seed);
            println!("Output file: {}", self.output_file.display());
            println!();
        }

        let algorithms = self.algorithms.clone();
        let mut seed_rng = StdRng::seed_from_u64(self.base_seed);

        for run_id in 0..self.runs {
            let run_seed: u64 = seed_rng.gen();

            let mut baseline = self.settings.clone();
            baseline.dynamic_obstacles = false;
            let probe = SearchEngine::new(baseline, Algorithm::AStar, Some(run_seed))?;
            let optimal = optimal_hops(probe.grid());

            for &algorithm in &algorithms {
                let engine = SearchEngine::new(self.settings.clone(), algorithm, Some(run_seed))?;
                let mut runner = Runner::new(engine, 0, false, true);
                let report = runner.run();
                self.record(run_id, run_seed, optimal, &report);
            }

            if !self.quiet {
                println!("Run {}/{}: seed {}", run_id + 1, self.runs, run_seed);
            }
            if self.results.len() >= self.batch_size {
                self.flush_results_to_csv()?;
            }
        }

        if !self.results.is_empty() {
            self.flush_results_to_csv()?;
        }

        if !self.quiet {
            println!("\n=== BATCH RUN COMPLETED ===");
            println!("Rows written: {}", self.total_written);
            println!("Results saved to: {}", self.output_file.display());
            println!("Total time: {:.2?}", self.started.elapsed());
            self.print_summary();
        } else {
            println!(
                "Batch completed: {} rows in {:.1}s -> {}",
                self.total_written,
                self.started.elapsed().as_secs_f64(),
                self.output_file.display()
            );
        }

        Ok(())
    }

    fn record(&mut self, run_id: usize, run_seed: u64, optimal: Option<usize>, report: &RunReport) {
        let efficiency = route_efficiency(report, optimal);

        let tally = self.tallies.entry(report.algorithm).or_default();
        tally.runs += 1;
        if report.outcome.reached_goal() {
            tally.successes += 1;
            tally.total_cost += report.path_cost;
        }
        tally.total_visited += report.nodes_visited;
        if let Some(e) = efficiency {
            tally.total_efficiency += e;
            tally.efficiency_samples += 1;
        }

        self.results.push(BatchRow {
            run_id,
            algorithm: report.algorithm,
            seed: run_seed,
            cols: self.settings.cols,
            rows: self.settings.rows,
            success: report.outcome.reached_goal(),
            steps: report.steps,
            nodes_visited: report.nodes_visited,
            visited_percentage: report.visited_percentage,
            path_cells: report.path_cells,
            path_cost: report.path_cost,
            optimal_hops: optimal.unwrap_or(0),
            route_efficiency: efficiency.unwrap_or(0.0),
            elapsed_seconds: report.elapsed_seconds,
        });
    }

    fn initialize_csv_file(&self) -> Result<(), BatchError> {
        let mut file = File::create(&self.output_file).map_err(|source| BatchError::Output {
            path: self.output_file.clone(),
            source,
        })?;
        writeln!(file, "{}", CSV_HEADER).map_err(|source| BatchError::Output {
            path: self.output_file.clone(),
            source,
        })?;
        if !self.quiet {
            println!("Initialized CSV file: {}", self.output_file.display());
        }
        Ok(())
    }

    fn flush_results_to_csv(&mut self) -> Result<(), BatchError> {
        if self.results.is_empty() {
            return Ok(());
        }

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.output_file)
            .map_err(|source| BatchError::Output {
                path: self.output_file.clone(),
                source,
            })?;

        for row in &self.results {
            writeln!(file, "{}", row.to_csv()).map_err(|source| BatchError::Output {
                path: self.output_file.clone(),
                source,
            })?;
        }

        self.total_written += self.results.len();
        if !self.quiet {
            println!(
                "Flushed {} rows to CSV (total: {})",
                self.results.len(),
                self.total_written
            );
        }
        self.results.clear();
        Ok(())
    }

    /// Per-algorithm aggregates over everything recorded so far.
    pub fn print_summary(&self) {
        if self.tallies.is_empty() {
            println!("No results to summarize.");
            return;
        }

        println!("\n=== BATCH SUMMARY ===");

        let mut algorithms: Vec<Algorithm> = self.tallies.keys().copied().collect();
        algorithms.sort_by_key(|a| a.to_string());

        for algorithm in algorithms {
            if let Some(tally) = self.tallies.get(&algorithm) {
                let success_rate = (tally.successes as f64 / tally.runs as f64) * 100.0;
                println!("\n{}:", algorithm);
                println!(
                    "  Success rate: {}/{} ({:.1}%)",
                    tally.successes, tally.runs, success_rate
                );
                println!(
                    "  Average nodes visited: {:.1}",
                    tally.total_visited as f64 / tally.runs as f64
                );
                if tally.successes > 0 {
                    println!(
                        "  Average path cost: {:.1}",
                        tally.total_cost / tally.successes as f64
                    );
                }
                if tally.efficiency_samples > 0 {
                    println!(
                        "  Average route efficiency: {:.3}",
                        tally.total_efficiency / tally.efficiency_samples as f64
                    );
                }
            }
        }
    }
}
