use clap::Parser;
use tracing_subscriber::EnvFilter;

use gridwalk::algorithms::Algorithm;
use gridwalk::compare::{self, BatchRunner};
use gridwalk::config::Cli;
use gridwalk::engine::SearchEngine;
use gridwalk::runner::Runner;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let settings = match cli.resolve_settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    let algorithms = match cli.parse_algorithms() {
        Ok(algorithms) => algorithms,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    if !cli.quiet {
        println!("Starting grid search...");
        println!("Grid: {}x{}", settings.cols, settings.rows);
        println!(
            "Wall probability: {:.2}, dynamic obstacles: {}",
            settings.wall_probability,
            if settings.dynamic_obstacles {
                settings.num_dynamic_obstacles
            } else {
                0
            }
        );
        println!("Algorithm: {}", cli.algorithm);
        if cli.no_visualization || cli.runs > 0 {
            println!("Visualization disabled - running in fast mode");
        } else {
            println!("Visualization enabled with {}ms delay", cli.delay_ms);
            println!("Press Ctrl+C to stop the search");
        }
        println!();
    }

    if cli.runs > 0 {
        let mut batch = BatchRunner::new(
            settings,
            algorithms,
            cli.runs,
            cli.seed,
            cli.output_file.clone(),
            cli.quiet,
        );
        if let Err(e) = batch.run() {
            eprintln!("Batch run failed: {}", e);
            std::process::exit(1);
        }
    } else if cli.compare || algorithms.len() > 1 {
        match compare::run_comparison(&settings, &algorithms, cli.seed, cli.quiet) {
            Ok(report) => compare::print_comparison(&report),
            Err(e) => {
                eprintln!("Comparison failed: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        let algorithm = algorithms.first().copied().unwrap_or(Algorithm::AStar);
        match SearchEngine::new(settings, algorithm, cli.seed) {
            Ok(engine) => {
                let mut runner =
                    Runner::new(engine, cli.delay_ms, !cli.no_visualization, cli.quiet);
                runner.run();
            }
            Err(e) => {
                eprintln!("Failed to build the search: {}", e);
                std::process::exit(1);
            }
        }
    }
}
