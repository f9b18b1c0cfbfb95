use std::path::PathBuf;

use clap::Parser;

use crate::algorithms::Algorithm;
use crate::error::ConfigError;
use crate::settings::Settings;

/// Command-line surface. Grid options left unset fall back to the settings
/// file (when `--config` is given) and then to the built-in defaults, so
/// flags always win over the file.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Grid width in cells
    #[arg(long)]
    pub cols: Option<usize>,

    /// Grid height in cells
    #[arg(long)]
    pub rows: Option<usize>,

    /// Probability that a generated cell starts walled
    #[arg(long)]
    pub wall_probability: Option<f64>,

    /// dfs, bfs, ucs, greedy, astar, a comma-separated list, or "all"
    #[arg(long, default_value = "astar")]
    pub algorithm: String,

    /// Maze seed; omit for a fresh random maze
    #[arg(long)]
    pub seed: Option<u64>,

    /// Base delay between rendered frames in milliseconds
    #[arg(long, default_value_t = 50)]
    pub delay_ms: u64,

    /// Playback speed multiplier applied to the frame delay
    #[arg(long)]
    pub speed: Option<f64>,

    /// Neighborhood shape: 4 or 8
    #[arg(long)]
    pub adjacency: Option<String>,

    /// Keep every wall where it is generated
    #[arg(long, default_value_t = false)]
    pub no_dynamic_obstacles: bool,

    /// How many moving obstacles to scatter
    #[arg(long)]
    pub num_obstacles: Option<usize>,

    /// TOML settings file; individual flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Run every requested algorithm over one shared maze and print a table
    #[arg(long, default_value_t = false)]
    pub compare: bool,

    /// Repeat over N derived seeds and stream results to CSV
    #[arg(long, default_value_t = 0)]
    pub runs: usize,

    /// CSV output path for batch runs
    #[arg(long, default_value = "batch_results.csv")]
    pub output_file: PathBuf,

    /// Skip frame-by-frame terminal rendering
    #[arg(long, default_value_t = false)]
    pub no_visualization: bool,

    /// Suppress everything but final results
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

impl Cli {
    /// Merge the settings file (if any) with command-line overrides and
    /// validate the result.
    pub fn resolve_settings(&self) -> Result<Settings, ConfigError> {
        let mut settings = match &self.config {
            Some(path) => Settings::from_toml_file(path)?,
            None => Settings::default(),
        };

        if let Some(cols) = self.cols {
            settings.cols = cols;
        }
        if let Some(rows) = self.rows {
            settings.rows = rows;
        }
        if let Some(probability) = self.wall_probability {
            settings.wall_probability = probability;
        }
        if let Some(adjacency) = &self.adjacency {
            settings.adjacency = adjacency.parse()?;
        }
        if self.no_dynamic_obstacles {
            settings.dynamic_obstacles = false;
        }
        if let Some(count) = self.num_obstacles {
            settings.num_dynamic_obstacles = count;
        }
        if let Some(speed) = self.speed {
            settings.speed = speed;
        }

        settings.validate()?;
        Ok(settings)
    }

    /// The algorithms this invocation asks for; `all` expands to the full
    /// roster in its fixed order.
    pub fn parse_algorithms(&self) -> Result<Vec<Algorithm>, ConfigError> {
        if self.algorithm.trim().eq_ignore_ascii_case("all") {
            return Ok(Algorithm::ALL.to_vec());
        }
        self.algorithm.split(',').map(|name| name.parse()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Adjacency;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("terrain-search").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_resolve_to_default_settings() {
        let cli = parse(&[]);
        assert_eq!(cli.algorithm, "astar");
        assert_eq!(cli.delay_ms, 50);
        assert_eq!(cli.runs, 0);
        assert!(!cli.compare);

        let settings = cli.resolve_settings().unwrap();
        assert_eq!(settings.cols, 50);
        assert_eq!(settings.rows, 50);
        assert!(settings.dynamic_obstacles);
    }

    #[test]
    fn flags_override_defaults() {
        let cli = parse(&[
            "--cols",
            "12",
            "--rows",
            "8",
            "--wall-probability",
            "0.1",
            "--adjacency",
            "4",
            "--no-dynamic-obstacles",
            "--speed",
            "2.5",
        ]);
        let settings = cli.resolve_settings().unwrap();
        assert_eq!(settings.cols, 12);
        assert_eq!(settings.rows, 8);
        assert_eq!(settings.wall_probability, 0.1);
        assert_eq!(settings.adjacency, Adjacency::Four);
        assert!(!settings.dynamic_obstacles);
        assert_eq!(settings.speed, 2.5);
    }

    #[test]
    fn flags_override_the_settings_file() {
        let dir = std::env::temp_dir().join("terrain_search_cli_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.toml");
        std::fs::write(&path, "cols = 30\nrows = 40\nwall_probability = 0.2\n").unwrap();

        let cli = parse(&["--config", path.to_str().unwrap(), "--rows", "9"]);
        let settings = cli.resolve_settings().unwrap();
        assert_eq!(settings.cols, 30, "file value survives when no flag is given");
        assert_eq!(settings.rows, 9, "flag beats the file");
        assert_eq!(settings.wall_probability, 0.2);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn invalid_overrides_are_rejected() {
        let cli = parse(&["--wall-probability", "1.5"]);
        assert!(cli.resolve_settings().is_err());

        let cli = parse(&["--adjacency", "6"]);
        assert!(cli.resolve_settings().is_err());
    }

    #[test]
    fn algorithm_lists_parse() {
        let cli = parse(&["--algorithm", "all"]);
        assert_eq!(cli.parse_algorithms().unwrap(), Algorithm::ALL.to_vec());

        let cli = parse(&["--algorithm", "bfs,astar"]);
        assert_eq!(
            cli.parse_algorithms().unwrap(),
            vec![Algorithm::Bfs, Algorithm::AStar]
        );

        let cli = parse(&["--algorithm", "dijkstra"]);
        assert!(cli.parse_algorithms().is_err());
    }
}
