use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced while building an engine or loading settings.
///
/// All of these are raised before any search runs: invalid values fail fast
/// at construction instead of being silently clamped. A search that exhausts
/// its frontier without reaching the goal is *not* an error; it is reported
/// through [`SearchEngine::no_solution`](crate::engine::SearchEngine::no_solution).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {cols}x{rows}")]
    InvalidDimensions { cols: usize, rows: usize },

    #[error("{name} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    #[error(
        "terrain thresholds must be non-decreasing within [0, 1], \
         got plain={plain}, forest={forest}, water={water}"
    )]
    InvalidThresholds { plain: f64, forest: f64, water: f64 },

    #[error("terrain cost for {terrain} must be at least 1, got {cost}")]
    InvalidTerrainCost { terrain: &'static str, cost: f64 },

    #[error("grid pixel area must be positive, got {width}x{height}")]
    InvalidGridArea { width: f32, height: f32 },

    #[error("speed multiplier must be positive, got {0}")]
    InvalidSpeed(f64),

    #[error("unknown algorithm '{0}', expected one of: dfs, bfs, ucs, greedy, astar")]
    UnknownAlgorithm(String),

    #[error("unknown adjacency '{0}', expected '4' or '8'")]
    UnknownAdjacency(String),

    #[error("failed to read settings file {path}: {source}")]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file {path}: {source}")]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Errors from the batch driver: a bad configuration, or CSV output I/O.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to write batch output {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
