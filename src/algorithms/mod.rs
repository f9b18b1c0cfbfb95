use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

pub mod a_star;
pub mod bfs;
pub mod common;
pub mod dfs;
pub mod greedy;
pub mod uniform_cost;

pub use a_star::AStar;
pub use bfs::Bfs;
pub use common::{CellStatus, SearchState, Strategy};
pub use dfs::Dfs;
pub use greedy::GreedyBestFirst;
pub use uniform_cost::UniformCost;

/// The five search strategies the engine can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Dfs,
    Bfs,
    UniformCost,
    GreedyBestFirst,
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Dfs,
        Algorithm::Bfs,
        Algorithm::UniformCost,
        Algorithm::GreedyBestFirst,
        Algorithm::AStar,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Dfs => "DFS",
            Algorithm::Bfs => "BFS",
            Algorithm::UniformCost => "Uniform Cost",
            Algorithm::GreedyBestFirst => "Greedy Best-First",
            Algorithm::AStar => "A*",
        }
    }

    /// The policy object the engine steps with.
    pub fn strategy(self) -> Box<dyn Strategy> {
        match self {
            Algorithm::Dfs => Box::new(Dfs),
            Algorithm::Bfs => Box::new(Bfs),
            Algorithm::UniformCost => Box::new(UniformCost),
            Algorithm::GreedyBestFirst => Box::new(GreedyBestFirst),
            Algorithm::AStar => Box::new(AStar),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dfs" | "depth-first" => Ok(Algorithm::Dfs),
            "bfs" | "breadth-first" => Ok(Algorithm::Bfs),
            "ucs" | "uniform" | "uniform-cost" => Ok(Algorithm::UniformCost),
            "greedy" | "gbfs" | "greedy-best-first" => Ok(Algorithm::GreedyBestFirst),
            "astar" | "a*" | "a-star" => Ok(Algorithm::AStar),
            other => Err(ConfigError::UnknownAlgorithm(other.to_string())),
        }
    }
}
