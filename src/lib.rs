//! Incremental grid search over weighted terrain.
//!
//! A [`engine::SearchEngine`] owns a procedurally generated maze and runs
//! one of five strategies (DFS, BFS, uniform cost, greedy best-first, A*)
//! one expansion at a time, so every frame of the search can be rendered.
//! Walls move while the search runs when dynamic obstacles are enabled,
//! and every run replays exactly from its seed.

pub mod algorithms;
pub mod board;
pub mod compare;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod metrics;
pub mod obstacles;
pub mod render;
pub mod runner;
pub mod settings;
pub mod terrain;

pub use algorithms::Algorithm;
pub use engine::{SearchEngine, SearchPhase};
pub use settings::Settings;
