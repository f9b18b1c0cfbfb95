use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use tracing::info;

use crate::error::ConfigError;
use crate::terrain::{TerrainTable, TerrainThresholds};

/// Pixel area the grid is laid out in when no other dimensions are given.
/// Cell width/height derive from this divided by the column/row counts.
pub const DEFAULT_GRID_AREA: (f32, f32) = (400.0, 400.0);

/// Neighborhood shape used when wiring cell adjacency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Adjacency {
    /// Cardinal neighbors only.
    Four,
    /// Cardinal plus diagonal neighbors.
    #[default]
    Eight,
}

impl FromStr for Adjacency {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "4" | "four" => Ok(Adjacency::Four),
            "8" | "eight" => Ok(Adjacency::Eight),
            other => Err(ConfigError::UnknownAdjacency(other.to_string())),
        }
    }
}

/// Engine construction settings.
///
/// Every field has a default, so a partial TOML file (or an empty one) is
/// enough to build an engine; fields that are *present but invalid* are
/// rejected by [`Settings::validate`] rather than silently replaced.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_cols")]
    pub cols: usize,
    #[serde(default = "default_rows")]
    pub rows: usize,
    #[serde(default = "default_wall_probability")]
    pub wall_probability: f64,
    #[serde(default)]
    pub adjacency: Adjacency,
    #[serde(default = "default_dynamic_obstacles")]
    pub dynamic_obstacles: bool,
    #[serde(default = "default_num_dynamic_obstacles")]
    pub num_dynamic_obstacles: usize,
    #[serde(default)]
    pub terrain_types: TerrainTable,
    #[serde(default)]
    pub terrain_thresholds: TerrainThresholds,
    #[serde(default = "default_speed")]
    pub speed: f64,
}

fn default_cols() -> usize {
    50
}
fn default_rows() -> usize {
    50
}
fn default_wall_probability() -> f64 {
    0.3
}
fn default_dynamic_obstacles() -> bool {
    true
}
fn default_num_dynamic_obstacles() -> usize {
    20
}
fn default_speed() -> f64 {
    1.0
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            cols: default_cols(),
            rows: default_rows(),
            wall_probability: default_wall_probability(),
            adjacency: Adjacency::default(),
            dynamic_obstacles: default_dynamic_obstacles(),
            num_dynamic_obstacles: default_num_dynamic_obstacles(),
            terrain_types: TerrainTable::default(),
            terrain_thresholds: TerrainThresholds::default(),
            speed: default_speed(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file. Missing fields fall back to defaults;
    /// the merged result is validated before it is returned.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings =
            toml::from_str(&contents).map_err(|source| ConfigError::SettingsParse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        info!(path = %path.display(), "loaded settings file");
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cols == 0 || self.rows == 0 {
            return Err(ConfigError::InvalidDimensions { cols: self.cols, rows: self.rows });
        }
        if !(0.0..=1.0).contains(&self.wall_probability) {
            return Err(ConfigError::ProbabilityOutOfRange {
                name: "wall_probability",
                value: self.wall_probability,
            });
        }
        if !(self.speed > 0.0) {
            return Err(ConfigError::InvalidSpeed(self.speed));
        }
        self.terrain_thresholds.validate()?;
        self.terrain_types.validate()?;
        Ok(())
    }
}
