use serde::Deserialize;

use crate::error::ConfigError;

/// The four terrain categories a cell can carry.
///
/// Cells store the kind itself rather than a copy of its descriptor, so cost
/// and display color always resolve through the grid's [`TerrainTable`] and a
/// per-terrain report never needs a reverse lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerrainKind {
    Plain,
    Forest,
    Water,
    Mountain,
}

impl TerrainKind {
    pub const ALL: [TerrainKind; 4] = [
        TerrainKind::Plain,
        TerrainKind::Forest,
        TerrainKind::Water,
        TerrainKind::Mountain,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TerrainKind::Plain => "plain",
            TerrainKind::Forest => "forest",
            TerrainKind::Water => "water",
            TerrainKind::Mountain => "mountain",
        }
    }
}

/// Display color and traversal cost for one terrain kind.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TerrainType {
    pub color: [u8; 3],
    pub cost: f64,
}

/// Descriptor table for all four terrain kinds.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TerrainTable {
    pub plain: TerrainType,
    pub forest: TerrainType,
    pub water: TerrainType,
    pub mountain: TerrainType,
}

impl Default for TerrainTable {
    fn default() -> Self {
        TerrainTable {
            plain: TerrainType { color: [255, 255, 255], cost: 1.0 },
            forest: TerrainType { color: [34, 139, 34], cost: 5.0 },
            water: TerrainType { color: [65, 105, 225], cost: 10.0 },
            mountain: TerrainType { color: [139, 137, 137], cost: 20.0 },
        }
    }
}

impl TerrainTable {
    pub fn get(&self, kind: TerrainKind) -> &TerrainType {
        match kind {
            TerrainKind::Plain => &self.plain,
            TerrainKind::Forest => &self.forest,
            TerrainKind::Water => &self.water,
            TerrainKind::Mountain => &self.mountain,
        }
    }

    pub fn cost(&self, kind: TerrainKind) -> f64 {
        self.get(kind).cost
    }

    /// Every terrain must cost at least 1: a zero or negative cost would let
    /// the weighted searches walk through that terrain for free or loop.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in TerrainKind::ALL {
            let cost = self.cost(kind);
            if !(cost >= 1.0) {
                return Err(ConfigError::InvalidTerrainCost { terrain: kind.name(), cost });
            }
        }
        Ok(())
    }
}

/// Cumulative boundaries mapping a uniform draw in `[0, 1)` onto terrain
/// kinds: below `plain` is plain, below `forest` is forest, below `water` is
/// water, and everything above is mountain.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TerrainThresholds {
    pub plain: f64,
    pub forest: f64,
    pub water: f64,
}

impl Default for TerrainThresholds {
    fn default() -> Self {
        TerrainThresholds { plain: 0.70, forest: 0.85, water: 0.95 }
    }
}

impl TerrainThresholds {
    pub fn sample(&self, r: f64) -> TerrainKind {
        if r < self.plain {
            TerrainKind::Plain
        } else if r < self.forest {
            TerrainKind::Forest
        } else if r < self.water {
            TerrainKind::Water
        } else {
            TerrainKind::Mountain
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let in_range = |v: f64| (0.0..=1.0).contains(&v);
        let ordered = self.plain <= self.forest && self.forest <= self.water;
        if !in_range(self.plain) || !in_range(self.forest) || !in_range(self.water) || !ordered {
            return Err(ConfigError::InvalidThresholds {
                plain: self.plain,
                forest: self.forest,
                water: self.water,
            });
        }
        Ok(())
    }
}
