use rand::rngs::StdRng;
use rand::Rng;

use crate::settings::{Adjacency, Settings};
use crate::terrain::{TerrainKind, TerrainTable, TerrainThresholds};

/// A cell coordinate: column across, row down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub col: usize,
    pub row: usize,
}

impl Pos {
    pub fn new(col: usize, row: usize) -> Self {
        Pos { col, row }
    }

    /// Straight-line distance in cell units. Adjacent cardinal neighbors are
    /// 1 apart, diagonal neighbors sqrt(2).
    pub fn distance(&self, other: &Pos) -> f64 {
        let dc = self.col as f64 - other.col as f64;
        let dr = self.row as f64 - other.row as f64;
        (dc * dc + dr * dr).sqrt()
    }

    pub fn manhattan(&self, other: &Pos) -> usize {
        self.col.abs_diff(other.col) + self.row.abs_diff(other.row)
    }

    pub fn chebyshev(&self, other: &Pos) -> usize {
        self.col.abs_diff(other.col).max(self.row.abs_diff(other.row))
    }
}

/// One grid cell: terrain, wall flag, and the transient per-search fields.
///
/// The backpointer is a flat cell index rather than a reference, so resetting
/// or regenerating the grid can never leave a dangling chain.
#[derive(Debug, Clone, Copy)]
pub struct Cell {
    pub terrain: TerrainKind,
    pub wall: bool,
    pub g: f64,
    pub h: f64,
    pub f: f64,
    pub backpointer: Option<usize>,
}

impl Cell {
    fn new(terrain: TerrainKind, wall: bool) -> Self {
        Cell { terrain, wall, g: f64::INFINITY, h: 0.0, f: 0.0, backpointer: None }
    }

    fn reset_search_fields(&mut self) {
        self.g = f64::INFINITY;
        self.h = 0.0;
        self.f = 0.0;
        self.backpointer = None;
    }
}

/// Neighbor offsets as (dcol, drow); the cardinal four come first so
/// 4-way adjacency is a prefix of the 8-way set.
const OFFSETS: [(i64, i64); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

/// Row-major cell storage plus the precomputed adjacency lists.
///
/// The grid exclusively owns its cells; searches only hold flat indices into
/// it. Start is always `(0, 0)`, the goal the opposite corner, and neither
/// can ever become a wall.
#[derive(Debug, Clone)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cell_w: f32,
    cell_h: f32,
    cells: Vec<Cell>,
    neighbors: Vec<Vec<usize>>,
    terrain: TerrainTable,
    thresholds: TerrainThresholds,
    wall_probability: f64,
    adjacency: Adjacency,
    start: usize,
    goal: usize,
}

impl Grid {
    /// Build a grid from validated settings: one terrain draw and one wall
    /// draw per cell in row-major order, then the adjacency lists.
    pub fn generate(settings: &Settings, area: (f32, f32), rng: &mut StdRng) -> Self {
        let cols = settings.cols;
        let rows = settings.rows;
        let mut grid = Grid {
            cols,
            rows,
            cell_w: area.0 / cols as f32,
            cell_h: area.1 / rows as f32,
            cells: Vec::with_capacity(cols * rows),
            neighbors: Vec::with_capacity(cols * rows),
            terrain: settings.terrain_types,
            thresholds: settings.terrain_thresholds,
            wall_probability: settings.wall_probability,
            adjacency: settings.adjacency,
            start: 0,
            goal: cols * rows - 1,
        };

        for _ in 0..cols * rows {
            let terrain = grid.thresholds.sample(rng.gen::<f64>());
            let wall = rng.gen::<f64>() < grid.wall_probability;
            grid.cells.push(Cell::new(terrain, wall));
        }
        grid.cells[grid.start].wall = false;
        grid.cells[grid.goal].wall = false;

        grid.build_neighbors();
        grid
    }

    fn build_neighbors(&mut self) {
        let take = match self.adjacency {
            Adjacency::Four => 4,
            Adjacency::Eight => 8,
        };
        self.neighbors.clear();
        for index in 0..self.cells.len() {
            let pos = self.pos(index);
            let mut list = Vec::new();
            for &(dc, dr) in &OFFSETS[..take] {
                let nc = pos.col as i64 + dc;
                let nr = pos.row as i64 + dr;
                if nc >= 0 && nc < self.cols as i64 && nr >= 0 && nr < self.rows as i64 {
                    list.push(self.index_of(nc as usize, nr as usize));
                }
            }
            self.neighbors.push(list);
        }
    }

    /// Re-roll terrain and walls in place for a fresh maze on the same
    /// dimensions. Clears all transient search fields as well.
    pub fn regenerate(&mut self, rng: &mut StdRng) {
        let thresholds = self.thresholds;
        let wall_probability = self.wall_probability;
        for cell in &mut self.cells {
            cell.terrain = thresholds.sample(rng.gen::<f64>());
            cell.wall = rng.gen::<f64>() < wall_probability;
            cell.reset_search_fields();
        }
        self.cells[self.start].wall = false;
        self.cells[self.goal].wall = false;
    }

    /// Clear every cell's transient search fields while keeping terrain and
    /// walls, so another search can run over the identical maze.
    pub fn reset_search_fields(&mut self) {
        for cell in &mut self.cells {
            cell.reset_search_fields();
        }
    }

    #[inline]
    pub fn index_of(&self, col: usize, row: usize) -> usize {
        debug_assert!(col < self.cols && row < self.rows);
        row * self.cols + col
    }

    #[inline]
    pub fn pos(&self, index: usize) -> Pos {
        Pos { col: index % self.cols, row: index / self.cols }
    }

    pub fn cell(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    pub(crate) fn cell_mut(&mut self, index: usize) -> &mut Cell {
        &mut self.cells[index]
    }

    pub fn neighbors(&self, index: usize) -> &[usize] {
        &self.neighbors[index]
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell_width(&self) -> f32 {
        self.cell_w
    }

    pub fn cell_height(&self) -> f32 {
        self.cell_h
    }

    pub fn adjacency(&self) -> Adjacency {
        self.adjacency
    }

    pub fn start(&self) -> Pos {
        self.pos(self.start)
    }

    pub fn goal(&self) -> Pos {
        self.pos(self.goal)
    }

    pub fn start_index(&self) -> usize {
        self.start
    }

    pub fn goal_index(&self) -> usize {
        self.goal
    }

    pub fn terrain_table(&self) -> &TerrainTable {
        &self.terrain
    }

    pub fn terrain_cost(&self, index: usize) -> f64 {
        self.terrain.cost(self.cells[index].terrain)
    }

    pub fn terrain_name(&self, index: usize) -> &'static str {
        self.cells[index].terrain.name()
    }

    /// Map pixel coordinates onto a cell, or `None` when the point lies
    /// outside the grid area.
    pub fn cell_at_pixel(&self, px: f32, py: f32) -> Option<Pos> {
        if px < 0.0 || py < 0.0 {
            return None;
        }
        let col = (px / self.cell_w) as usize;
        let row = (py / self.cell_h) as usize;
        if col < self.cols && row < self.rows {
            Some(Pos { col, row })
        } else {
            None
        }
    }

    /// Wall a cell. Start and goal stay open no matter who asks; returns
    /// whether the flag was set.
    pub fn set_wall(&mut self, index: usize) -> bool {
        if index == self.start || index == self.goal {
            return false;
        }
        self.cells[index].wall = true;
        true
    }

    pub fn clear_wall(&mut self, index: usize) {
        self.cells[index].wall = false;
    }

    pub fn is_wall(&self, index: usize) -> bool {
        self.cells[index].wall
    }
}
