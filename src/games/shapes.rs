use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::Config;
use crate::game::{GameKind, MiniGame, Resolution, Transition};
use crate::level::Level;
use crate::scoring::{SHAPE_FOUND, SHAPE_MISS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Red,
    Blue,
    Yellow,
    Green,
    Purple,
    Orange,
}

impl Shape {
    pub const ALL: [Shape; 6] = [
        Shape::Red,
        Shape::Blue,
        Shape::Yellow,
        Shape::Green,
        Shape::Purple,
        Shape::Orange,
    ];

    pub fn glyph(self) -> &'static str {
        match self {
            Shape::Red => "🔴",
            Shape::Blue => "🔵",
            Shape::Yellow => "🟡",
            Shape::Green => "🟢",
            Shape::Purple => "🟣",
            Shape::Orange => "🟠",
        }
    }
}

/// A grid of shapes with a target to hunt for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeGrid {
    pub target: Shape,
    pub cells: Vec<Shape>,
}

impl ShapeGrid {
    pub fn target_count(&self) -> usize {
        self.cells.iter().filter(|&&s| s == self.target).count()
    }
}

pub fn grid_size(level: Level) -> usize {
    16 + level.get() as usize * 4
}

pub fn target_count(level: Level) -> usize {
    2 + level.get() as usize
}

/// Lay out `2 + level` targets among `16 + 4 * level` cells, the rest drawn
/// uniformly from the other shapes, then shuffle.
pub fn generate_grid<R: Rng + ?Sized>(level: Level, rng: &mut R) -> ShapeGrid {
    let target = Shape::ALL[rng.gen_range(0..Shape::ALL.len())];
    let others: Vec<Shape> = Shape::ALL
        .iter()
        .copied()
        .filter(|&s| s != target)
        .collect();

    let size = grid_size(level);
    let mut cells = vec![target; target_count(level)];
    while cells.len() < size {
        cells.push(others[rng.gen_range(0..others.len())]);
    }
    cells.shuffle(rng);

    ShapeGrid { target, cells }
}

/// Attention game: find every cell showing the target shape before the
/// clock runs out.
#[derive(Debug, Clone)]
pub struct ShapeHunt {
    time_limit_secs: u32,
    regenerate_delay_ms: u32,
    found: Vec<bool>,
}

impl ShapeHunt {
    pub fn new(time_limit_secs: u32, regenerate_delay_ms: u32) -> Self {
        Self {
            time_limit_secs,
            regenerate_delay_ms,
            found: Vec::new(),
        }
    }

    pub fn is_found(&self, cell: usize) -> bool {
        self.found.get(cell).copied().unwrap_or(false)
    }

    pub fn remaining(&self, grid: &ShapeGrid) -> usize {
        grid.cells
            .iter()
            .enumerate()
            .filter(|&(i, &s)| s == grid.target && !self.is_found(i))
            .count()
    }
}

impl Default for ShapeHunt {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for ShapeHunt {
    fn from(cfg: &Config) -> Self {
        Self::new(cfg.attention_secs, cfg.regenerate_delay_ms)
    }
}

impl MiniGame for ShapeHunt {
    type Round = ShapeGrid;
    /// Index of the picked cell.
    type Action = usize;

    fn kind(&self) -> GameKind {
        GameKind::Attention
    }

    fn time_limit_secs(&self) -> Option<u32> {
        Some(self.time_limit_secs)
    }

    fn generate<R: Rng + ?Sized>(&mut self, level: Level, rng: &mut R) -> ShapeGrid {
        let grid = generate_grid(level, rng);
        self.found = vec![false; grid.cells.len()];
        grid
    }

    fn apply(&mut self, grid: &ShapeGrid, cell: usize, _level: Level) -> Option<Resolution> {
        let shape = *grid.cells.get(cell)?;
        if self.is_found(cell) {
            return None;
        }

        if shape != grid.target {
            return Some(Resolution::stay(SHAPE_MISS));
        }

        self.found[cell] = true;
        if self.remaining(grid) == 0 {
            Some(Resolution::after(
                SHAPE_FOUND,
                self.regenerate_delay_ms,
                Transition::LevelUp,
            ))
        } else {
            Some(Resolution::stay(SHAPE_FOUND))
        }
    }
}
