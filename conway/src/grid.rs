// grid.rs - Grid type for Conway's Game of Life

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::{LifeError, LifeResult};

// Default play area, matching the classic 50x50 board
pub const DEFAULT_WIDTH: usize  = 50;
pub const DEFAULT_HEIGHT: usize = 50;

/// Fixed-size rectangular board of live/dead cells.
///
/// Cells live in one row-major buffer behind an `Arc`: cloning a grid is a
/// pointer copy, and the first write to a shared buffer copies it.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Arc<Vec<bool>>,
}

impl Grid {
    /// All-dead grid. Both dimensions must be at least 1.
    pub fn new(width: usize, height: usize) -> LifeResult<Self> {
        let area = checked_area(width, height)?;
        Ok(Self {
            width,
            height,
            cells: Arc::new(vec![false; area]),
        })
    }

    /// Build a grid from a boolean matrix. Every row must have the same length.
    pub fn from_rows(rows: &[Vec<bool>]) -> LifeResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let area = checked_area(width, height)?;

        let mut cells = Vec::with_capacity(area);
        for (index, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(LifeError::Parse {
                    line: index + 1,
                    message: format!("row has {} cells, expected {}", row.len(), width),
                });
            }
            cells.extend_from_slice(row);
        }
        Ok(Self { width, height, cells: Arc::new(cells) })
    }

    /// Reassemble a grid from a buffer produced by the generation workers.
    pub(crate) fn from_buffer(width: usize, height: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self { width, height, cells: Arc::new(cells) }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Liveness at `(row, col)`. Out-of-bounds coordinates read as dead.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[row * self.width + col]
    }

    /// Set liveness at `(row, col)`. Returns false and leaves the grid
    /// untouched when the coordinate is out of bounds.
    pub fn set(&mut self, row: usize, col: usize, alive: bool) -> bool {
        if row >= self.height || col >= self.width {
            return false;
        }
        let width = self.width;
        Arc::make_mut(&mut self.cells)[row * width + col] = alive;
        true
    }

    pub fn toggle(&mut self, row: usize, col: usize) -> bool {
        let alive = self.get(row, col);
        self.set(row, col, !alive)
    }

    pub fn clear(&mut self) {
        self.cells = Arc::new(vec![false; self.area()]);
    }

    /// One row of cells, or `None` past the last row.
    pub fn row(&self, row: usize) -> Option<&[bool]> {
        if row >= self.height {
            return None;
        }
        let start = row * self.width;
        self.cells.get(start..start + self.width)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.width)
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// True when no cell is alive.
    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&alive| alive)
    }

    /// `(row, col)` of every live cell in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(move |(index, _)| (index / width, index % width))
    }

    /// Clear the grid and bring exactly `min(count, area)` distinct cells to
    /// life, chosen uniformly from `seed`. The same seed always yields the
    /// same grid.
    pub fn scatter(&mut self, count: usize, seed: u64) -> usize {
        let area = self.area();
        let count = count.min(area);
        let mut rng = StdRng::seed_from_u64(seed);

        let mut cells = vec![false; area];
        for index in rand::seq::index::sample(&mut rng, area, count) {
            cells[index] = true;
        }
        self.cells = Arc::new(cells);
        count
    }

    /// Structural 64-bit hash of dimensions and contents.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

// Both dimensions at least 1 and the cell count representable
fn checked_area(width: usize, height: usize) -> LifeResult<usize> {
    match width.checked_mul(height) {
        Some(area) if area > 0 => Ok(area),
        _ => Err(LifeError::InvalidDimension { width, height }),
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("population", &self.population())
            .finish()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::text::render(self))
    }
}
