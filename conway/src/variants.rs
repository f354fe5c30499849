// variants.rs - Shape patterns and their rotations/reflections

use std::collections::HashSet;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Rectangular boolean matrix describing one phase of a life-form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Shape {
    /// Parse rows of `O` (alive) and `.` (dead). Any other character is
    /// dead as well; rows shorter than the longest are padded dead.
    pub fn from_art(art: &[&str]) -> Self {
        let rows = art.len();
        let cols = art.iter().map(|line| line.chars().count()).max().unwrap_or(0);
        let mut cells = vec![false; rows * cols];
        for (r, line) in art.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                cells[r * cols + c] = ch == 'O';
            }
        }
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.cols + col]
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// True when a live cell sits in the top-left 2x2 corner. Any occurrence
    /// of such a shape has a live cell at or next to its anchor.
    pub fn has_active_origin(&self) -> bool {
        (0..self.rows.min(2)).any(|r| (0..self.cols.min(2)).any(|c| self.get(r, c)))
    }

    /// Quarter turn clockwise: an R x C shape becomes C x R with
    /// `rotated[j][R-1-i] = self[i][j]`.
    pub fn rotate(&self) -> Self {
        let (rows, cols) = (self.cols, self.rows);
        let mut cells = vec![false; rows * cols];
        for i in 0..self.rows {
            for j in 0..self.cols {
                cells[j * cols + (self.rows - 1 - i)] = self.get(i, j);
            }
        }
        Self { rows, cols, cells }
    }

    /// Mirror left to right.
    pub fn flip_horizontal(&self) -> Self {
        let mut cells = Vec::with_capacity(self.cells.len());
        for row in self.cells.chunks(self.cols) {
            cells.extend(row.iter().rev());
        }
        Self { rows: self.rows, cols: self.cols, cells }
    }

    /// Mirror top to bottom.
    pub fn flip_vertical(&self) -> Self {
        let mut cells = Vec::with_capacity(self.cells.len());
        for row in self.cells.chunks(self.cols).rev() {
            cells.extend_from_slice(row);
        }
        Self { rows: self.rows, cols: self.cols, cells }
    }

    /// Order-sensitive structural hash over dimensions and cells.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

/// Every distinct orientation of `shape`.
///
/// The three quarter turns are collected first, then both mirror images of
/// each of those four. Candidates are deduplicated by fingerprint in
/// first-seen order, so the input itself always comes first. A shape with
/// no rows or no columns has no variants.
pub fn variants(shape: &Shape) -> Vec<Shape> {
    if shape.rows == 0 || shape.cols == 0 {
        return Vec::new();
    }

    let mut candidates = Vec::with_capacity(12);
    candidates.push(shape.clone());
    for _ in 0..3 {
        let next = candidates[candidates.len() - 1].rotate();
        candidates.push(next);
    }
    for index in 0..4 {
        let horizontal = candidates[index].flip_horizontal();
        let vertical = candidates[index].flip_vertical();
        candidates.push(horizontal);
        candidates.push(vertical);
    }

    let mut seen = HashSet::with_capacity(candidates.len());
    candidates
        .into_iter()
        .filter(|candidate| seen.insert(candidate.fingerprint()))
        .collect()
}
