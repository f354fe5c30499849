// matcher.rs - Orientation-invariant search for life-forms on a grid

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::error::{LifeError, LifeResult};
use crate::grid::Grid;
use crate::neighbors;
use crate::patterns::{Pattern, PatternClass};
use crate::pool::{WorkerPool, partition};
use crate::variants::{Shape, variants};

/// True when `shape` fits on the board with its top-left corner at
/// `(row, col)` and every cell of its bounding box agrees with the grid.
pub fn occurs_at(grid: &Grid, shape: &Shape, row: usize, col: usize) -> bool {
    if row + shape.rows() > grid.height() || col + shape.cols() > grid.width() {
        return false;
    }
    (0..shape.rows()).all(|r| (0..shape.cols()).all(|c| grid.get(row + r, col + c) == shape.get(r, c)))
}

/// Shared early-exit flag for one `exists` call.
struct Found(AtomicBool);

impl Found {
    fn new() -> Arc<Self> {
        Arc::new(Found(AtomicBool::new(false)))
    }

    #[inline]
    fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Returns true for the one caller that flips the flag.
    fn set(&self) -> bool {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// Worker body: scan every anchor for a disjoint subset of variants,
/// bailing out as soon as any worker has reported a hit. Returns true only
/// for the worker whose hit set the flag.
async fn scan(grid: Grid, shapes: Vec<Shape>, found: Arc<Found>) -> bool {
    // Anchors that are dead with no live neighbour cannot start a shape
    // that has a live cell in its top-left corner
    let shapes: Vec<(Shape, bool)> = shapes
        .into_iter()
        .map(|shape| {
            let prunable = shape.has_active_origin();
            (shape, prunable)
        })
        .collect();

    for row in 0..grid.height() {
        for col in 0..grid.width() {
            if found.is_set() {
                return false;
            }
            let quiet = !grid.get(row, col) && neighbors::count(&grid, row, col) == 0;
            for (shape, prunable) in &shapes {
                if quiet && *prunable {
                    continue;
                }
                if occurs_at(&grid, shape, row, col) {
                    let first = found.set();
                    if first {
                        debug!(row, col, "match found");
                    }
                    return first;
                }
            }
        }
        tokio::task::yield_now().await;
    }
    false
}

/// Parallel pattern search, splitting the variant list across the pool.
pub struct PatternMatcher {
    pool: Arc<WorkerPool>,
}

impl PatternMatcher {
    pub fn new(pool: Arc<WorkerPool>) -> Self {
        Self { pool }
    }

    /// True if any rotation or reflection of `shape` occurs anywhere on
    /// `grid`. Which occurrence triggered the hit is not reported.
    pub fn exists(&self, grid: &Grid, shape: &Shape) -> LifeResult<bool> {
        let all = variants(shape);
        let found = Found::new();
        let chunks = partition(all.len(), self.pool.workers());

        self.pool.block_on(async {
            let mut handles = Vec::with_capacity(chunks.len());
            for chunk in chunks {
                let subset = all[chunk].to_vec();
                handles.push(tokio::spawn(scan(grid.clone(), subset, Arc::clone(&found))));
            }
            for handle in handles {
                let _reported = handle.await?;
            }
            Ok::<_, LifeError>(())
        })?;

        Ok(found.is_set())
    }

    /// First pattern of `class`, in library order, present on `grid`.
    pub fn find_first(&self, grid: &Grid, class: PatternClass) -> LifeResult<Option<&'static Pattern>> {
        for pattern in class.patterns() {
            if self.exists(grid, &pattern.shape())? {
                return Ok(Some(pattern));
            }
        }
        Ok(None)
    }

    /// True if any pattern of `class` is present.
    pub fn detect(&self, grid: &Grid, class: PatternClass) -> LifeResult<bool> {
        Ok(self.find_first(grid, class)?.is_some())
    }

    pub fn is_block_or_beehive(&self, grid: &Grid) -> LifeResult<bool> {
        self.detect(grid, PatternClass::StillLife)
    }

    pub fn is_blinker_or_toad(&self, grid: &Grid) -> LifeResult<bool> {
        self.detect(grid, PatternClass::Oscillator)
    }

    pub fn is_glider_or_lwss(&self, grid: &Grid) -> LifeResult<bool> {
        self.detect(grid, PatternClass::Spaceship)
    }
}
