// engine.rs - Synchronous generation stepping on the worker pool

use std::ops::Range;
use std::sync::Arc;

use tracing::debug;

use crate::error::{LifeError, LifeResult};
use crate::grid::Grid;
use crate::neighbors;
use crate::pool::{WorkerPool, partition};

/// Conway's B3/S23 rule for one cell.
#[inline]
pub fn next_state(alive: bool, live_neighbors: u8) -> bool {
    match (alive, live_neighbors) {
        (false, 0)            => false, // Quiet region, nothing to evaluate
        (_, 3)                => true,  // Birth or survival
        (alive, 2)            => alive, // Unchanged
        _                     => false, // Under- or overpopulation
    }
}

/// Worker body: next-generation cells for a contiguous block of rows,
/// computed from the read-only snapshot of the previous generation.
async fn process_rows(current: Grid, rows: Range<usize>) -> (usize, Vec<bool>) {
    let width = current.width();
    let mut block = Vec::with_capacity(rows.len() * width);
    for row in rows.clone() {
        for col in 0..width {
            let alive = current.get(row, col);
            block.push(next_state(alive, neighbors::count(&current, row, col)));
        }
        tokio::task::yield_now().await; // Cooperative yielding between rows
    }
    (rows.start, block)
}

/// Outcome of [`GenerationEngine::run`].
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub grid: Grid,
    /// Steps actually applied; fewer than requested when the grid died out.
    pub generations: usize,
}

/// Advances a grid one generation at a time, partitioning rows across the
/// pool's workers.
pub struct GenerationEngine {
    pool: Arc<WorkerPool>,
}

impl GenerationEngine {
    pub fn new(pool: Arc<WorkerPool>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Arc<WorkerPool> {
        &self.pool
    }

    /// Compute the next generation. The input grid is consumed; every cell
    /// of the result depends only on the input snapshot.
    pub fn step(&self, grid: Grid) -> LifeResult<Grid> {
        let (width, height) = (grid.width(), grid.height());
        let ranges = partition(height, self.pool.workers());

        let next = self.pool.block_on(async {
            // Each worker owns a disjoint block of output rows
            let mut handles = Vec::with_capacity(ranges.len());
            for rows in ranges {
                handles.push(tokio::spawn(process_rows(grid.clone(), rows)));
            }

            let mut cells = Vec::with_capacity(width * height);
            for handle in handles {
                let (start, block) = handle.await?;
                debug_assert_eq!(start * width, cells.len());
                cells.extend(block);
            }
            Ok::<_, LifeError>(cells)
        })?;

        debug!(width, height, "generation stepped");
        Ok(Grid::from_buffer(width, height, next))
    }

    /// Apply `generations` steps, stopping early once every cell is dead.
    pub fn run(&self, mut grid: Grid, generations: usize) -> LifeResult<RunSummary> {
        let mut applied = 0;
        while applied < generations && !grid.is_empty() {
            grid = self.step(grid)?;
            applied += 1;
        }
        Ok(RunSummary { grid, generations: applied })
    }
}
