// pool.rs - Fixed-size worker pool shared by stepping and matching

use std::future::Future;
use std::num::NonZeroUsize;
use std::thread;

use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use crate::error::LifeResult;

/// Multi-threaded tokio runtime sized to the machine's parallelism.
///
/// Stepping and matching never overlap: each phase enters the runtime with
/// `block_on` and returns once all of its tasks have finished.
pub struct WorkerPool {
    runtime: Runtime,
    workers: usize,
}

impl WorkerPool {
    /// Pool with one worker per available hardware thread.
    pub fn new() -> LifeResult<Self> {
        Self::with_workers(available_workers())
    }

    /// Pool with an explicit worker count (at least 1).
    pub fn with_workers(workers: usize) -> LifeResult<Self> {
        let workers = workers.max(1);
        let runtime = Builder::new_multi_thread()
            .worker_threads(workers)
            .thread_name("life-worker")
            .build()?;
        debug!(workers, "worker pool started");
        Ok(Self { runtime, workers })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Drive `future` to completion on the pool.
    ///
    /// Must not be called from inside another tokio runtime.
    pub(crate) fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

pub fn available_workers() -> usize {
    thread::available_parallelism().map_or(1, NonZeroUsize::get)
}

/// Split `0..len` into at most `parts` contiguous, non-empty ranges.
pub(crate) fn partition(len: usize, parts: usize) -> Vec<std::ops::Range<usize>> {
    let parts = parts.clamp(1, len.max(1));
    let chunk = len.div_ceil(parts);
    (0..len)
        .step_by(chunk.max(1))
        .map(|start| start..(start + chunk).min(len))
        .collect()
}
