// lib.rs - Conway's Game of Life with orientation-invariant life-form detection
//
// A grid is stepped in parallel row blocks, searched in parallel for every
// rotation and reflection of the canonical still lifes, oscillators and
// spaceships, and a sighting is declared stable once it persists for a
// class-specific number of generations.

pub mod config;
pub mod engine;
pub mod error;
pub mod experiment;
pub mod grid;
pub mod history;
pub mod matcher;
pub mod neighbors;
pub mod patterns;
pub mod pool;
pub mod stability;
pub mod text;
pub mod variants;

pub use config::ExperimentConfig;
pub use engine::{GenerationEngine, RunSummary};
pub use error::{LifeError, LifeResult};
pub use experiment::{
    Advance, Confirmation, Detector, ExperimentCoordinator, ExperimentOutcome, ExperimentReport,
    Phase, TrialOutcome, TrialRecord, TrialSeeds,
};
pub use grid::Grid;
pub use history::CycleDetector;
pub use matcher::PatternMatcher;
pub use patterns::{PATTERNS, Pattern, PatternClass};
pub use pool::WorkerPool;
pub use stability::{Observation, StabilityTracker};
pub use variants::Shape;
