// experiment.rs - Randomized trials searching for a stable life-form

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::ExperimentConfig;
use crate::engine::GenerationEngine;
use crate::error::LifeResult;
use crate::grid::Grid;
use crate::matcher::PatternMatcher;
use crate::patterns::{Pattern, PatternClass};
use crate::pool::WorkerPool;
use crate::stability::{Observation, StabilityTracker};

/// Stepping plus class detection plus stability tracking on one grid.
pub struct Detector {
    engine: GenerationEngine,
    matcher: PatternMatcher,
}

/// One generation of [`Detector::advance`].
#[derive(Debug, Clone)]
pub struct Advance {
    pub grid: Grid,
    /// First shape of the class seen on the new generation.
    pub hit: Option<&'static Pattern>,
    pub observation: Observation,
}

/// Outcome of [`Detector::confirm`].
#[derive(Debug, Clone)]
pub struct Confirmation {
    pub found: bool,
    /// Generation at which the sighting became stable.
    pub generation: Option<u64>,
    /// Shape seen on the confirming generation.
    pub shape: Option<&'static str>,
    /// Grid as of the last generation stepped.
    pub grid: Grid,
    pub generations: u64,
}

impl Detector {
    pub fn new(pool: Arc<WorkerPool>) -> Self {
        Self {
            engine: GenerationEngine::new(Arc::clone(&pool)),
            matcher: PatternMatcher::new(pool),
        }
    }

    pub fn engine(&self) -> &GenerationEngine {
        &self.engine
    }

    pub fn matcher(&self) -> &PatternMatcher {
        &self.matcher
    }

    /// Step `grid` once, look for `class` on the result and feed the
    /// sighting into `tracker` as `generation`.
    pub fn advance(
        &self,
        grid: Grid,
        class: PatternClass,
        generation: u64,
        tracker: &mut StabilityTracker,
        on_phase: &mut impl FnMut(Phase),
    ) -> LifeResult<Advance> {
        on_phase(Phase::Stepping);
        let grid = self.engine.step(grid)?;

        on_phase(Phase::Matching);
        let hit = self.matcher.find_first(&grid, class)?;
        let observation = tracker.observe(generation, hit.is_some());
        debug!(generation, count = observation.count, "observed {class}");
        Ok(Advance { grid, hit, observation })
    }

    /// Step `grid` up to `max_generations` times, stopping at the first
    /// stable sighting of `class` or once every cell has died. An empty grid
    /// is never stepped.
    pub fn confirm(&self, grid: Grid, class: PatternClass, max_generations: u64) -> LifeResult<Confirmation> {
        self.confirm_with(grid, class, max_generations, |_| {})
    }

    /// [`Detector::confirm`], reporting each phase change to `on_phase`.
    pub fn confirm_with(
        &self,
        mut grid: Grid,
        class: PatternClass,
        max_generations: u64,
        mut on_phase: impl FnMut(Phase),
    ) -> LifeResult<Confirmation> {
        let mut tracker = StabilityTracker::for_class(class);
        let mut generation = 0;

        while generation < max_generations && !grid.is_empty() {
            generation += 1;
            let step = self.advance(grid, class, generation, &mut tracker, &mut on_phase)?;
            grid = step.grid;
            if step.observation.stable {
                return Ok(Confirmation {
                    found: true,
                    generation: Some(generation),
                    shape: step.hit.map(|pattern| pattern.name),
                    grid,
                    generations: generation,
                });
            }
        }

        Ok(Confirmation { found: false, generation: None, shape: None, grid, generations: generation })
    }
}

/// Per-trial seeds drawn from one master seed, so a whole run replays from
/// the master seed alone.
#[derive(Debug, Clone)]
pub struct TrialSeeds {
    master: u64,
    rng: StdRng,
}

impl TrialSeeds {
    pub fn new(master: u64) -> Self {
        Self { master, rng: StdRng::seed_from_u64(master) }
    }

    /// Seeds from `master`, or from OS entropy when it is absent.
    pub fn from_config(master: Option<u64>) -> Self {
        Self::new(master.unwrap_or_else(|| rand::thread_rng().next_u64()))
    }

    pub fn master(&self) -> u64 {
        self.master
    }

    pub fn next_seed(&mut self) -> u64 {
        self.rng.next_u64()
    }
}

/// Where the coordinator currently is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Seeding,
    Stepping,
    Matching,
    Stopped,
}

/// How a single trial ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrialOutcome {
    Stable { generation: u64, shape: String },
    DiedOut { generation: u64 },
    Exhausted { generations: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub trial: usize,
    pub seed: u64,
    pub outcome: TrialOutcome,
}

/// How the whole experiment ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExperimentOutcome {
    PatternFound { trial: usize, generation: u64, seed: u64, shape: String },
    CapReached { trials: usize },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub config: ExperimentConfig,
    pub master_seed: u64,
    pub outcome: ExperimentOutcome,
    pub trials: Vec<TrialRecord>,
}

/// Drives randomized trials until a stable pattern appears or the trial
/// cap is reached.
pub struct ExperimentCoordinator {
    config: ExperimentConfig,
    detector: Detector,
    seeds: TrialSeeds,
    phase: Phase,
    grid: Grid,
}

impl ExperimentCoordinator {
    pub fn new(config: ExperimentConfig) -> LifeResult<Self> {
        config.validate()?;
        let pool = match config.workers {
            Some(workers) => WorkerPool::with_workers(workers)?,
            None => WorkerPool::new()?,
        };
        Self::with_pool(config, Arc::new(pool))
    }

    pub fn with_pool(config: ExperimentConfig, pool: Arc<WorkerPool>) -> LifeResult<Self> {
        config.validate()?;
        let grid = Grid::new(config.width, config.height)?;
        Ok(Self {
            detector: Detector::new(pool),
            seeds: TrialSeeds::from_config(config.seed),
            phase: Phase::Seeding,
            grid,
            config,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn master_seed(&self) -> u64 {
        self.seeds.master()
    }

    /// Grid of the most recent trial.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Run one trial from a fresh scatter seeded with `seed`.
    pub fn run_trial(&mut self, trial: usize, seed: u64) -> LifeResult<TrialRecord> {
        let class = self.config.pattern_class;

        self.phase = Phase::Seeding;
        let mut grid = Grid::new(self.config.width, self.config.height)?;
        grid.scatter(self.config.live_cells, seed);

        let phase = &mut self.phase;
        let result = self.detector.confirm_with(
            grid,
            class,
            self.config.generations_per_trial as u64,
            |next| *phase = next,
        )?;

        let outcome = match result.generation {
            Some(generation) => TrialOutcome::Stable {
                generation,
                shape: result.shape.unwrap_or_default().to_string(),
            },
            None if result.grid.is_empty() => TrialOutcome::DiedOut { generation: result.generations },
            None => TrialOutcome::Exhausted { generations: result.generations },
        };

        info!(trial, seed, ?outcome, "trial finished");
        self.grid = result.grid;
        Ok(TrialRecord { trial, seed, outcome })
    }

    /// Run trials until one confirms a stable pattern or `max_trials` is hit.
    pub fn run(&mut self) -> LifeResult<ExperimentReport> {
        let class = self.config.pattern_class;
        info!(
            master_seed = self.seeds.master(),
            width = self.config.width,
            height = self.config.height,
            "searching for {class}"
        );

        let mut trials = Vec::new();
        for trial in 1..=self.config.max_trials {
            let seed = self.seeds.next_seed();
            let record = self.run_trial(trial, seed)?;
            let found = match &record.outcome {
                TrialOutcome::Stable { generation, shape } => Some(ExperimentOutcome::PatternFound {
                    trial,
                    generation: *generation,
                    seed,
                    shape: shape.clone(),
                }),
                _ => None,
            };
            trials.push(record);

            if let Some(outcome) = found {
                self.phase = Phase::Stopped;
                info!(?outcome, "experiment finished");
                return Ok(self.report(outcome, trials));
            }
        }

        self.phase = Phase::Stopped;
        warn!(trials = self.config.max_trials, "trial cap reached without a stable {class}");
        let outcome = ExperimentOutcome::CapReached { trials: self.config.max_trials };
        Ok(self.report(outcome, trials))
    }

    fn report(&self, outcome: ExperimentOutcome, trials: Vec<TrialRecord>) -> ExperimentReport {
        ExperimentReport {
            config: self.config.clone(),
            master_seed: self.seeds.master(),
            outcome,
            trials,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{BLINKER_1, BLOCK, GLIDER_1};

    fn pool() -> Arc<WorkerPool> {
        Arc::new(WorkerPool::with_workers(2).unwrap())
    }

    #[test]
    fn confirm_block_after_two_generations() {
        let detector = Detector::new(pool());
        let mut grid = Grid::new(6, 6).unwrap();
        BLOCK.stamp(&mut grid, 2, 2);
        let result = detector.confirm(grid, PatternClass::StillLife, 20).unwrap();
        assert!(result.found);
        assert_eq!(result.generation, Some(2));
        assert_eq!(result.shape, Some("Block"));
    }

    #[test]
    fn confirm_blinker_after_three_generations() {
        let detector = Detector::new(pool());
        let mut grid = Grid::new(7, 7).unwrap();
        BLINKER_1.stamp(&mut grid, 3, 2);
        let result = detector.confirm(grid, PatternClass::Oscillator, 20).unwrap();
        assert_eq!(result.generation, Some(3));
    }

    #[test]
    fn confirm_glider_after_five_generations() {
        let detector = Detector::new(pool());
        let mut grid = Grid::new(20, 20).unwrap();
        GLIDER_1.stamp(&mut grid, 1, 1);
        let result = detector.confirm(grid, PatternClass::Spaceship, 40).unwrap();
        assert!(result.found);
        assert_eq!(result.generation, Some(5));
    }

    #[test]
    fn confirm_gives_up_when_grid_dies() {
        let detector = Detector::new(pool());
        let mut grid = Grid::new(5, 5).unwrap();
        grid.set(2, 2, true);
        let result = detector.confirm(grid, PatternClass::StillLife, 20).unwrap();
        assert!(!result.found);
        assert_eq!(result.generations, 1);
        assert!(result.grid.is_empty());
    }

    #[test]
    fn wrong_class_is_never_confirmed() {
        let detector = Detector::new(pool());
        let mut grid = Grid::new(6, 6).unwrap();
        BLOCK.stamp(&mut grid, 2, 2);
        let result = detector.confirm(grid, PatternClass::Spaceship, 10).unwrap();
        assert!(!result.found);
        assert_eq!(result.generations, 10);
    }

    #[test]
    fn trial_outcomes_are_reproducible() {
        let config = ExperimentConfig {
            width: 16,
            height: 16,
            live_cells: 60,
            generations_per_trial: 30,
            max_trials: 1,
            pattern_class: PatternClass::StillLife,
            seed: Some(1),
            workers: Some(2),
        };
        let mut first = ExperimentCoordinator::with_pool(config.clone(), pool()).unwrap();
        let mut second = ExperimentCoordinator::with_pool(config, pool()).unwrap();
        assert_eq!(first.run_trial(1, 123).unwrap(), second.run_trial(1, 123).unwrap());
        assert_eq!(first.grid(), second.grid());
    }

    #[test]
    fn empty_board_dies_out_immediately() {
        let config = ExperimentConfig {
            width: 8,
            height: 8,
            live_cells: 0,
            generations_per_trial: 10,
            max_trials: 3,
            seed: Some(9),
            ..Default::default()
        };
        let mut coordinator = ExperimentCoordinator::with_pool(config, pool()).unwrap();
        assert_eq!(coordinator.phase(), Phase::Seeding);

        let report = coordinator.run().unwrap();
        assert_eq!(report.outcome, ExperimentOutcome::CapReached { trials: 3 });
        assert_eq!(report.trials.len(), 3);
        assert!(report.trials.iter().all(|t| t.outcome == TrialOutcome::DiedOut { generation: 0 }));
        assert_eq!(coordinator.phase(), Phase::Stopped);
    }

    #[test]
    fn dense_board_finds_still_life() {
        let config = ExperimentConfig {
            width: 30,
            height: 30,
            live_cells: 300,
            generations_per_trial: 200,
            max_trials: 50,
            pattern_class: PatternClass::StillLife,
            seed: Some(2024),
            workers: Some(2),
        };
        let mut coordinator = ExperimentCoordinator::with_pool(config, pool()).unwrap();
        let report = coordinator.run().unwrap();
        match report.outcome {
            ExperimentOutcome::PatternFound { trial, generation, seed, shape } => {
                assert!(generation >= 2);
                assert_eq!(report.trials[trial - 1].seed, seed);
                assert!(shape == "Block" || shape == "Beehive");
            }
            other => panic!("expected a still life, got {other:?}"),
        }
    }

    #[test]
    fn same_master_seed_same_report() {
        let config = ExperimentConfig {
            width: 12,
            height: 12,
            live_cells: 40,
            generations_per_trial: 15,
            max_trials: 4,
            pattern_class: PatternClass::Oscillator,
            seed: Some(77),
            workers: Some(2),
        };
        let a = ExperimentCoordinator::with_pool(config.clone(), pool()).unwrap().run().unwrap();
        let b = ExperimentCoordinator::with_pool(config, pool()).unwrap().run().unwrap();
        assert_eq!(a.outcome, b.outcome);
        assert_eq!(a.trials, b.trials);
    }

    #[test]
    fn trial_agrees_with_confirm_on_the_same_grid() {
        for (class, seed) in [(PatternClass::StillLife, 5), (PatternClass::Oscillator, 8), (PatternClass::Spaceship, 13)] {
            let config = ExperimentConfig {
                width: 14,
                height: 14,
                live_cells: 50,
                generations_per_trial: 40,
                max_trials: 1,
                pattern_class: class,
                seed: Some(3),
                workers: Some(2),
            };
            let mut coordinator = ExperimentCoordinator::with_pool(config, pool()).unwrap();
            let record = coordinator.run_trial(1, seed).unwrap();

            let mut grid = Grid::new(14, 14).unwrap();
            grid.scatter(50, seed);
            let confirmed = Detector::new(pool()).confirm(grid, class, 40).unwrap();

            let expected = match confirmed.generation {
                Some(generation) => TrialOutcome::Stable {
                    generation,
                    shape: confirmed.shape.unwrap_or_default().to_string(),
                },
                None if confirmed.grid.is_empty() => TrialOutcome::DiedOut { generation: confirmed.generations },
                None => TrialOutcome::Exhausted { generations: confirmed.generations },
            };
            assert_eq!(record.outcome, expected, "{class}");
            assert_eq!(coordinator.grid(), &confirmed.grid);
        }
    }

    #[test]
    fn lone_cell_dies_after_one_step_in_both_drivers() {
        let config = ExperimentConfig {
            width: 5,
            height: 5,
            live_cells: 1,
            generations_per_trial: 10,
            max_trials: 1,
            seed: Some(4),
            workers: Some(1),
            ..Default::default()
        };
        let mut coordinator = ExperimentCoordinator::with_pool(config, pool()).unwrap();
        let record = coordinator.run_trial(1, 21).unwrap();
        assert_eq!(record.outcome, TrialOutcome::DiedOut { generation: 1 });

        let mut grid = Grid::new(5, 5).unwrap();
        grid.scatter(1, 21);
        let confirmed = Detector::new(pool()).confirm(grid, PatternClass::Spaceship, 10).unwrap();
        assert_eq!(confirmed.generations, 1);
    }

    #[test]
    fn trial_seeds_replay_from_master() {
        let mut a = TrialSeeds::new(42);
        let mut b = TrialSeeds::new(42);
        let first: Vec<u64> = (0..5).map(|_| a.next_seed()).collect();
        let second: Vec<u64> = (0..5).map(|_| b.next_seed()).collect();
        assert_eq!(first, second);
        assert_eq!(a.master(), 42);
        assert_ne!(first[0], first[1]);
    }

    #[test]
    fn confirm_with_reports_each_phase() {
        let detector = Detector::new(pool());
        let mut grid = Grid::new(6, 6).unwrap();
        BLOCK.stamp(&mut grid, 1, 1);
        let mut phases = Vec::new();
        detector
            .confirm_with(grid, PatternClass::StillLife, 5, |phase| phases.push(phase))
            .unwrap();
        assert_eq!(phases, vec![Phase::Stepping, Phase::Matching, Phase::Stepping, Phase::Matching]);
    }

    #[test]
    fn report_serializes_to_json() {
        let outcome = ExperimentOutcome::PatternFound { trial: 2, generation: 9, seed: 5, shape: "Block".into() };
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"kind\":\"pattern_found\""));
        let back: ExperimentOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outcome);
    }
}
