// main.rs - Interactive pattern hunt for Conway's Game of Life
// Steps the board on the worker pool and watches for stable life-forms

use std::sync::Arc;
use std::time::{Duration, Instant};

use conway::{
    CycleDetector, Detector, ExperimentConfig, Grid, LifeResult, PATTERNS, PatternClass, Phase,
    StabilityTracker, TrialSeeds, WorkerPool,
};
use eframe::egui;
use egui::Color32;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ExperimentConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => ExperimentConfig::default(),
    };
    let viewer = LifeViewer::new(config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([820.0, 980.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life - Pattern Hunt",
        options,
        Box::new(move |_cc| Box::new(viewer)),
    )?;
    Ok(())
}

/// Viewer state: the current board plus the detector watching it
pub struct LifeViewer {
    pub grid: Grid,
    detector: Detector,
    tracker: StabilityTracker,
    cycle: CycleDetector,

    pub is_running: bool,
    pub hunting: bool,          // Reseed automatically when a trial dies out or runs out
    pub last_update: Instant,
    pub update_interval: Duration,
    pub generation: u64,
    pub trial: usize,
    pub seed: u64,
    seeds: TrialSeeds,
    pub generations_per_trial: u64,
    pub live_cells: usize,
    pub class: PatternClass,
    pub selected_pattern: usize,
    pub status: String,
    pub live_color: Color32,
    pub dead_color: Color32,
}

impl LifeViewer {
    pub fn new(config: ExperimentConfig) -> LifeResult<Self> {
        config.validate()?;
        let pool = match config.workers {
            Some(workers) => WorkerPool::with_workers(workers)?,
            None => WorkerPool::new()?,
        };

        let seeds = TrialSeeds::from_config(config.seed);
        info!(master_seed = seeds.master(), "hunting for {}", config.pattern_class);

        Ok(Self {
            grid: Grid::new(config.width, config.height)?,
            detector: Detector::new(Arc::new(pool)),
            tracker: StabilityTracker::for_class(config.pattern_class),
            cycle: CycleDetector::new(),
            is_running: false,
            hunting: false,
            last_update: Instant::now(),
            update_interval: Duration::from_millis(200),
            generation: 0,
            trial: 0,
            seed: 0,
            seeds,
            generations_per_trial: config.generations_per_trial as u64,
            live_cells: config.live_cells,
            class: config.pattern_class,
            selected_pattern: 0,
            status: String::from("Ready"),
            live_color: Color32::from_rgb(0, 200, 0),
            dead_color: Color32::from_rgb(40, 40, 40),
        })
    }

    fn restart_tracking(&mut self) {
        self.generation = 0;
        self.tracker = StabilityTracker::for_class(self.class);
        self.cycle.clear();
    }

    // Hunting moves on to a fresh trial, otherwise the run pauses
    fn end_trial(&mut self, status: String) {
        info!(trial = self.trial, seed = self.seed, generation = self.generation, "{status}");
        self.status = status;
        if self.hunting {
            self.reseed();
            self.is_running = true;
        } else {
            self.is_running = false;
        }
    }

    pub fn tracker(&self) -> &StabilityTracker {
        &self.tracker
    }

    pub fn set_class(&mut self, class: PatternClass) {
        self.class = class;
        self.tracker = StabilityTracker::for_class(class);
        self.status = format!("Watching for {class}");
    }
}

/// Operations driven by the UI
pub trait LifeInterface {
    fn update_generation(&mut self);
    fn clear_grid(&mut self);
    fn reseed(&mut self);
    fn apply_selected_pattern(&mut self);
    fn toggle_cell(&mut self, row: usize, col: usize);
}

impl LifeInterface for LifeViewer {
    fn update_generation(&mut self) {
        if self.grid.is_empty() {
            self.end_trial(format!("Trial {} died out at generation {}", self.trial, self.generation));
            return;
        }

        let generation = self.generation + 1;
        let step = self.detector.advance(
            self.grid.clone(),
            self.class,
            generation,
            &mut self.tracker,
            &mut |_: Phase| {},
        );
        let step = match step {
            Ok(step) => step,
            Err(err) => {
                warn!(%err, generation, "generation failed");
                self.status = format!("Generation failed: {err}");
                self.is_running = false;
                return;
            }
        };
        self.grid = step.grid;
        self.generation = generation;

        if step.observation.stable {
            let name = step.hit.map_or("pattern", |pattern| pattern.name);
            info!(trial = self.trial, seed = self.seed, generation, "{name} confirmed");
            self.status = format!("Stable {name} confirmed at generation {generation}");
            self.is_running = false;
            self.hunting = false;
        } else if self.grid.is_empty() {
            self.end_trial(format!("Trial {} died out at generation {generation}", self.trial));
        } else if self.hunting && generation >= self.generations_per_trial {
            self.end_trial(format!("Trial {} ran {generation} generations without a {}", self.trial, self.class));
        } else if !self.hunting && self.cycle.check(&self.grid) && self.tracker.count() == 0 {
            self.status = format!("Cycle without a {} at generation {generation}", self.class);
            self.is_running = false;
        }
    }

    fn clear_grid(&mut self) {
        self.grid.clear();
        self.restart_tracking();
        self.status = String::from("Cleared");
    }

    fn reseed(&mut self) {
        self.trial += 1;
        self.seed = self.seeds.next_seed();
        self.grid.scatter(self.live_cells, self.seed);
        self.restart_tracking();
        self.status = format!("Trial {} seeded with {}", self.trial, self.seed);
    }

    fn apply_selected_pattern(&mut self) {
        if let Some(pattern) = PATTERNS.get(self.selected_pattern) {
            let row = self.grid.height().saturating_sub(pattern.art.len()) / 2;
            let col = self.grid.width().saturating_sub(pattern.art[0].len()) / 2;
            pattern.apply(&mut self.grid, row, col);
            self.restart_tracking();
            self.status = format!("Placed {}", pattern.name);
        }
    }

    fn toggle_cell(&mut self, row: usize, col: usize) {
        self.grid.toggle(row, col);
    }
}
