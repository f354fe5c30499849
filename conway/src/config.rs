// config.rs - Experiment parameters

use serde::{Deserialize, Serialize};

use crate::error::{LifeError, LifeResult};
use crate::grid::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::patterns::PatternClass;

// Cap on randomized trials so every experiment terminates
pub const DEFAULT_MAX_TRIALS: usize = 300;

/// Parameters of one experiment run. Every field has a default, so a
/// partial JSON document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub width: usize,
    pub height: usize,
    /// Live cells scattered at the start of each trial.
    pub live_cells: usize,
    pub generations_per_trial: usize,
    pub max_trials: usize,
    pub pattern_class: PatternClass,
    /// Master seed for the per-trial seeds; OS entropy when absent.
    pub seed: Option<u64>,
    /// Worker count override; one per hardware thread when absent.
    pub workers: Option<usize>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            live_cells: DEFAULT_WIDTH * DEFAULT_HEIGHT / 5,
            generations_per_trial: 200,
            max_trials: DEFAULT_MAX_TRIALS,
            pattern_class: PatternClass::Spaceship,
            seed: None,
            workers: None,
        }
    }
}

impl ExperimentConfig {
    pub fn from_json(json: &str) -> LifeResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> LifeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> LifeResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(LifeError::InvalidDimension { width: self.width, height: self.height });
        }
        if self.generations_per_trial == 0 {
            return Err(LifeError::Config("generations_per_trial must be at least 1".into()));
        }
        if self.max_trials == 0 {
            return Err(LifeError::Config("max_trials must be at least 1".into()));
        }
        if self.workers == Some(0) {
            return Err(LifeError::Config("workers must be at least 1".into()));
        }
        Ok(())
    }
}
