// experiment.rs - Headless experiment runner
//
// Usage: experiment [config.json]
//
// Runs randomized trials until a stable life-form of the configured class
// appears, then prints the JSON report and the final grid.

use std::env;
use std::fs;

use conway::{ExperimentConfig, ExperimentCoordinator, ExperimentOutcome};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = match env::args().nth(1) {
        Some(path) => ExperimentConfig::from_json(&fs::read_to_string(path)?)?,
        None => ExperimentConfig::default(),
    };

    let mut coordinator = ExperimentCoordinator::new(config)?;
    let report = coordinator.run()?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    if let ExperimentOutcome::PatternFound { .. } = report.outcome {
        print!("{}", coordinator.grid());
    }
    Ok(())
}
