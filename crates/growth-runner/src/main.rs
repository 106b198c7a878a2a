//! Headless runner that grows a batch of patterns and logs their statistics.

mod telemetry;

use anyhow::{Context, Result};
use growth_core::RunnerConfig;
use growth_world::{GrowthRun, RunReport};
use tracing::{error, info};

/// JSON runner configuration; the built-in matrix is used when unset
const CONFIG_ENV: &str = "GROWTH_RUNNER_CONFIG";

fn main() -> Result<()> {
    let config = load_config()?;

    telemetry::init_telemetry(config.log_format)?;

    info!("Starting growth runner");
    info!("Configured runs: {}", config.runs.len());

    let mut failures = 0;
    let mut extinct = 0;

    for (index, run_config) in config.runs.into_iter().enumerate() {
        let pattern = run_config.pattern;
        let seeding = run_config.seeding.name();
        info!("Generating {} pattern with {} seeding...", pattern, seeding);

        match GrowthRun::new(run_config).execute() {
            Ok(report) => {
                log_progress(&report);
                if report.extinct {
                    extinct += 1;
                }
            }
            Err(e) => {
                error!(run = index, %pattern, seeding, "Run failed: {}", e);
                failures += 1;
            }
        }
    }

    info!(
        event = "runner_complete",
        failures,
        extinct,
        "All growth runs finished"
    );

    if failures > 0 {
        anyhow::bail!("{} growth run(s) failed", failures);
    }
    Ok(())
}

fn load_config() -> Result<RunnerConfig> {
    match std::env::var(CONFIG_ENV) {
        Ok(json) => serde_json::from_str(&json)
            .with_context(|| format!("invalid JSON in {}", CONFIG_ENV)),
        Err(_) => Ok(RunnerConfig::default()),
    }
}

fn log_progress(report: &RunReport) {
    for record in report.history.iter().filter(|r| (r.generation - 1) % 5 == 0) {
        info!(
            run_id = %report.run_id,
            generation = record.generation,
            active_cells = record.active_cells,
            births = record.births,
            deaths = record.deaths,
            "Generation {}: {} active cells",
            record.generation,
            record.active_cells
        );
    }

    if report.extinct {
        info!(run_id = %report.run_id, "Pattern died out!");
    }
}
