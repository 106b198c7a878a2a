//! Configuration types for growth runs.

use crate::error::{Error, Result};
use crate::types::{EnvironmentKind, PatternKind, SeedStrategy};
use serde::{Deserialize, Serialize};

/// Scales how strongly combined environmental influence bends the neighbor count
pub const DEFAULT_SENSITIVITY: f64 = 1.0;

/// Grid dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of columns
    pub width: i32,
    /// Number of rows
    pub height: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
        }
    }
}

/// Growth engine parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Random seed for noise draws
    pub seed: u64,
    /// Environmental sensitivity `k` in `round(raw * (1 + (influence - 0.5) * k))`
    pub sensitivity: f64,
    /// Noise amplitude used by the mycelium preset
    pub mycelium_noise_amplitude: f32,
    /// Grids with at least this many cells are evaluated in parallel
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            sensitivity: DEFAULT_SENSITIVITY,
            mycelium_noise_amplitude: 1.0,
            parallel_threshold: 64 * 64,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.sensitivity.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "sensitivity must be finite, got {}",
                self.sensitivity
            )));
        }
        Ok(())
    }
}

/// A single growth run from seeding to the last generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub grid: GridConfig,
    pub engine: EngineConfig,
    /// Growth style applied on every step
    pub pattern: PatternKind,
    /// Initial grid population
    pub seeding: SeedStrategy,
    /// Environment layers active during growth
    pub environment: Vec<EnvironmentKind>,
    /// Maximum number of generations to grow
    pub generations: u64,
    /// Capture a snapshot every N generations (0 disables intermediate snapshots)
    pub snapshot_interval: u64,
    /// End the run early once no live cells remain
    pub stop_on_extinction: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            engine: EngineConfig::default(),
            pattern: PatternKind::Coral,
            seeding: SeedStrategy::default(),
            environment: Vec::new(),
            generations: 30,
            snapshot_interval: 5,
            stop_on_extinction: true,
        }
    }
}

/// Log output format for the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Runner configuration: an ordered batch of growth runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    pub runs: Vec<RunConfig>,
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Default for RunnerConfig {
    /// Every built-in pattern crossed with every seeding strategy, grown under light
    fn default() -> Self {
        let seedings = [
            SeedStrategy::Random { density: 0.3 },
            SeedStrategy::Center { radius: 15.0 },
            SeedStrategy::Line {
                orientation: Default::default(),
            },
        ];

        let mut runs = Vec::new();
        for (i, pattern) in PatternKind::builtin().into_iter().enumerate() {
            for (j, seeding) in seedings.iter().enumerate() {
                runs.push(RunConfig {
                    engine: EngineConfig {
                        seed: (i * seedings.len() + j) as u64,
                        ..Default::default()
                    },
                    pattern,
                    seeding: *seeding,
                    environment: vec![EnvironmentKind::Light],
                    ..Default::default()
                });
            }
        }

        Self {
            runs,
            log_format: LogFormat::default(),
        }
    }
}
