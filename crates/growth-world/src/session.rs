//! Growth run: one seeded grid grown under a fixed pattern and environment.

use crate::engine::GrowthEngine;
use crate::rules::RuleSet;
use crate::seeder;
use crate::snapshot::GridSnapshot;
use growth_core::{Error, GenerationRecord, PatternKind, Result, RunConfig, RunId};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// A configured growth run, ready to execute
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthRun {
    pub run_id: RunId,
    pub config: RunConfig,
    /// Rule set used when the pattern is `Custom`
    pub custom_rules: Option<RuleSet>,
}

impl GrowthRun {
    pub fn new(config: RunConfig) -> Self {
        Self {
            run_id: RunId::new(),
            config,
            custom_rules: None,
        }
    }

    /// A run driven by a caller-defined rule set
    pub fn with_custom_rules(mut config: RunConfig, rules: RuleSet) -> Result<Self> {
        rules.validate()?;
        config.pattern = PatternKind::Custom;
        Ok(Self {
            run_id: RunId::new(),
            config,
            custom_rules: Some(rules),
        })
    }

    fn rules(&self) -> Result<RuleSet> {
        match self.config.pattern {
            PatternKind::Custom => self.custom_rules.clone().ok_or_else(|| {
                Error::UnknownPattern("custom pattern requested without a rule set".to_string())
            }),
            PatternKind::Mycelium => {
                let mut rules = RuleSet::mycelium();
                rules.noise_amplitude = Some(self.config.engine.mycelium_noise_amplitude);
                Ok(rules)
            }
            builtin => RuleSet::preset(builtin),
        }
    }

    /// Seed, grow, and collect snapshots and statistics
    #[instrument(skip(self), fields(run_id = %self.run_id, pattern = %self.config.pattern, seeding = self.config.seeding.name()))]
    pub fn execute(self) -> Result<RunReport> {
        let config = &self.config;
        let rules = self.rules()?;

        // Seeding and noise share one seeded stream so a run replays exactly
        let mut rng = ChaCha8Rng::seed_from_u64(config.engine.seed);
        let grid = seeder::seed(
            &config.seeding,
            config.grid.width,
            config.grid.height,
            &mut rng,
        )?;

        let mut engine = GrowthEngine::with_rng(config.engine.clone(), rng);
        engine.bind(grid, rules)?;
        for kind in &config.environment {
            engine.add_environment(kind.clone())?;
        }

        let initial = engine.snapshot()?;
        info!(
            event = "run_started",
            initial_active = initial.active_count(),
            generations = config.generations,
            environment = engine.environment().len(),
            "Growing {} from {} seed",
            config.pattern,
            config.seeding.name()
        );

        let mut snapshots = Vec::new();
        let mut active_cells = initial.active_count();
        for generation in 1..=config.generations {
            active_cells = engine.step(config.pattern)?;

            if config.snapshot_interval > 0 && generation % config.snapshot_interval == 0 {
                snapshots.push(engine.snapshot()?);
            }

            if active_cells == 0 && config.stop_on_extinction {
                info!(event = "run_extinct", generation, "Pattern died out");
                break;
            }
        }

        if snapshots.last().map(|s| s.generation) != Some(engine.generation()) {
            snapshots.push(engine.snapshot()?);
        }

        let history = engine.take_history().into_vec();
        let peak_active = history.iter().map(|r| r.active_cells).max().unwrap_or(0);

        info!(
            event = "run_summary",
            generations_grown = engine.generation(),
            initial_active = initial.active_count(),
            final_active = active_cells,
            peak_active,
            snapshots = snapshots.len(),
            extinct = active_cells == 0,
            "Growth run complete"
        );

        Ok(RunReport {
            run_id: self.run_id,
            pattern: config.pattern,
            initial,
            snapshots,
            history,
            final_active: active_cells,
            extinct: active_cells == 0,
        })
    }
}

/// Everything a renderer needs from a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: RunId,
    pub pattern: PatternKind,
    /// Seeded grid before the first step
    pub initial: GridSnapshot,
    /// Periodic captures, always ending with the last generation grown
    pub snapshots: Vec<GridSnapshot>,
    pub history: Vec<GenerationRecord>,
    pub final_active: usize,
    pub extinct: bool,
}

impl RunReport {
    pub fn generations_grown(&self) -> u64 {
        self.history.last().map_or(0, |r| r.generation)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| Error::Serialization(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
