//! Growth engine: advances a bound grid one synchronous generation at a time.

use crate::environment::{effective_count, Environment, EnvironmentLayer};
use crate::grid::Grid;
use crate::rules::RuleSet;
use crate::snapshot::GridSnapshot;
use growth_core::{
    EngineConfig, EnvironmentKind, Error, GenerationHistory, GenerationRecord, PatternKind, Result,
};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info, instrument, trace, warn};

/// Lifecycle of an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No grid bound yet
    Uninitialized,
    /// Grid and rule set bound; steps may run
    Ready,
}

struct Bound {
    grid: Grid,
    rules: RuleSet,
}

/// Advances a bound grid under a rule set, environment layers and a noise source
pub struct GrowthEngine<R: Rng = ChaCha8Rng> {
    config: EngineConfig,
    bound: Option<Bound>,
    environment: Environment,
    history: GenerationHistory,
    generation: u64,
    /// Palette of the rule set that produced the current generation
    color_map: String,
    rng: R,
}

impl GrowthEngine<ChaCha8Rng> {
    /// Create an unbound engine whose noise source is seeded from `config.seed`
    pub fn new(config: EngineConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> GrowthEngine<R> {
    /// Create an unbound engine drawing noise from a caller-supplied source
    pub fn with_rng(config: EngineConfig, rng: R) -> Self {
        Self {
            config,
            bound: None,
            environment: Environment::new(),
            history: GenerationHistory::new(),
            generation: 0,
            color_map: String::new(),
            rng,
        }
    }

    pub fn state(&self) -> EngineState {
        if self.bound.is_some() {
            EngineState::Ready
        } else {
            EngineState::Uninitialized
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Bind a grid and rule set, starting a fresh lineage at generation 0.
    ///
    /// Fails if the rule set or the engine configuration is malformed.
    /// Environment layers carry over: built-in layers are recomputed if the
    /// grid shape changed, custom layers of the wrong shape are dropped.
    pub fn bind(&mut self, grid: Grid, rules: RuleSet) -> Result<()> {
        self.config.validate()?;
        rules.validate()?;

        if !self.environment.matches(grid.width(), grid.height()) {
            let dropped = self.environment.regenerate(grid.width(), grid.height())?;
            for kind in dropped {
                warn!(
                    event = "environment_dropped",
                    kind = %kind,
                    width = grid.width(),
                    height = grid.height(),
                    "Custom environment layer does not fit the new grid"
                );
            }
        }

        info!(
            event = "engine_bound",
            pattern = %rules.pattern,
            width = grid.width(),
            height = grid.height(),
            active_cells = grid.active_count(),
            "Grid bound to growth engine"
        );

        self.color_map = rules.color_map.clone();
        self.bound = Some(Bound { grid, rules });
        self.generation = 0;
        self.history = GenerationHistory::new();
        Ok(())
    }

    /// Compute and activate a built-in environment layer for the bound grid.
    ///
    /// Adding a kind that is already active replaces it.
    pub fn add_environment(&mut self, kind: EnvironmentKind) -> Result<()> {
        let (width, height) = {
            let grid = self.grid()?;
            (grid.width(), grid.height())
        };
        let layer = EnvironmentLayer::generate(&kind, width, height)?;
        let replaced = self.environment.insert(layer).is_some();

        debug!(
            event = "environment_added",
            kind = %kind,
            replaced,
            active_layers = self.environment.len(),
            "Environment layer active"
        );
        Ok(())
    }

    /// Activate a prepared layer (typically a custom field) for the bound grid
    pub fn insert_layer(&mut self, layer: EnvironmentLayer) -> Result<()> {
        let grid = self.grid()?;
        if !layer.matches(grid.width(), grid.height()) {
            return Err(Error::InvalidDimension(format!(
                "layer {} is {}x{}, grid is {}x{}",
                layer.kind(),
                layer.width(),
                layer.height(),
                grid.width(),
                grid.height()
            )));
        }

        let kind = layer.kind().clone();
        let replaced = self.environment.insert(layer).is_some();
        debug!(event = "environment_added", kind = %kind, replaced, "Environment layer active");
        Ok(())
    }

    pub fn remove_environment(&mut self, kind: &EnvironmentKind) -> Option<EnvironmentLayer> {
        self.environment.remove(kind)
    }

    /// Recompute every built-in layer for the bound grid
    pub fn regenerate_environment(&mut self) -> Result<()> {
        let (width, height) = {
            let grid = self.grid()?;
            (grid.width(), grid.height())
        };
        self.environment.regenerate(width, height)?;
        Ok(())
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn grid(&self) -> Result<&Grid> {
        self.bound
            .as_ref()
            .map(|bound| &bound.grid)
            .ok_or_else(not_initialized)
    }

    pub fn rules(&self) -> Result<&RuleSet> {
        self.bound
            .as_ref()
            .map(|bound| &bound.rules)
            .ok_or_else(not_initialized)
    }

    /// Number of steps taken since the grid was bound
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn history(&self) -> &GenerationHistory {
        &self.history
    }

    /// Hand the accumulated records to the caller, leaving the history empty
    pub fn take_history(&mut self) -> GenerationHistory {
        std::mem::take(&mut self.history)
    }

    /// Capture the current grid for a renderer
    pub fn snapshot(&self) -> Result<GridSnapshot> {
        let grid = self.grid()?;
        Ok(GridSnapshot::capture(
            grid,
            &self.environment,
            self.generation,
            &self.color_map,
        ))
    }

    /// Step with the bound rule set
    pub fn advance(&mut self) -> Result<usize> {
        let pattern = self.rules()?.pattern;
        self.step(pattern)
    }

    /// Advance one generation under `pattern`, returning the new live count.
    ///
    /// Every cell is evaluated against the same frozen generation; the grid is
    /// replaced only once the full next generation has been computed. On error
    /// the grid and history are untouched.
    #[instrument(level = "debug", skip(self), fields(generation = self.generation + 1))]
    pub fn step(&mut self, pattern: PatternKind) -> Result<usize> {
        let rules = self.resolve_rules(pattern)?;
        let len = self.grid()?.len();

        // One draw per cell, row-major, taken before evaluation so the
        // sequential and parallel passes see identical noise.
        let noise: Option<Vec<f64>> = rules
            .has_noise()
            .then(|| (0..len).map(|_| self.rng.gen::<f64>()).collect());

        let bound = self.bound.as_mut().ok_or_else(not_initialized)?;
        let parallel = len >= self.config.parallel_threshold;
        let next = next_generation(
            &bound.grid,
            &rules,
            &self.environment,
            self.config.sensitivity,
            noise.as_deref(),
            parallel,
        );

        let (births, deaths) = bound
            .grid
            .cells()
            .iter()
            .zip(&next)
            .fold((0, 0), |(births, deaths), (&was, &now)| match (was, now) {
                (false, true) => (births + 1, deaths),
                (true, false) => (births, deaths + 1),
                _ => (births, deaths),
            });

        bound.grid.replace_cells(next);
        let active_cells = bound.grid.active_count();

        self.generation += 1;
        self.color_map = rules.color_map.clone();
        self.history.push(GenerationRecord::new(
            self.generation,
            rules.pattern,
            active_cells,
            births,
            deaths,
        ));

        trace!(
            event = "generation_complete",
            generation = self.generation,
            pattern = %rules.pattern,
            active_cells,
            births,
            deaths,
            parallel,
            "Generation complete"
        );

        if active_cells == 0 {
            warn!(
                event = "extinction",
                generation = self.generation,
                pattern = %rules.pattern,
                "No active cells remaining"
            );
        }

        Ok(active_cells)
    }

    /// Step up to `generations` times, stopping early if the grid dies out
    pub fn run(&mut self, pattern: PatternKind, generations: u64) -> Result<usize> {
        let mut active_cells = self.grid()?.active_count();
        for _ in 0..generations {
            active_cells = self.step(pattern)?;
            if active_cells == 0 {
                break;
            }
        }
        Ok(active_cells)
    }

    /// Rule set for `pattern`.
    ///
    /// The bound rule set is used when it is of the requested kind; other
    /// built-in kinds fall back to their presets. `Custom` requires a bound
    /// custom rule set.
    fn resolve_rules(&self, pattern: PatternKind) -> Result<RuleSet> {
        let bound = self.rules()?;
        if bound.pattern == pattern {
            return Ok(bound.clone());
        }

        let mut rules = match pattern {
            PatternKind::Custom => {
                return Err(Error::UnknownPattern(
                    "no custom rule set is bound".to_string(),
                ))
            }
            builtin => RuleSet::preset(builtin)?,
        };
        if rules.has_noise() {
            rules.noise_amplitude = Some(self.config.mycelium_noise_amplitude);
        }
        rules.validate()?;
        Ok(rules)
    }
}

fn not_initialized() -> Error {
    Error::NotInitialized("bind a grid and rule set before stepping".to_string())
}

/// Compute the next generation from a frozen grid
fn next_generation(
    grid: &Grid,
    rules: &RuleSet,
    environment: &Environment,
    sensitivity: f64,
    noise: Option<&[f64]>,
    parallel: bool,
) -> Vec<bool> {
    let cells = grid.cells();
    let evaluate = |index: usize| -> bool {
        let pos = grid.index_to_pos(index);
        let raw = grid.live_neighbors(pos);
        let count = effective_count(raw, environment.combined_influence(pos), sensitivity);
        rules.is_alive_next(cells[index], count, noise.map(|draws| draws[index]))
    };

    let width = grid.width() as usize;
    let mut next = vec![false; grid.len()];
    if parallel {
        next.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = evaluate(y * width + x);
            }
        });
    } else {
        for (index, cell) in next.iter_mut().enumerate() {
            *cell = evaluate(index);
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::CountRange;
    use crate::seeder;
    use growth_core::Position;
    use proptest::prelude::*;
    use rand::rngs::mock::StepRng;

    fn engine() -> GrowthEngine {
        GrowthEngine::new(EngineConfig::default())
    }

    fn saturating_rules() -> RuleSet {
        RuleSet::custom(CountRange::new(0, 8), CountRange::new(0, 8), None, "gray").unwrap()
    }

    /// Reference implementation: evaluate cells from a cloned snapshot in the
    /// given order, writing into a separate buffer.
    fn reference_step(grid: &Grid, rules: &RuleSet, order: &[usize]) -> Vec<bool> {
        let frozen = grid.clone();
        let mut next = vec![false; grid.len()];
        for &index in order {
            let pos = frozen.index_to_pos(index);
            let count = frozen.neighbor_count(pos.x, pos.y).unwrap();
            next[index] = rules.is_alive_next(frozen.cells()[index], count, None);
        }
        next
    }

    #[test]
    fn test_step_before_bind_fails() {
        let mut engine = engine();
        assert_eq!(engine.state(), EngineState::Uninitialized);
        assert!(matches!(
            engine.step(PatternKind::Coral),
            Err(Error::NotInitialized(_))
        ));
        assert!(matches!(
            engine.add_environment(EnvironmentKind::Light),
            Err(Error::NotInitialized(_))
        ));
        assert!(engine.snapshot().is_err());
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_isolated_cell_dies_under_coral() {
        let mut grid = Grid::new(10, 10).unwrap();
        grid.set(4, 4, true).unwrap();

        let mut engine = engine();
        engine.bind(grid, RuleSet::coral()).unwrap();
        assert_eq!(engine.state(), EngineState::Ready);
        assert_eq!(engine.step(PatternKind::Coral).unwrap(), 0);
        assert!(!engine.grid().unwrap().get(4, 4).unwrap());
    }

    #[test]
    fn test_center_seed_under_coral() {
        let grid = seeder::seed_center(10, 10, 2.0).unwrap();
        let initial = grid.active_count();

        let mut engine = engine();
        engine.bind(grid.clone(), RuleSet::coral()).unwrap();
        let active = engine.step(PatternKind::Coral).unwrap();

        let order: Vec<usize> = (0..grid.len()).collect();
        let expected = reference_step(&grid, &RuleSet::coral(), &order);
        assert_eq!(engine.grid().unwrap().cells(), expected.as_slice());
        assert_eq!(active, expected.iter().filter(|&&c| c).count());

        let record = engine.history().latest().unwrap();
        assert_eq!(record.generation, 1);
        assert_eq!(record.active_cells, active);
        assert_eq!(initial + record.births - record.deaths, active);
    }

    #[test]
    fn test_blinker_oscillates() {
        let mut grid = Grid::new(5, 5).unwrap();
        for x in 1..4 {
            grid.set(x, 2, true).unwrap();
        }
        let horizontal = grid.clone();

        let mut engine = engine();
        engine.bind(grid, RuleSet::coral()).unwrap();
        assert_eq!(engine.step(PatternKind::Coral).unwrap(), 3);
        for y in 1..4 {
            assert!(engine.grid().unwrap().get(2, y).unwrap());
        }
        engine.step(PatternKind::Coral).unwrap();
        assert_eq!(engine.grid().unwrap(), &horizontal);
    }

    #[test]
    fn test_empty_grid_stays_empty() {
        for pattern in PatternKind::builtin() {
            let mut engine = engine();
            engine
                .bind(Grid::new(12, 9).unwrap(), RuleSet::preset(pattern).unwrap())
                .unwrap();
            assert_eq!(engine.run(pattern, 3).unwrap(), 0);
            assert_eq!(engine.grid().unwrap().active_count(), 0);
        }
    }

    #[test]
    fn test_saturation_with_and_without_environment() {
        let mut engine = engine();
        let grid = seeder::seed_random(9, 7, 0.4, &mut ChaCha8Rng::seed_from_u64(3)).unwrap();
        engine.bind(grid.clone(), saturating_rules()).unwrap();
        assert_eq!(engine.step(PatternKind::Custom).unwrap(), 63);

        let mut engine = GrowthEngine::new(EngineConfig {
            sensitivity: 6.0,
            ..Default::default()
        });
        engine.bind(grid, saturating_rules()).unwrap();
        engine.add_environment(EnvironmentKind::Light).unwrap();
        engine.add_environment(EnvironmentKind::Moisture).unwrap();
        assert_eq!(engine.step(PatternKind::Custom).unwrap(), 63);
    }

    #[test]
    fn test_custom_requires_bound_custom_rules() {
        let mut engine = engine();
        engine.bind(Grid::new(4, 4).unwrap(), RuleSet::coral()).unwrap();
        assert!(matches!(
            engine.step(PatternKind::Custom),
            Err(Error::UnknownPattern(_))
        ));
        assert!(engine.history().is_empty());
        assert_eq!(engine.generation(), 0);
    }

    #[test]
    fn test_bind_rejects_malformed_rules() {
        let mut engine = engine();
        let mut rules = RuleSet::coral();
        rules.survive = CountRange::new(3, 2);
        assert!(matches!(
            engine.bind(Grid::new(4, 4).unwrap(), rules),
            Err(Error::UnknownPattern(_))
        ));
        assert_eq!(engine.state(), EngineState::Uninitialized);
    }

    #[test]
    fn test_bind_rejects_non_finite_sensitivity() {
        let mut engine = GrowthEngine::new(EngineConfig {
            sensitivity: f64::NAN,
            ..Default::default()
        });
        assert!(matches!(
            engine.bind(Grid::new(4, 4).unwrap(), RuleSet::coral()),
            Err(Error::InvalidParameter(_))
        ));
        assert_eq!(engine.state(), EngineState::Uninitialized);
        assert!(matches!(
            engine.step(PatternKind::Coral),
            Err(Error::NotInitialized(_))
        ));
    }

    #[test]
    fn test_deserialized_grid_and_layer_drive_a_step() {
        assert!(serde_json::from_str::<Grid>(r#"{"width":3,"height":3,"cells":[true]}"#).is_err());

        let grid: Grid = serde_json::from_str(
            r#"{"width":3,"height":3,"cells":[false,true,false,false,true,false,false,true,false]}"#,
        )
        .unwrap();
        let layer: EnvironmentLayer = serde_json::from_str(
            r#"{"kind":{"custom":"flat"},"width":3,"height":3,"values":[0.5,0.5,0.5,0.5,0.5,0.5,0.5,0.5,0.5]}"#,
        )
        .unwrap();

        let mut engine = engine();
        engine.bind(grid, RuleSet::coral()).unwrap();
        engine.insert_layer(layer).unwrap();
        // neutral influence leaves the blinker flipping to horizontal
        assert_eq!(engine.step(PatternKind::Coral).unwrap(), 3);
        for x in 0..3 {
            assert!(engine.grid().unwrap().get(x, 1).unwrap());
        }
    }

    #[test]
    fn test_preset_fallback_for_other_patterns() {
        let mut grid = Grid::new(5, 5).unwrap();
        grid.set(1, 1, true).unwrap();
        grid.set(3, 1, true).unwrap();

        // (2, 1) has two live neighbors: lichen births it, coral does not
        let mut engine = engine();
        engine.bind(grid, RuleSet::coral()).unwrap();
        engine.step(PatternKind::Lichen).unwrap();
        assert!(engine.grid().unwrap().get(2, 1).unwrap());
        assert_eq!(engine.history().latest().unwrap().pattern, PatternKind::Lichen);
        assert_eq!(engine.snapshot().unwrap().color_map, "YlGn");
    }

    #[test]
    fn test_environment_idempotent_per_kind() {
        let mut engine = engine();
        engine.bind(Grid::new(8, 8).unwrap(), RuleSet::coral()).unwrap();
        engine.add_environment(EnvironmentKind::Light).unwrap();
        engine.add_environment(EnvironmentKind::Light).unwrap();
        assert_eq!(engine.environment().len(), 1);

        engine.add_environment(EnvironmentKind::Moisture).unwrap();
        assert_eq!(engine.environment().len(), 2);

        assert!(engine.remove_environment(&EnvironmentKind::Light).is_some());
        assert_eq!(engine.environment().len(), 1);
    }

    #[test]
    fn test_insert_layer_checks_shape() {
        let mut engine = engine();
        engine.bind(Grid::new(3, 3).unwrap(), RuleSet::coral()).unwrap();
        let wrong = EnvironmentLayer::custom("mask", 2, 2, vec![1.0; 4]).unwrap();
        assert!(matches!(
            engine.insert_layer(wrong),
            Err(Error::InvalidDimension(_))
        ));
        let right = EnvironmentLayer::custom("mask", 3, 3, vec![1.0; 9]).unwrap();
        engine.insert_layer(right).unwrap();
        assert_eq!(engine.environment().len(), 1);
        assert!(matches!(
            engine.add_environment(EnvironmentKind::Custom("other".into())),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_environment_biases_birth() {
        // (2, 1) sees two live neighbors. Coral needs three to birth.
        let mut grid = Grid::new(5, 3).unwrap();
        grid.set(1, 0, true).unwrap();
        grid.set(3, 0, true).unwrap();

        let mut engine = engine();
        engine.bind(grid.clone(), RuleSet::coral()).unwrap();
        engine
            .insert_layer(EnvironmentLayer::custom("rich", 5, 3, vec![1.0; 15]).unwrap())
            .unwrap();
        engine.step(PatternKind::Coral).unwrap();
        // 2 * (1 + 0.5) = 3
        assert!(engine.grid().unwrap().get(2, 1).unwrap());

        let mut engine = self::engine();
        engine.bind(grid, RuleSet::coral()).unwrap();
        engine.step(PatternKind::Coral).unwrap();
        assert!(!engine.grid().unwrap().get(2, 1).unwrap());
    }

    #[test]
    fn test_rebind_regenerates_environment() {
        let mut engine = engine();
        engine.bind(Grid::new(4, 4).unwrap(), RuleSet::coral()).unwrap();
        engine.add_environment(EnvironmentKind::Light).unwrap();
        engine.step(PatternKind::Coral).unwrap();

        engine.bind(Grid::new(6, 2).unwrap(), RuleSet::lichen()).unwrap();
        assert!(engine.environment().matches(6, 2));
        assert_eq!(engine.generation(), 0);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_mycelium_is_reproducible() {
        let grid = seeder::seed_random(20, 20, 0.3, &mut ChaCha8Rng::seed_from_u64(11)).unwrap();
        let run = |seed: u64| {
            let mut engine = GrowthEngine::new(EngineConfig {
                seed,
                ..Default::default()
            });
            engine.bind(grid.clone(), RuleSet::mycelium()).unwrap();
            engine.run(PatternKind::Mycelium, 5).unwrap();
            engine.grid().unwrap().clone()
        };
        assert_eq!(run(9), run(9));
    }

    #[test]
    fn test_injected_noise_source() {
        // StepRng(0, 0) always yields 0.0: every count is pulled down by one
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set(0, 1, true).unwrap();
        grid.set(2, 1, true).unwrap();
        grid.set(1, 0, true).unwrap();

        let mut engine = GrowthEngine::with_rng(EngineConfig::default(), StepRng::new(0, 0));
        engine.bind(grid, RuleSet::mycelium()).unwrap();
        engine.step(PatternKind::Mycelium).unwrap();
        // center sees 3, jittered to 2: born under birth [2, 3]
        assert!(engine.grid().unwrap().get(1, 1).unwrap());
        // corner (0, 0) sees 2, jittered to 1: stays dead
        assert!(!engine.grid().unwrap().get(0, 0).unwrap());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let grid = seeder::seed_random(40, 33, 0.35, &mut ChaCha8Rng::seed_from_u64(5)).unwrap();
        let run = |threshold: usize| {
            let mut engine = GrowthEngine::new(EngineConfig {
                seed: 17,
                parallel_threshold: threshold,
                ..Default::default()
            });
            engine.bind(grid.clone(), RuleSet::mycelium()).unwrap();
            engine.add_environment(EnvironmentKind::Light).unwrap();
            engine.run(PatternKind::Mycelium, 4).unwrap();
            engine.snapshot().unwrap()
        };
        assert_eq!(run(0), run(usize::MAX));
    }

    #[test]
    fn test_history_grows_one_record_per_step() {
        let grid = seeder::seed_center(16, 16, 5.0).unwrap();
        let mut engine = engine();
        engine.bind(grid, RuleSet::lichen()).unwrap();
        for _ in 0..4 {
            engine.advance().unwrap();
        }
        let generations: Vec<u64> = engine.history().iter().map(|r| r.generation).collect();
        assert_eq!(generations, vec![1, 2, 3, 4]);

        let taken = engine.take_history();
        assert_eq!(taken.len(), 4);
        assert!(engine.history().is_empty());
        assert_eq!(engine.generation(), 4);
    }

    #[test]
    fn test_snapshot_reports_generation() {
        let mut engine = engine();
        engine
            .bind(seeder::seed_center(8, 8, 2.0).unwrap(), RuleSet::coral())
            .unwrap();
        assert_eq!(engine.snapshot().unwrap().generation, 0);
        engine.step(PatternKind::Coral).unwrap();
        let snapshot = engine.snapshot().unwrap();
        assert_eq!(snapshot.generation, 1);
        assert_eq!(snapshot.color_map, "YlOrRd");
        assert_eq!(snapshot.active_count(), engine.grid().unwrap().active_count());
        assert_eq!(engine.grid().unwrap().center(), Position::new(4, 4));
    }

    proptest! {
        #[test]
        fn prop_step_is_order_independent(
            bits in proptest::collection::vec(any::<bool>(), 64),
            seed in any::<u64>(),
        ) {
            let grid = Grid::from_cells(8, 8, bits).unwrap();
            let rules = RuleSet::lichen();

            let mut engine = GrowthEngine::new(EngineConfig::default());
            engine.bind(grid.clone(), rules.clone()).unwrap();
            engine.step(PatternKind::Lichen).unwrap();

            let mut order: Vec<usize> = (0..grid.len()).collect();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            rand::seq::SliceRandom::shuffle(order.as_mut_slice(), &mut rng);
            let expected = reference_step(&grid, &rules, &order);

            prop_assert_eq!(engine.grid().unwrap().cells(), expected.as_slice());
        }

        #[test]
        fn prop_dimensions_are_immutable(
            width in 1i32..16,
            height in 1i32..16,
            steps in 1usize..6,
        ) {
            let grid = seeder::seed_random(width, height, 0.5, &mut ChaCha8Rng::seed_from_u64(1)).unwrap();
            let mut engine = GrowthEngine::new(EngineConfig::default());
            engine.bind(grid, RuleSet::mycelium()).unwrap();
            engine.add_environment(EnvironmentKind::Moisture).unwrap();
            for _ in 0..steps {
                engine.step(PatternKind::Mycelium).unwrap();
                let grid = engine.grid().unwrap();
                prop_assert_eq!(grid.width(), width);
                prop_assert_eq!(grid.height(), height);
                prop_assert_eq!(grid.len(), (width * height) as usize);
            }
        }
    }
}
