//! Survival and birth rules for each growth style.

use growth_core::{Error, PatternKind, Result};
use serde::{Deserialize, Serialize};

/// Largest possible Moore-neighborhood count
pub const MAX_NEIGHBORS: u8 = 8;

/// Inclusive range of neighbor counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: u8,
    pub max: u8,
}

impl CountRange {
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, count: u8) -> bool {
        self.min <= count && count <= self.max
    }

    pub fn is_valid(&self) -> bool {
        self.min <= self.max && self.max <= MAX_NEIGHBORS
    }
}

/// Rules for one growth style, evaluated over the fixed 3x3 Moore kernel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    pub pattern: PatternKind,
    /// Neighbor counts that keep a live cell alive
    pub survive: CountRange,
    /// Neighbor counts that bring a dead cell to life
    pub birth: CountRange,
    /// Scale of the integer jitter applied to the neighbor count
    pub noise_amplitude: Option<f32>,
    /// Palette name handed to the renderer untouched
    pub color_map: String,
}

impl RuleSet {
    /// Canonical rules for a built-in pattern
    pub fn preset(pattern: PatternKind) -> Result<Self> {
        match pattern {
            PatternKind::Coral => Ok(Self::coral()),
            PatternKind::Lichen => Ok(Self::lichen()),
            PatternKind::Mycelium => Ok(Self::mycelium()),
            PatternKind::Custom => Err(Error::UnknownPattern(
                "custom rule sets have no preset".to_string(),
            )),
        }
    }

    pub fn coral() -> Self {
        Self::builtin(PatternKind::Coral, (2, 3), (3, 3), None, "YlOrRd")
    }

    pub fn lichen() -> Self {
        Self::builtin(PatternKind::Lichen, (1, 3), (2, 3), None, "YlGn")
    }

    /// Irregular branching comes from a +/-1 jitter on the neighbor count
    pub fn mycelium() -> Self {
        Self::builtin(PatternKind::Mycelium, (2, 4), (2, 3), Some(1.0), "copper")
    }

    fn builtin(
        pattern: PatternKind,
        survive: (u8, u8),
        birth: (u8, u8),
        noise_amplitude: Option<f32>,
        color_map: &str,
    ) -> Self {
        Self {
            pattern,
            survive: CountRange::new(survive.0, survive.1),
            birth: CountRange::new(birth.0, birth.1),
            noise_amplitude,
            color_map: color_map.to_string(),
        }
    }

    /// Build a caller-defined rule set
    pub fn custom(
        survive: CountRange,
        birth: CountRange,
        noise_amplitude: Option<f32>,
        color_map: impl Into<String>,
    ) -> Result<Self> {
        let rules = Self {
            pattern: PatternKind::Custom,
            survive,
            birth,
            noise_amplitude,
            color_map: color_map.into(),
        };
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.survive.is_valid() {
            return Err(Error::UnknownPattern(format!(
                "malformed survive range [{}, {}]",
                self.survive.min, self.survive.max
            )));
        }
        if !self.birth.is_valid() {
            return Err(Error::UnknownPattern(format!(
                "malformed birth range [{}, {}]",
                self.birth.min, self.birth.max
            )));
        }
        if let Some(amplitude) = self.noise_amplitude {
            if !amplitude.is_finite() || amplitude < 0.0 {
                return Err(Error::InvalidParameter(format!(
                    "noise amplitude must be finite and non-negative, got {}",
                    amplitude
                )));
            }
        }
        Ok(())
    }

    pub fn has_noise(&self) -> bool {
        self.noise_amplitude.is_some()
    }

    /// Next state of a cell given its (environment-adjusted) neighbor count.
    ///
    /// `noise_draw` is a uniform sample in `[0, 1)`; it is ignored unless the
    /// rule set carries a noise amplitude.
    pub fn is_alive_next(&self, alive: bool, neighbor_count: u8, noise_draw: Option<f64>) -> bool {
        let count = match (self.noise_amplitude, noise_draw) {
            (Some(amplitude), Some(draw)) => jitter(neighbor_count, amplitude, draw),
            _ => neighbor_count.min(MAX_NEIGHBORS),
        };

        if alive {
            self.survive.contains(count)
        } else {
            self.birth.contains(count)
        }
    }
}

/// Shift `count` by `round((2 * draw - 1) * amplitude)` and clamp into `[0, 8]`
fn jitter(count: u8, amplitude: f32, draw: f64) -> u8 {
    let offset = ((2.0 * draw - 1.0) * amplitude as f64).round() as i32;
    (count as i32 + offset).clamp(0, MAX_NEIGHBORS as i32) as u8
}
