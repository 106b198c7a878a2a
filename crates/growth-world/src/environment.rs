//! Static environmental influence fields.
//!
//! Each layer maps every cell to a value in `[0, 1]`. Active layers multiply
//! together into a combined influence that bends the neighbor count a cell
//! sees: favourable cells behave as if slightly more crowded, unfavourable
//! ones as if sparser.

use crate::grid::checked_size;
use crate::rules::MAX_NEIGHBORS;
use growth_core::{EnvironmentKind, Error, Position, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Light never drops below this fraction of its peak
const LIGHT_FLOOR: f32 = 0.3;
/// Moisture at the top row; rises linearly to 1.0 at the bottom row
const MOISTURE_TOP: f32 = 0.5;

/// One influence field, shaped like the grid it modulates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLayer")]
pub struct EnvironmentLayer {
    kind: EnvironmentKind,
    width: i32,
    height: i32,
    values: Vec<f32>,
}

/// Unchecked wire form of an [`EnvironmentLayer`]
#[derive(Deserialize)]
struct RawLayer {
    kind: EnvironmentKind,
    width: i32,
    height: i32,
    values: Vec<f32>,
}

impl TryFrom<RawLayer> for EnvironmentLayer {
    type Error = Error;

    fn try_from(raw: RawLayer) -> Result<Self> {
        EnvironmentLayer::validated(raw.kind, raw.width, raw.height, raw.values)
    }
}

impl EnvironmentLayer {
    /// Radial light field: `1 - 0.5 * d^2 / (W * H / 4)` clipped to `[0.3, 1]`
    pub fn light(width: i32, height: i32) -> Result<Self> {
        check_dimensions(width, height)?;
        let center = Position::new(width / 2, height / 2);
        let spread = width as f64 * height as f64 / 4.0;

        let values = positions(width, height)
            .map(|pos| {
                let falloff = 0.5 * pos.distance_sq(&center) as f64 / spread;
                ((1.0 - falloff) as f32).clamp(LIGHT_FLOOR, 1.0)
            })
            .collect();

        Ok(Self {
            kind: EnvironmentKind::Light,
            width,
            height,
            values,
        })
    }

    /// Vertical moisture gradient from 0.5 at row 0 to 1.0 at the last row
    pub fn moisture(width: i32, height: i32) -> Result<Self> {
        check_dimensions(width, height)?;
        let rows = (height - 1).max(1) as f32;

        let values = positions(width, height)
            .map(|pos| {
                if height == 1 {
                    MOISTURE_TOP
                } else {
                    MOISTURE_TOP + (1.0 - MOISTURE_TOP) * pos.y as f32 / rows
                }
            })
            .collect();

        Ok(Self {
            kind: EnvironmentKind::Moisture,
            width,
            height,
            values,
        })
    }

    /// Caller-supplied row-major field
    pub fn custom(
        name: impl Into<String>,
        width: i32,
        height: i32,
        values: Vec<f32>,
    ) -> Result<Self> {
        Self::validated(EnvironmentKind::Custom(name.into()), width, height, values)
    }

    fn validated(
        kind: EnvironmentKind,
        width: i32,
        height: i32,
        values: Vec<f32>,
    ) -> Result<Self> {
        let expected = check_dimensions(width, height)?;
        if values.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "{} layer needs {} values for {}x{}, got {}",
                kind,
                expected,
                width,
                height,
                values.len()
            )));
        }
        if let Some(bad) = values
            .iter()
            .find(|v| !v.is_finite() || **v < 0.0 || **v > 1.0)
        {
            return Err(Error::InvalidParameter(format!(
                "influence values must lie in [0, 1], found {}",
                bad
            )));
        }

        Ok(Self {
            kind,
            width,
            height,
            values,
        })
    }

    /// Compute a built-in layer; custom kinds cannot be generated
    pub fn generate(kind: &EnvironmentKind, width: i32, height: i32) -> Result<Self> {
        match kind {
            EnvironmentKind::Light => Self::light(width, height),
            EnvironmentKind::Moisture => Self::moisture(width, height),
            EnvironmentKind::Custom(name) => Err(Error::InvalidParameter(format!(
                "custom layer '{}' must be supplied with values",
                name
            ))),
        }
    }

    pub fn kind(&self) -> &EnvironmentKind {
        &self.kind
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn matches(&self, width: i32, height: i32) -> bool {
        self.width == width && self.height == height
    }

    /// Influence at a position; zero outside the field
    pub fn value_at(&self, pos: Position) -> f32 {
        if !pos.within(self.width, self.height) {
            return 0.0;
        }
        self.values[(pos.y * self.width + pos.x) as usize]
    }
}

/// Active layers, at most one per kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    layers: BTreeMap<EnvironmentKind, EnvironmentLayer>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer, replacing any existing layer of the same kind
    pub fn insert(&mut self, layer: EnvironmentLayer) -> Option<EnvironmentLayer> {
        self.layers.insert(layer.kind.clone(), layer)
    }

    pub fn remove(&mut self, kind: &EnvironmentKind) -> Option<EnvironmentLayer> {
        self.layers.remove(kind)
    }

    pub fn get(&self, kind: &EnvironmentKind) -> Option<&EnvironmentLayer> {
        self.layers.get(kind)
    }

    pub fn contains(&self, kind: &EnvironmentKind) -> bool {
        self.layers.contains_key(kind)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn kinds(&self) -> impl Iterator<Item = &EnvironmentKind> + '_ {
        self.layers.keys()
    }

    pub fn layers(&self) -> impl Iterator<Item = &EnvironmentLayer> + '_ {
        self.layers.values()
    }

    /// Product of every layer's value at `pos`, or `None` when no layer is active
    pub fn combined_influence(&self, pos: Position) -> Option<f32> {
        if self.layers.is_empty() {
            return None;
        }
        Some(self.layers.values().map(|layer| layer.value_at(pos)).product())
    }

    /// True when every layer has the given shape
    pub fn matches(&self, width: i32, height: i32) -> bool {
        self.layers.values().all(|layer| layer.matches(width, height))
    }

    /// Rebuild layers for a new shape.
    ///
    /// Built-in layers are recomputed; custom layers of the wrong shape cannot
    /// be recomputed and are returned as dropped.
    pub fn regenerate(&mut self, width: i32, height: i32) -> Result<Vec<EnvironmentKind>> {
        let mut dropped = Vec::new();
        let kinds: Vec<EnvironmentKind> = self.layers.keys().cloned().collect();

        for kind in kinds {
            match kind {
                EnvironmentKind::Custom(_) => {
                    let stale = self
                        .layers
                        .get(&kind)
                        .map_or(false, |layer| !layer.matches(width, height));
                    if stale {
                        self.layers.remove(&kind);
                        dropped.push(kind);
                    }
                }
                _ => {
                    let layer = EnvironmentLayer::generate(&kind, width, height)?;
                    self.layers.insert(kind, layer);
                }
            }
        }

        Ok(dropped)
    }
}

/// Scale a raw neighbor count by environmental influence.
///
/// `round(raw * (1 + (influence - 0.5) * sensitivity))`, clamped to `[0, 8]`.
/// Without influence the raw count passes through unchanged.
pub fn effective_count(raw: u8, influence: Option<f32>, sensitivity: f64) -> u8 {
    let Some(influence) = influence else {
        return raw;
    };
    let scaled = raw as f64 * (1.0 + (influence as f64 - 0.5) * sensitivity);
    scaled.round().clamp(0.0, MAX_NEIGHBORS as f64) as u8
}

/// Layers share the grid's size limits
fn check_dimensions(width: i32, height: i32) -> Result<usize> {
    checked_size(width, height)
}

fn positions(width: i32, height: i32) -> impl Iterator<Item = Position> {
    (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
}
