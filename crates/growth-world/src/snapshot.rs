//! Read-only grid captures for renderers.

use crate::environment::Environment;
use crate::grid::Grid;
use growth_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Frozen copy of a grid at one generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub width: i32,
    pub height: i32,
    /// Generation the grid was in when captured (0 is the seeded state)
    pub generation: u64,
    /// Row-major occupancy
    pub cells: Vec<bool>,
    /// Row-major occupancy weighted by combined environmental influence
    pub intensity: Vec<f32>,
    /// Palette name of the rule set that produced this generation
    pub color_map: String,
}

impl GridSnapshot {
    pub fn capture(
        grid: &Grid,
        environment: &Environment,
        generation: u64,
        color_map: &str,
    ) -> Self {
        let intensity = grid
            .iter()
            .map(|(pos, alive)| {
                if alive {
                    environment.combined_influence(pos).unwrap_or(1.0)
                } else {
                    0.0
                }
            })
            .collect();

        Self {
            width: grid.width(),
            height: grid.height(),
            generation,
            cells: grid.cells().to_vec(),
            intensity,
            color_map: color_map.to_string(),
        }
    }

    pub fn active_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Rebuild a grid from the captured occupancy
    pub fn to_grid(&self) -> Result<Grid> {
        Grid::from_cells(self.width, self.height, self.cells.clone())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| Error::Serialization(e.to_string()))
    }
}
