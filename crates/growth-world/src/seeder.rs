//! Initial grid population strategies.

use crate::grid::Grid;
use growth_core::{Error, Orientation, Result, SeedStrategy};
use rand::Rng;
use tracing::debug;

/// Build a grid using the given strategy
pub fn seed<R: Rng + ?Sized>(
    strategy: &SeedStrategy,
    width: i32,
    height: i32,
    rng: &mut R,
) -> Result<Grid> {
    let grid = match *strategy {
        SeedStrategy::Random { density } => seed_random(width, height, density, rng)?,
        SeedStrategy::Center { radius } => seed_center(width, height, radius)?,
        SeedStrategy::Line { orientation } => seed_line(width, height, orientation)?,
    };

    debug!(
        event = "grid_seeded",
        strategy = strategy.name(),
        width,
        height,
        active_cells = grid.active_count(),
        "Initial active cells: {}",
        grid.active_count()
    );

    Ok(grid)
}

/// Each cell independently live with probability `density`.
///
/// Exactly one uniform draw is taken per cell in row-major order.
pub fn seed_random<R: Rng + ?Sized>(
    width: i32,
    height: i32,
    density: f64,
    rng: &mut R,
) -> Result<Grid> {
    if !(0.0..=1.0).contains(&density) {
        return Err(Error::InvalidParameter(format!(
            "density must lie in [0, 1], got {}",
            density
        )));
    }

    let mut grid = Grid::new(width, height)?;
    let cells = (0..grid.len()).map(|_| rng.gen::<f64>() < density).collect();
    grid.replace_cells(cells);
    Ok(grid)
}

/// Disc of live cells within Euclidean distance `radius` of the grid center
pub fn seed_center(width: i32, height: i32, radius: f64) -> Result<Grid> {
    if !radius.is_finite() {
        return Err(Error::InvalidParameter(format!(
            "radius must be finite, got {}",
            radius
        )));
    }

    let mut grid = Grid::new(width, height)?;
    if radius <= 0.0 {
        return Ok(grid);
    }

    let center = grid.center();
    let radius_sq = radius * radius;
    let cells = grid
        .positions()
        .map(|pos| pos.distance_sq(&center) as f64 <= radius_sq)
        .collect();
    grid.replace_cells(cells);
    Ok(grid)
}

/// Full-length line through the middle of the grid
pub fn seed_line(width: i32, height: i32, orientation: Orientation) -> Result<Grid> {
    let mut grid = Grid::new(width, height)?;
    let center = grid.center();

    match orientation {
        Orientation::Vertical => {
            for y in 0..height {
                grid.set(center.x, y, true)?;
            }
        }
        Orientation::Horizontal => {
            for x in 0..width {
                grid.set(x, center.y, true)?;
            }
        }
    }

    Ok(grid)
}
