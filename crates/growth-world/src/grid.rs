//! 2D occupancy grid.

use growth_core::{Direction, Error, Position, Result};
use serde::{Deserialize, Serialize};

/// A finite 2D grid of live/dead cells.
///
/// Cells are stored row-major. The grid never wraps: anything outside
/// `[0, width) x [0, height)` reads as dead when counting neighbors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<bool>,
}

/// Unchecked wire form of a [`Grid`]
#[derive(Deserialize)]
struct RawGrid {
    width: i32,
    height: i32,
    cells: Vec<bool>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = Error;

    fn try_from(raw: RawGrid) -> Result<Self> {
        Self::from_cells(raw.width, raw.height, raw.cells)
    }
}

impl Grid {
    /// Create an all-dead grid
    pub fn new(width: i32, height: i32) -> Result<Self> {
        let size = checked_size(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![false; size],
        })
    }

    /// Create a grid from row-major cell values
    pub fn from_cells(width: i32, height: i32, cells: Vec<bool>) -> Result<Self> {
        let size = checked_size(width, height)?;
        if cells.len() != size {
            return Err(Error::InvalidDimension(format!(
                "expected {} cells for a {}x{} grid, got {}",
                size,
                width,
                height,
                cells.len()
            )));
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row-major cell values
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub fn get(&self, x: i32, y: i32) -> Result<bool> {
        let index = self.checked_index(Position::new(x, y))?;
        Ok(self.cells[index])
    }

    pub fn set(&mut self, x: i32, y: i32, alive: bool) -> Result<()> {
        let index = self.checked_index(Position::new(x, y))?;
        self.cells[index] = alive;
        Ok(())
    }

    /// Number of live cells among the 8 Moore neighbors of `(x, y)`
    pub fn neighbor_count(&self, x: i32, y: i32) -> Result<u8> {
        let pos = Position::new(x, y);
        self.checked_index(pos)?;
        Ok(self.live_neighbors(pos))
    }

    /// Neighbor count for a position already known to be in bounds
    pub(crate) fn live_neighbors(&self, pos: Position) -> u8 {
        Direction::all()
            .iter()
            .map(|dir| {
                let (dx, dy) = dir.to_delta();
                pos.offset(dx, dy)
            })
            .filter(|&neighbor| self.is_live(neighbor))
            .count() as u8
    }

    /// Occupancy with implicit zero padding outside the grid
    fn is_live(&self, pos: Position) -> bool {
        pos.within(self.width, self.height) && self.cells[self.pos_to_index(pos)]
    }

    /// Count of live cells
    pub fn active_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.fill(false);
    }

    pub fn fill(&mut self, alive: bool) {
        self.cells.iter_mut().for_each(|cell| *cell = alive);
    }

    /// Swap in a fully computed next generation of the same shape
    pub(crate) fn replace_cells(&mut self, cells: Vec<bool>) {
        debug_assert_eq!(cells.len(), self.cells.len());
        self.cells = cells;
    }

    /// Grid center, rounded down
    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    fn checked_index(&self, pos: Position) -> Result<usize> {
        if !pos.within(self.width, self.height) {
            return Err(Error::OutOfBounds {
                x: pos.x,
                y: pos.y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.pos_to_index(pos))
    }

    fn pos_to_index(&self, pos: Position) -> usize {
        (pos.y * self.width + pos.x) as usize
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        let x = (index as i32) % self.width;
        let y = (index as i32) / self.width;
        Position::new(x, y)
    }

    /// Iterator over all positions
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells.len()).map(move |i| self.index_to_pos(i))
    }

    /// Iterator over all cells with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, bool)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &alive)| (self.index_to_pos(i), alive))
    }
}

/// Cell count for a `width x height` grid.
///
/// Positions are indexed with `i32` arithmetic, so the cell count must fit
/// in an `i32`.
pub(crate) fn checked_size(width: i32, height: i32) -> Result<usize> {
    if width <= 0 || height <= 0 {
        return Err(Error::InvalidDimension(format!(
            "grid must be at least 1x1, got {}x{}",
            width, height
        )));
    }
    let size = width as i64 * height as i64;
    if size > i32::MAX as i64 {
        return Err(Error::InvalidDimension(format!(
            "{}x{} grid is too large",
            width, height
        )));
    }
    Ok(size as usize)
}
