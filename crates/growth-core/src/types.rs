//! Core type definitions for the growth engine.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a growth run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 2D cell coordinate. Row-major: `y` selects the row, `x` the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Squared Euclidean distance to another position
    pub fn distance_sq(&self, other: &Position) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }

    /// Whether this position lies inside a `width` x `height` rectangle anchored at the origin
    pub fn within(&self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < width && self.y < height
    }
}

/// One of the eight Moore-neighborhood directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub fn to_delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, -1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (-1, 1),
        }
    }

    pub fn all() -> [Direction; 8] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
            Direction::NorthEast,
            Direction::NorthWest,
            Direction::SouthEast,
            Direction::SouthWest,
        ]
    }
}

/// Built-in growth styles plus a caller-defined rule set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    Coral,
    Lichen,
    Mycelium,
    Custom,
}

impl PatternKind {
    /// The patterns that have canonical presets
    pub fn builtin() -> [PatternKind; 3] {
        [PatternKind::Coral, PatternKind::Lichen, PatternKind::Mycelium]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::Coral => "coral",
            PatternKind::Lichen => "lichen",
            PatternKind::Mycelium => "mycelium",
            PatternKind::Custom => "custom",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatternKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "coral" => Ok(PatternKind::Coral),
            "lichen" => Ok(PatternKind::Lichen),
            "mycelium" => Ok(PatternKind::Mycelium),
            "custom" => Ok(PatternKind::Custom),
            other => Err(Error::UnknownPattern(other.to_string())),
        }
    }
}

/// Environmental factor an influence field models.
///
/// Kinds are map keys: at most one layer per kind is active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentKind {
    /// Radial field peaking at the grid center
    Light,
    /// Vertical field increasing toward the bottom row
    Moisture,
    /// Caller-supplied field, keyed by name
    Custom(String),
}

impl fmt::Display for EnvironmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvironmentKind::Light => f.write_str("light"),
            EnvironmentKind::Moisture => f.write_str("moisture"),
            EnvironmentKind::Custom(name) => write!(f, "custom:{}", name),
        }
    }
}

/// Orientation of a seeded line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Column at the horizontal midpoint, spanning the full height
    #[default]
    Vertical,
    /// Row at the vertical midpoint, spanning the full width
    Horizontal,
}

/// How the initial grid is populated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "lowercase")]
pub enum SeedStrategy {
    /// Each cell live independently with probability `density`
    Random { density: f64 },
    /// Disc of live cells around the grid center
    Center { radius: f64 },
    /// A single full-length line through the middle of the grid
    Line {
        #[serde(default)]
        orientation: Orientation,
    },
}

impl SeedStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            SeedStrategy::Random { .. } => "random",
            SeedStrategy::Center { .. } => "center",
            SeedStrategy::Line { .. } => "line",
        }
    }
}

impl Default for SeedStrategy {
    fn default() -> Self {
        SeedStrategy::Random { density: 0.3 }
    }
}
