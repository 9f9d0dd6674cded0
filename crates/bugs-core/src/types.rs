//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a single run of the world
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

/// 2D position in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Apply toroidal wrapping for given world dimensions
    pub fn wrap(&self, width: i32, height: i32) -> Self {
        Self {
            x: ((self.x % width) + width) % width,
            y: ((self.y % height) + height) % height,
        }
    }
}

/// One of the six headings of the hex-like movement lattice.
///
/// The y axis grows downward, as on a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    South,
    SouthEast,
    NorthEast,
    North,
    NorthWest,
    SouthWest,
}

impl Heading {
    pub const COUNT: usize = 6;

    pub fn all() -> [Heading; Heading::COUNT] {
        [
            Heading::South,
            Heading::SouthEast,
            Heading::NorthEast,
            Heading::North,
            Heading::NorthWest,
            Heading::SouthWest,
        ]
    }

    /// Heading for a lattice index, taken modulo 6
    pub fn from_index(index: usize) -> Self {
        Self::all()[index % Self::COUNT]
    }

    pub fn index(&self) -> usize {
        match self {
            Heading::South => 0,
            Heading::SouthEast => 1,
            Heading::NorthEast => 2,
            Heading::North => 3,
            Heading::NorthWest => 4,
            Heading::SouthWest => 5,
        }
    }

    /// Rotate clockwise by `turn` lattice steps
    pub fn turn(&self, turn: usize) -> Self {
        Self::from_index(self.index() + turn)
    }

    pub fn to_delta(&self) -> (i32, i32) {
        match self {
            Heading::South => (0, 2),
            Heading::SouthEast => (2, 1),
            Heading::NorthEast => (2, -1),
            Heading::North => (0, -2),
            Heading::NorthWest => (-2, -1),
            Heading::SouthWest => (-2, 1),
        }
    }
}

/// State of a single resource cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Absent,
    Present,
}

impl Cell {
    pub fn is_present(&self) -> bool {
        matches!(self, Cell::Present)
    }
}

/// Behavioral label derived from how strongly a genome favours going straight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    /// Forward share above 80%
    Direct,
    /// Forward share above 50%
    Steady,
    /// Forward share above 25%
    Meandering,
    /// Everything else
    Circling,
}

impl Archetype {
    pub fn all() -> [Archetype; 4] {
        [
            Archetype::Direct,
            Archetype::Steady,
            Archetype::Meandering,
            Archetype::Circling,
        ]
    }

    /// Classify from the forward gene's weight and the genome's total weight.
    ///
    /// `total_weight` must be non-zero.
    pub fn classify(forward_weight: u64, total_weight: u64) -> Self {
        let forward = forward_weight as f64 / total_weight as f64 * 100.0;
        if forward > 80.0 {
            Archetype::Direct
        } else if forward > 50.0 {
            Archetype::Steady
        } else if forward > 25.0 {
            Archetype::Meandering
        } else {
            Archetype::Circling
        }
    }

    /// Colour used by renderers for this archetype
    pub fn color(&self) -> &'static str {
        match self {
            Archetype::Direct => "yellow",
            Archetype::Steady => "cyan",
            Archetype::Meandering => "magenta",
            Archetype::Circling => "red",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Archetype::Direct => "direct",
            Archetype::Steady => "steady",
            Archetype::Meandering => "meandering",
            Archetype::Circling => "circling",
        };
        f.write_str(name)
    }
}

/// Organism tally per archetype
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchetypeCounts {
    pub direct: usize,
    pub steady: usize,
    pub meandering: usize,
    pub circling: usize,
}

impl ArchetypeCounts {
    pub fn record(&mut self, archetype: Archetype) {
        match archetype {
            Archetype::Direct => self.direct += 1,
            Archetype::Steady => self.steady += 1,
            Archetype::Meandering => self.meandering += 1,
            Archetype::Circling => self.circling += 1,
        }
    }

    pub fn get(&self, archetype: Archetype) -> usize {
        match archetype {
            Archetype::Direct => self.direct,
            Archetype::Steady => self.steady,
            Archetype::Meandering => self.meandering,
            Archetype::Circling => self.circling,
        }
    }

    pub fn total(&self) -> usize {
        self.direct + self.steady + self.meandering + self.circling
    }
}

impl FromIterator<Archetype> for ArchetypeCounts {
    fn from_iter<I: IntoIterator<Item = Archetype>>(iter: I) -> Self {
        let mut counts = Self::default();
        for archetype in iter {
            counts.record(archetype);
        }
        counts
    }
}
