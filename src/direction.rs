//! Compass directions and the lookup tables that drive rotation and translation.

use crate::error::RoverError;
use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An integer grid cell. Validity is a property of a [`Grid`](crate::Grid), not of the value.
pub type Coordinate = IVec2;

/// The direction the rover is facing.
///
/// Discriminants index the [`LEFT_TURNS`], [`RIGHT_TURNS`] and
/// [`DISPLACEMENTS`] tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "N")]
    North = 0,
    #[serde(rename = "S")]
    South = 1,
    #[serde(rename = "E")]
    East = 2,
    #[serde(rename = "W")]
    West = 3,
}

/// Counter-clockwise rotation, indexed by the current direction.
pub const LEFT_TURNS: [Direction; 4] = [
    Direction::West,  // North
    Direction::East,  // South
    Direction::North, // East
    Direction::South, // West
];

/// Clockwise rotation, indexed by the current direction.
pub const RIGHT_TURNS: [Direction; 4] = [
    Direction::East,  // North
    Direction::West,  // South
    Direction::South, // East
    Direction::North, // West
];

/// Unit displacement for one forward step, indexed by direction. North is `+Y`.
pub const DISPLACEMENTS: [IVec2; 4] = [IVec2::Y, IVec2::NEG_Y, IVec2::X, IVec2::NEG_X];

impl Direction {
    /// All directions, clockwise from North.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn turn_left(self) -> Self {
        LEFT_TURNS[self as usize]
    }

    pub fn turn_right(self) -> Self {
        RIGHT_TURNS[self as usize]
    }

    pub fn opposite(self) -> Self {
        self.turn_right().turn_right()
    }

    /// Unit vector for a forward step.
    pub fn displacement(self) -> IVec2 {
        DISPLACEMENTS[self as usize]
    }

    /// Single-letter abbreviation (`N`, `S`, `E`, `W`).
    pub fn letter(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::South => 'S',
            Direction::East => 'E',
            Direction::West => 'W',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Direction {
    type Err = RoverError;

    /// Accepts the letter or the full name, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" | "north" => Ok(Direction::North),
            "s" | "south" => Ok(Direction::South),
            "e" | "east" => Ok(Direction::East),
            "w" | "west" => Ok(Direction::West),
            _ => Err(RoverError::InvalidDirection(s.to_string())),
        }
    }
}
