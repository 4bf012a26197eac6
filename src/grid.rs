use crate::direction::Coordinate;
use crate::error::{Result, RoverError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The rover's operating area: a `width` x `height` rectangle anchored at the
/// origin plus a static set of obstacle cells.
///
/// The grid is read-only once built, so a single instance can be shared by
/// reference across any number of runs.
///
/// Deserialization is lenient like [`Grid::new`]: dimensions are taken as
/// written. Pass them through [`Grid::try_new`] when they must be positive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,

    /// Blocked cells. Duplicates collapse on construction.
    obstacles: HashSet<Coordinate>,
}

impl Grid {
    /// Builds a grid without validating the dimensions.
    ///
    /// Non-positive dimensions are accepted and yield a grid on which no
    /// position is valid. Use [`Grid::try_new`] to reject them.
    pub fn new(width: i32, height: i32, obstacles: impl IntoIterator<Item = Coordinate>) -> Self {
        Self {
            width,
            height,
            obstacles: obstacles.into_iter().collect(),
        }
    }

    /// Builds a grid, rejecting a width or height of zero or less.
    pub fn try_new(
        width: i32,
        height: i32,
        obstacles: impl IntoIterator<Item = Coordinate>,
    ) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(RoverError::InvalidDimensions { width, height });
        }
        Ok(Self::new(width, height, obstacles))
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// True iff `0 <= x < width` and `0 <= y < height`.
    pub fn is_valid_position(&self, c: Coordinate) -> bool {
        c.x >= 0 && c.x < self.width && c.y >= 0 && c.y < self.height
    }

    pub fn has_obstacle(&self, c: Coordinate) -> bool {
        self.obstacles.contains(&c)
    }

    /// A cell the rover may move into: inside the bounds and unobstructed.
    pub fn is_passable(&self, c: Coordinate) -> bool {
        self.is_valid_position(c) && !self.has_obstacle(c)
    }

    /// Returns `c` unchanged, in bounds or not.
    ///
    /// Edges are impassable; there is no wraparound. Collision checks never
    /// route through this.
    pub fn wrap_position(&self, c: Coordinate) -> Coordinate {
        c
    }

    pub fn obstacles(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.obstacles.iter().copied()
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }
}
