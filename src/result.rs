//! Immutable run outcome handed to callers and presentation layers.

use crate::direction::{Coordinate, Direction};
use crate::rover::ExecutionState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExecutionStatus {
    /// Every command was processed.
    Success,
    /// A move was blocked by the boundary or an obstacle and the run halted.
    ObstacleDetected,
}

impl ExecutionStatus {
    /// The same name the status serializes to.
    pub fn as_str(self) -> &'static str {
        match self {
            ExecutionStatus::Success => "success",
            ExecutionStatus::ObstacleDetected => "obstacle-detected",
        }
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serializes coordinates as `{"x": .., "y": ..}` objects.
mod xy {
    use crate::direction::Coordinate;
    use glam::IVec2;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Xy {
        x: i32,
        y: i32,
    }

    impl From<Coordinate> for Xy {
        fn from(c: Coordinate) -> Self {
            Self { x: c.x, y: c.y }
        }
    }

    impl From<Xy> for Coordinate {
        fn from(p: Xy) -> Self {
            IVec2::new(p.x, p.y)
        }
    }

    pub fn serialize<S: Serializer>(c: &Coordinate, s: S) -> Result<S::Ok, S::Error> {
        Xy::from(*c).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Coordinate, D::Error> {
        Xy::deserialize(d).map(Into::into)
    }

    pub mod list {
        use super::Xy;
        use crate::direction::Coordinate;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(cells: &[Coordinate], s: S) -> Result<S::Ok, S::Error> {
            s.collect_seq(cells.iter().map(|&c| Xy::from(c)))
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            d: D,
        ) -> Result<Vec<Coordinate>, D::Error> {
            Vec::<Xy>::deserialize(d).map(|v| v.into_iter().map(Into::into).collect())
        }
    }

    pub mod option {
        use super::Xy;
        use crate::direction::Coordinate;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(c: &Option<Coordinate>, s: S) -> Result<S::Ok, S::Error> {
            match c {
                Some(c) => s.serialize_some(&Xy::from(*c)),
                None => s.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            d: D,
        ) -> Result<Option<Coordinate>, D::Error> {
            Option::<Xy>::deserialize(d).map(|p| p.map(Into::into))
        }
    }
}

/// Snapshot of a finished run.
///
/// `obstacle_position` is present exactly when the status is
/// [`ExecutionStatus::ObstacleDetected`]; the constructors are the only way
/// to build one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    #[serde(with = "xy")]
    position: Coordinate,
    direction: Direction,
    status: ExecutionStatus,
    #[serde(with = "xy::list")]
    position_history: Vec<Coordinate>,
    #[serde(default, with = "xy::option", skip_serializing_if = "Option::is_none")]
    obstacle_position: Option<Coordinate>,
}

impl ExecutionResult {
    pub fn success(state: ExecutionState) -> Self {
        let (position, direction, position_history) = state.into_parts();
        Self {
            position,
            direction,
            status: ExecutionStatus::Success,
            position_history,
            obstacle_position: None,
        }
    }

    /// `blocking` is the candidate cell that failed validation.
    pub fn obstacle_detected(state: ExecutionState, blocking: Coordinate) -> Self {
        let (position, direction, position_history) = state.into_parts();
        Self {
            position,
            direction,
            status: ExecutionStatus::ObstacleDetected,
            position_history,
            obstacle_position: Some(blocking),
        }
    }

    pub fn position(&self) -> Coordinate {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn status(&self) -> ExecutionStatus {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status == ExecutionStatus::Success
    }

    /// Every occupied cell, starting position first.
    pub fn position_history(&self) -> &[Coordinate] {
        &self.position_history
    }

    pub fn obstacle_position(&self) -> Option<Coordinate> {
        self.obstacle_position
    }

    /// Number of successful moves.
    pub fn moves(&self) -> usize {
        self.position_history.len().saturating_sub(1)
    }
}
