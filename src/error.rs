//! Error types for rover input handling.
//!
//! A blocked move is not an error: it is reported as
//! [`ExecutionStatus::ObstacleDetected`](crate::ExecutionStatus) on the result.
//! These variants cover malformed input shapes and opt-in strictness checks.

use thiserror::Error;

/// Errors raised while building a grid, parsing input, or validating commands.
#[derive(Debug, Error)]
pub enum RoverError {
    /// Grid width or height is not strictly positive.
    #[error("invalid grid dimensions: {width}x{height} (both must be > 0)")]
    InvalidDimensions {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },

    /// Direction text did not name one of the four compass directions.
    #[error("invalid direction: {0:?} (expected N, S, E or W)")]
    InvalidDirection(String),

    /// An obstacle entry could not be read as an `x,y` pair.
    #[error("invalid obstacle {entry:?}: {reason}")]
    InvalidObstacle {
        /// The offending entry, as written.
        entry: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A command character has no registered operation (strict mode only).
    #[error("unknown command {symbol:?} at index {index}")]
    UnknownCommand {
        /// The unrecognised character.
        symbol: char,
        /// Character index within the command string.
        index: usize,
    },

    /// The command string is longer than the configured budget.
    #[error("command string has {len} commands, budget is {max}")]
    CommandBudgetExceeded {
        /// Number of commands supplied.
        len: usize,
        /// Configured maximum.
        max: usize,
    },

    /// A mission description could not be deserialized.
    #[error("invalid mission: {0}")]
    Mission(#[from] toml::de::Error),

    /// A mission file could not be read.
    #[error("failed to read mission file: {0}")]
    Io(#[from] std::io::Error),
}

impl RoverError {
    /// Creates an invalid obstacle error.
    #[must_use]
    pub fn invalid_obstacle(entry: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidObstacle {
            entry: entry.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unknown command error.
    #[must_use]
    pub const fn unknown_command(symbol: char, index: usize) -> Self {
        Self::UnknownCommand { symbol, index }
    }
}

/// Result alias for fallible rover operations.
pub type Result<T> = std::result::Result<T, RoverError>;
