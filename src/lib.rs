//! # grid-rover
//!
//! A command interpreter for a rover on a bounded grid with static obstacles.
//!
//! The rover reads a string of single-character commands (`l`, `r`, `f`, `b`),
//! turning or stepping one cell at a time. The first move into a boundary or an
//! obstacle halts the whole sequence, and the resulting [`ExecutionResult`]
//! reports the final pose, the cells visited, and the cell that blocked it.
//!
//! ```
//! use glam::IVec2;
//! use grid_rover::{Direction, ExecutionStatus, Rover};
//!
//! let mut rover = Rover::new(IVec2::new(5, 5), Direction::North, 10, 10, [IVec2::new(5, 7)]);
//! let result = rover.execute("fff");
//!
//! assert_eq!(result.status(), ExecutionStatus::ObstacleDetected);
//! assert_eq!(result.position(), IVec2::new(5, 6));
//! assert_eq!(result.obstacle_position(), Some(IVec2::new(5, 7)));
//! ```

pub mod direction;
pub mod error;
pub mod grid;
pub mod interpreter;
pub mod mission;
pub mod obstacles;
pub mod result;
pub mod rover;

pub use direction::*;
pub use error::{Result, RoverError};
pub use grid::*;
pub use interpreter::*;
pub use mission::*;
pub use obstacles::*;
pub use result::*;
pub use rover::*;
