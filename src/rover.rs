//! Rover state, operations, and the long-lived rover handle.

use crate::direction::{Coordinate, Direction};
use crate::error::Result;
use crate::grid::Grid;
use crate::interpreter::{RoverConfig, RoverInterpreter};
use crate::result::ExecutionResult;

/// Operations the rover can perform, one per command character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoverOp {
    /// Rotate counter-clockwise (`l`).
    TurnLeft,
    /// Rotate clockwise (`r`).
    TurnRight,
    /// Step one cell along the facing direction (`f`).
    Forward,
    /// Step one cell against the facing direction (`b`).
    Backward,
    /// No-op: symbol has no registered meaning.
    Ignore,
}

impl RoverOp {
    /// True for the operations that change position and can be blocked.
    pub fn is_move(self) -> bool {
        matches!(self, RoverOp::Forward | RoverOp::Backward)
    }
}

/// The state threaded through a single run.
///
/// Created fresh for each run and consumed into an [`ExecutionResult`] when
/// the run halts. Only [`step`](crate::step) moves it forward. `history`
/// always starts with the starting cell and grows by one entry per successful
/// move.
#[derive(Clone, Debug, PartialEq)]
pub struct ExecutionState {
    position: Coordinate,
    direction: Direction,
    history: Vec<Coordinate>,
}

impl ExecutionState {
    pub fn new(position: Coordinate, direction: Direction) -> Self {
        Self {
            position,
            direction,
            history: vec![position],
        }
    }

    pub fn position(&self) -> Coordinate {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The cell one step away: along the facing direction when `forward`,
    /// against it otherwise.
    ///
    /// Steps past `i32::MAX` or `i32::MIN` wrap to the opposite extreme. No grid
    /// contains either extreme (`0 <= x < width <= i32::MAX`), so the wrapped
    /// cell is out of bounds and always differs from the current one.
    pub fn candidate(&self, forward: bool) -> Coordinate {
        let step = self.direction.displacement();
        let step = if forward { step } else { -step };
        self.position.wrapping_add(step)
    }

    /// Occupies `to` and records it in the history.
    pub(crate) fn advance(mut self, to: Coordinate) -> Self {
        self.position = to;
        self.history.push(to);
        self
    }

    pub(crate) fn turned(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn history(&self) -> &[Coordinate] {
        &self.history
    }

    pub(crate) fn into_parts(self) -> (Coordinate, Direction, Vec<Coordinate>) {
        (self.position, self.direction, self.history)
    }
}

/// A rover bound to a grid.
///
/// Position and direction persist between [`execute`](Self::execute) calls;
/// each call starts a fresh history from wherever the rover currently stands.
#[derive(Clone, Debug)]
pub struct Rover {
    position: Coordinate,
    direction: Direction,
    grid: Grid,
    interpreter: RoverInterpreter,
}

impl Rover {
    /// Builds a rover on a fresh `width` x `height` grid, using the standard
    /// `l`/`r`/`f`/`b` command set.
    pub fn new(
        start: Coordinate,
        facing: Direction,
        width: i32,
        height: i32,
        obstacles: impl IntoIterator<Item = Coordinate>,
    ) -> Self {
        Self::on_grid(start, facing, Grid::new(width, height, obstacles))
    }

    pub fn on_grid(start: Coordinate, facing: Direction, grid: Grid) -> Self {
        Self {
            position: start,
            direction: facing,
            grid,
            interpreter: RoverInterpreter::new(RoverConfig::default()).with_standard_commands(),
        }
    }

    /// Replaces the command interpreter (builder pattern).
    pub fn with_interpreter(mut self, interpreter: RoverInterpreter) -> Self {
        self.interpreter = interpreter;
        self
    }

    pub fn position(&self) -> Coordinate {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Runs `commands` leniently: unmapped characters are skipped and the
    /// run halts at the first blocked move.
    pub fn execute(&mut self, commands: &str) -> ExecutionResult {
        let result = self
            .interpreter
            .run(&self.grid, self.position, self.direction, commands);
        self.sync(&result);
        result
    }

    /// Like [`execute`](Self::execute), but first validates `commands`
    /// against the interpreter's [`RoverConfig`]. On error the rover does not
    /// move.
    pub fn try_execute(&mut self, commands: &str) -> Result<ExecutionResult> {
        let result = self
            .interpreter
            .try_run(&self.grid, self.position, self.direction, commands)?;
        self.sync(&result);
        Ok(result)
    }

    fn sync(&mut self, result: &ExecutionResult) {
        self.position = result.position();
        self.direction = result.direction();
    }
}
