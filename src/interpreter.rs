//! Interpreter that runs a rover command string over a [`Grid`].
//!
//! The entry point is [`RoverInterpreter`]. Configure it with a [`RoverConfig`],
//! register character-to-operation mappings via [`RoverInterpreter::set_op`] or
//! [`RoverInterpreter::populate_standard_commands`], then call
//! [`RoverInterpreter::run`] with a grid, a starting pose and the commands.

use crate::direction::{Coordinate, Direction};
use crate::error::{Result, RoverError};
use crate::grid::Grid;
use crate::result::ExecutionResult;
use crate::rover::{ExecutionState, RoverOp};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::ControlFlow;
use tracing::{debug, trace, warn};

/// What [`RoverInterpreter::try_run`] does with characters that have no mapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownCommandPolicy {
    /// Skip them.
    #[default]
    Ignore,
    /// Refuse the whole command string before moving.
    Reject,
}

/// Configuration for command interpretation.
///
/// Only [`RoverInterpreter::try_run`] consults these settings;
/// [`RoverInterpreter::run`] is always lenient and unbounded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoverConfig {
    pub unknown_commands: UnknownCommandPolicy,
    /// Maximum number of characters accepted in one command string.
    pub max_commands: Option<usize>,
}

/// Outcome of a single transition: keep going with the new state, or halt
/// with the unchanged state and the cell that blocked the move.
pub type Step = ControlFlow<(ExecutionState, Coordinate), ExecutionState>;

/// Applies one operation to `state`.
///
/// Turns always succeed. A move succeeds only if the candidate cell is inside
/// the grid and unobstructed; otherwise the run must halt.
pub fn step(state: ExecutionState, grid: &Grid, op: RoverOp) -> Step {
    match op {
        RoverOp::TurnLeft => {
            let d = state.direction().turn_left();
            ControlFlow::Continue(state.turned(d))
        }
        RoverOp::TurnRight => {
            let d = state.direction().turn_right();
            ControlFlow::Continue(state.turned(d))
        }
        RoverOp::Forward | RoverOp::Backward => {
            let next = state.candidate(op == RoverOp::Forward);
            if grid.is_passable(next) {
                ControlFlow::Continue(state.advance(next))
            } else {
                ControlFlow::Break((state, next))
            }
        }
        RoverOp::Ignore => ControlFlow::Continue(state),
    }
}

/// Maps command characters to [`RoverOp`]s and folds them over the grid.
#[derive(Clone, Debug, Default)]
pub struct RoverInterpreter {
    op_map: HashMap<char, RoverOp>,
    config: RoverConfig,
}

impl RoverInterpreter {
    /// Creates a new interpreter with the given configuration and an empty command map.
    ///
    /// Register operations with [`set_op`](Self::set_op) or
    /// [`populate_standard_commands`](Self::populate_standard_commands) before running.
    pub fn new(config: RoverConfig) -> Self {
        Self {
            op_map: HashMap::new(),
            config,
        }
    }

    /// Registers the standard command set (builder pattern).
    pub fn with_standard_commands(mut self) -> Self {
        self.populate_standard_commands();
        self
    }

    /// Assigns a single [`RoverOp`] to a command character, replacing any
    /// previous mapping. Matching is case-sensitive.
    pub fn set_op(&mut self, symbol: char, op: RoverOp) {
        self.op_map.insert(symbol, op);
    }

    /// Registers the conventional lowercase commands: `l`, `r`, `f`, `b`.
    pub fn populate_standard_commands(&mut self) {
        let mappings = [
            ('l', RoverOp::TurnLeft),
            ('r', RoverOp::TurnRight),
            ('f', RoverOp::Forward),
            ('b', RoverOp::Backward),
        ];

        for (symbol, op) in mappings {
            self.set_op(symbol, op);
        }
    }

    pub fn config(&self) -> &RoverConfig {
        &self.config
    }

    /// The operation for `symbol`, or [`RoverOp::Ignore`] if unmapped.
    pub fn resolve(&self, symbol: char) -> RoverOp {
        self.op_map.get(&symbol).copied().unwrap_or(RoverOp::Ignore)
    }

    /// Runs `commands` from `start` facing `facing` and returns the outcome.
    ///
    /// Characters are processed left to right. Unmapped characters are
    /// skipped. The first blocked move halts the run: nothing after it is
    /// interpreted, and the result reports the blocked candidate cell.
    pub fn run(
        &self,
        grid: &Grid,
        start: Coordinate,
        facing: Direction,
        commands: &str,
    ) -> ExecutionResult {
        let initial = ExecutionState::new(start, facing);

        let outcome = commands.chars().enumerate().try_fold(initial, |state, (i, c)| {
            let op = self.resolve(c);
            trace!(index = i, command = %c, ?op, position = ?state.position(), "interpreting");
            step(state, grid, op)
        });

        match outcome {
            ControlFlow::Continue(state) => {
                debug!(
                    position = ?state.position(),
                    direction = %state.direction(),
                    moves = state.history().len() - 1,
                    "run completed"
                );
                ExecutionResult::success(state)
            }
            ControlFlow::Break((state, blocking)) => {
                debug!(
                    position = ?state.position(),
                    blocking = ?blocking,
                    out_of_bounds = !grid.is_valid_position(blocking),
                    "move blocked, halting"
                );
                ExecutionResult::obstacle_detected(state, blocking)
            }
        }
    }

    /// Validates `commands` against the [`RoverConfig`], then [`run`](Self::run)s them.
    pub fn try_run(
        &self,
        grid: &Grid,
        start: Coordinate,
        facing: Direction,
        commands: &str,
    ) -> Result<ExecutionResult> {
        self.validate(commands)?;
        Ok(self.run(grid, start, facing, commands))
    }

    /// Checks the budget and, under [`UnknownCommandPolicy::Reject`], that
    /// every character is mapped.
    pub fn validate(&self, commands: &str) -> Result<()> {
        if let Some(max) = self.config.max_commands {
            let len = commands.chars().count();
            if len > max {
                warn!(len, max, "command budget exceeded");
                return Err(RoverError::CommandBudgetExceeded { len, max });
            }
        }

        if self.config.unknown_commands == UnknownCommandPolicy::Reject
            && let Some((index, symbol)) = commands
                .chars()
                .enumerate()
                .find(|&(_, c)| !self.op_map.contains_key(&c))
        {
            warn!(index, symbol = %symbol, "rejecting unknown command");
            return Err(RoverError::unknown_command(symbol, index));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    fn standard() -> RoverInterpreter {
        RoverInterpreter::new(RoverConfig::default()).with_standard_commands()
    }

    #[test]
    fn empty_map_ignores_everything() {
        let interp = RoverInterpreter::new(RoverConfig::default());
        let grid = Grid::new(10, 10, []);
        let result = interp.run(&grid, IVec2::new(5, 5), Direction::North, "ffrr");
        assert!(result.is_success());
        assert_eq!(result.position(), IVec2::new(5, 5));
        assert_eq!(result.direction(), Direction::North);
    }

    #[test]
    fn step_blocks_into_obstacle() {
        let grid = Grid::new(10, 10, [IVec2::new(5, 6)]);
        let state = ExecutionState::new(IVec2::new(5, 5), Direction::North);
        match step(state, &grid, RoverOp::Forward) {
            ControlFlow::Break((s, blocking)) => {
                assert_eq!(s.position(), IVec2::new(5, 5));
                assert_eq!(blocking, IVec2::new(5, 6));
            }
            ControlFlow::Continue(_) => panic!("expected a halt"),
        }
    }

    #[test]
    fn step_backward_reports_rear_cell() {
        let grid = Grid::new(10, 10, []);
        let state = ExecutionState::new(IVec2::new(5, 0), Direction::North);
        match step(state, &grid, RoverOp::Backward) {
            ControlFlow::Break((_, blocking)) => assert_eq!(blocking, IVec2::new(5, -1)),
            ControlFlow::Continue(_) => panic!("expected a halt"),
        }
    }

    #[test]
    fn custom_symbols() {
        let mut interp = standard();
        interp.set_op('F', RoverOp::Forward);
        interp.set_op('L', RoverOp::TurnLeft);
        let grid = Grid::new(10, 10, []);
        let result = interp.run(&grid, IVec2::new(5, 5), Direction::North, "FLf");
        assert_eq!(result.position(), IVec2::new(4, 6));
        assert_eq!(result.direction(), Direction::West);
    }

    #[test]
    fn lenient_run_skips_unknown() {
        let grid = Grid::new(10, 10, []);
        let result = standard().run(&grid, IVec2::new(5, 5), Direction::North, "fxF?f");
        assert!(result.is_success());
        assert_eq!(result.position(), IVec2::new(5, 7));
    }

    #[test]
    fn strict_rejects_unknown_before_moving() {
        let interp = RoverInterpreter::new(RoverConfig {
            unknown_commands: UnknownCommandPolicy::Reject,
            max_commands: None,
        })
        .with_standard_commands();
        let grid = Grid::new(10, 10, []);
        let err = interp
            .try_run(&grid, IVec2::new(5, 5), Direction::North, "ffXf")
            .unwrap_err();
        assert!(matches!(
            err,
            RoverError::UnknownCommand {
                symbol: 'X',
                index: 2
            }
        ));
    }

    #[test]
    fn budget_is_enforced() {
        let interp = RoverInterpreter::new(RoverConfig {
            unknown_commands: UnknownCommandPolicy::Ignore,
            max_commands: Some(3),
        })
        .with_standard_commands();
        let grid = Grid::new(10, 10, []);
        assert!(
            interp
                .try_run(&grid, IVec2::new(5, 5), Direction::North, "fff")
                .is_ok()
        );
        assert!(matches!(
            interp.try_run(&grid, IVec2::new(5, 5), Direction::North, "ffff"),
            Err(RoverError::CommandBudgetExceeded { len: 4, max: 3 })
        ));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: RoverConfig = toml::from_str("unknown_commands = \"reject\"").unwrap();
        assert_eq!(config.unknown_commands, UnknownCommandPolicy::Reject);
        assert_eq!(config.max_commands, None);
    }
}
