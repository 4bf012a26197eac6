//! Mission descriptions loaded from TOML.
//!
//! ```toml
//! width = 10
//! height = 10
//! start = [5, 5]
//! facing = "N"
//! obstacles = "2,2|3,5|7,8"   # or [[2, 2], [3, 5], [7, 8]]
//! commands = "ffrff"
//!
//! [interpreter]
//! unknown_commands = "reject"
//! max_commands = 256
//! ```

use crate::direction::{Coordinate, Direction};
use crate::error::Result;
use crate::grid::Grid;
use crate::interpreter::{RoverConfig, RoverInterpreter};
use crate::obstacles::parse_obstacles;
use crate::result::ExecutionResult;
use crate::rover::Rover;
use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Obstacles in either accepted form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObstacleList {
    /// `"x,y|x,y"` text.
    Text(String),
    /// `[[x, y], ...]` pairs.
    Cells(Vec<Coordinate>),
}

impl Default for ObstacleList {
    fn default() -> Self {
        ObstacleList::Cells(Vec::new())
    }
}

impl ObstacleList {
    pub fn to_cells(&self) -> Result<Vec<Coordinate>> {
        match self {
            ObstacleList::Text(text) => parse_obstacles(text),
            ObstacleList::Cells(cells) => Ok(cells.clone()),
        }
    }
}

/// Everything needed for one simulation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Mission {
    pub width: i32,
    pub height: i32,
    pub start: Coordinate,
    pub facing: Direction,
    pub obstacles: ObstacleList,
    pub commands: String,
    pub interpreter: RoverConfig,
}

impl Default for Mission {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            start: IVec2::new(5, 5),
            facing: Direction::North,
            obstacles: ObstacleList::Text("2,2|3,5|7,8".to_string()),
            commands: "ffrfflfflfflfffrfff".to_string(),
            interpreter: RoverConfig::default(),
        }
    }
}

impl Mission {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let mission = Self::from_toml_str(&text)?;
        info!(path = %path.display(), "loaded mission");
        Ok(mission)
    }

    /// Builds the grid, rejecting non-positive dimensions and malformed obstacles.
    pub fn grid(&self) -> Result<Grid> {
        Grid::try_new(self.width, self.height, self.obstacles.to_cells()?)
    }

    /// A rover at the mission start, using the standard commands and this
    /// mission's interpreter settings.
    pub fn rover(&self) -> Result<Rover> {
        let interpreter =
            RoverInterpreter::new(self.interpreter.clone()).with_standard_commands();
        Ok(Rover::on_grid(self.start, self.facing, self.grid()?).with_interpreter(interpreter))
    }

    /// Runs the mission's commands with the configured strictness.
    pub fn run(&self) -> Result<ExecutionResult> {
        self.rover()?.try_execute(&self.commands)
    }
}
