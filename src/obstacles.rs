//! Text format for obstacle lists: `x,y|x,y|...`.

use crate::direction::Coordinate;
use crate::error::{Result, RoverError};
use glam::IVec2;

/// Parses an `x,y|x,y|...` list.
///
/// Blank input yields an empty list. Whitespace around entries and numbers is
/// ignored, as are empty segments such as a trailing `|`.
pub fn parse_obstacles(text: &str) -> Result<Vec<Coordinate>> {
    text.split('|')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(parse_entry)
        .collect()
}

fn parse_entry(entry: &str) -> Result<Coordinate> {
    let mut fields = entry.split(',').map(str::trim);
    let (Some(x), Some(y), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(RoverError::invalid_obstacle(
            entry,
            "expected exactly two comma-separated integers",
        ));
    };

    let axis = |name: &str, value: &str| {
        value
            .parse::<i32>()
            .map_err(|e| RoverError::invalid_obstacle(entry, format!("{name} {value:?}: {e}")))
    };

    Ok(IVec2::new(axis("x", x)?, axis("y", y)?))
}

/// Renders obstacles back into the `x,y|x,y` form.
pub fn format_obstacles(obstacles: &[Coordinate]) -> String {
    obstacles
        .iter()
        .map(|c| format!("{},{}", c.x, c.y))
        .collect::<Vec<_>>()
        .join("|")
}
