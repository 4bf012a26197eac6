use anyhow::{Context, Result};
use clap::Parser;
use glam::IVec2;
use grid_rover::{
    Direction, ExecutionResult, Mission, ObstacleList, RoverConfig, UnknownCommandPolicy,
};
use std::path::PathBuf;
use tracing::info;

/// Run a rover command string on a bounded grid.
#[derive(Debug, Parser)]
#[command(name = "grid-rover", version, about)]
struct Args {
    /// TOML mission file. Inline flags override its fields.
    #[arg(short, long)]
    mission: Option<PathBuf>,

    #[arg(long)]
    width: Option<i32>,

    #[arg(long)]
    height: Option<i32>,

    /// Starting cell as `x,y`.
    #[arg(long, value_parser = parse_cell)]
    start: Option<IVec2>,

    /// Starting direction (N, S, E, W).
    #[arg(long)]
    facing: Option<Direction>,

    /// Obstacles as `x,y|x,y|...`.
    #[arg(long)]
    obstacles: Option<String>,

    /// Commands: l, r, f, b.
    #[arg(short, long)]
    commands: Option<String>,

    /// Reject unknown command characters instead of skipping them.
    #[arg(long)]
    strict: bool,

    /// Maximum accepted command string length.
    #[arg(long)]
    max_commands: Option<usize>,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,

    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long)]
    verbose: bool,
}

fn parse_cell(s: &str) -> std::result::Result<IVec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y, got {s:?}"))?;
    let x = x.trim().parse::<i32>().map_err(|e| format!("x: {e}"))?;
    let y = y.trim().parse::<i32>().map_err(|e| format!("y: {e}"))?;
    Ok(IVec2::new(x, y))
}

fn build_mission(args: &Args) -> Result<Mission> {
    let mut mission = match &args.mission {
        Some(path) => Mission::load(path)
            .with_context(|| format!("loading mission {}", path.display()))?,
        None => Mission::default(),
    };

    if let Some(width) = args.width {
        mission.width = width;
    }
    if let Some(height) = args.height {
        mission.height = height;
    }
    if let Some(start) = args.start {
        mission.start = start;
    }
    if let Some(facing) = args.facing {
        mission.facing = facing;
    }
    if let Some(obstacles) = &args.obstacles {
        mission.obstacles = ObstacleList::Text(obstacles.clone());
    }
    if let Some(commands) = &args.commands {
        mission.commands = commands.clone();
    }
    if args.strict || args.max_commands.is_some() {
        mission.interpreter = RoverConfig {
            unknown_commands: if args.strict {
                UnknownCommandPolicy::Reject
            } else {
                mission.interpreter.unknown_commands
            },
            max_commands: args.max_commands.or(mission.interpreter.max_commands),
        };
    }

    Ok(mission)
}

fn print_summary(result: &ExecutionResult) {
    let p = result.position();
    println!("position:  ({}, {})", p.x, p.y);
    println!("direction: {}", result.direction());
    println!("status:    {}", result.status());
    let history: Vec<String> = result
        .position_history()
        .iter()
        .map(|c| format!("({}, {})", c.x, c.y))
        .collect();
    println!("history:   {}", history.join(" -> "));
    if let Some(b) = result.obstacle_position() {
        println!("blocked:   ({}, {})", b.x, b.y);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let result = run(&args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&result);
    }

    Ok(())
}

/// Builds and runs the mission. A blocked move is still `Ok`; only input
/// errors fail.
fn run(args: &Args) -> Result<ExecutionResult> {
    let mission = build_mission(args)?;
    info!(
        width = mission.width,
        height = mission.height,
        start = ?mission.start,
        facing = %mission.facing,
        commands = mission.commands.chars().count(),
        "running mission"
    );

    mission.run().context("mission rejected")
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_rover::{ExecutionStatus, RoverError};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn args(flags: &[&str]) -> Args {
        let argv = std::iter::once("grid-rover").chain(flags.iter().copied());
        Args::try_parse_from(argv).unwrap()
    }

    fn mission_file(toml: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(toml.as_bytes()).unwrap();
        file
    }

    const FILE: &str = r#"
        width = 8
        height = 6
        start = [1, 1]
        facing = "E"
        obstacles = "3,1"
        commands = "ff"

        [interpreter]
        max_commands = 16
    "#;

    #[test]
    fn parse_cell_accepts_pairs() {
        assert_eq!(parse_cell("5,7").unwrap(), IVec2::new(5, 7));
        assert_eq!(parse_cell(" -2 , 3 ").unwrap(), IVec2::new(-2, 3));
    }

    #[test]
    fn parse_cell_rejects_malformed() {
        assert!(parse_cell("5").unwrap_err().contains("expected x,y"));
        assert!(parse_cell("a,1").unwrap_err().starts_with("x:"));
        assert!(parse_cell("1,b").unwrap_err().starts_with("y:"));
        assert!(Args::try_parse_from(["grid-rover", "--start", "5"]).is_err());
    }

    #[test]
    fn defaults_without_flags() {
        assert_eq!(build_mission(&args(&[])).unwrap(), Mission::default());
    }

    #[test]
    fn file_fields_are_used() {
        let file = mission_file(FILE);
        let path = file.path().to_str().unwrap();
        let mission = build_mission(&args(&["--mission", path])).unwrap();

        assert_eq!(mission.width, 8);
        assert_eq!(mission.start, IVec2::new(1, 1));
        assert_eq!(mission.facing, Direction::East);
        assert_eq!(mission.interpreter.max_commands, Some(16));
    }

    #[test]
    fn inline_flags_override_file() {
        let file = mission_file(FILE);
        let path = file.path().to_str().unwrap();
        let mission = build_mission(&args(&[
            "--mission",
            path,
            "--width",
            "12",
            "--start",
            "0,0",
            "--facing",
            "north",
            "--obstacles",
            "0,3|4,4",
            "--commands",
            "fff",
        ]))
        .unwrap();

        assert_eq!(mission.width, 12);
        assert_eq!(mission.height, 6);
        assert_eq!(mission.start, IVec2::new(0, 0));
        assert_eq!(mission.facing, Direction::North);
        assert_eq!(mission.obstacles, ObstacleList::Text("0,3|4,4".to_string()));
        assert_eq!(mission.commands, "fff");
    }

    #[test]
    fn strict_keeps_file_budget() {
        let file = mission_file(FILE);
        let path = file.path().to_str().unwrap();
        let mission = build_mission(&args(&["--mission", path, "--strict"])).unwrap();

        assert_eq!(
            mission.interpreter,
            RoverConfig {
                unknown_commands: UnknownCommandPolicy::Reject,
                max_commands: Some(16),
            }
        );
    }

    #[test]
    fn max_commands_overrides_budget_but_keeps_policy() {
        let file = mission_file(FILE);
        let path = file.path().to_str().unwrap();

        let mission = build_mission(&args(&["--mission", path, "--max-commands", "4"])).unwrap();
        assert_eq!(mission.interpreter.unknown_commands, UnknownCommandPolicy::Ignore);
        assert_eq!(mission.interpreter.max_commands, Some(4));

        let mission =
            build_mission(&args(&["--mission", path, "--strict", "--max-commands", "4"])).unwrap();
        assert_eq!(mission.interpreter.unknown_commands, UnknownCommandPolicy::Reject);
        assert_eq!(mission.interpreter.max_commands, Some(4));
    }

    #[test]
    fn blocked_run_is_not_an_error() {
        // (1,1) E: f -> (2,1), f -> (3,1) is an obstacle.
        let file = mission_file(FILE);
        let path = file.path().to_str().unwrap();
        let result = run(&args(&["--mission", path])).unwrap();

        assert_eq!(result.status(), ExecutionStatus::ObstacleDetected);
        assert_eq!(result.position(), IVec2::new(2, 1));
        assert_eq!(result.obstacle_position(), Some(IVec2::new(3, 1)));
    }

    #[test]
    fn input_errors_fail_the_run() {
        let err = run(&args(&["--commands", "ffz", "--strict"])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RoverError>(),
            Some(RoverError::UnknownCommand { symbol: 'z', .. })
        ));

        let err = run(&args(&["--width", "0"])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RoverError>(),
            Some(RoverError::InvalidDimensions { .. })
        ));

        assert!(run(&args(&["--obstacles", "1;2"])).is_err());
        assert!(run(&args(&["--mission", "/nonexistent/mission.toml"])).is_err());
    }
}
