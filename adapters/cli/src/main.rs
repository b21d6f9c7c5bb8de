#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that deploys a rover and runs a command sequence.

mod mission;
mod render;
mod scatter;
mod survey;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use mars_rover_core::{CellCoord, Direction, Event, Pose, WELCOME_BANNER};
use mars_rover_world::{Grid, Rover};

use crate::{mission::Mission, survey::Survey};

const DEFAULT_ROWS: i32 = 4;
const DEFAULT_COLUMNS: i32 = 4;

/// Command-line arguments accepted by the simulator.
#[derive(Debug, Parser)]
#[command(name = "mars-rover", version, about = "Drive a rover across a wrapping grid")]
struct CliArgs {
    /// Command letters to execute (F, B, L, R). Overrides the mission commands.
    commands: Option<String>,
    /// TOML mission file describing the grid, start pose and commands.
    #[arg(long, value_name = "FILE")]
    mission: Option<PathBuf>,
    /// Survey string carrying grid dimensions and obstacles.
    #[arg(long, value_name = "SURVEY")]
    survey: Option<String>,
    /// Number of grid rows.
    #[arg(long)]
    rows: Option<i32>,
    /// Number of grid columns.
    #[arg(long)]
    columns: Option<i32>,
    /// Starting pose of the rover.
    #[arg(long, value_name = "ROW,COL,DIR", value_parser = parse_pose)]
    start: Option<Pose>,
    /// Obstacle cell; may be repeated.
    #[arg(long = "obstacle", value_name = "ROW,COL", value_parser = parse_cell)]
    obstacles: Vec<CellCoord>,
    /// Number of obstacles to scatter at random over free cells.
    #[arg(long, value_name = "COUNT")]
    scatter: Option<usize>,
    /// Seed driving obstacle scattering.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Print every command the rover applied.
    #[arg(long)]
    trace: bool,
    /// Print a map of the grid after the run.
    #[arg(long)]
    render: bool,
    /// Print the survey string of the configured grid before the run.
    #[arg(long)]
    export_survey: bool,
    /// Enable debug logging unless RUST_LOG says otherwise.
    #[arg(short, long)]
    verbose: bool,
}

/// Fully resolved inputs for a single run.
#[derive(Clone, Debug, PartialEq, Eq)]
struct RunPlan {
    rows: i32,
    columns: i32,
    obstacles: Vec<CellCoord>,
    start: Pose,
    commands: String,
}

impl RunPlan {
    /// Layers defaults, the mission file, the survey string and flags.
    fn resolve(args: &CliArgs, mission: Option<Mission>) -> Result<Self> {
        let mut plan = Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            obstacles: Vec::new(),
            start: Pose::new(CellCoord::new(0, 0), Direction::North),
            commands: String::new(),
        };

        if let Some(mission) = mission {
            plan.rows = mission.grid.rows;
            plan.columns = mission.grid.columns;
            plan.obstacles = mission.obstacle_cells();
            plan.start = mission.start();
            plan.commands = mission.commands;
        }

        if let Some(value) = &args.survey {
            let survey = Survey::decode(value).context("could not decode survey string")?;
            plan.rows = survey.rows;
            plan.columns = survey.columns;
            plan.obstacles = survey.obstacles;
        }

        if let Some(rows) = args.rows {
            plan.rows = rows;
        }
        if let Some(columns) = args.columns {
            plan.columns = columns;
        }
        if let Some(start) = args.start {
            plan.start = start;
        }
        plan.obstacles.extend(args.obstacles.iter().copied());
        if let Some(commands) = &args.commands {
            plan.commands.clone_from(commands);
        }

        Ok(plan)
    }
}

/// Entry point for the Mars rover command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);
    log::info!("{WELCOME_BANNER}");

    let mission = args.mission.as_ref().map(Mission::from_file).transpose()?;
    let plan = RunPlan::resolve(&args, mission)?;

    let mut grid = Grid::new(plan.rows, plan.columns).context("could not build grid")?;
    for cell in &plan.obstacles {
        grid.put_obstacle(*cell);
    }
    if let Some(count) = args.scatter {
        let placed = scatter::scatter_obstacles(&mut grid, count, args.seed, plan.start.cell());
        if placed < count {
            log::warn!("only {placed} of {count} requested obstacles fit on the grid");
        }
    }

    if args.export_survey {
        println!("{}", Survey::from_grid(&grid).encode()?);
    }

    let mut rover = Rover::new(plan.start.cell(), plan.start.direction(), grid)
        .context("could not deploy rover")?;

    let mut events = Vec::new();
    let outcome = rover.execute_sequence_recorded(&plan.commands, &mut events);

    if args.trace {
        for event in &events {
            println!("{}", describe(event));
        }
    }
    if args.render {
        print!("{}", render::render(&rover));
    }
    println!("{}", rover.pose());

    outcome.with_context(|| format!("rover halted at {}", rover.pose()))?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn describe(event: &Event) -> String {
    match event {
        Event::Moved {
            from,
            to,
            direction,
        } => format!("move {from} -> {to} facing {direction}"),
        Event::Turned { cell, from, to } => format!("turn {from} -> {to} at {cell}"),
    }
}

fn parse_cell(value: &str) -> Result<CellCoord, String> {
    let (row, column) = value
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL but got '{value}'"))?;
    let row = parse_index(row)?;
    let column = parse_index(column)?;
    Ok(CellCoord::new(row, column))
}

fn parse_pose(value: &str) -> Result<Pose, String> {
    let (cell, direction) = value
        .rsplit_once(',')
        .ok_or_else(|| format!("expected ROW,COL,DIR but got '{value}'"))?;
    let cell = parse_cell(cell)?;
    let direction = direction
        .parse::<Direction>()
        .map_err(|error| error.to_string())?;
    Ok(Pose::new(cell, direction))
}

fn parse_index(value: &str) -> Result<i32, String> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|_| format!("'{value}' is not an integer"))
}
