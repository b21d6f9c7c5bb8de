//! Mission files describing a grid, a starting pose and a command sequence.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use mars_rover_core::{CellCoord, Direction, Pose};
use serde::Deserialize;

/// Top-level mission configuration loaded from TOML.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Mission {
    /// Command letters to execute once the rover is placed.
    #[serde(default)]
    pub(crate) commands: String,
    /// Terrain the rover is deployed on.
    pub(crate) grid: GridSection,
    /// Starting pose; defaults to the origin facing North.
    #[serde(default)]
    pub(crate) rover: RoverSection,
}

/// Grid dimensions and obstacle cells.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct GridSection {
    pub(crate) rows: i32,
    pub(crate) columns: i32,
    /// Obstacles as `[row, column]` pairs.
    #[serde(default)]
    pub(crate) obstacles: Vec<[i32; 2]>,
}

/// Starting cell and heading of the rover.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RoverSection {
    pub(crate) row: i32,
    pub(crate) column: i32,
    pub(crate) direction: Direction,
}

impl Default for RoverSection {
    fn default() -> Self {
        Self {
            row: 0,
            column: 0,
            direction: Direction::North,
        }
    }
}

impl Mission {
    /// Loads a mission from a TOML file.
    pub(crate) fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("could not read mission file {}", path.display()))?;
        let mission = Self::from_toml_str(&contents)
            .with_context(|| format!("could not parse mission file {}", path.display()))?;
        log::info!(
            "loaded mission from {} ({}x{} grid, {} obstacles)",
            path.display(),
            mission.grid.rows,
            mission.grid.columns,
            mission.grid.obstacles.len()
        );
        Ok(mission)
    }

    /// Parses a mission from TOML text.
    pub(crate) fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Starting pose described by the rover section.
    #[must_use]
    pub(crate) fn start(&self) -> Pose {
        Pose::new(
            CellCoord::new(self.rover.row, self.rover.column),
            self.rover.direction,
        )
    }

    /// Obstacle cells described by the grid section.
    #[must_use]
    pub(crate) fn obstacle_cells(&self) -> Vec<CellCoord> {
        self.grid
            .obstacles
            .iter()
            .map(|[row, column]| CellCoord::new(*row, *column))
            .collect()
    }
}
