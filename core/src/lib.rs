#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Mars rover simulator.
//!
//! This crate defines the vocabulary that connects adapters with the
//! authoritative world. Adapters feed [`Command`] values (usually parsed from
//! the single-letter command language) to a rover, the rover validates each
//! one against its grid and reports every committed transition as an
//! [`Event`]. Failures are expressed as [`GridError`], [`RoverError`] and
//! [`SequenceError`] values rather than panics.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the simulator boots.
pub const WELCOME_BANNER: &str = "Mars rover ready.";

const DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

/// Unit steps indexed by [`Direction::index`], expressed as `(rows, columns)`.
const UNIT_STEPS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Cardinal headings a rover may face.
///
/// The discriminants encode the clockwise order North, East, South, West so
/// that turning is modular arithmetic on the index. Serialised as the single
/// letter; deserialised through [`FromStr`], so any casing of the letter or
/// the full name is accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Direction {
    /// Facing toward increasing row indices.
    North = 0,
    /// Facing toward increasing column indices.
    East = 1,
    /// Facing toward decreasing row indices.
    South = 2,
    /// Facing toward decreasing column indices.
    West = 3,
}

impl Direction {
    /// All headings in clockwise order starting from North.
    pub const ALL: [Direction; 4] = DIRECTIONS;

    /// Position of the heading within the clockwise cycle.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Heading at the provided position of the clockwise cycle, modulo four.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        DIRECTIONS[index % DIRECTIONS.len()]
    }

    /// Heading reached by a quarter turn clockwise.
    #[must_use]
    pub const fn turned_right(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Heading reached by a quarter turn counter-clockwise.
    #[must_use]
    pub const fn turned_left(self) -> Self {
        Self::from_index(self.index() + DIRECTIONS.len() - 1)
    }

    /// Single-cell displacement `(rows, columns)` when travelling forward.
    #[must_use]
    pub const fn unit_step(self) -> (i32, i32) {
        UNIT_STEPS[self.index()]
    }

    /// Single-letter abbreviation used by the command line and mission files.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::North => 'N',
            Self::East => 'E',
            Self::South => 'S',
            Self::West => 'W',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Error returned when a heading cannot be parsed from text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unrecognised direction '{0}', expected one of N, E, S, W")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "N" | "NORTH" => Ok(Self::North),
            "E" | "EAST" => Ok(Self::East),
            "S" | "SOUTH" => Ok(Self::South),
            "W" | "WEST" => Ok(Self::West),
            _ => Err(ParseDirectionError(value.to_owned())),
        }
    }
}

impl TryFrom<String> for Direction {
    type Error = ParseDirectionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Direction> for String {
    fn from(direction: Direction) -> Self {
        direction.letter().to_string()
    }
}

/// Location of a single grid cell expressed as row and column indices.
///
/// Coordinates are signed so that callers can describe cells outside the
/// grid; the grid decides whether a coordinate is in bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: i32,
    column: i32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Coordinate displaced by the provided `(rows, columns)` delta without wrapping.
    #[must_use]
    pub const fn offset(self, delta: (i32, i32)) -> Self {
        Self {
            row: self.row.saturating_add(delta.0),
            column: self.column.saturating_add(delta.1),
        }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Complete rover state: the occupied cell and the heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pose {
    cell: CellCoord,
    direction: Direction,
}

impl Pose {
    /// Creates a pose from a cell and a heading.
    #[must_use]
    pub const fn new(cell: CellCoord, direction: Direction) -> Self {
        Self { cell, direction }
    }

    /// Cell occupied by the rover.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Heading of the rover.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.cell.row(),
            self.cell.column(),
            self.direction
        )
    }
}

/// Instructions understood by a rover.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move one cell along the current heading.
    Forward,
    /// Move one cell against the current heading.
    Backward,
    /// Rotate a quarter turn counter-clockwise in place.
    TurnLeft,
    /// Rotate a quarter turn clockwise in place.
    TurnRight,
}

impl Command {
    /// Parses a command from its single-letter form.
    ///
    /// Only the uppercase letters `F`, `B`, `L` and `R` are recognised.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'F' => Some(Self::Forward),
            'B' => Some(Self::Backward),
            'L' => Some(Self::TurnLeft),
            'R' => Some(Self::TurnRight),
            _ => None,
        }
    }

    /// Single-letter form of the command.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Forward => 'F',
            Self::Backward => 'B',
            Self::TurnLeft => 'L',
            Self::TurnRight => 'R',
        }
    }
}

impl TryFrom<char> for Command {
    type Error = RoverError;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        Self::from_symbol(symbol).ok_or(RoverError::UnknownCommand { command: symbol })
    }
}

/// Transitions reported by a rover after it commits a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// The rover moved between two cells.
    Moved {
        /// Cell occupied before the move.
        from: CellCoord,
        /// Cell occupied after the move, already wrapped into the grid.
        to: CellCoord,
        /// Heading held throughout the move.
        direction: Direction,
    },
    /// The rover rotated in place.
    Turned {
        /// Cell the rover occupies.
        cell: CellCoord,
        /// Heading before the rotation.
        from: Direction,
        /// Heading after the rotation.
        to: Direction,
    },
}

/// Reasons a grid cannot be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// Either dimension was zero or negative.
    #[error("grid dimensions must be positive, got {rows}x{columns}")]
    InvalidDimensions {
        /// Requested number of rows.
        rows: i32,
        /// Requested number of columns.
        columns: i32,
    },
}

/// Reasons a rover rejects construction or a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RoverError {
    /// The starting cell lies outside the grid or holds an obstacle.
    #[error("rover cannot be placed at {cell}")]
    InvalidPlacement {
        /// Requested starting cell.
        cell: CellCoord,
    },
    /// The destination of a move holds an obstacle.
    #[error("obstacle encountered at {cell}")]
    ObstacleEncountered {
        /// Blocked destination cell.
        cell: CellCoord,
    },
    /// The command letter is not part of the command language.
    #[error("unknown command {command:?}")]
    UnknownCommand {
        /// Offending character.
        command: char,
    },
}

/// Failure of a command sequence, locating the command that aborted it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("command {index} aborted the sequence: {source}")]
pub struct SequenceError {
    /// Zero-based position of the failing command within the sequence.
    pub index: usize,
    /// Failure reported by the rover.
    #[source]
    pub source: RoverError,
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, Command, Direction, Pose, RoverError};
    use proptest::prelude::*;

    fn arb_direction() -> impl Strategy<Value = Direction> {
        (0usize..4).prop_map(Direction::from_index)
    }

    #[test]
    fn turning_right_follows_clockwise_cycle() {
        assert_eq!(Direction::North.turned_right(), Direction::East);
        assert_eq!(Direction::East.turned_right(), Direction::South);
        assert_eq!(Direction::South.turned_right(), Direction::West);
        assert_eq!(Direction::West.turned_right(), Direction::North);
    }

    #[test]
    fn turning_left_follows_counter_clockwise_cycle() {
        assert_eq!(Direction::North.turned_left(), Direction::West);
        assert_eq!(Direction::West.turned_left(), Direction::South);
        assert_eq!(Direction::South.turned_left(), Direction::East);
        assert_eq!(Direction::East.turned_left(), Direction::North);
    }

    #[test]
    fn unit_steps_match_movement_table() {
        assert_eq!(Direction::North.unit_step(), (1, 0));
        assert_eq!(Direction::East.unit_step(), (0, 1));
        assert_eq!(Direction::South.unit_step(), (-1, 0));
        assert_eq!(Direction::West.unit_step(), (0, -1));
    }

    #[test]
    fn command_symbols_are_case_sensitive() {
        assert_eq!(Command::from_symbol('F'), Some(Command::Forward));
        assert_eq!(Command::from_symbol('B'), Some(Command::Backward));
        assert_eq!(Command::from_symbol('L'), Some(Command::TurnLeft));
        assert_eq!(Command::from_symbol('R'), Some(Command::TurnRight));
        assert_eq!(Command::from_symbol('f'), None);
        assert_eq!(
            Command::try_from(' '),
            Err(RoverError::UnknownCommand { command: ' ' })
        );
    }

    #[test]
    fn directions_parse_from_letters_and_names() {
        assert_eq!("n".parse::<Direction>(), Ok(Direction::North));
        assert_eq!("East".parse::<Direction>(), Ok(Direction::East));
        assert_eq!(" S ".parse::<Direction>(), Ok(Direction::South));
        assert!("up".parse::<Direction>().is_err());
    }

    #[test]
    fn pose_round_trips_through_bincode() {
        let pose = Pose::new(CellCoord::new(3, -1), Direction::West);
        let bytes = bincode::serialize(&pose).expect("serialize");
        let restored: Pose = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, pose);
    }

    #[test]
    fn directions_deserialize_in_any_case() {
        for (text, expected) in [
            ("\"n\"", Direction::North),
            ("\"NORTH\"", Direction::North),
            ("\"east\"", Direction::East),
            ("\"sOuTh\"", Direction::South),
            ("\"W\"", Direction::West),
        ] {
            let parsed: Direction = serde_json::from_str(text).expect("heading parses");
            assert_eq!(parsed, expected);
        }
        assert!(serde_json::from_str::<Direction>("\"up\"").is_err());
        assert_eq!(
            serde_json::to_string(&Direction::West).expect("serialize"),
            "\"W\""
        );
    }

    #[test]
    fn pose_displays_row_column_and_heading() {
        let pose = Pose::new(CellCoord::new(2, 3), Direction::East);
        assert_eq!(pose.to_string(), "2 3 E");
    }

    proptest! {
        #[test]
        fn four_turns_restore_heading(direction in arb_direction()) {
            let mut right = direction;
            let mut left = direction;
            for _ in 0..4 {
                right = right.turned_right();
                left = left.turned_left();
            }
            prop_assert_eq!(right, direction);
            prop_assert_eq!(left, direction);
        }

        #[test]
        fn opposite_turns_cancel(direction in arb_direction()) {
            prop_assert_eq!(direction.turned_right().turned_left(), direction);
            prop_assert_eq!(direction.turned_left().turned_right(), direction);
        }
    }
}
