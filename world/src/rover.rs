//! Rover pose state and command interpreter.

use mars_rover_core::{CellCoord, Command, Direction, Event, Pose, RoverError, SequenceError};

use crate::grid::Grid;

/// Vehicle that owns its grid and advances one validated command at a time.
///
/// The pose is only ever changed by [`Rover::apply`] (and the wrappers built
/// on it) after the destination has been checked against the grid, so the
/// rover never occupies an out-of-bounds or obstacle cell it moved into.
#[derive(Clone, Debug)]
pub struct Rover {
    pose: Pose,
    grid: Grid,
}

impl Rover {
    /// Places a rover on the grid.
    ///
    /// The starting cell is taken as given; it is never wrapped or clamped.
    ///
    /// # Errors
    ///
    /// Returns [`RoverError::InvalidPlacement`] when the cell lies outside the
    /// grid or holds an obstacle.
    pub fn new(cell: CellCoord, direction: Direction, grid: Grid) -> Result<Self, RoverError> {
        if !grid.is_traversable(cell) {
            return Err(RoverError::InvalidPlacement { cell });
        }

        Ok(Self {
            pose: Pose::new(cell, direction),
            grid,
        })
    }

    /// Cell currently occupied by the rover.
    #[must_use]
    pub const fn position(&self) -> CellCoord {
        self.pose.cell()
    }

    /// Heading the rover currently faces.
    #[must_use]
    pub const fn facing(&self) -> Direction {
        self.pose.direction()
    }

    /// Complete pose of the rover.
    #[must_use]
    pub const fn pose(&self) -> Pose {
        self.pose
    }

    /// Read-only access to the grid the rover travels on.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Marks a cell of the rover's grid as impassable.
    ///
    /// Cells outside the grid are ignored, matching [`Grid::put_obstacle`].
    pub fn place_obstacle(&mut self, cell: CellCoord) {
        self.grid.put_obstacle(cell);
    }

    /// Executes a single command letter.
    ///
    /// # Errors
    ///
    /// Returns [`RoverError::UnknownCommand`] for letters outside `F`, `B`,
    /// `L`, `R` and [`RoverError::ObstacleEncountered`] when a move is blocked.
    /// The pose is unchanged on error.
    pub fn execute(&mut self, command: char) -> Result<(), RoverError> {
        let mut events = Vec::new();
        self.execute_recorded(command, &mut events)
    }

    /// Executes every command letter in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing command. Commands before it
    /// remain applied and commands after it are skipped.
    pub fn execute_sequence(&mut self, commands: &str) -> Result<(), RoverError> {
        let mut events = Vec::new();
        self.execute_sequence_recorded(commands, &mut events)
            .map_err(|error| error.source)
    }

    /// Executes a command sequence, recording the events of the applied prefix.
    ///
    /// # Errors
    ///
    /// Returns a [`SequenceError`] locating the first failing command.
    pub fn execute_sequence_recorded(
        &mut self,
        commands: &str,
        out_events: &mut Vec<Event>,
    ) -> Result<(), SequenceError> {
        for (index, command) in commands.chars().enumerate() {
            self.execute_recorded(command, out_events)
                .map_err(|source| SequenceError { index, source })?;
        }
        Ok(())
    }

    /// Applies a parsed command, pushing the resulting event on success.
    ///
    /// # Errors
    ///
    /// Returns [`RoverError::ObstacleEncountered`] when a move is blocked.
    pub fn apply(
        &mut self,
        command: Command,
        out_events: &mut Vec<Event>,
    ) -> Result<(), RoverError> {
        let event = match command {
            Command::Forward => self.step(self.facing().unit_step())?,
            Command::Backward => {
                let (rows, columns) = self.facing().unit_step();
                self.step((-rows, -columns))?
            }
            Command::TurnLeft => self.turn(self.facing().turned_left()),
            Command::TurnRight => self.turn(self.facing().turned_right()),
        };
        out_events.push(event);
        Ok(())
    }

    fn execute_recorded(
        &mut self,
        command: char,
        out_events: &mut Vec<Event>,
    ) -> Result<(), RoverError> {
        let parsed = Command::try_from(command).map_err(|error| {
            log::debug!("rejected command {command:?} at {}", self.pose);
            error
        })?;
        self.apply(parsed, out_events)
    }

    fn step(&mut self, delta: (i32, i32)) -> Result<Event, RoverError> {
        let from = self.position();
        let to = self.grid.wrap(from.offset(delta));

        if !self.grid.is_traversable(to) {
            log::debug!("move from {from} blocked by obstacle at {to}");
            return Err(RoverError::ObstacleEncountered { cell: to });
        }

        let direction = self.facing();
        self.pose = Pose::new(to, direction);
        log::debug!("moved from {from} to {to} facing {direction}");
        Ok(Event::Moved {
            from,
            to,
            direction,
        })
    }

    fn turn(&mut self, to: Direction) -> Event {
        let cell = self.position();
        let from = self.facing();
        self.pose = Pose::new(cell, to);
        log::debug!("turned from {from} to {to} at {cell}");
        Event::Turned { cell, from, to }
    }
}
