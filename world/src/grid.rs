//! Toroidal grid and obstacle registry.

use std::collections::BTreeSet;

use mars_rover_core::{CellCoord, GridError};

/// Bounded rectangular terrain whose opposite edges are connected.
///
/// Cells are addressed by [`CellCoord`] with rows in `0..rows` and columns in
/// `0..columns`. Only obstacle cells are stored, so the footprint of a grid
/// depends on how many cells are blocked rather than on its dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: i32,
    columns: i32,
    obstacles: BTreeSet<CellCoord>,
}

impl Grid {
    /// Creates an obstacle-free grid with the provided dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] when either dimension is zero
    /// or negative.
    pub fn new(rows: i32, columns: i32) -> Result<Self, GridError> {
        if rows <= 0 || columns <= 0 {
            return Err(GridError::InvalidDimensions { rows, columns });
        }

        Ok(Self {
            rows,
            columns,
            obstacles: BTreeSet::new(),
        })
    }

    /// Total number of cells in the grid.
    #[must_use]
    pub fn cell_count(&self) -> u64 {
        u64::from(self.rows.unsigned_abs()) * u64::from(self.columns.unsigned_abs())
    }

    /// Provides the `(rows, columns)` dimensions of the grid.
    #[must_use]
    pub const fn dimensions(&self) -> (i32, i32) {
        (self.rows, self.columns)
    }

    /// Marks the cell as impassable. Cells outside the grid are ignored.
    pub fn put_obstacle(&mut self, cell: CellCoord) {
        if self.is_in_bounds(cell) {
            let _ = self.obstacles.insert(cell);
        }
    }

    /// Reports whether the cell lies within `[0, rows) × [0, columns)`.
    #[must_use]
    pub const fn is_in_bounds(&self, cell: CellCoord) -> bool {
        cell.row() >= 0
            && cell.row() < self.rows
            && cell.column() >= 0
            && cell.column() < self.columns
    }

    /// Reports whether an in-bounds cell has been marked impassable.
    ///
    /// Out-of-bounds cells never hold obstacles.
    #[must_use]
    pub fn has_obstacle(&self, cell: CellCoord) -> bool {
        self.is_in_bounds(cell) && self.obstacles.contains(&cell)
    }

    /// Reports whether a rover may occupy the cell.
    #[must_use]
    pub fn is_traversable(&self, cell: CellCoord) -> bool {
        self.is_in_bounds(cell) && !self.has_obstacle(cell)
    }

    /// Normalises any row index into `0..rows`.
    #[must_use]
    pub const fn wrap_row(&self, row: i32) -> i32 {
        wrap(row, self.rows)
    }

    /// Normalises any column index into `0..columns`.
    #[must_use]
    pub const fn wrap_column(&self, column: i32) -> i32 {
        wrap(column, self.columns)
    }

    /// Normalises both axes of a coordinate onto the torus.
    #[must_use]
    pub const fn wrap(&self, cell: CellCoord) -> CellCoord {
        CellCoord::new(self.wrap_row(cell.row()), self.wrap_column(cell.column()))
    }

    /// Iterates over the obstacle cells in row-major order.
    ///
    /// [`CellCoord`] orders by row, then column, so set order is row-major.
    pub fn obstacles(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.obstacles.iter().copied()
    }

    /// Number of cells currently marked impassable.
    #[must_use]
    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }
}

/// True modulo: the result always lies in `0..len` for a positive `len`.
///
/// Equivalent to `((value % len) + len) % len` without the intermediate
/// overflow for dimensions near `i32::MAX`.
const fn wrap(value: i32, len: i32) -> i32 {
    value.rem_euclid(len)
}
