use mars_rover_core::{CellCoord, Direction};
use mars_rover_world::Rover;

const OBSTACLE_GLYPH: char = '#';
const FREE_GLYPH: char = '.';

/// Draws the rover's grid as text, one line per row.
///
/// North points up, so the highest row is printed first and row 0 last.
#[must_use]
pub(crate) fn render(rover: &Rover) -> String {
    let grid = rover.grid();
    let (rows, columns) = grid.dimensions();
    let width = usize::try_from(columns).unwrap_or(0) + 1;
    let height = usize::try_from(rows).unwrap_or(0);
    let mut out = String::with_capacity(width * height);

    for row in (0..rows).rev() {
        for column in 0..columns {
            let cell = CellCoord::new(row, column);
            let glyph = if cell == rover.position() {
                heading_glyph(rover.facing())
            } else if grid.has_obstacle(cell) {
                OBSTACLE_GLYPH
            } else {
                FREE_GLYPH
            };
            out.push(glyph);
        }
        out.push('\n');
    }

    out
}

const fn heading_glyph(direction: Direction) -> char {
    match direction {
        Direction::North => '^',
        Direction::East => '>',
        Direction::South => 'v',
        Direction::West => '<',
    }
}
