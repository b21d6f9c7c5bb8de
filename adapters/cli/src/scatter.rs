use mars_rover_core::CellCoord;
use mars_rover_world::Grid;
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Grids up to this many cells are scattered by shuffling every free cell.
const ENUMERATION_LIMIT: u64 = 1 << 16;

/// Marks up to `count` randomly chosen free cells as obstacles.
///
/// Placement is driven by a ChaCha generator seeded with `seed`, so the
/// same grid, count and seed always yield the same layout. `keep_clear` is
/// never selected. Returns the number of obstacles placed.
pub(crate) fn scatter_obstacles(
    grid: &mut Grid,
    count: usize,
    seed: u64,
    keep_clear: CellCoord,
) -> usize {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let reserved = u64::from(grid.is_traversable(keep_clear));
    let free = grid
        .cell_count()
        .saturating_sub(grid.obstacle_count() as u64)
        .saturating_sub(reserved);
    let wanted = count as u64;

    let placed = if grid.cell_count() <= ENUMERATION_LIMIT || wanted.saturating_mul(2) >= free {
        shuffle_free_cells(grid, count, &mut rng, keep_clear)
    } else {
        sample_free_cells(grid, count, &mut rng, keep_clear)
    };
    log::info!("scattered {placed} obstacles with seed {seed:#x}");
    placed
}

fn shuffle_free_cells(
    grid: &mut Grid,
    count: usize,
    rng: &mut ChaCha8Rng,
    keep_clear: CellCoord,
) -> usize {
    let (rows, columns) = grid.dimensions();
    let mut free: Vec<CellCoord> = (0..rows)
        .flat_map(|row| (0..columns).map(move |column| CellCoord::new(row, column)))
        .filter(|cell| *cell != keep_clear && grid.is_traversable(*cell))
        .collect();
    free.shuffle(rng);

    let placed = count.min(free.len());
    for cell in free.into_iter().take(placed) {
        grid.put_obstacle(cell);
    }
    placed
}

/// Draws cells uniformly and retries on collisions.
///
/// Only used while free cells outnumber the request at least two to one, so
/// every draw succeeds with probability above one half.
fn sample_free_cells(
    grid: &mut Grid,
    count: usize,
    rng: &mut ChaCha8Rng,
    keep_clear: CellCoord,
) -> usize {
    let (rows, columns) = grid.dimensions();
    let mut placed = 0;
    while placed < count {
        let cell = CellCoord::new(rng.gen_range(0..rows), rng.gen_range(0..columns));
        if cell != keep_clear && grid.is_traversable(cell) {
            grid.put_obstacle(cell);
            placed += 1;
        }
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scattering_is_deterministic_for_a_seed() {
        let mut first = Grid::new(8, 8).expect("valid grid");
        let mut second = Grid::new(8, 8).expect("valid grid");

        let _ = scatter_obstacles(&mut first, 10, 0x5eed, CellCoord::new(0, 0));
        let _ = scatter_obstacles(&mut second, 10, 0x5eed, CellCoord::new(0, 0));

        assert_eq!(first, second);
        assert_eq!(first.obstacle_count(), 10);
    }

    #[test]
    fn scattering_leaves_start_cell_clear() {
        let mut grid = Grid::new(3, 3).expect("valid grid");
        let start = CellCoord::new(1, 1);

        let placed = scatter_obstacles(&mut grid, 100, 7, start);

        assert_eq!(placed, 8);
        assert!(grid.is_traversable(start));
    }

    #[test]
    fn scattering_on_the_largest_grid_samples_cells() {
        let start = CellCoord::new(0, 0);
        let mut first = Grid::new(i32::MAX, i32::MAX).expect("valid grid");
        let mut second = Grid::new(i32::MAX, i32::MAX).expect("valid grid");

        assert_eq!(scatter_obstacles(&mut first, 5, 42, start), 5);
        assert_eq!(scatter_obstacles(&mut second, 5, 42, start), 5);

        assert_eq!(first.obstacle_count(), 5);
        assert!(first.is_traversable(start));
        assert_eq!(first, second);
    }

    #[test]
    fn scattering_skips_existing_obstacles() {
        let mut grid = Grid::new(2, 2).expect("valid grid");
        grid.put_obstacle(CellCoord::new(1, 1));

        let placed = scatter_obstacles(&mut grid, 5, 1, CellCoord::new(0, 0));

        assert_eq!(placed, 2);
        assert_eq!(grid.obstacle_count(), 3);
    }
}
