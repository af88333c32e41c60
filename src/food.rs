use std::collections::HashSet;

use rand::Rng;

use crate::config::DEFAULT_MAX_SPAWN_ATTEMPTS;
use crate::grid::{Cell, Grid};

/// Picks free cells for food.
///
/// Random draws are cheap while the board is mostly empty. Once they keep
/// missing, a deterministic scan guarantees a free cell is still found.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct FoodSpawner {
    max_attempts: u32,
}

impl FoodSpawner {
    #[must_use]
    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// Returns a cell not in `occupied`, or `None` when the board is full.
    ///
    /// The fallback scan walks columns first: x outer, y inner, so the first
    /// candidates are `(0, 0)`, `(0, 1)`, … `(0, N-1)`, `(1, 0)`.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        occupied: &HashSet<Cell>,
        grid: Grid,
    ) -> Option<Cell> {
        if occupied.len() >= grid.total_cells() {
            return None;
        }

        let size = i32::from(grid.size());
        for _ in 0..self.max_attempts {
            let candidate = Cell::new(rng.gen_range(0..size), rng.gen_range(0..size));
            if !occupied.contains(&candidate) {
                return Some(candidate);
            }
        }

        tracing::debug!(
            attempts = self.max_attempts,
            occupied = occupied.len(),
            "random food placement exhausted, scanning board"
        );
        scan_for_free_cell(occupied, grid)
    }
}

impl Default for FoodSpawner {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SPAWN_ATTEMPTS)
    }
}

fn scan_for_free_cell(occupied: &HashSet<Cell>, grid: Grid) -> Option<Cell> {
    let size = i32::from(grid.size());
    (0..size)
        .flat_map(|x| (0..size).map(move |y| Cell::new(x, y)))
        .find(|cell| !occupied.contains(cell))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::FoodSpawner;
    use crate::grid::{Cell, Grid};

    fn all_cells(grid: Grid) -> HashSet<Cell> {
        let size = i32::from(grid.size());
        (0..size)
            .flat_map(|x| (0..size).map(move |y| Cell::new(x, y)))
            .collect()
    }

    #[test]
    fn food_spawn_never_overlaps_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = Grid::new(8);
        let occupied: HashSet<Cell> = [Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)]
            .into_iter()
            .collect();

        for _ in 0..100 {
            let food = FoodSpawner::default()
                .spawn(&mut rng, &occupied, grid)
                .expect("board has free cells");
            assert!(!occupied.contains(&food));
            assert!(grid.contains(food));
        }
    }

    #[test]
    fn full_board_yields_no_food() {
        let mut rng = StdRng::seed_from_u64(1);
        let grid = Grid::new(4);

        assert_eq!(
            FoodSpawner::default().spawn(&mut rng, &all_cells(grid), grid),
            None
        );
    }

    #[test]
    fn fallback_scan_walks_x_outer_y_inner() {
        let mut rng = StdRng::seed_from_u64(3);
        let grid = Grid::new(4);
        let spawner = FoodSpawner::new(0);

        let mut occupied = HashSet::new();
        occupied.insert(Cell::new(0, 0));
        assert_eq!(spawner.spawn(&mut rng, &occupied, grid), Some(Cell::new(0, 1)));

        for y in 0..4 {
            occupied.insert(Cell::new(0, y));
        }
        assert_eq!(spawner.spawn(&mut rng, &occupied, grid), Some(Cell::new(1, 0)));
    }

    #[test]
    fn single_free_cell_is_always_found() {
        let mut rng = StdRng::seed_from_u64(11);
        let grid = Grid::new(5);
        let mut occupied = all_cells(grid);
        occupied.remove(&Cell::new(3, 2));

        // A tiny attempt budget forces the fallback most of the time.
        let spawner = FoodSpawner::new(2);
        for _ in 0..20 {
            assert_eq!(spawner.spawn(&mut rng, &occupied, grid), Some(Cell::new(3, 2)));
        }
    }
}
