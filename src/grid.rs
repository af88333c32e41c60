use crate::input::Direction;

/// Grid position in logical cell coordinates.
///
/// Coordinates are signed so that a candidate head one step past the edge
/// (`x = -1` or `x = N`) is representable and can be rejected by [`Grid::contains`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring cell one step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns the cell `distance` steps in `direction`.
    #[must_use]
    pub fn offset(self, direction: Direction, distance: i32) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx * distance,
            y: self.y + dy * distance,
        }
    }
}

/// Square N×N playing field.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Grid {
    size: u16,
}

impl Grid {
    #[must_use]
    pub fn new(size: u16) -> Self {
        debug_assert!(size > 0);
        Self { size }
    }

    /// Side length of the board.
    #[must_use]
    pub fn size(self) -> u16 {
        self.size
    }

    /// Returns true when `cell` lies inside the board.
    #[must_use]
    pub fn contains(self, cell: Cell) -> bool {
        let size = i32::from(self.size);
        cell.x >= 0 && cell.y >= 0 && cell.x < size && cell.y < size
    }

    /// Starting cell for a fresh snake head.
    #[must_use]
    pub fn center(self) -> Cell {
        let half = i32::from(self.size / 2);
        Cell::new(half, half)
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.size) * usize::from(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::{Cell, Grid};
    use crate::input::Direction;

    #[test]
    fn contains_accepts_only_cells_inside_the_board() {
        let grid = Grid::new(22);

        assert!(grid.contains(Cell::new(0, 0)));
        assert!(grid.contains(Cell::new(21, 21)));
        assert!(!grid.contains(Cell::new(-1, 5)));
        assert!(!grid.contains(Cell::new(5, -1)));
        assert!(!grid.contains(Cell::new(22, 5)));
        assert!(!grid.contains(Cell::new(5, 22)));
    }

    #[test]
    fn center_uses_integer_division() {
        assert_eq!(Grid::new(22).center(), Cell::new(11, 11));
        assert_eq!(Grid::new(5).center(), Cell::new(2, 2));
        assert_eq!(Grid::new(22).total_cells(), 484);
    }

    #[test]
    fn cell_steps_by_direction_delta() {
        let origin = Cell::new(3, 3);

        assert_eq!(origin.step(Direction::Up), Cell::new(3, 2));
        assert_eq!(origin.step(Direction::Down), Cell::new(3, 4));
        assert_eq!(origin.step(Direction::Left), Cell::new(2, 3));
        assert_eq!(origin.step(Direction::Right), Cell::new(4, 3));
        assert_eq!(origin.offset(Direction::Right, -2), Cell::new(1, 3));
    }
}
