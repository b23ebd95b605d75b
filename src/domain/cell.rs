//! Grid coordinates and travel directions.
//!
//! Cells are stored in play-area units (always a multiple of `CELL_SIZE`),
//! so the cell at grid column 5, row 5 is `(50, 50)`.

use super::constants::{CELL_SIZE, HEIGHT, WIDTH};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    /// Cell at grid column `col`, row `row`.
    pub fn from_grid(col: usize, row: usize) -> Self {
        Cell::new(col as i32 * CELL_SIZE, row as i32 * CELL_SIZE)
    }

    /// Grid column and row of this cell.
    pub fn grid_pos(self) -> (usize, usize) {
        ((self.x / CELL_SIZE) as usize, (self.y / CELL_SIZE) as usize)
    }

    /// The neighbouring cell one step in `dir`, wrapped around the play area.
    pub fn step(self, dir: Direction) -> Cell {
        let (dx, dy) = dir.offset();
        Cell::new(self.x + dx * CELL_SIZE, self.y + dy * CELL_SIZE).wrapped()
    }

    /// Toroidal wrap: leaving one edge re-enters at the opposite edge.
    /// Each axis is checked on its own.
    pub fn wrapped(self) -> Cell {
        let mut c = self;
        if c.x < 0 {
            c.x = WIDTH - CELL_SIZE;
        } else if c.x >= WIDTH {
            c.x = 0;
        }
        if c.y < 0 {
            c.y = HEIGHT - CELL_SIZE;
        } else if c.y >= HEIGHT {
            c.y = 0;
        }
        c
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Unit offset in grid steps. Screen y grows downward.
    fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_table_is_symmetric() {
        for d in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert_eq!(d.opposite().opposite(), d);
            assert_ne!(d.opposite(), d);
            assert!(d.is_opposite(d.opposite()));
        }
        assert!(!Direction::Up.is_opposite(Direction::Left));
    }

    #[test]
    fn step_moves_one_cell() {
        let c = Cell::new(50, 50);
        assert_eq!(c.step(Direction::Right), Cell::new(60, 50));
        assert_eq!(c.step(Direction::Left), Cell::new(40, 50));
        assert_eq!(c.step(Direction::Up), Cell::new(50, 40));
        assert_eq!(c.step(Direction::Down), Cell::new(50, 60));
    }

    #[test]
    fn step_wraps_every_edge() {
        assert_eq!(Cell::new(290, 50).step(Direction::Right), Cell::new(0, 50));
        assert_eq!(Cell::new(0, 50).step(Direction::Left), Cell::new(290, 50));
        assert_eq!(Cell::new(50, 0).step(Direction::Up), Cell::new(50, 290));
        assert_eq!(Cell::new(50, 290).step(Direction::Down), Cell::new(50, 0));
    }

    #[test]
    fn wrap_only_touches_the_out_of_range_axis() {
        // Corner: moving right off the edge keeps y.
        assert_eq!(Cell::new(290, 290).step(Direction::Right), Cell::new(0, 290));
        assert_eq!(Cell::new(0, 0).step(Direction::Up), Cell::new(0, 290));
    }

    #[test]
    fn grid_round_trip() {
        let c = Cell::from_grid(29, 3);
        assert_eq!(c, Cell::new(290, 30));
        assert_eq!(c.grid_pos(), (29, 3));
    }
}
