//! Fixed game constants. Not runtime configurable.

use std::time::Duration;

/// Play-area width in units.
pub const WIDTH: i32 = 300;
/// Play-area height in units.
pub const HEIGHT: i32 = 300;
/// Side length of one cell in units.
pub const CELL_SIZE: i32 = 10;

pub const GRID_W: usize = (WIDTH / CELL_SIZE) as usize;
pub const GRID_H: usize = (HEIGHT / CELL_SIZE) as usize;

pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Points awarded per food eaten.
pub const FOOD_REWARD: u32 = 10;

/// Starting body, head first.
pub const START_SNAKE: [(i32, i32); 3] = [(50, 50), (40, 50), (30, 50)];
