//! Food placement.
//!
//! Rejection sampling over the whole grid, bounded to one attempt per grid
//! cell. If every attempt lands on the snake, pick uniformly among the free
//! cells instead. `None` means the snake covers the entire grid.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::domain::cell::Cell;
use crate::domain::constants::{GRID_H, GRID_W};

const MAX_ATTEMPTS: usize = GRID_W * GRID_H;

/// Seedable RNG for food placement. The seed is kept so it can be logged.
pub struct FoodRng {
    rng: StdRng,
    seed: u64,
}

impl FoodRng {
    pub fn new(seed: u64) -> Self {
        FoodRng {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn random_cell(&mut self) -> Cell {
        let col = self.rng.random_range(0..GRID_W);
        let row = self.rng.random_range(0..GRID_H);
        Cell::from_grid(col, row)
    }
}

pub fn place_food(rng: &mut FoodRng, snake: &VecDeque<Cell>) -> Option<Cell> {
    for _ in 0..MAX_ATTEMPTS {
        let candidate = rng.random_cell();
        if !snake.contains(&candidate) {
            debug!(x = candidate.x, y = candidate.y, "food placed");
            return Some(candidate);
        }
    }

    let free: Vec<Cell> = (0..GRID_H)
        .flat_map(|row| (0..GRID_W).map(move |col| Cell::from_grid(col, row)))
        .filter(|c| !snake.contains(c))
        .collect();
    if free.is_empty() {
        debug!("no free cell for food");
        return None;
    }
    let pick = free[rng.rng.random_range(0..free.len())];
    debug!(x = pick.x, y = pick.y, free = free.len(), "food placed after fallback scan");
    Some(pick)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_cells() -> VecDeque<Cell> {
        (0..GRID_H)
            .flat_map(|row| (0..GRID_W).map(move |col| Cell::from_grid(col, row)))
            .collect()
    }

    #[test]
    fn food_is_on_grid_and_off_snake() {
        let snake: VecDeque<Cell> = [Cell::new(50, 50), Cell::new(40, 50), Cell::new(30, 50)].into();
        for seed in 0..200 {
            let mut rng = FoodRng::new(seed);
            let food = place_food(&mut rng, &snake).unwrap();
            assert!(!snake.contains(&food));
            assert_eq!(food.x % 10, 0);
            assert_eq!(food.y % 10, 0);
            assert!((0..300).contains(&food.x));
            assert!((0..300).contains(&food.y));
        }
    }

    #[test]
    fn same_seed_same_food() {
        let snake = VecDeque::from([Cell::new(50, 50)]);
        let a = place_food(&mut FoodRng::new(42), &snake);
        let b = place_food(&mut FoodRng::new(42), &snake);
        assert_eq!(a, b);
    }

    #[test]
    fn single_free_cell_is_found() {
        let mut snake = all_cells();
        let hole = Cell::new(170, 230);
        snake.retain(|c| *c != hole);
        let mut rng = FoodRng::new(7);
        assert_eq!(place_food(&mut rng, &snake), Some(hole));
    }

    #[test]
    fn full_grid_has_no_food() {
        let snake = all_cells();
        let mut rng = FoodRng::new(7);
        assert_eq!(place_food(&mut rng, &snake), None);
    }
}
