//! GameState: everything the simulation owns.
//!
//! The shell reads it through the accessors below and drives it through
//! `tick()` (see `step.rs`), `set_direction()` and `restart()`.
//! Fields are `pub(super)` so the step logic in this module tree can mutate
//! them directly; everything outside `sim` gets read-only access.

use std::collections::VecDeque;

use tracing::{debug, info};

use crate::domain::cell::{Cell, Direction};
use crate::domain::constants::START_SNAKE;
use super::event::GameEvent;
use super::food::{place_food, FoodRng};

pub struct GameState {
    /// Head at the front, tail at the back.
    pub(super) snake: VecDeque<Cell>,
    /// Direction the last tick moved in.
    pub(super) direction: Direction,
    /// Requested direction, committed at the start of the next tick.
    pub(super) pending: Option<Direction>,
    pub(super) food: Option<Cell>,
    pub(super) score: u32,
    pub(super) high_score: u32,
    /// High score when this round started; beating it is announced once.
    pub(super) previous_best: u32,
    pub(super) alive: bool,
    pub(super) rng: FoodRng,
}

impl GameState {
    pub fn new() -> Self {
        Self::with_rng(FoodRng::from_random())
    }

    /// Deterministic food placement for a given seed.
    #[allow(dead_code)]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(FoodRng::new(seed))
    }

    fn with_rng(rng: FoodRng) -> Self {
        let mut game = GameState {
            snake: VecDeque::new(),
            direction: Direction::Right,
            pending: None,
            food: None,
            score: 0,
            high_score: 0,
            previous_best: 0,
            alive: true,
            rng,
        };
        game.reset_board();
        info!(seed = game.rng.seed(), "new game");
        game
    }

    /// Back to the starting snake with a fresh food cell. High score is kept.
    pub fn restart(&mut self) -> GameEvent {
        self.reset_board();
        info!(high_score = self.high_score, "game restarted");
        GameEvent::Restarted
    }

    fn reset_board(&mut self) {
        self.snake = START_SNAKE.iter().map(|&(x, y)| Cell::new(x, y)).collect();
        self.direction = Direction::Right;
        self.pending = None;
        self.score = 0;
        self.previous_best = self.high_score;
        self.alive = true;
        self.food = place_food(&mut self.rng, &self.snake);
    }

    /// Request a turn for the next tick.
    ///
    /// Rejected when it would reverse into the neck, i.e. when it is the
    /// opposite of the direction the snake last moved in, and while the game
    /// is over. A later valid request before the tick replaces an earlier one.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if !self.alive || requested.is_opposite(self.direction) {
            debug!(?requested, current = ?self.direction, "direction change ignored");
            return false;
        }
        self.pending = Some(requested);
        true
    }

    // ── Read-only view for rendering ──

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn snake(&self) -> &VecDeque<Cell> {
        &self.snake
    }

    pub fn head(&self) -> Cell {
        // The body is never empty: reset_board seeds it and tick only ever
        // pops after pushing.
        self.snake[0]
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    #[allow(dead_code)]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[allow(dead_code)]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_three_cells_heading_right() {
        let g = GameState::with_seed(1);
        let body: Vec<Cell> = g.snake().iter().copied().collect();
        assert_eq!(body, vec![Cell::new(50, 50), Cell::new(40, 50), Cell::new(30, 50)]);
        assert_eq!(g.direction(), Direction::Right);
        assert_eq!(g.score(), 0);
        assert_eq!(g.high_score(), 0);
        assert!(g.is_alive());
        let food = g.food().unwrap();
        assert!(!g.snake().contains(&food));
    }

    #[test]
    fn reverse_request_is_ignored() {
        let mut g = GameState::with_seed(1);
        assert!(!g.set_direction(Direction::Left));
        assert_eq!(g.pending_direction(), None);
        assert_eq!(g.direction(), Direction::Right);
    }

    #[test]
    fn any_other_request_is_queued() {
        for d in [Direction::Up, Direction::Down, Direction::Right] {
            let mut g = GameState::with_seed(1);
            assert!(g.set_direction(d));
            assert_eq!(g.pending_direction(), Some(d));
            // Not applied until the next tick.
            assert_eq!(g.direction(), Direction::Right);
        }
    }

    #[test]
    fn later_request_replaces_earlier() {
        let mut g = GameState::with_seed(1);
        g.set_direction(Direction::Up);
        g.set_direction(Direction::Down);
        assert_eq!(g.pending_direction(), Some(Direction::Down));
    }

    #[test]
    fn reversal_is_judged_against_the_committed_direction() {
        // Moving right: Up is accepted, but Left is still the reverse of the
        // direction the snake is actually travelling.
        let mut g = GameState::with_seed(1);
        assert!(g.set_direction(Direction::Up));
        assert!(!g.set_direction(Direction::Left));
        assert_eq!(g.pending_direction(), Some(Direction::Up));
    }

    #[test]
    fn input_ignored_while_dead() {
        let mut g = GameState::with_seed(1);
        g.alive = false;
        assert!(!g.set_direction(Direction::Up));
        assert_eq!(g.pending_direction(), None);
    }

    #[test]
    fn restart_resets_everything_but_high_score() {
        let mut g = GameState::with_seed(3);
        g.score = 40;
        g.high_score = 40;
        g.alive = false;
        g.direction = Direction::Up;
        g.pending = Some(Direction::Left);
        g.snake.push_front(Cell::new(50, 40));

        assert_eq!(g.restart(), GameEvent::Restarted);

        assert!(g.is_alive());
        assert_eq!(g.score(), 0);
        assert_eq!(g.high_score(), 40);
        assert_eq!(g.direction(), Direction::Right);
        assert_eq!(g.pending_direction(), None);
        assert_eq!(g.snake().len(), 3);
        assert_eq!(g.head(), Cell::new(50, 50));
        assert!(!g.snake().contains(&g.food().unwrap()));
    }
}
