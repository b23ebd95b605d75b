//! The tick: advances the game by one cell.
//!
//! Processing order:
//!   1. Commit the pending direction
//!   2. New head = head + one cell in that direction, wrapped
//!   3. Food hit → grow, re-place food, score, high score
//!      otherwise → drop the tail
//!   4. Self-collision check
//!
//! The collision check runs after the tail moves, so steering into the cell
//! the tail is leaving this tick is safe.

use tracing::info;

use crate::domain::constants::FOOD_REWARD;
use super::event::GameEvent;
use super::food::place_food;
use super::game::GameState;

impl GameState {
    pub fn tick(&mut self) -> Vec<GameEvent> {
        if !self.alive {
            return vec![];
        }
        let mut events = Vec::new();

        if let Some(dir) = self.pending.take() {
            self.direction = dir;
        }

        let new_head = self.head().step(self.direction);
        self.snake.push_front(new_head);

        if self.food == Some(new_head) {
            self.score += FOOD_REWARD;
            events.push(GameEvent::FoodEaten { at: new_head, score: self.score });
            let best = self.previous_best;
            if best > 0 && self.score > best && self.score - FOOD_REWARD <= best {
                events.push(GameEvent::HighScore { score: self.score });
            }
            if self.score > self.high_score {
                self.high_score = self.score;
            }
            self.food = place_food(&mut self.rng, &self.snake);
        } else {
            self.snake.pop_back();
        }

        if self.snake.iter().skip(1).any(|&c| c == new_head) {
            self.alive = false;
            info!(x = new_head.x, y = new_head.y, score = self.score, length = self.snake.len(), "snake crashed");
            events.push(GameEvent::Crashed { at: new_head, score: self.score });
        }

        events
    }
}
