//! Events emitted by a simulation step.
//! The shell consumes these for logging and the message bar.

use crate::domain::cell::Cell;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameEvent {
    FoodEaten { at: Cell, score: u32 },
    /// Score passed the previous high score.
    HighScore { score: u32 },
    Crashed { at: Cell, score: u32 },
    Restarted,
}
