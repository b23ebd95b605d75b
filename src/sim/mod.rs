pub mod event;
pub mod food;
pub mod game;
pub mod step;
pub mod ticker;
