pub mod gamepad;
pub mod input;
pub mod menu;
pub mod renderer;
