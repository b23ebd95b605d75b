pub mod cell;
pub mod constants;
