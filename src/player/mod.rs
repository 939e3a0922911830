//! Player module - the player character and its controls.

mod components;
mod movement;

pub use components::{Player, DEATH_HOLD_TICKS};
pub use movement::{PlayerFrame, SPRINT_MULTIPLIER, WALK_SPEED};
