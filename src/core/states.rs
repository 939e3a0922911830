//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. Simulation ticks
//! only run in `InGame`; pausing is owned by the active area so the pause
//! menu itself keeps receiving input.

use bevy::prelude::*;

/// Main game states.
///
/// - Start in `Loading` while data records are read
/// - Move to `InGame` once the session is built
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Reading configuration and data records
    #[default]
    Loading,
    /// Active simulation
    InGame,
}
