//! Core plugin that sets up game states, configuration, and the tick rate.

use bevy::prelude::*;

use super::config::GameConfig;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame)
/// - The `GameConfig` resource
/// - The fixed simulation rate
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        let config = GameConfig::load();

        app
            // Simulation advances once per fixed step
            .insert_resource(Time::<Fixed>::from_hz(config.tick_hz))
            .insert_resource(config)

            // Initialize game states
            .init_state::<GameState>();
    }
}
