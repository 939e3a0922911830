//! Rehood Naes - Entry Point
//!
//! Controls:
//! - WASD: Move
//! - Shift: Sprint
//! - Left mouse: Attack
//! - E: Inventory
//! - Escape: Menu / pause
//! - F1: Debug mode

use bevy::prelude::*;
use rehood_naes::core::GameConfig;

fn main() {
    let (width, height) = GameConfig::load().viewport;

    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Rehood Naes".to_string(),
                resolution: (width, height).into(),
                resizable: false,
                ..default()
            }),
            ..default()
        }))

        // Our game plugin
        .add_plugins(rehood_naes::RehoodPlugin)

        .run();
}
