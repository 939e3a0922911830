//! Rehood Naes - a top-down action RPG in Bevy.
//!
//! # Architecture
//!
//! The simulation is a set of plain structs owned by a [`world::Session`];
//! Bevy hosts it through a handful of plugins:
//!
//! - **Core**: Game states, configuration, geometry, input snapshots
//! - **World**: Data records, areas, triggers, and the session tick
//! - **Rendering**: Replays the session's draw list as sprites
//! - **Audio**: Area music
//!
//! The remaining modules hold the simulation itself:
//!
//! - **Animation**: Sprite sheets, frame tables, animation states
//! - **Combat**: Actors, health, melee
//! - **Enemies**: Enemy AI
//! - **Player**: Player controls
//! - **Inventory**: Items and containers
//! - **UI**: Health bars and overlay menus

pub mod animation;
pub mod audio;
pub mod combat;
pub mod core;
pub mod enemies;
pub mod inventory;
pub mod player;
pub mod rendering;
pub mod ui;
pub mod world;

#[cfg(test)]
pub(crate) mod testing;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct RehoodPlugin;

impl Plugin for RehoodPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Session and simulation tick
            .add_plugins(world::WorldPlugin)

            // Rendering systems
            .add_plugins(rendering::RenderingPlugin)

            // Music
            .add_plugins(audio::MusicPlugin);
    }
}
