//! Core game module - geometry, input, events, configuration, and states.
//!
//! This module provides the foundation that all other game systems build upon.

pub mod config;
mod events;
pub mod geometry;
pub mod input;
mod plugin;
mod states;

pub use config::GameConfig;
pub use events::*;
pub use geometry::RectF;
pub use input::InputSnapshot;
pub use plugin::CorePlugin;
pub use states::*;
