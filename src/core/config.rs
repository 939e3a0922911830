//! Game configuration loaded from an external RON file.
//!
//! Allows pointing the game at another data directory, start area, or
//! viewport size without recompilation.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use super::geometry::RectF;

const CONFIG_PATH: &str = "assets/data/config.ron";

/// Configuration loaded from assets/data/config.ron.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Root directory holding all data records.
    pub data_dir: PathBuf,
    /// Play-area size; collision treats it as a hard boundary.
    pub viewport: (f32, f32),
    pub start_area: String,
    pub player_id: String,
    pub player_name: String,
    pub player_start: (f32, f32),
    pub music_volume: f64,
    /// Simulation ticks per second.
    pub tick_hz: f64,
    /// Start with debug drawing enabled.
    pub debug: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("assets/data"),
            viewport: (800.0, 600.0),
            start_area: "house_inside".to_string(),
            player_id: "defaultPlayer".to_string(),
            player_name: "Sean".to_string(),
            player_start: (514.0, 218.0),
            music_volume: 0.3,
            tick_hz: 60.0,
            debug: false,
        }
    }
}

impl GameConfig {
    /// Load config from RON file, falling back to defaults.
    pub fn load() -> Self {
        match fs::read_to_string(CONFIG_PATH) {
            Ok(contents) => match ron::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded game config from {}", CONFIG_PATH);
                    config
                }
                Err(e) => {
                    error!("Failed to parse {}: {}. Using defaults.", CONFIG_PATH, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Could not read {}: {}. Using defaults.", CONFIG_PATH, e);
                Self::default()
            }
        }
    }

    /// Viewport as a rectangle anchored at the origin.
    pub fn viewport_rect(&self) -> RectF {
        RectF::new(0.0, 0.0, self.viewport.0, self.viewport.1)
    }

    pub fn player_start(&self) -> Vec2 {
        Vec2::new(self.player_start.0, self.player_start.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: GameConfig = ron::from_str("(start_area: \"cellar\", debug: true)").unwrap();
        assert_eq!(config.start_area, "cellar");
        assert!(config.debug);
        assert_eq!(config.player_id, "defaultPlayer");
        assert_eq!(config.viewport_rect(), RectF::new(0.0, 0.0, 800.0, 600.0));
    }
}
