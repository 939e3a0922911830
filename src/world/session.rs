//! A running game: the data registry, the area cache, and the player.
//!
//! Areas are built on first entry and cached by id for the rest of the
//! session, so a room keeps its roster and trigger state when the player
//! comes back. Everything the simulation needs is reached through the
//! session; nothing is global.

use bevy::log::{debug, info};
use bevy::math::Vec2;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::area::{Area, AreaRequest};
use super::data::DataRegistry;
use super::error::DataLoadError;
use crate::audio::AudioCue;
use crate::core::{GameConfig, InputSnapshot};
use crate::player::Player;
use crate::rendering::Canvas;

/// Switches the simulation flips for the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionFlags {
    /// Outline bounds, show trigger boxes, allow walking through walls.
    pub debug: bool,
    /// A menu is up and wants the cursor.
    pub mouse_visible: bool,
}

#[derive(Debug)]
pub struct Session {
    registry: DataRegistry,
    config: GameConfig,
    areas: HashMap<String, Area>,
    current: String,
    player: Player,
    flags: SessionFlags,
    /// Input of the last tick that ran, carried across area changes.
    last_input: InputSnapshot,
    audio: Vec<AudioCue>,
    next_instance: u64,
    focused: bool,
}

impl Session {
    /// Build the player and enter the configured start area.
    pub fn new(registry: DataRegistry, config: GameConfig) -> Result<Self, DataLoadError> {
        let player = load_player(&registry, &config)?;
        let mut session = Self {
            current: config.start_area.clone(),
            flags: SessionFlags {
                debug: config.debug,
                mouse_visible: false,
            },
            registry,
            config,
            areas: HashMap::new(),
            player,
            last_input: InputSnapshot::empty(),
            audio: Vec::new(),
            next_instance: 0,
            focused: true,
        };
        let start = session.config.start_area.clone();
        session.enter(&start)?;
        Ok(session)
    }

    pub fn registry(&self) -> &DataRegistry {
        &self.registry
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn flags(&self) -> SessionFlags {
        self.flags
    }

    pub fn current_area_id(&self) -> &str {
        &self.current
    }

    pub fn current_area(&self) -> Option<&Area> {
        self.areas.get(&self.current)
    }

    pub fn current_area_mut(&mut self) -> Option<&mut Area> {
        self.areas.get_mut(&self.current)
    }

    /// A cached area, if it has been visited.
    pub fn area(&self, id: &str) -> Option<&Area> {
        self.areas.get(id)
    }

    pub fn cached_areas(&self) -> usize {
        self.areas.len()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Text for the window title.
    pub fn title(&self) -> String {
        let position = self.player.position();
        format!("Player coordinates: {}, {}", position.x, position.y)
    }

    /// Return area `id`, from the cache with its trigger boxes re-enabled,
    /// or freshly built around the player's current position.
    pub fn load_area(&mut self, id: &str) -> Result<&mut Area, DataLoadError> {
        match self.areas.entry(id.to_string()) {
            Entry::Occupied(entry) => {
                let area = entry.into_mut();
                area.reload_triggers(true);
                debug!("Area '{}' served from cache (#{})", id, area.instance());
                Ok(area)
            }
            Entry::Vacant(entry) => {
                let area = Area::load(
                    id,
                    self.next_instance,
                    &self.registry,
                    &self.player,
                    self.config.viewport_rect(),
                )?;
                self.next_instance += 1;
                Ok(entry.insert(area))
            }
        }
    }

    /// Advance the active area by one tick and carry out what it asked for.
    /// Does nothing while the window is unfocused.
    pub fn tick(&mut self, input: &InputSnapshot) -> Result<(), DataLoadError> {
        if !self.focused {
            return Ok(());
        }

        let area = self
            .areas
            .get_mut(&self.current)
            .ok_or_else(|| DataLoadError::UnknownRecord {
                kind: "area",
                id: self.current.clone(),
            })?;
        let previous = std::mem::replace(&mut self.last_input, input.clone());
        let requests = area.update(
            &mut self.player,
            input,
            &previous,
            &mut self.flags,
            &self.registry,
        )?;

        if requests.contains(&AreaRequest::NewGame) {
            return self.restart();
        }
        // one transition per tick; later ones were raised in the old area
        if let Some(AreaRequest::Transition { area, position }) = requests.into_iter().next() {
            self.transition(&area, position)?;
        }
        Ok(())
    }

    /// Move the player to `position` in area `target`.
    ///
    /// If the target cannot be built the player stays where it was.
    pub fn transition(&mut self, target: &str, position: Vec2) -> Result<(), DataLoadError> {
        let previous = self.player.position();
        self.player.actor.set_position(position);

        if !self.areas.contains_key(target) {
            if let Err(e) = self.load_area(target) {
                self.player.actor.set_position(previous);
                return Err(e);
            }
        }

        if let Some(old) = self.areas.get_mut(&self.current) {
            old.unload_triggers(false);
        }
        info!("{} moves from '{}' to '{}'", self.player.name(), self.current, target);
        self.enter(target)
    }

    /// Drop every cached area and start over with a fresh player.
    pub fn restart(&mut self) -> Result<(), DataLoadError> {
        info!("Starting a new game");
        self.player = load_player(&self.registry, &self.config)?;
        self.areas.clear();
        self.flags.mouse_visible = false;
        let start = self.config.start_area.clone();
        self.enter(&start)
    }

    fn enter(&mut self, id: &str) -> Result<(), DataLoadError> {
        let music = self.load_area(id)?.music().cloned();
        self.player.set_area(id);
        self.current = id.to_string();
        if let Some(music) = music {
            self.audio.push(AudioCue::Play {
                track: music.track,
                looped: music.looped,
            });
        }
        Ok(())
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        if let Some(area) = self.current_area() {
            area.draw(canvas, &self.player, self.flags.debug);
        }
    }

    /// Record window focus. Losing focus pauses the music and the
    /// simulation until focus returns.
    pub fn set_focused(&mut self, focused: bool) {
        if focused == self.focused {
            return;
        }
        self.focused = focused;
        self.audio.push(if focused {
            AudioCue::Resume
        } else {
            AudioCue::Pause
        });
    }

    /// Take the audio cues queued since the last call.
    pub fn drain_audio(&mut self) -> Vec<AudioCue> {
        std::mem::take(&mut self.audio)
    }
}

fn load_player(registry: &DataRegistry, config: &GameConfig) -> Result<Player, DataLoadError> {
    Player::load(
        config.player_name.clone(),
        &config.player_id,
        config.start_area.clone(),
        config.player_start(),
        registry,
    )
}
