//! Per-tick input snapshots.
//!
//! The simulation reads one snapshot per tick and diffs it against the
//! previous tick's snapshot for edge-triggered actions.

use std::collections::HashSet;

use bevy::input::keyboard::KeyCode;

/// Keys and mouse buttons held down during one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    keys: HashSet<KeyCode>,
    pub mouse_left: bool,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_keys(keys: impl IntoIterator<Item = KeyCode>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn with_mouse_left(mut self, pressed: bool) -> Self {
        self.mouse_left = pressed;
        self
    }

    pub fn pressed(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    /// Key is down now and was up in `previous`.
    pub fn just_pressed(&self, previous: &InputSnapshot, key: KeyCode) -> bool {
        self.pressed(key) && !previous.pressed(key)
    }

    /// Key is up now and was down in `previous`.
    pub fn just_released(&self, previous: &InputSnapshot, key: KeyCode) -> bool {
        !self.pressed(key) && previous.pressed(key)
    }
}
