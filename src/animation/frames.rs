//! Sprite states, facings, and the frame table that maps them to sheet rows.

use bevy::math::Vec2;
use serde::Deserialize;
use std::collections::HashMap;

use crate::world::DataLoadError;

/// Animation state of a sprite. `Die` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum SpriteState {
    #[default]
    Idle,
    Walk,
    Attack,
    Die,
}

impl SpriteState {
    pub const ALL: [SpriteState; 4] = [
        SpriteState::Idle,
        SpriteState::Walk,
        SpriteState::Attack,
        SpriteState::Die,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Facing of a sprite; each facing is a row offset on the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum SpriteDirection {
    North,
    West,
    #[default]
    South,
    East,
}

impl SpriteDirection {
    pub const ALL: [SpriteDirection; 4] = [
        SpriteDirection::North,
        SpriteDirection::West,
        SpriteDirection::South,
        SpriteDirection::East,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Facing for a movement vector, picked from its dominant axis.
    ///
    /// Vertical only wins when `|y| > |x|`, so equal magnitudes face
    /// horizontally.
    pub fn from_vector(v: Vec2) -> Self {
        if v.y.abs() > v.x.abs() {
            if v.y > 0.0 {
                SpriteDirection::South
            } else {
                SpriteDirection::North
            }
        } else if v.x > 0.0 {
            SpriteDirection::East
        } else {
            SpriteDirection::West
        }
    }

    /// Unit step in this facing (screen coordinates, y grows downward).
    pub fn unit(self) -> Vec2 {
        match self {
            SpriteDirection::North => Vec2::new(0.0, -1.0),
            SpriteDirection::West => Vec2::new(-1.0, 0.0),
            SpriteDirection::South => Vec2::new(0.0, 1.0),
            SpriteDirection::East => Vec2::new(1.0, 0.0),
        }
    }
}

/// Frame table entries as written in character and entity records.
///
/// `states` maps a state to `(frame_count, base_row)`; `directions` maps a
/// facing to its row offset.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FrameTableDef {
    pub states: HashMap<SpriteState, (u32, u32)>,
    pub directions: HashMap<SpriteDirection, u32>,
}

impl FrameTableDef {
    /// Replace entries with those present in `overrides`.
    pub fn merge(&mut self, overrides: &FrameTableDef) {
        self.states
            .extend(overrides.states.iter().map(|(k, v)| (*k, *v)));
        self.directions
            .extend(overrides.directions.iter().map(|(k, v)| (*k, *v)));
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct FrameSpan {
    count: u32,
    row: u32,
}

/// Complete frame table; every state and facing has an entry.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameTable {
    spans: [FrameSpan; 4],
    offsets: [u32; 4],
}

impl FrameTable {
    /// Build a table, failing if any state or facing is missing.
    pub fn build(character: &str, def: &FrameTableDef) -> Result<Self, DataLoadError> {
        let mut spans = [FrameSpan { count: 0, row: 0 }; 4];
        for state in SpriteState::ALL {
            let (count, row) =
                def.states
                    .get(&state)
                    .copied()
                    .ok_or_else(|| DataLoadError::MissingFrame {
                        character: character.to_string(),
                        entry: format!("state {state:?}"),
                    })?;
            spans[state.index()] = FrameSpan { count, row };
        }

        let mut offsets = [0; 4];
        for direction in SpriteDirection::ALL {
            offsets[direction.index()] =
                def.directions
                    .get(&direction)
                    .copied()
                    .ok_or_else(|| DataLoadError::MissingFrame {
                        character: character.to_string(),
                        entry: format!("direction {direction:?}"),
                    })?;
        }

        Ok(Self { spans, offsets })
    }

    pub fn frame_count(&self, state: SpriteState) -> u32 {
        self.spans[state.index()].count
    }

    /// Sheet row for a state and facing. Death rows ignore the facing.
    pub fn row(&self, state: SpriteState, direction: SpriteDirection) -> u32 {
        let base = self.spans[state.index()].row;
        if state == SpriteState::Die {
            base
        } else {
            base + self.offsets[direction.index()]
        }
    }
}
