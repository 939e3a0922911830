//! Frame-counter sprite animation driven by (state, facing) pairs.
//!
//! The frame counter is continuous and advances by a speed scalar every
//! tick. Walking scales the speed by the distance moved, so faster movement
//! animates faster.

use bevy::math::Vec2;

use super::frames::{FrameTable, SpriteDirection, SpriteState};
use crate::core::RectF;
use crate::rendering::Canvas;

/// Animated character sprite drawn from one or more sheets.
#[derive(Debug, Clone)]
pub struct AnimatedSprite {
    position: Vec2,
    frame_size: Vec2,
    base_speed: f32,
    speed: f32,
    frame: f32,
    frame_count: u32,
    row: u32,
    state: SpriteState,
    direction: SpriteDirection,
    table: FrameTable,
    base_sheets: Vec<String>,
    overlays: Vec<String>,
}

impl AnimatedSprite {
    pub fn new(
        position: Vec2,
        frame_size: Vec2,
        base_speed: f32,
        direction: SpriteDirection,
        table: FrameTable,
        base_sheets: Vec<String>,
    ) -> Self {
        let mut sprite = Self {
            position,
            frame_size,
            base_speed,
            speed: base_speed,
            frame: 0.0,
            frame_count: 0,
            row: 0,
            state: SpriteState::Idle,
            direction,
            table,
            base_sheets,
            overlays: Vec::new(),
        };
        sprite.set_state(SpriteState::Idle);
        sprite
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn state(&self) -> SpriteState {
        self.state
    }

    pub fn direction(&self) -> SpriteDirection {
        self.direction
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Whole frame index the counter currently sits on.
    pub fn current_frame(&self) -> u32 {
        self.frame as u32
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    /// The death animation has reached its final frame and is holding.
    pub fn death_finished(&self) -> bool {
        self.state == SpriteState::Die && self.current_frame() >= self.frame_count
    }

    /// Switch animation state. The frame counter carries over.
    ///
    /// Once a sprite is dying it stays dying.
    pub fn set_state(&mut self, state: SpriteState) {
        if self.state == SpriteState::Die && state != SpriteState::Die {
            return;
        }
        self.frame_count = self.table.frame_count(state);
        self.row = self.table.row(state, self.direction);
        self.state = state;
    }

    pub fn set_direction(&mut self, direction: SpriteDirection) {
        self.direction = direction;
        self.row = self.table.row(self.state, direction);
    }

    /// Replace every non-base sheet (armour and other overlays).
    pub fn set_overlays(&mut self, sheets: Vec<String>) {
        self.overlays = sheets;
    }

    /// Move by `delta` and animate a walk. Refused mid-attack.
    pub fn move_by(&mut self, delta: Vec2) -> bool {
        if self.state == SpriteState::Attack {
            return false;
        }
        self.speed = self.base_speed * delta.length();
        self.position += delta;
        self.set_direction(SpriteDirection::from_vector(delta));
        if delta.x != 0.0 || delta.y != 0.0 {
            self.set_state(SpriteState::Walk);
        } else {
            self.set_state(SpriteState::Idle);
        }
        true
    }

    /// Advance the animation by one tick.
    pub fn update(&mut self) {
        if matches!(self.state, SpriteState::Idle | SpriteState::Attack) {
            self.speed = self.base_speed;
        }
        if self.frame < self.frame_count as f32 && self.speed > 0.0 {
            self.frame += self.speed;
        } else if self.state == SpriteState::Die {
            // hold the last frame
        } else {
            if self.state == SpriteState::Attack {
                self.set_state(SpriteState::Idle);
            }
            self.frame = 0.0;
        }
    }

    /// Source rectangle of the current frame on every sheet.
    pub fn source_rect(&self) -> RectF {
        let column = self
            .current_frame()
            .min(self.frame_count.saturating_sub(1));
        RectF::new(
            column as f32 * self.frame_size.x,
            self.row as f32 * self.frame_size.y,
            self.frame_size.x,
            self.frame_size.y,
        )
    }

    /// Draw base sheets first, then overlays.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        let source = self.source_rect();
        for sheet in self.base_sheets.iter().chain(&self.overlays) {
            canvas.blit(sheet, source, self.position);
        }
    }
}
