//! Two-tone health bar that follows its actor.

use bevy::color::Color;
use bevy::math::Vec2;

use crate::core::RectF;
use crate::rendering::Canvas;
use crate::world::HealthBarDef;

/// Health bar drawn above an actor.
///
/// The back bar spans the full size; the front bar's width is the share of
/// health left, recomputed on every update.
#[derive(Debug, Clone)]
pub struct HealthBar {
    position: Vec2,
    size: Vec2,
    max: f32,
    current: f32,
    front_width: f32,
    front: Color,
    back: Color,
    tracking: bool,
}

impl HealthBar {
    /// Place a bar `buffer` units above `bounds`, centred horizontally.
    pub fn above(def: &HealthBarDef, bounds: RectF, max: f32, current: f32) -> Self {
        let size = Vec2::new(def.size.0, def.size.1);
        let position = Vec2::new(
            bounds.center().x - size.x / 2.0,
            bounds.top() - size.y - def.buffer,
        );
        let mut bar = Self {
            position,
            size,
            max,
            current,
            front_width: 0.0,
            front: Color::srgb_u8(def.front.0, def.front.1, def.front.2),
            back: Color::srgb_u8(def.back.0, def.back.1, def.back.2),
            tracking: true,
        };
        bar.update();
        bar
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn front_width(&self) -> f32 {
        self.front_width
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn move_by(&mut self, delta: Vec2) {
        if self.tracking {
            self.position += delta;
        }
    }

    pub fn set_progress(&mut self, current: f32) {
        if self.tracking {
            self.current = current;
        }
    }

    /// Stop following the actor. Used once it dies.
    pub fn detach(&mut self) {
        self.tracking = false;
    }

    pub fn update(&mut self) {
        let share = if self.max > 0.0 {
            self.current / self.max
        } else {
            0.0
        };
        self.front_width = (self.size.x * share).clamp(0.0, self.size.x);
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.fill(RectF::from_pos_size(self.position, self.size), self.back);
        canvas.fill(
            RectF::new(self.position.x, self.position.y, self.front_width, self.size.y),
            self.front,
        );
    }
}
