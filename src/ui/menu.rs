//! Overlay menus drawn on top of an area.
//!
//! Layout and buttons are out of scope here; a menu is a toggled overlay
//! that fades in over a few ticks while it stays visible.

use bevy::color::Color;
use bevy::math::Vec2;

use crate::core::RectF;
use crate::inventory::StorageContainer;
use crate::rendering::Canvas;

const FADE_TICKS: u32 = 15;
const MAX_ALPHA: f32 = 0.6;
const SLOT_SIZE: f32 = 36.0;
const SLOT_GAP: f32 = 4.0;
const SLOTS_PER_ROW: usize = 8;

/// Toggleable overlay with a fade-in backdrop.
#[derive(Debug, Clone, Default)]
pub struct OverlayMenu {
    id: String,
    showing: bool,
    visible_for: u32,
}

impl OverlayMenu {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            showing: false,
            visible_for: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_showing(&self) -> bool {
        self.showing
    }

    pub fn set_showing(&mut self, showing: bool) {
        if !showing {
            self.visible_for = 0;
        }
        self.showing = showing;
    }

    /// Flip visibility and return the new state.
    pub fn toggle(&mut self) -> bool {
        self.set_showing(!self.showing);
        self.showing
    }

    pub fn update(&mut self) {
        if self.showing {
            self.visible_for = self.visible_for.saturating_add(1);
        }
    }

    /// Backdrop opacity for the current fade step.
    pub fn alpha(&self) -> f32 {
        if !self.showing {
            return 0.0;
        }
        (self.visible_for as f32 / FADE_TICKS as f32).min(1.0) * MAX_ALPHA
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, viewport: RectF) {
        if self.showing {
            canvas.fill(viewport, Color::srgba(0.0, 0.0, 0.0, self.alpha()));
        }
    }
}

/// Draw one square per container slot, centred in `viewport`.
pub fn draw_container(canvas: &mut dyn Canvas, container: &StorageContainer, viewport: RectF) {
    let columns = container.capacity().min(SLOTS_PER_ROW);
    if columns == 0 {
        return;
    }
    let rows = container.capacity().div_ceil(columns);
    let step = SLOT_SIZE + SLOT_GAP;
    let size = Vec2::new(columns as f32 * step, rows as f32 * step);
    let origin = viewport.center() - size / 2.0;

    for (index, slot) in container.slots().iter().enumerate() {
        let cell = Vec2::new((index % columns) as f32, (index / columns) as f32) * step;
        let rect = RectF::from_pos_size(origin + cell, Vec2::splat(SLOT_SIZE));
        let color = match slot {
            Some(_) => Color::srgb(0.75, 0.65, 0.4),
            None => Color::srgb(0.2, 0.2, 0.2),
        };
        canvas.fill(rect, color);
    }
}
