//! Drawing surface the simulation renders into.
//!
//! The simulation never touches textures. It records blits of sheet
//! sub-rectangles and solid fills in paint order; the rendering plugin turns
//! the recorded list into sprites each frame.

use bevy::color::Color;
use bevy::math::Vec2;

use crate::core::RectF;

/// Something that can receive sprite blits and solid fills.
pub trait Canvas {
    /// Copy `source` from sheet `sheet` with its top-left corner at `position`.
    fn blit(&mut self, sheet: &str, source: RectF, position: Vec2);

    /// Fill `rect` with a solid colour.
    fn fill(&mut self, rect: RectF, color: Color);
}

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Blit {
        sheet: String,
        source: RectF,
        position: Vec2,
    },
    Fill {
        rect: RectF,
        color: Color,
    },
}

/// Canvas that records commands in paint order (first is bottom-most).
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Canvas for DrawList {
    fn blit(&mut self, sheet: &str, source: RectF, position: Vec2) {
        self.commands.push(DrawCommand::Blit {
            sheet: sheet.to_string(),
            source,
            position,
        });
    }

    fn fill(&mut self, rect: RectF, color: Color) {
        self.commands.push(DrawCommand::Fill { rect, color });
    }
}

/// Draw a one-unit outline along the edges of `rect`.
pub fn outline(canvas: &mut dyn Canvas, rect: RectF, color: Color) {
    canvas.fill(RectF::new(rect.left(), rect.top(), rect.width, 1.0), color);
    canvas.fill(RectF::new(rect.left(), rect.top(), 1.0, rect.height), color);
    canvas.fill(RectF::new(rect.left(), rect.bottom(), rect.width, 1.0), color);
    canvas.fill(RectF::new(rect.right(), rect.top(), 1.0, rect.height), color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_draws_four_edges() {
        let mut list = DrawList::default();
        outline(&mut list, RectF::new(10.0, 20.0, 30.0, 40.0), Color::BLACK);
        assert_eq!(list.len(), 4);
        assert_eq!(
            list.commands()[2],
            DrawCommand::Fill {
                rect: RectF::new(10.0, 60.0, 30.0, 1.0),
                color: Color::BLACK,
            }
        );
    }
}
