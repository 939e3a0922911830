//! Static drawables: repeating tiles and solid structures.

use bevy::math::Vec2;

use super::data::{DataRegistry, StructureElement, StructurePlacement, TilePlacement};
use super::error::DataLoadError;
use crate::core::RectF;
use crate::rendering::Canvas;

/// A sheet rectangle repeated across a box.
#[derive(Debug, Clone)]
pub struct Tile {
    position: Vec2,
    size: Vec2,
    sheet: String,
    source: RectF,
}

impl Tile {
    pub fn new(position: Vec2, size: Vec2, sheet: impl Into<String>, source: RectF) -> Self {
        Self {
            position,
            size,
            sheet: sheet.into(),
            source,
        }
    }

    pub fn load(placement: &TilePlacement, registry: &DataRegistry) -> Result<Self, DataLoadError> {
        let def = registry.tile(&placement.tile)?;
        registry.sheet(&def.sheet)?;
        Ok(Self::new(placement.position, placement.size, def.sheet.clone(), def.source))
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Blit the source rectangle in a grid that covers the whole box,
    /// overhanging the right and bottom edges.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        if self.source.width <= 0.0 || self.source.height <= 0.0 {
            return;
        }
        let columns = (self.size.x / self.source.width).floor() as u32 + 1;
        let rows = (self.size.y / self.source.height).floor() as u32 + 1;
        for i in 0..columns {
            for j in 0..rows {
                let step = Vec2::new(i as f32 * self.source.width, j as f32 * self.source.height);
                canvas.blit(&self.sheet, self.source, self.position + step);
            }
        }
    }
}

/// Sheet pieces drawn relative to a position, plus collision boxes.
#[derive(Debug, Clone)]
pub struct Structure {
    id: String,
    position: Vec2,
    elements: Vec<StructureElement>,
    bounds: Vec<RectF>,
}

impl Structure {
    /// Build a structure at `position`; `bounds` are relative to it.
    pub fn new(
        id: impl Into<String>,
        position: Vec2,
        elements: Vec<StructureElement>,
        bounds: &[RectF],
    ) -> Self {
        Self {
            id: id.into(),
            position,
            elements,
            bounds: bounds.iter().map(|b| b.offset_by(position)).collect(),
        }
    }

    pub fn load(
        placement: &StructurePlacement,
        registry: &DataRegistry,
    ) -> Result<Self, DataLoadError> {
        let def = registry.structure(&placement.structure)?;
        for element in &def.elements {
            registry.sheet(&element.sheet)?;
        }
        Ok(Self::new(
            placement.structure.clone(),
            placement.position,
            def.elements.clone(),
            &def.bounds,
        ))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Collision boxes in area coordinates.
    pub fn collision_boxes(&self) -> &[RectF] {
        &self.bounds
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
        for bounds in &mut self.bounds {
            bounds.offset(delta.x, delta.y);
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        for element in &self.elements {
            canvas.blit(&element.sheet, element.source, self.position + element.position);
        }
    }
}

/// Any static element of an area, in paint order.
#[derive(Debug, Clone)]
pub enum Scenery {
    Tile(Tile),
    Structure(Structure),
}

impl Scenery {
    pub fn collision_boxes(&self) -> &[RectF] {
        match self {
            Scenery::Tile(_) => &[],
            Scenery::Structure(structure) => structure.collision_boxes(),
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        match self {
            Scenery::Tile(tile) => tile.draw(canvas),
            Scenery::Structure(structure) => structure.draw(canvas),
        }
    }
}
