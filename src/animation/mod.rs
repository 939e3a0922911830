//! Animation module - sprite states, facings, and frame tables.

mod frames;
mod sprite;

pub use frames::{FrameTable, FrameTableDef, SpriteDirection, SpriteState};
pub use sprite::AnimatedSprite;
