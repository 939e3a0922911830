//! Rendering module - draw recording and the sprite renderer.

mod canvas;
mod plugin;

pub use canvas::{outline, Canvas, DrawCommand, DrawList};
pub use plugin::RenderingPlugin;
