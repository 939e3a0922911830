//! UI module - health bars and overlay menus.

mod health_bar;
mod menu;

pub use health_bar::HealthBar;
pub use menu::{draw_container, OverlayMenu};
