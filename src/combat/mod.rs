//! Combat module - actors, health, and melee resolution.

mod actor;
mod components;

pub use actor::{Actor, ATTACK_REACH};
pub use components::Health;
