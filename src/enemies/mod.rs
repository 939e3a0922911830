//! Enemies module - enemy state and AI.

mod ai;
mod components;

pub use ai::APPROACH_STEP;
pub use components::{AttackCooldown, Enemy, ATTACK_COOLDOWN_TICKS};
