//! Enemy state.

use bevy::math::Vec2;

use crate::animation::SpriteDirection;
use crate::combat::Actor;
use crate::core::RectF;
use crate::world::{DataLoadError, DataRegistry};

/// Ticks an enemy must wait after attacking before it can attack again.
pub const ATTACK_COOLDOWN_TICKS: u32 = 90;

/// Fixed-length lockout after an attack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttackCooldown {
    remaining: u32,
}

impl AttackCooldown {
    pub fn is_ready(&self) -> bool {
        self.remaining == 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Start the lockout.
    pub fn trigger(&mut self) {
        self.remaining = ATTACK_COOLDOWN_TICKS;
    }

    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}

/// An AI-driven actor bound to a wander limit.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub actor: Actor,
    pub(crate) limit: RectF,
    pub(crate) home_direction: SpriteDirection,
    pub(crate) cooldown: AttackCooldown,
}

impl Enemy {
    /// Build enemy `name` of kind `kind_id` at `position`, facing
    /// `direction`, confined to `limit`.
    pub fn spawn(
        name: impl Into<String>,
        kind_id: &str,
        position: Vec2,
        direction: SpriteDirection,
        limit: RectF,
        registry: &DataRegistry,
    ) -> Result<Self, DataLoadError> {
        let def = registry.enemy(kind_id)?;
        let mut actor = Actor::load(name, kind_id, position, def, registry)?;
        actor.turn(direction);
        Ok(Self {
            actor,
            limit,
            home_direction: direction,
            cooldown: AttackCooldown::default(),
        })
    }

    pub fn limit(&self) -> RectF {
        self.limit
    }

    pub fn home_direction(&self) -> SpriteDirection {
        self.home_direction
    }

    pub fn cooldown(&self) -> AttackCooldown {
        self.cooldown
    }

    /// Within one unit of where it spawned.
    pub fn is_home(&self) -> bool {
        self.actor.position().distance(self.actor.spawn()) <= 1.0
    }
}
