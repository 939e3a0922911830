//! Notifications raised by actors while they are mutated.
//!
//! Actors never call back into their owners. They push events into their
//! own outbox and the owning area drains every outbox once the tick's
//! updates are finished, so trigger callbacks can never observe a roster
//! that is halfway through being iterated.

use bevy::math::Vec2;

use super::geometry::RectF;

/// Something that happened to an actor during a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum ActorEvent {
    /// The actor moved by `delta`.
    ///
    /// `bounds` are the actor's bounds at the moment the move was applied;
    /// listeners project them by `delta` to look one step ahead.
    Moved { bounds: RectF, delta: Vec2 },
    /// Current health changed to `health`.
    HealthChanged { health: f32 },
    /// The actor entered its terminal death state.
    Died,
}

impl ActorEvent {
    /// Bounds a listener should test for a move, if this is one.
    pub fn projected_bounds(&self) -> Option<RectF> {
        match self {
            ActorEvent::Moved { bounds, delta } => Some(bounds.offset_by(*delta)),
            _ => None,
        }
    }
}

/// Event tagged with the name of the actor that raised it.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub actor: String,
    pub event: ActorEvent,
}
