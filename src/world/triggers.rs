//! Trigger boxes: rectangles that fire an action when a watched actor
//! first steps into them.
//!
//! Each subscriber is tracked independently. A subscriber fires once when
//! its projected bounds start overlapping the box and must leave before it
//! can fire again. Leaving is silent.

use bevy::color::Color;
use bevy::math::Vec2;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

use super::data::de_vec2;
use crate::animation::SpriteDirection;
use crate::core::RectF;
use crate::rendering::Canvas;

/// Kind of actor a spawn produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum EntityKind {
    Player,
    #[serde(alias = "NPC")]
    Npc,
    Enemy,
}

fn one() -> usize {
    1
}

/// Everything needed to spawn an actor into an area.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpawnSpec {
    /// Record id of the actor kind.
    pub entity: String,
    /// Name prefix; the spawned actor gets the prefix plus a counter.
    pub name: String,
    pub kind: EntityKind,
    /// Most actors of this prefix and kind a trigger may keep alive.
    #[serde(default = "one")]
    pub max: usize,
    pub direction: SpriteDirection,
    #[serde(deserialize_with = "de_vec2")]
    pub position: Vec2,
    /// Wander limit of the spawned actor.
    pub limit: RectF,
}

/// What a trigger box does when it fires.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub enum TriggerAction {
    /// Move the player to `position` in area `area`.
    AdvanceArea {
        area: String,
        #[serde(deserialize_with = "de_vec2")]
        position: Vec2,
    },
    /// Spawn an actor.
    SpawnEntity(SpawnSpec),
}

/// Condition checked before a trigger fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum TriggerGuard {
    #[default]
    Always,
    /// Every enemy is dead or back at its spawn point.
    RoomCleared,
}

#[derive(Debug, Clone)]
struct Subscription {
    key: String,
    enabled: bool,
}

/// Rectangle watching a set of actors for entry.
#[derive(Debug, Clone)]
pub struct TriggerBox {
    rect: RectF,
    subscribers: Vec<Subscription>,
    inside: HashSet<String>,
    action: TriggerAction,
    guard: TriggerGuard,
    snapshot: Option<HashMap<String, bool>>,
    times_triggered: u32,
}

impl TriggerBox {
    pub fn new(rect: RectF, action: TriggerAction, guard: TriggerGuard) -> Self {
        Self {
            rect,
            subscribers: Vec::new(),
            inside: HashSet::new(),
            action,
            guard,
            snapshot: None,
            times_triggered: 0,
        }
    }

    pub fn rect(&self) -> RectF {
        self.rect
    }

    pub fn action(&self) -> &TriggerAction {
        &self.action
    }

    pub fn guard(&self) -> TriggerGuard {
        self.guard
    }

    pub fn times_triggered(&self) -> u32 {
        self.times_triggered
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_enabled(&self, key: &str) -> bool {
        self.subscribers
            .iter()
            .any(|s| s.key == key && s.enabled)
    }

    pub fn is_inside(&self, key: &str) -> bool {
        self.inside.contains(key)
    }

    /// Watch `key`. Subscribing twice enables the existing entry.
    pub fn subscribe(&mut self, key: &str) {
        match self.subscribers.iter_mut().find(|s| s.key == key) {
            Some(existing) => existing.enabled = true,
            None => self.subscribers.push(Subscription {
                key: key.to_string(),
                enabled: true,
            }),
        }
    }

    /// Stop watching `key` for good.
    pub fn detach(&mut self, key: &str) {
        self.subscribers.retain(|s| s.key != key);
        self.inside.remove(key);
    }

    /// Disable every subscriber, optionally remembering who was enabled.
    pub fn unload(&mut self, persist: bool) {
        if persist {
            self.snapshot = Some(
                self.subscribers
                    .iter()
                    .map(|s| (s.key.clone(), s.enabled))
                    .collect(),
            );
        }
        for subscriber in &mut self.subscribers {
            subscriber.enabled = false;
        }
    }

    /// Re-enable subscribers, from the saved snapshot when `restore` is set
    /// and one exists, otherwise all of them.
    pub fn load(&mut self, restore: bool) {
        let snapshot = self.snapshot.take();
        match snapshot {
            Some(saved) if restore => {
                for subscriber in &mut self.subscribers {
                    subscriber.enabled = saved.get(&subscriber.key).copied().unwrap_or(false);
                }
            }
            _ => {
                for subscriber in &mut self.subscribers {
                    subscriber.enabled = true;
                }
            }
        }
    }

    /// Feed one movement of subscriber `key`, whose bounds after the move
    /// are `projected`. Returns the action if the box fires.
    pub fn observe(
        &mut self,
        key: &str,
        projected: RectF,
        guard_holds: impl FnOnce(TriggerGuard) -> bool,
    ) -> Option<TriggerAction> {
        if !self.is_enabled(key) {
            return None;
        }

        let overlaps = self.rect.intersects(&projected);
        let inside = self.inside.contains(key);

        if overlaps && !inside && guard_holds(self.guard) {
            self.inside.insert(key.to_string());
            self.times_triggered += 1;
            Some(self.action.clone())
        } else if !overlaps && inside {
            self.inside.remove(key);
            None
        } else {
            None
        }
    }

    pub fn draw_debug(&self, canvas: &mut dyn Canvas) {
        canvas.fill(self.rect, Color::BLACK);
    }
}
