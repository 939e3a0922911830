//! Simulated actors: a sprite, a collision box, and combat stats.
//!
//! Actors never reach into their area. Movement, health changes and death
//! are queued in the actor's outbox and the area drains them at the end of
//! the tick.

use bevy::color::Color;
use bevy::log::info;
use bevy::math::Vec2;

use super::components::Health;
use crate::animation::{AnimatedSprite, FrameTable, SpriteDirection, SpriteState};
use crate::core::{ActorEvent, RectF};
use crate::rendering::{outline, Canvas};
use crate::ui::HealthBar;
use crate::world::{DataLoadError, DataRegistry, EntityDefinition};

/// Margin added on every side of an actor's bounds for melee reach.
pub const ATTACK_REACH: f32 = 1.0;

/// Regen in records is per second; the simulation ticks at this rate.
const TICKS_PER_SECOND: f32 = 60.0;

#[derive(Debug, Clone)]
pub struct Actor {
    name: String,
    kind_id: String,
    sprite: AnimatedSprite,
    offset: Vec2,
    size: Vec2,
    health: Health,
    strength: f32,
    spawn: Vec2,
    last_position: Vec2,
    health_bar: Option<HealthBar>,
    bar_offset: Vec2,
    outbox: Vec<ActorEvent>,
}

impl Actor {
    /// Build an actor named `name` from record `kind_id` with its collision
    /// box at `position`.
    pub fn load(
        name: impl Into<String>,
        kind_id: impl Into<String>,
        position: Vec2,
        def: &EntityDefinition,
        registry: &DataRegistry,
    ) -> Result<Self, DataLoadError> {
        let character = registry.character(&def.base)?;
        let mut frames = character.frames.clone();
        frames.merge(&def.frames);
        let table = FrameTable::build(&def.base, &frames)?;
        let sheets = registry.resolve_sheets(def)?;

        let sprite = AnimatedSprite::new(
            position - def.offset,
            character.size,
            character.speed,
            character.direction,
            table,
            sheets,
        );
        let health = Health::new(
            def.current_health,
            def.max_health,
            def.regen / TICKS_PER_SECOND,
        );

        let bounds = RectF::from_pos_size(position, def.size);
        let health_bar = def
            .health_bar
            .as_ref()
            .map(|bar| HealthBar::above(bar, bounds, health.maximum, health.current));
        let bar_offset = health_bar
            .as_ref()
            .map(|bar| bar.position() - position)
            .unwrap_or_default();

        Ok(Self {
            name: name.into(),
            kind_id: kind_id.into(),
            sprite,
            offset: def.offset,
            size: def.size,
            health,
            strength: def.strength,
            spawn: position,
            last_position: position,
            health_bar,
            bar_offset,
            outbox: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Id of the record this actor was built from.
    pub fn kind_id(&self) -> &str {
        &self.kind_id
    }

    /// Top-left corner of the collision box.
    pub fn position(&self) -> Vec2 {
        self.sprite.position() + self.offset
    }

    /// Teleport without animating or raising a move event.
    pub fn set_position(&mut self, position: Vec2) {
        self.sprite.set_position(position - self.offset);
        if let Some(bar) = &mut self.health_bar {
            bar.set_position(position + self.bar_offset);
        }
    }

    pub fn bounds(&self) -> RectF {
        RectF::from_pos_size(self.position(), self.size)
    }

    /// Position the actor was created at.
    pub fn spawn(&self) -> Vec2 {
        self.spawn
    }

    pub fn state(&self) -> SpriteState {
        self.sprite.state()
    }

    pub fn direction(&self) -> SpriteDirection {
        self.sprite.direction()
    }

    pub fn sprite(&self) -> &AnimatedSprite {
        &self.sprite
    }

    pub fn health(&self) -> f32 {
        self.health.current
    }

    pub fn max_health(&self) -> f32 {
        self.health.maximum
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }

    pub fn health_bar(&self) -> Option<&HealthBar> {
        self.health_bar.as_ref()
    }

    pub fn is_dead(&self) -> bool {
        self.sprite.state() == SpriteState::Die
    }

    pub fn is_attacking(&self) -> bool {
        self.sprite.state() == SpriteState::Attack
    }

    /// Overwrite current health without raising events.
    pub fn set_health(&mut self, current: f32) {
        self.health.current = current;
    }

    pub fn set_overlays(&mut self, sheets: Vec<String>) {
        self.sprite.set_overlays(sheets);
    }

    pub fn turn(&mut self, direction: SpriteDirection) {
        self.sprite.set_direction(direction);
    }

    /// Face the dominant axis of `vector`.
    pub fn turn_toward(&mut self, vector: Vec2) {
        self.turn(SpriteDirection::from_vector(vector));
    }

    /// Move by `delta`. Dead or mid-swing actors stay put.
    pub fn move_by(&mut self, delta: Vec2) -> bool {
        if self.is_dead() || !self.sprite.move_by(delta) {
            return false;
        }
        if let Some(bar) = &mut self.health_bar {
            bar.move_by(delta);
        }
        self.outbox.push(ActorEvent::Moved {
            bounds: self.bounds(),
            delta,
        });
        true
    }

    pub fn move_toward(&mut self, direction: SpriteDirection, amount: f32) -> bool {
        !self.is_dead() && self.move_by(direction.unit() * amount)
    }

    /// Move `amount` in the direction currently faced.
    pub fn move_forward(&mut self, amount: f32) -> bool {
        self.move_toward(self.direction(), amount)
    }

    /// Start the attack animation.
    pub fn begin_attack(&mut self) {
        self.sprite.set_state(SpriteState::Attack);
    }

    /// Damage `target` if it is within reach. Returns whether it was hit.
    pub fn try_attack(&self, target: &mut Actor) -> bool {
        if self.is_dead() {
            return false;
        }
        let reach = self.bounds().expanded(ATTACK_REACH);
        if reach.intersects(&target.bounds()) {
            target.damage(self.strength);
            true
        } else {
            false
        }
    }

    pub fn damage(&mut self, amount: f32) {
        if self.is_dead() {
            return;
        }
        self.health.take_damage(amount);
        self.outbox.push(ActorEvent::HealthChanged {
            health: self.health.current,
        });
        if let Some(bar) = &mut self.health_bar {
            bar.set_progress(self.health.current);
        }
        if self.health.is_dead() {
            self.die();
        }
    }

    fn die(&mut self) {
        if let Some(bar) = &mut self.health_bar {
            bar.detach();
        }
        self.sprite.set_state(SpriteState::Die);
        self.size = Vec2::ZERO;
        self.outbox.push(ActorEvent::Died);
        info!("{} died", self.name);
    }

    pub fn update(&mut self) {
        let position = self.position();
        if position == self.last_position
            && !matches!(self.state(), SpriteState::Attack | SpriteState::Die)
        {
            self.sprite.set_state(SpriteState::Idle);
        }
        self.last_position = position;

        self.sprite.update();
        if let Some(bar) = &mut self.health_bar {
            bar.update();
        }

        if !self.is_dead() && self.health.regenerate() {
            self.outbox.push(ActorEvent::HealthChanged {
                health: self.health.current,
            });
            if let Some(bar) = &mut self.health_bar {
                bar.set_progress(self.health.current);
            }
        }
    }

    /// Take every event queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<ActorEvent> {
        std::mem::take(&mut self.outbox)
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, debug: bool) {
        self.sprite.draw(canvas);
        if let Some(bar) = &self.health_bar {
            if !self.is_dead() {
                bar.draw(canvas);
            }
        }
        if debug {
            outline(canvas, self.bounds(), Color::BLACK);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    fn slime(position: Vec2) -> Actor {
        let registry = testing::registry();
        let def = registry.enemy("slime").unwrap();
        Actor::load("slime0", "slime", position, def, &registry).unwrap()
    }

    #[test]
    fn position_includes_sprite_offset() {
        let actor = slime(Vec2::new(100.0, 100.0));
        assert_eq!(actor.position(), Vec2::new(100.0, 100.0));
        assert_eq!(actor.sprite().position(), Vec2::new(94.0, 84.0));
        assert_eq!(actor.bounds(), RectF::new(100.0, 100.0, 20.0, 14.0));
    }

    #[test]
    fn lethal_damage_kills_exactly_once() {
        let mut actor = slime(Vec2::new(100.0, 100.0));
        actor.drain_events();

        actor.damage(actor.health());
        assert!(actor.is_dead());
        assert_eq!(
            actor.drain_events(),
            vec![ActorEvent::HealthChanged { health: 0.0 }, ActorEvent::Died]
        );
        assert_eq!(actor.bounds().size(), Vec2::ZERO);

        actor.damage(5.0);
        assert_eq!(actor.health(), 0.0);
        assert!(actor.drain_events().is_empty());
    }

    #[test]
    fn regen_stops_after_death() {
        let mut actor = slime(Vec2::new(100.0, 100.0));
        assert_eq!(actor.max_health(), 10.0);
        actor.damage(15.0);
        assert_eq!(actor.health(), -5.0);

        for _ in 0..120 {
            actor.update();
        }
        assert_eq!(actor.health(), -5.0);
        assert_eq!(actor.state(), SpriteState::Die);
    }

    #[test]
    fn regen_applies_per_tick() {
        let mut actor = slime(Vec2::new(100.0, 100.0));
        actor.damage(3.0);
        actor.update();
        // 60 per second in the record
        assert_eq!(actor.health(), 8.0);
        actor.update();
        actor.update();
        assert_eq!(actor.health(), 10.0);
    }

    #[test]
    fn dead_actors_do_not_move() {
        let mut actor = slime(Vec2::new(100.0, 100.0));
        actor.damage(100.0);
        actor.drain_events();
        assert!(!actor.move_by(Vec2::new(1.0, 0.0)));
        assert!(!actor.move_forward(2.0));
        assert!(actor.drain_events().is_empty());
    }

    #[test]
    fn moves_report_bounds_and_delta() {
        let mut actor = slime(Vec2::new(100.0, 100.0));
        assert!(actor.move_toward(SpriteDirection::East, 2.0));
        assert_eq!(actor.direction(), SpriteDirection::East);
        let events = actor.drain_events();
        assert_eq!(
            events,
            vec![ActorEvent::Moved {
                bounds: RectF::new(102.0, 100.0, 20.0, 14.0),
                delta: Vec2::new(2.0, 0.0),
            }]
        );
        assert_eq!(
            events[0].projected_bounds(),
            Some(RectF::new(104.0, 100.0, 20.0, 14.0))
        );
    }

    #[test]
    fn attacks_reach_one_unit() {
        let attacker = slime(Vec2::new(100.0, 100.0));
        let mut near = slime(Vec2::new(120.5, 100.0));
        let mut far = slime(Vec2::new(121.0, 100.0));

        assert!(attacker.try_attack(&mut near));
        assert_eq!(near.health(), 10.0 - attacker.strength());
        assert!(!attacker.try_attack(&mut far));
        assert_eq!(far.health(), 10.0);
    }

    #[test]
    fn standing_still_returns_to_idle() {
        let mut actor = slime(Vec2::new(100.0, 100.0));
        actor.move_by(Vec2::new(1.0, 0.0));
        actor.update();
        assert_eq!(actor.state(), SpriteState::Walk);
        actor.update();
        assert_eq!(actor.state(), SpriteState::Idle);
    }

    #[test]
    fn health_bar_follows_moves_until_death() {
        let mut actor = slime(Vec2::new(100.0, 100.0));
        let start = actor.health_bar().unwrap().position();
        actor.move_by(Vec2::new(3.0, 0.0));
        assert_eq!(actor.health_bar().unwrap().position(), start + Vec2::new(3.0, 0.0));

        actor.damage(100.0);
        assert!(!actor.health_bar().unwrap().is_tracking());
    }
}
