//! Enemy AI: approach, retreat home, attack.
//!
//! The behaviour is derived each tick from where the player stands relative
//! to the enemy's probe box and wander limit; nothing but the cooldown is
//! stored between ticks.

use bevy::math::Vec2;

use super::components::Enemy;
use crate::combat::Actor;
use crate::world::CollisionView;

/// Distance covered per tick while approaching the player.
pub const APPROACH_STEP: f32 = 0.8;

/// Margin of the probe box around the enemy's bounds.
const PROBE_MARGIN: f32 = 1.0;

impl Enemy {
    /// Run one tick of AI followed by the actor update.
    ///
    /// `view` must not contain this enemy under another name; it is
    /// filtered out by name.
    pub fn update(&mut self, player: &mut Actor, view: &CollisionView) {
        if !self.actor.is_dead() {
            self.think(player, view);
        }
        self.actor.update();
    }

    fn think(&mut self, player: &mut Actor, view: &CollisionView) {
        let probe = self.actor.bounds().expanded(PROBE_MARGIN);
        let target = player.bounds();
        let player_near = target.intersects(&probe);

        let mut step =
            (player.position() - self.actor.position()).normalize_or_zero() * APPROACH_STEP;
        let mut face_step = true;
        let mut attacked = false;

        if !player_near
            && view.is_clear(&self.actor, step)
            && self.limit.contains(&probe)
            && self.limit.contains(&target)
        {
            self.actor.move_by(step);
        } else if !self.limit.contains(&target) {
            step = (self.actor.spawn() - self.actor.position()).normalize_or_zero();
            if self.limit.contains(&probe.offset_by(step))
                && view.is_clear(&self.actor, step)
                && !self.is_home()
            {
                self.actor.move_by(step);
            }
            if self.is_home() {
                face_step = false;
                self.actor.turn(self.home_direction);
            }
        } else if player_near && !self.actor.is_attacking() && self.cooldown.is_ready() {
            self.actor.try_attack(player);
            self.actor.begin_attack();
            self.cooldown.trigger();
            attacked = true;
        }

        if face_step {
            self.actor.turn_toward(step);
        }
        if !attacked {
            self.cooldown.tick();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{SpriteDirection, SpriteState};
    use crate::core::RectF;
    use crate::enemies::ATTACK_COOLDOWN_TICKS;
    use crate::testing;

    fn slime_at(position: Vec2, limit: RectF) -> Enemy {
        Enemy::spawn(
            "slime0",
            "slime",
            position,
            SpriteDirection::South,
            limit,
            &testing::registry(),
        )
        .unwrap()
    }

    #[test]
    fn approaches_player_inside_limit() {
        let mut enemy = slime_at(Vec2::new(100.0, 100.0), RectF::new(50.0, 50.0, 300.0, 300.0));
        let mut player = testing::player_actor(Vec2::new(200.0, 100.0));
        let view = CollisionView::new(testing::VIEWPORT, &[], &[], Some(player.bounds()));

        enemy.update(&mut player, &view);
        let moved = enemy.actor.position() - Vec2::new(100.0, 100.0);
        assert!((moved - Vec2::new(APPROACH_STEP, 0.0)).length() < 1e-4);
        assert_eq!(enemy.actor.direction(), SpriteDirection::East);
    }

    #[test]
    fn blocked_approach_still_turns_toward_the_player() {
        let mut enemy = slime_at(Vec2::new(100.0, 100.0), RectF::new(0.0, 0.0, 400.0, 400.0));
        let mut player = testing::player_actor(Vec2::new(200.0, 100.0));
        // flush against the right edge of the enemy's bounds
        let scenery = vec![testing::wall(RectF::new(120.0, 90.0, 5.0, 40.0))];
        let view = CollisionView::new(testing::VIEWPORT, &scenery, &[], Some(player.bounds()));

        enemy.update(&mut player, &view);
        assert_eq!(enemy.actor.position(), Vec2::new(100.0, 100.0));
        assert_eq!(enemy.actor.direction(), SpriteDirection::East);
        assert!(!enemy.actor.is_attacking());
    }

    #[test]
    fn wall_below_stops_a_southward_approach() {
        let mut enemy = slime_at(Vec2::new(100.0, 100.0), RectF::new(0.0, 0.0, 400.0, 400.0));
        enemy.actor.turn(SpriteDirection::North);
        let mut player = testing::player_actor(Vec2::new(100.0, 200.0));
        let scenery = vec![testing::wall(RectF::new(90.0, 114.0, 40.0, 5.0))];
        let view = CollisionView::new(testing::VIEWPORT, &scenery, &[], Some(player.bounds()));

        for _ in 0..3 {
            enemy.update(&mut player, &view);
        }
        assert_eq!(enemy.actor.position(), Vec2::new(100.0, 100.0));
        assert_eq!(enemy.actor.direction(), SpriteDirection::South);
    }

    #[test]
    fn blocked_retreat_stays_put_facing_home() {
        let home = Vec2::new(100.0, 100.0);
        let mut enemy = slime_at(home, RectF::new(50.0, 50.0, 200.0, 200.0));
        enemy.actor.set_position(Vec2::new(160.0, 100.0));
        let mut player = testing::player_actor(Vec2::new(500.0, 500.0));
        // between the enemy and its spawn point
        let scenery = vec![testing::wall(RectF::new(150.0, 90.0, 10.0, 40.0))];
        let view = CollisionView::new(testing::VIEWPORT, &scenery, &[], Some(player.bounds()));

        for _ in 0..3 {
            enemy.update(&mut player, &view);
        }
        assert_eq!(enemy.actor.position(), Vec2::new(160.0, 100.0));
        assert_eq!(enemy.actor.direction(), SpriteDirection::West);
        assert!(!enemy.is_home());
    }

    #[test]
    fn retreats_home_when_player_leaves_limit() {
        let home = Vec2::new(100.0, 100.0);
        let mut enemy = slime_at(home, RectF::new(50.0, 50.0, 200.0, 200.0));
        enemy.actor.set_position(Vec2::new(160.0, 130.0));
        let mut player = testing::player_actor(Vec2::new(500.0, 500.0));

        let mut distance = enemy.actor.position().distance(home);
        let mut ticks = 0;
        while distance > 1.0 {
            let view = CollisionView::new(testing::VIEWPORT, &[], &[], Some(player.bounds()));
            enemy.update(&mut player, &view);
            let next = enemy.actor.position().distance(home);
            assert!(next < distance, "tick {ticks}: {next} !< {distance}");
            distance = next;
            ticks += 1;
            assert!(ticks < 200);
        }

        let view = CollisionView::new(testing::VIEWPORT, &[], &[], Some(player.bounds()));
        let rest = enemy.actor.position();
        for _ in 0..5 {
            enemy.update(&mut player, &view);
        }
        assert_eq!(enemy.actor.position(), rest);
        // home facing wins over the westward retreat step
        assert_eq!(enemy.actor.direction(), SpriteDirection::South);
        assert_eq!(enemy.actor.state(), SpriteState::Idle);
    }

    #[test]
    fn attack_cooldown_spans_ninety_ticks() {
        let mut enemy = slime_at(Vec2::new(100.0, 100.0), RectF::new(0.0, 0.0, 400.0, 400.0));
        // touching the probe box on the right
        let mut player = testing::player_actor(Vec2::new(120.5, 100.0));
        player.set_health(1_000_000.0);
        let view = CollisionView::new(testing::VIEWPORT, &[], &[], Some(player.bounds()));

        let mut attack_ticks = Vec::new();
        for tick in 0..200 {
            let before = enemy.cooldown().remaining();
            enemy.update(&mut player, &view);
            if enemy.cooldown().remaining() == ATTACK_COOLDOWN_TICKS && before != ATTACK_COOLDOWN_TICKS {
                attack_ticks.push(tick);
            }
        }

        assert_eq!(attack_ticks, vec![0, 91, 182]);
    }

    #[test]
    fn dead_enemies_do_nothing() {
        let mut enemy = slime_at(Vec2::new(100.0, 100.0), RectF::new(0.0, 0.0, 400.0, 400.0));
        let mut player = testing::player_actor(Vec2::new(200.0, 100.0));
        enemy.actor.damage(1000.0);
        let view = CollisionView::new(testing::VIEWPORT, &[], &[], Some(player.bounds()));

        enemy.update(&mut player, &view);
        assert_eq!(enemy.actor.position(), Vec2::new(100.0, 100.0));
        assert_eq!(enemy.cooldown().remaining(), 0);
    }
}
