//! Collision queries against an area's contents.

use bevy::math::Vec2;

use super::scenery::Scenery;
use crate::combat::Actor;
use crate::core::RectF;
use crate::enemies::Enemy;

/// Read-only view of everything an actor can bump into.
///
/// Enemy rosters come as two slices so the enemy being updated can be
/// split out of its own roster. `player` is `None` when the subject is the
/// player.
#[derive(Debug, Clone, Copy)]
pub struct CollisionView<'a> {
    pub viewport: RectF,
    pub scenery: &'a [Scenery],
    pub enemies: [&'a [Enemy]; 2],
    pub player: Option<RectF>,
}

impl<'a> CollisionView<'a> {
    pub fn new(viewport: RectF, scenery: &'a [Scenery], enemies: &'a [Enemy], player: Option<RectF>) -> Self {
        Self {
            viewport,
            scenery,
            enemies: [enemies, &[]],
            player,
        }
    }

    /// True when `subject` moved by `offset` stays strictly inside the
    /// viewport and overlaps no structure, other enemy, or the player.
    pub fn is_clear(&self, subject: &Actor, offset: Vec2) -> bool {
        let bounds = subject.bounds().offset_by(offset);

        if !self.viewport.contains(&bounds) {
            return false;
        }

        let hits_scenery = self
            .scenery
            .iter()
            .flat_map(Scenery::collision_boxes)
            .any(|b| b.intersects(&bounds));
        if hits_scenery {
            return false;
        }

        let hits_enemy = self
            .enemies
            .iter()
            .flat_map(|group| group.iter())
            .filter(|enemy| enemy.actor.name() != subject.name())
            .any(|enemy| enemy.actor.bounds().intersects(&bounds));
        if hits_enemy {
            return false;
        }

        match self.player {
            Some(player) => !player.intersects(&bounds),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::SpriteDirection;
    use crate::testing;

    fn slime(name: &str, x: f32, y: f32) -> Enemy {
        Enemy::spawn(
            name,
            "slime",
            Vec2::new(x, y),
            SpriteDirection::South,
            RectF::new(0.0, 0.0, 800.0, 600.0),
            &testing::registry(),
        )
        .unwrap()
    }

    #[test]
    fn viewport_edges_block() {
        let subject = slime("slime0", 1.0, 100.0);
        let view = CollisionView::new(testing::VIEWPORT, &[], &[], None);
        assert!(view.is_clear(&subject.actor, Vec2::new(-0.5, 0.0)));
        assert!(!view.is_clear(&subject.actor, Vec2::new(-1.0, 0.0)));
    }

    #[test]
    fn structures_block() {
        let scenery = vec![testing::wall(RectF::new(130.0, 90.0, 10.0, 40.0))];
        let subject = slime("slime0", 100.0, 100.0);
        let view = CollisionView::new(testing::VIEWPORT, &scenery, &[], None);
        assert!(view.is_clear(&subject.actor, Vec2::new(10.0, 0.0)));
        assert!(!view.is_clear(&subject.actor, Vec2::new(11.0, 0.0)));
    }

    #[test]
    fn other_enemies_block_but_not_the_subject_itself() {
        let roster = vec![slime("slime0", 100.0, 100.0), slime("slime1", 130.0, 100.0)];
        let view = CollisionView::new(testing::VIEWPORT, &[], &roster, None);
        assert!(view.is_clear(&roster[0].actor, Vec2::ZERO));
        assert!(!view.is_clear(&roster[0].actor, Vec2::new(11.0, 0.0)));
    }

    #[test]
    fn player_blocks_everyone_else() {
        let subject = slime("slime0", 100.0, 100.0);
        let player = Some(RectF::new(125.0, 100.0, 10.0, 10.0));
        let view = CollisionView::new(testing::VIEWPORT, &[], &[], player);
        assert!(!view.is_clear(&subject.actor, Vec2::new(6.0, 0.0)));
        assert!(view.is_clear(&subject.actor, Vec2::new(5.0, 0.0)));
    }
}
