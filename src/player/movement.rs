//! Keyboard and mouse control of the player.
//!
//! Controls:
//! - WASD: Move
//! - Left Shift: Sprint
//! - Left mouse: Attack
//! - E: Inventory
//! - Escape: Menu / pause
//! - F1: Debug drawing, Space then walks through walls

use bevy::input::keyboard::KeyCode;
use bevy::log::{debug, warn};
use bevy::math::Vec2;

use super::components::{Player, DEATH_HOLD_TICKS};
use crate::animation::SpriteDirection;
use crate::core::{InputSnapshot, RectF};
use crate::enemies::Enemy;
use crate::inventory::Item;
use crate::ui::OverlayMenu;
use crate::world::{AreaRequest, CollisionView, DataRegistry, Scenery, SessionFlags};

/// Walking speed in units per tick.
pub const WALK_SPEED: f32 = 2.0;
pub const SPRINT_MULTIPLIER: f32 = 3.0;

/// Item granted by the debug pickup key.
const PICKUP_ITEM: u32 = 1;

const MOVE_KEYS: [(KeyCode, SpriteDirection); 4] = [
    (KeyCode::KeyW, SpriteDirection::North),
    (KeyCode::KeyA, SpriteDirection::West),
    (KeyCode::KeyS, SpriteDirection::South),
    (KeyCode::KeyD, SpriteDirection::East),
];

/// Everything of the surrounding area the player reads or changes in a tick.
pub struct PlayerFrame<'a> {
    pub input: &'a InputSnapshot,
    pub previous: &'a InputSnapshot,
    pub menu: &'a mut OverlayMenu,
    pub paused: &'a mut bool,
    pub enemies: &'a mut [Enemy],
    pub scenery: &'a [Scenery],
    pub viewport: RectF,
    pub flags: &'a mut SessionFlags,
    pub registry: &'a DataRegistry,
}

impl Player {
    /// Apply one tick of input. Returns a new-game request once the player
    /// has been dead long enough.
    pub fn update(&mut self, frame: PlayerFrame) -> Option<AreaRequest> {
        let PlayerFrame {
            input,
            previous,
            menu,
            paused,
            enemies,
            scenery,
            viewport,
            flags,
            registry,
        } = frame;

        if input.just_released(previous, KeyCode::Escape) {
            *paused = menu.toggle();
            self.inventory_menu.set_showing(false);
        }
        if input.just_released(previous, KeyCode::KeyE) && !menu.is_showing() {
            let open = self.inventory_menu.toggle();
            *paused = open || menu.is_showing();
        }
        flags.mouse_visible = menu.is_showing() || self.inventory_menu.is_showing();

        if !self.actor.is_dead() && !*paused {
            if input.mouse_left && !self.actor.is_attacking() {
                for enemy in enemies.iter_mut() {
                    self.actor.try_attack(&mut enemy.actor);
                }
                self.actor.begin_attack();
            }

            if input.just_pressed(previous, KeyCode::F1) {
                flags.debug = !flags.debug;
            }

            let mut direction = Vec2::ZERO;
            for (key, facing) in MOVE_KEYS {
                if input.pressed(key) {
                    self.actor.turn(facing);
                    direction += facing.unit();
                }
            }
            let mut step = direction.normalize_or_zero() * WALK_SPEED;

            if input.just_pressed(previous, KeyCode::KeyF) {
                self.pick_up(PICKUP_ITEM, registry);
            }

            if input.pressed(KeyCode::ShiftLeft) {
                step *= SPRINT_MULTIPLIER;
            }

            if step != Vec2::ZERO {
                let view = CollisionView::new(viewport, scenery, enemies, None);
                let noclip = flags.debug && input.pressed(KeyCode::Space);
                if view.is_clear(&self.actor, step) || noclip {
                    self.actor.move_by(step);
                }
            }
            let position = self.actor.position();
            self.actor.set_position(position.trunc());
        }

        let mut request = None;
        if self.actor.sprite().death_finished() {
            if self.death_cooldown >= DEATH_HOLD_TICKS {
                request = Some(AreaRequest::NewGame);
            } else {
                self.death_cooldown += 1;
            }
        }

        self.actor.update();
        self.inventory_menu.update();
        request
    }

    fn pick_up(&mut self, id: u32, registry: &DataRegistry) {
        match registry.item(id) {
            Ok(def) => {
                if let Some(rest) = self.inventory.add(Item::new(id, def, 1)) {
                    debug!("Inventory full, dropped {} x{}", rest.name, rest.count());
                }
            }
            Err(e) => warn!("Pickup failed: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::SpriteState;
    use crate::testing;

    /// Owns what a `PlayerFrame` borrows.
    struct Harness {
        menu: OverlayMenu,
        paused: bool,
        enemies: Vec<Enemy>,
        scenery: Vec<Scenery>,
        flags: SessionFlags,
        registry: DataRegistry,
        previous: InputSnapshot,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                menu: OverlayMenu::new("main_menu"),
                paused: false,
                enemies: Vec::new(),
                scenery: Vec::new(),
                flags: SessionFlags::default(),
                registry: testing::registry(),
                previous: InputSnapshot::empty(),
            }
        }

        fn tick(&mut self, player: &mut Player, input: InputSnapshot) -> Option<AreaRequest> {
            let request = player.update(PlayerFrame {
                input: &input,
                previous: &self.previous,
                menu: &mut self.menu,
                paused: &mut self.paused,
                enemies: &mut self.enemies,
                scenery: &self.scenery,
                viewport: testing::VIEWPORT,
                flags: &mut self.flags,
                registry: &self.registry,
            });
            self.previous = input;
            request
        }
    }

    fn keys(keys: &[KeyCode]) -> InputSnapshot {
        InputSnapshot::from_keys(keys.iter().copied())
    }

    #[test]
    fn diagonal_speed_is_normalised_and_truncated() {
        let mut harness = Harness::new();
        let mut player = testing::player(Vec2::new(300.0, 300.0));

        harness.tick(&mut player, keys(&[KeyCode::KeyW, KeyCode::KeyD]));
        // 2 / sqrt(2) per axis, truncated
        assert_eq!(player.position(), Vec2::new(301.0, 298.0));
        assert_eq!(player.actor.direction(), SpriteDirection::East);
    }

    #[test]
    fn shift_sprints() {
        let mut harness = Harness::new();
        let mut player = testing::player(Vec2::new(300.0, 300.0));

        harness.tick(&mut player, keys(&[KeyCode::KeyD, KeyCode::ShiftLeft]));
        assert_eq!(player.position(), Vec2::new(306.0, 300.0));
    }

    #[test]
    fn walls_block_unless_noclipping() {
        let mut harness = Harness::new();
        harness.scenery.push(testing::wall(RectF::new(317.0, 290.0, 10.0, 50.0)));
        let mut player = testing::player(Vec2::new(300.0, 300.0));

        harness.tick(&mut player, keys(&[KeyCode::KeyD]));
        assert_eq!(player.position(), Vec2::new(300.0, 300.0));
        assert_eq!(player.actor.direction(), SpriteDirection::East);

        harness.tick(&mut player, keys(&[KeyCode::F1]));
        assert!(harness.flags.debug);
        harness.tick(&mut player, keys(&[KeyCode::KeyD, KeyCode::Space]));
        assert_eq!(player.position(), Vec2::new(302.0, 300.0));
    }

    #[test]
    fn escape_release_pauses_and_shows_cursor() {
        let mut harness = Harness::new();
        let mut player = testing::player(Vec2::new(300.0, 300.0));

        harness.tick(&mut player, keys(&[KeyCode::Escape]));
        assert!(!harness.paused);
        harness.tick(&mut player, InputSnapshot::empty());
        assert!(harness.paused);
        assert!(harness.menu.is_showing());
        assert!(harness.flags.mouse_visible);

        harness.tick(&mut player, keys(&[KeyCode::KeyD]));
        assert_eq!(player.position(), Vec2::new(300.0, 300.0));

        // E is ignored while the menu is up
        harness.tick(&mut player, keys(&[KeyCode::KeyE]));
        harness.tick(&mut player, InputSnapshot::empty());
        assert!(!player.inventory_menu().is_showing());
    }

    #[test]
    fn inventory_toggles_on_e_release() {
        let mut harness = Harness::new();
        let mut player = testing::player(Vec2::new(300.0, 300.0));

        harness.tick(&mut player, keys(&[KeyCode::KeyE]));
        harness.tick(&mut player, InputSnapshot::empty());
        assert!(player.inventory_menu().is_showing());
        assert!(harness.paused);

        // escape closes both and leaves the area menu up
        harness.tick(&mut player, keys(&[KeyCode::Escape]));
        harness.tick(&mut player, InputSnapshot::empty());
        assert!(!player.inventory_menu().is_showing());
        assert!(harness.menu.is_showing());
    }

    #[test]
    fn pickup_key_adds_one_item_per_press() {
        let mut harness = Harness::new();
        let mut player = testing::player(Vec2::new(300.0, 300.0));

        harness.tick(&mut player, keys(&[KeyCode::KeyF]));
        harness.tick(&mut player, keys(&[KeyCode::KeyF]));
        harness.tick(&mut player, InputSnapshot::empty());
        harness.tick(&mut player, keys(&[KeyCode::KeyF]));
        assert_eq!(player.inventory.count_of(PICKUP_ITEM), 2);
    }

    #[test]
    fn left_mouse_hits_enemies_in_reach_once_per_swing() {
        let mut harness = Harness::new();
        harness.enemies.push(
            Enemy::spawn(
                "slime0",
                "slime",
                Vec2::new(316.5, 300.0),
                SpriteDirection::West,
                testing::VIEWPORT,
                &harness.registry,
            )
            .unwrap(),
        );
        let mut player = testing::player(Vec2::new(300.0, 300.0));

        let click = InputSnapshot::empty().with_mouse_left(true);
        harness.tick(&mut player, click.clone());
        assert_eq!(harness.enemies[0].actor.health(), 10.0 - player.actor.strength());
        assert_eq!(player.actor.state(), SpriteState::Attack);

        harness.tick(&mut player, click);
        assert_eq!(harness.enemies[0].actor.health(), 10.0 - player.actor.strength());
    }

    #[test]
    fn death_requests_a_new_game_after_the_hold() {
        let mut harness = Harness::new();
        let mut player = testing::player(Vec2::new(300.0, 300.0));
        player.actor.damage(1000.0);

        let mut first_request = None;
        for tick in 0..400 {
            if harness.tick(&mut player, keys(&[KeyCode::KeyD])).is_some() {
                first_request = Some(tick);
                break;
            }
        }

        let tick = first_request.expect("no new game requested");
        assert!(tick > DEATH_HOLD_TICKS as usize);
        assert_eq!(player.death_cooldown(), DEATH_HOLD_TICKS);
        assert_eq!(player.position(), Vec2::new(300.0, 300.0));
    }
}
