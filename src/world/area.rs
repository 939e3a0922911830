//! One room: scenery, an enemy roster, trigger boxes, and the area menu.
//!
//! Actors only queue events while they are updated. Once the player and
//! every enemy have moved, the area drains the queues and feeds them to its
//! trigger boxes, so trigger actions never see a roster mid-iteration.
//! Actions that leave the area are handed back to the session as
//! [`AreaRequest`]s.

use bevy::log::{debug, info, warn};
use bevy::math::Vec2;

use super::collision::CollisionView;
use super::data::{DataRegistry, MusicDef};
use super::error::DataLoadError;
use super::scenery::{Scenery, Structure, Tile};
use super::session::SessionFlags;
use super::triggers::{EntityKind, SpawnSpec, TriggerAction, TriggerBox, TriggerGuard};
use crate::combat::Actor;
use crate::core::{ActorEvent, InputSnapshot, Notice, RectF};
use crate::enemies::Enemy;
use crate::player::{Player, PlayerFrame};
use crate::rendering::Canvas;
use crate::ui::OverlayMenu;

/// Something only the session can carry out.
#[derive(Debug, Clone, PartialEq)]
pub enum AreaRequest {
    /// Move the player to `position` in area `area`.
    Transition { area: String, position: Vec2 },
    /// Throw everything away and start over.
    NewGame,
}

/// Every enemy is dead or within one unit of where it spawned.
pub fn room_cleared(enemies: &[Enemy]) -> bool {
    enemies
        .iter()
        .all(|enemy| enemy.actor.is_dead() || enemy.is_home())
}

fn guard_allows(guard: TriggerGuard, enemies: &[Enemy]) -> bool {
    match guard {
        TriggerGuard::Always => true,
        TriggerGuard::RoomCleared => room_cleared(enemies),
    }
}

#[derive(Debug, Clone)]
pub struct Area {
    id: String,
    instance: u64,
    menu: OverlayMenu,
    paused: bool,
    scenery: Vec<Scenery>,
    enemies: Vec<Enemy>,
    triggers: Vec<TriggerBox>,
    music: Option<MusicDef>,
    viewport: RectF,
}

impl Area {
    /// Build area `id` around `player`. Fails if any referenced record is
    /// missing; nothing is kept from a failed load.
    pub fn load(
        id: &str,
        instance: u64,
        registry: &DataRegistry,
        player: &Player,
        viewport: RectF,
    ) -> Result<Self, DataLoadError> {
        let def = registry.area(id)?;

        let mut scenery = Vec::with_capacity(def.tiles.len() + def.structures.len());
        for placement in &def.tiles {
            scenery.push(Scenery::Tile(Tile::load(placement, registry)?));
        }
        for placement in &def.structures {
            scenery.push(Scenery::Structure(Structure::load(placement, registry)?));
        }

        let mut area = Self {
            id: id.to_string(),
            instance,
            menu: OverlayMenu::new(def.menu.clone()),
            paused: false,
            scenery,
            enemies: Vec::new(),
            triggers: Vec::new(),
            music: def.music.clone(),
            viewport,
        };

        for spec in &def.entities {
            area.spawn(spec, false, registry, Some(player.bounds()))?;
        }

        for trigger in &def.triggers {
            let mut trigger = TriggerBox::new(trigger.rect, trigger.action.clone(), trigger.guard);
            trigger.subscribe(player.name());
            area.triggers.push(trigger);
        }

        info!(
            "Built area '{}' (#{}): {} scenery, {} enemies, {} triggers",
            area.id,
            instance,
            area.scenery.len(),
            area.enemies.len(),
            area.triggers.len()
        );
        Ok(area)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Identity of this build of the area; a cached area keeps its number.
    pub fn instance(&self) -> u64 {
        self.instance
    }

    pub fn menu(&self) -> &OverlayMenu {
        &self.menu
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn music(&self) -> Option<&MusicDef> {
        self.music.as_ref()
    }

    pub fn viewport(&self) -> RectF {
        self.viewport
    }

    pub fn scenery(&self) -> &[Scenery] {
        &self.scenery
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    pub fn triggers(&self) -> &[TriggerBox] {
        &self.triggers
    }

    /// Collision view for a subject; pass the player's bounds unless the
    /// subject is the player.
    pub fn collision_view(&self, player: Option<RectF>) -> CollisionView<'_> {
        CollisionView::new(self.viewport, &self.scenery, &self.enemies, player)
    }

    /// Whether `subject` moved by `offset` would be free of collisions.
    pub fn check_collision(&self, subject: &Actor, offset: Vec2, player: &Player) -> bool {
        let player_bounds = (subject.name() != player.name()).then(|| player.bounds());
        self.collision_view(player_bounds).is_clear(subject, offset)
    }

    pub fn room_cleared(&self) -> bool {
        room_cleared(&self.enemies)
    }

    /// Run one tick. Enemies sit still while the area is paused; the player
    /// and the menu always update. `previous` is the input of the tick
    /// before, whichever area it was played in.
    pub fn update(
        &mut self,
        player: &mut Player,
        input: &InputSnapshot,
        previous: &InputSnapshot,
        flags: &mut SessionFlags,
        registry: &DataRegistry,
    ) -> Result<Vec<AreaRequest>, DataLoadError> {
        let mut requests = Vec::new();

        if !self.paused {
            let player_bounds = player.bounds();
            for index in 0..self.enemies.len() {
                let (before, rest) = self.enemies.split_at_mut(index);
                let Some((enemy, after)) = rest.split_first_mut() else {
                    continue;
                };
                let view = CollisionView {
                    viewport: self.viewport,
                    scenery: &self.scenery,
                    enemies: [&*before, &*after],
                    player: Some(player_bounds),
                };
                enemy.update(&mut player.actor, &view);
            }
        }

        let request = player.update(PlayerFrame {
            input,
            previous,
            menu: &mut self.menu,
            paused: &mut self.paused,
            enemies: &mut self.enemies,
            scenery: &self.scenery,
            viewport: self.viewport,
            flags,
            registry,
        });
        requests.extend(request);
        self.menu.update();

        self.deliver_events(player, registry, &mut requests)?;
        Ok(requests)
    }

    /// Drain every actor's outbox, enemies first, and run whatever the
    /// trigger boxes fire.
    fn deliver_events(
        &mut self,
        player: &mut Player,
        registry: &DataRegistry,
        requests: &mut Vec<AreaRequest>,
    ) -> Result<(), DataLoadError> {
        let mut notices = Vec::new();
        for actor in self
            .enemies
            .iter_mut()
            .map(|enemy| &mut enemy.actor)
            .chain(std::iter::once(&mut player.actor))
        {
            let name = actor.name().to_string();
            notices.extend(actor.drain_events().into_iter().map(|event| Notice {
                actor: name.clone(),
                event,
            }));
        }

        for notice in notices {
            if notice.event == ActorEvent::Died {
                for trigger in &mut self.triggers {
                    trigger.detach(&notice.actor);
                }
                continue;
            }
            let Some(projected) = notice.event.projected_bounds() else {
                continue;
            };

            let enemies = &self.enemies;
            let fired: Vec<TriggerAction> = self
                .triggers
                .iter_mut()
                .filter_map(|trigger| {
                    trigger.observe(&notice.actor, projected, |guard| guard_allows(guard, enemies))
                })
                .collect();

            for action in fired {
                self.run_action(action, player, registry, requests)?;
            }
        }
        Ok(())
    }

    fn run_action(
        &mut self,
        action: TriggerAction,
        player: &Player,
        registry: &DataRegistry,
        requests: &mut Vec<AreaRequest>,
    ) -> Result<(), DataLoadError> {
        debug!("Area '{}': trigger fired: {:?}", self.id, action);
        match action {
            TriggerAction::AdvanceArea { area, position } => {
                if self.room_cleared() {
                    requests.push(AreaRequest::Transition { area, position });
                } else {
                    debug!("Exit to '{}' held: room not cleared", area);
                }
            }
            TriggerAction::SpawnEntity(spec) => {
                self.spawn(&spec, true, registry, Some(player.bounds()))?;
            }
        }
        Ok(())
    }

    /// Spawn an enemy from `spec` unless it would overlap something.
    ///
    /// The new enemy is named after the prefix plus the number of enemies
    /// already sharing that prefix and kind. With `capped` set, nothing
    /// spawns once that number reaches `spec.max`. Returns whether an enemy
    /// was added.
    pub fn spawn(
        &mut self,
        spec: &SpawnSpec,
        capped: bool,
        registry: &DataRegistry,
        player: Option<RectF>,
    ) -> Result<bool, DataLoadError> {
        if spec.kind != EntityKind::Enemy {
            warn!(
                "Area '{}': cannot spawn {:?} '{}', only enemies are supported",
                self.id, spec.kind, spec.entity
            );
            return Ok(false);
        }

        let count = self
            .enemies
            .iter()
            .filter(|enemy| {
                enemy.actor.name().contains(spec.name.as_str()) && enemy.actor.kind_id() == spec.entity
            })
            .count();
        if capped && count >= spec.max {
            debug!("Area '{}': '{}' already at {} of {}", self.id, spec.name, count, spec.max);
            return Ok(false);
        }

        let name = format!("{}{}", spec.name, count);
        let enemy = Enemy::spawn(
            name,
            &spec.entity,
            spec.position,
            spec.direction,
            spec.limit,
            registry,
        )?;
        if !self.collision_view(player).is_clear(&enemy.actor, Vec2::ZERO) {
            debug!("Area '{}': spawn of '{}' blocked", self.id, enemy.actor.name());
            return Ok(false);
        }

        info!("Area '{}': spawned '{}'", self.id, enemy.actor.name());
        self.enemies.push(enemy);
        Ok(true)
    }

    pub fn unload_triggers(&mut self, persist: bool) {
        for trigger in &mut self.triggers {
            trigger.unload(persist);
        }
    }

    pub fn reload_triggers(&mut self, restore: bool) {
        for trigger in &mut self.triggers {
            trigger.load(restore);
        }
    }

    /// Paint order: scenery, enemies, debug trigger boxes, the player, then
    /// the area menu.
    pub fn draw(&self, canvas: &mut dyn Canvas, player: &Player, debug: bool) {
        for element in &self.scenery {
            element.draw(canvas);
        }
        for enemy in &self.enemies {
            enemy.actor.draw(canvas, debug);
        }
        if debug {
            for trigger in &self.triggers {
                trigger.draw_debug(canvas);
            }
        }
        player.draw(canvas, self.viewport, debug);
        self.menu.draw(canvas, self.viewport);
    }
}
