//! The player character.

use bevy::math::Vec2;

use crate::combat::Actor;
use crate::core::RectF;
use crate::inventory::StorageContainer;
use crate::rendering::Canvas;
use crate::ui::{draw_container, OverlayMenu};
use crate::world::{DataLoadError, DataRegistry};

/// Ticks the finished death animation is held before a new game starts.
pub const DEATH_HOLD_TICKS: u32 = 120;

/// The user-controlled actor plus its inventory and inventory menu.
#[derive(Debug, Clone)]
pub struct Player {
    pub actor: Actor,
    area: String,
    pub inventory: StorageContainer,
    pub(crate) inventory_menu: OverlayMenu,
    pub(crate) death_cooldown: u32,
}

impl Player {
    /// Build player `name` from record `player_id`, standing in `area`.
    pub fn load(
        name: impl Into<String>,
        player_id: &str,
        area: impl Into<String>,
        position: Vec2,
        registry: &DataRegistry,
    ) -> Result<Self, DataLoadError> {
        let def = registry.player(player_id)?;
        let actor = Actor::load(name, player_id, position, def, registry)?;
        Ok(Self {
            actor,
            area: area.into(),
            inventory: StorageContainer::new(def.inventory_size),
            inventory_menu: OverlayMenu::new("inventory"),
            death_cooldown: 0,
        })
    }

    pub fn name(&self) -> &str {
        self.actor.name()
    }

    /// Id of the area the player is in.
    pub fn area(&self) -> &str {
        &self.area
    }

    pub fn set_area(&mut self, area: impl Into<String>) {
        self.area = area.into();
    }

    pub fn position(&self) -> Vec2 {
        self.actor.position()
    }

    pub fn bounds(&self) -> RectF {
        self.actor.bounds()
    }

    pub fn inventory_menu(&self) -> &OverlayMenu {
        &self.inventory_menu
    }

    pub fn death_cooldown(&self) -> u32 {
        self.death_cooldown
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, viewport: RectF, debug: bool) {
        self.actor.draw(canvas, debug);
        if self.inventory_menu.is_showing() {
            self.inventory_menu.draw(canvas, viewport);
            draw_container(canvas, &self.inventory, viewport);
        }
    }
}
