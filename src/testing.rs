//! Shared fixtures for unit tests: an in-memory registry and small builders.

use bevy::math::Vec2;

use crate::animation::{FrameTable, FrameTableDef};
use crate::combat::Actor;
use crate::core::RectF;
use crate::player::Player;
use crate::world::{
    AreaDefinition, CharacterDefinition, DataRegistry, EntityDefinition, ItemDefinition, Scenery,
    SheetDefinition, Structure, StructureDefinition, TileDefinition,
};

pub const VIEWPORT: RectF = RectF::new(0.0, 0.0, 800.0, 600.0);

const FRAMES: &str = "(
    states: { Idle: (1, 0), Walk: (8, 8), Attack: (4, 4), Die: (6, 20) },
    directions: { North: 0, West: 1, South: 2, East: 3 },
)";

const BLOB: &str = r#"(speed: 0.25, size: (32.0, 32.0), direction: South, frames: (
    states: { Idle: (1, 0), Walk: (8, 8), Attack: (4, 4), Die: (6, 20) },
    directions: { North: 0, West: 1, South: 2, East: 3 },
))"#;

const SLIME: &str = r#"(
    base: "blob",
    max_health: 10.0,
    current_health: 10.0,
    strength: 2.0,
    regen: 60.0,
    offset: (6.0, 16.0),
    size: (20.0, 14.0),
    sheets: ["slime"],
    health_bar: Some((front: (200, 30, 30), back: (40, 40, 40), buffer: 2.0, size: (20.0, 3.0))),
)"#;

const PLAYER: &str = r#"(
    base: "blob",
    max_health: 20.0,
    current_health: 20.0,
    strength: 5.0,
    offset: (8.0, 8.0),
    size: (16.0, 24.0),
    sheets: ["body"],
    inventory_size: 10,
)"#;

const HOUSE_INSIDE: &str = r#"(
    menu: "main_menu",
    music: Some((track: "house", looped: true)),
    tiles: [(tile: "floor", position: (0.0, 0.0), size: (800.0, 600.0))],
    structures: [(structure: "pillar", position: (600.0, 300.0))],
    entities: [(
        entity: "slime",
        name: "slime",
        kind: Enemy,
        direction: South,
        position: (100.0, 100.0),
        limit: (0.0, 0.0, 400.0, 400.0),
    )],
    triggers: [(
        rect: (0.0, 590.0, 800.0, 10.0),
        guard: RoomCleared,
        action: AdvanceArea(area: "field", position: (400.0, 40.0)),
    )],
)"#;

const FIELD: &str = r#"(
    menu: "main_menu",
    music: Some((track: "field", looped: true)),
    triggers: [
        (
            rect: (0.0, 0.0, 800.0, 10.0),
            action: AdvanceArea(area: "house_inside", position: (400.0, 540.0)),
        ),
        (
            rect: (300.0, 300.0, 40.0, 40.0),
            action: SpawnEntity((
                entity: "slime",
                name: "fieldslime",
                kind: Enemy,
                max: 2,
                direction: West,
                position: (500.0, 200.0),
                limit: (0.0, 0.0, 800.0, 600.0),
            )),
        ),
    ],
)"#;

pub fn frame_table() -> FrameTable {
    let def: FrameTableDef = ron::from_str(FRAMES).unwrap();
    FrameTable::build("blob", &def).unwrap()
}

fn sheet(path: &str) -> SheetDefinition {
    SheetDefinition {
        path: path.to_string(),
        list: None,
    }
}

/// Registry with a slime enemy, the default player, and two connected
/// areas: "house_inside" (one slime, exit at the bottom edge) and "field"
/// (exit at the top edge, slime spawner in the middle).
pub fn registry() -> DataRegistry {
    let mut registry = DataRegistry::default();
    registry.insert_character("blob", ron::from_str::<CharacterDefinition>(BLOB).unwrap());
    registry.insert_enemy("slime", ron::from_str::<EntityDefinition>(SLIME).unwrap());
    registry.insert_player("defaultPlayer", ron::from_str::<EntityDefinition>(PLAYER).unwrap());
    for id in ["slime", "body", "walls", "floor"] {
        registry.insert_sheet(id, sheet(&format!("sheets/{id}.png")));
    }
    registry.insert_tile(
        "floor",
        TileDefinition {
            sheet: "floor".to_string(),
            source: RectF::new(0.0, 0.0, 32.0, 32.0),
        },
    );
    registry.insert_structure(
        "pillar",
        ron::from_str::<StructureDefinition>(
            r#"(elements: [(sheet: "walls", source: (0.0, 0.0, 32.0, 64.0), position: (0.0, 0.0))],
                bounds: [(0.0, 32.0, 32.0, 32.0)])"#,
        )
        .unwrap(),
    );
    registry.insert_item(
        1,
        ItemDefinition {
            name: "Apple".to_string(),
            max_stack: Some(10),
            equip_slot: 0,
        },
    );
    registry.insert_area("house_inside", ron::from_str::<AreaDefinition>(HOUSE_INSIDE).unwrap());
    registry.insert_area("field", ron::from_str::<AreaDefinition>(FIELD).unwrap());
    registry
}

/// Invisible solid block covering `rect`.
pub fn wall(rect: RectF) -> Scenery {
    Scenery::Structure(Structure::new(
        "wall",
        rect.location(),
        Vec::new(),
        &[RectF::new(0.0, 0.0, rect.width, rect.height)],
    ))
}

/// Bare player actor with its collision box at `position`.
pub fn player_actor(position: Vec2) -> Actor {
    let registry = registry();
    let def = registry.player("defaultPlayer").unwrap();
    Actor::load("Sean", "defaultPlayer", position, def, &registry).unwrap()
}

pub fn player(position: Vec2) -> Player {
    Player::load("Sean", "defaultPlayer", "house_inside", position, &registry()).unwrap()
}
