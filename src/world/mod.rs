//! World module - data records, areas, collision, triggers, and the session.

mod area;
mod collision;
mod data;
mod error;
mod plugin;
mod scenery;
mod session;
mod triggers;

pub use area::{room_cleared, Area, AreaRequest};
pub use collision::CollisionView;
pub use data::{
    AreaDefinition, CharacterDefinition, DataRegistry, EntityDefinition, HealthBarDef,
    ItemDefinition, MusicDef, SheetDefinition, StructureDefinition, StructureElement,
    StructurePlacement, TileDefinition, TilePlacement, TriggerDef,
};
pub use error::DataLoadError;
pub use plugin::{ActiveSession, WorldPlugin};
pub use scenery::{Scenery, Structure, Tile};
pub use session::{Session, SessionFlags};
pub use triggers::{EntityKind, SpawnSpec, TriggerAction, TriggerBox, TriggerGuard};
