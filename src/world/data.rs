//! Data records and RON loading.
//!
//! Every record kind lives in its own directory under the data root, one
//! file per record, and the file stem is the record id. Sheets and items
//! are small tables kept in a single file each.

use bevy::prelude::*;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fs;
use std::hash::Hash;
use std::path::Path;

use super::error::DataLoadError;
use super::triggers::{SpawnSpec, TriggerAction, TriggerGuard};
use crate::animation::{FrameTableDef, SpriteDirection};
use crate::core::RectF;

/// Reads a `(x, y)` tuple into a `Vec2`.
pub(crate) fn de_vec2<'de, D>(deserializer: D) -> Result<Vec2, D::Error>
where
    D: Deserializer<'de>,
{
    let (x, y) = <(f32, f32)>::deserialize(deserializer)?;
    Ok(Vec2::new(x, y))
}

// === Areas ===

/// Background track for an area.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MusicDef {
    pub track: String,
    #[serde(default)]
    pub looped: bool,
}

/// A tile stretched over a box in an area.
#[derive(Debug, Clone, Deserialize)]
pub struct TilePlacement {
    pub tile: String,
    #[serde(deserialize_with = "de_vec2")]
    pub position: Vec2,
    #[serde(deserialize_with = "de_vec2")]
    pub size: Vec2,
}

/// A structure placed at a position in an area.
#[derive(Debug, Clone, Deserialize)]
pub struct StructurePlacement {
    pub structure: String,
    #[serde(deserialize_with = "de_vec2")]
    pub position: Vec2,
}

/// A trigger box watching the player.
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerDef {
    pub rect: RectF,
    #[serde(default)]
    pub guard: TriggerGuard,
    pub action: TriggerAction,
}

/// One room: its scenery, roster, and triggers.
#[derive(Debug, Clone, Deserialize)]
pub struct AreaDefinition {
    pub menu: String,
    #[serde(default)]
    pub music: Option<MusicDef>,
    #[serde(default)]
    pub tiles: Vec<TilePlacement>,
    #[serde(default)]
    pub structures: Vec<StructurePlacement>,
    /// Actors spawned when the area is first built.
    #[serde(default)]
    pub entities: Vec<SpawnSpec>,
    #[serde(default)]
    pub triggers: Vec<TriggerDef>,
}

// === Scenery ===

/// Source rectangle a tile repeats.
#[derive(Debug, Clone, Deserialize)]
pub struct TileDefinition {
    pub sheet: String,
    pub source: RectF,
}

/// One drawn piece of a structure, relative to the structure's position.
#[derive(Debug, Clone, Deserialize)]
pub struct StructureElement {
    pub sheet: String,
    pub source: RectF,
    #[serde(deserialize_with = "de_vec2")]
    pub position: Vec2,
}

/// Drawn elements plus collision boxes, both relative to the structure.
#[derive(Debug, Clone, Deserialize)]
pub struct StructureDefinition {
    pub elements: Vec<StructureElement>,
    #[serde(default)]
    pub bounds: Vec<RectF>,
}

// === Actors ===

/// Shared animation data for a body type.
#[derive(Debug, Clone, Deserialize)]
pub struct CharacterDefinition {
    /// Frames advanced per tick at rest.
    pub speed: f32,
    /// Size of one frame on the sheet.
    #[serde(deserialize_with = "de_vec2")]
    pub size: Vec2,
    #[serde(default)]
    pub direction: SpriteDirection,
    pub frames: FrameTableDef,
}

/// Colours and placement of an actor's health bar.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthBarDef {
    pub front: (u8, u8, u8),
    pub back: (u8, u8, u8),
    /// Gap between the bar and the actor's top edge.
    pub buffer: f32,
    pub size: (f32, f32),
}

/// Stats and looks of an enemy or player kind.
#[derive(Debug, Clone, Deserialize)]
pub struct EntityDefinition {
    /// Character record the sprite is built from.
    pub base: String,
    pub max_health: f32,
    pub current_health: f32,
    pub strength: f32,
    /// Health regained per second.
    #[serde(default)]
    pub regen: f32,
    /// Offset from the sprite's corner to the collision box.
    #[serde(deserialize_with = "de_vec2")]
    pub offset: Vec2,
    #[serde(deserialize_with = "de_vec2")]
    pub size: Vec2,
    #[serde(default)]
    pub sheets: Vec<String>,
    #[serde(default)]
    pub sheet_lists: Vec<String>,
    #[serde(default)]
    pub health_bar: Option<HealthBarDef>,
    /// Entries replacing the character's frame table.
    #[serde(default)]
    pub frames: FrameTableDef,
    #[serde(default)]
    pub inventory_size: usize,
}

// === Tables ===

/// Image backing a sheet id, optionally grouped into a named list.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetDefinition {
    pub path: String,
    #[serde(default)]
    pub list: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemDefinition {
    pub name: String,
    #[serde(default)]
    pub max_stack: Option<u32>,
    #[serde(default)]
    pub equip_slot: u32,
}

/// Every data record, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct DataRegistry {
    areas: HashMap<String, AreaDefinition>,
    characters: HashMap<String, CharacterDefinition>,
    enemies: HashMap<String, EntityDefinition>,
    players: HashMap<String, EntityDefinition>,
    structures: HashMap<String, StructureDefinition>,
    tiles: HashMap<String, TileDefinition>,
    sheets: HashMap<String, SheetDefinition>,
    items: HashMap<u32, ItemDefinition>,
}

impl DataRegistry {
    /// Load every record under `dir`. Any unreadable or malformed file fails
    /// the whole load.
    pub fn load_from_dir(dir: &Path) -> Result<Self, DataLoadError> {
        if !dir.exists() {
            return Err(DataLoadError::FileNotFound(dir.display().to_string()));
        }

        let registry = Self {
            areas: load_records(&dir.join("areas"))?,
            characters: load_records(&dir.join("characters"))?,
            enemies: load_records(&dir.join("enemies"))?,
            players: load_records(&dir.join("players"))?,
            structures: load_records(&dir.join("structures"))?,
            tiles: load_records(&dir.join("tiles"))?,
            sheets: load_table(&dir.join("sheets.ron"))?,
            items: load_table(&dir.join("items.ron"))?,
        };

        info!(
            "Loaded data from {:?}: {} areas, {} characters, {} enemies, {} players, {} structures, {} tiles, {} sheets, {} items",
            dir,
            registry.areas.len(),
            registry.characters.len(),
            registry.enemies.len(),
            registry.players.len(),
            registry.structures.len(),
            registry.tiles.len(),
            registry.sheets.len(),
            registry.items.len()
        );
        Ok(registry)
    }

    pub fn area(&self, id: &str) -> Result<&AreaDefinition, DataLoadError> {
        lookup(&self.areas, "area", id)
    }

    pub fn character(&self, id: &str) -> Result<&CharacterDefinition, DataLoadError> {
        lookup(&self.characters, "character", id)
    }

    pub fn enemy(&self, id: &str) -> Result<&EntityDefinition, DataLoadError> {
        lookup(&self.enemies, "enemy", id)
    }

    pub fn player(&self, id: &str) -> Result<&EntityDefinition, DataLoadError> {
        lookup(&self.players, "player", id)
    }

    pub fn structure(&self, id: &str) -> Result<&StructureDefinition, DataLoadError> {
        lookup(&self.structures, "structure", id)
    }

    pub fn tile(&self, id: &str) -> Result<&TileDefinition, DataLoadError> {
        lookup(&self.tiles, "tile", id)
    }

    pub fn sheet(&self, id: &str) -> Result<&SheetDefinition, DataLoadError> {
        lookup(&self.sheets, "sheet", id)
    }

    pub fn item(&self, id: u32) -> Result<&ItemDefinition, DataLoadError> {
        self.items.get(&id).ok_or_else(|| DataLoadError::UnknownRecord {
            kind: "item",
            id: id.to_string(),
        })
    }

    /// Sheet ids grouped under `list`, in id order.
    pub fn sheet_list(&self, list: &str) -> Vec<String> {
        let mut ids: Vec<String> = self
            .sheets
            .iter()
            .filter(|(_, def)| def.list.as_deref() == Some(list))
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }

    /// Sheets an actor draws: its own sheets, then every listed group.
    pub fn resolve_sheets(&self, def: &EntityDefinition) -> Result<Vec<String>, DataLoadError> {
        let mut sheets = Vec::new();
        for id in &def.sheets {
            self.sheet(id)?;
            sheets.push(id.clone());
        }
        for list in &def.sheet_lists {
            let members = self.sheet_list(list);
            if members.is_empty() {
                return Err(DataLoadError::UnknownRecord {
                    kind: "sheet list",
                    id: list.clone(),
                });
            }
            sheets.extend(members);
        }
        Ok(sheets)
    }

    pub fn insert_area(&mut self, id: impl Into<String>, def: AreaDefinition) {
        self.areas.insert(id.into(), def);
    }

    pub fn insert_character(&mut self, id: impl Into<String>, def: CharacterDefinition) {
        self.characters.insert(id.into(), def);
    }

    pub fn insert_enemy(&mut self, id: impl Into<String>, def: EntityDefinition) {
        self.enemies.insert(id.into(), def);
    }

    pub fn insert_player(&mut self, id: impl Into<String>, def: EntityDefinition) {
        self.players.insert(id.into(), def);
    }

    pub fn insert_structure(&mut self, id: impl Into<String>, def: StructureDefinition) {
        self.structures.insert(id.into(), def);
    }

    pub fn insert_tile(&mut self, id: impl Into<String>, def: TileDefinition) {
        self.tiles.insert(id.into(), def);
    }

    pub fn insert_sheet(&mut self, id: impl Into<String>, def: SheetDefinition) {
        self.sheets.insert(id.into(), def);
    }

    pub fn insert_item(&mut self, id: u32, def: ItemDefinition) {
        self.items.insert(id, def);
    }
}

fn lookup<'a, T>(
    records: &'a HashMap<String, T>,
    kind: &'static str,
    id: &str,
) -> Result<&'a T, DataLoadError> {
    records.get(id).ok_or_else(|| DataLoadError::UnknownRecord {
        kind,
        id: id.to_string(),
    })
}

fn read_ron<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    if !path.exists() {
        return Err(DataLoadError::FileNotFound(path.display().to_string()));
    }
    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: path.display().to_string(),
        details: e.to_string(),
    })?;
    ron::from_str(&contents).map_err(|e| DataLoadError::ParseError {
        path: path.display().to_string(),
        details: e.to_string(),
    })
}

/// Load every `.ron` file in `dir`, keyed by file stem.
fn load_records<T: DeserializeOwned>(dir: &Path) -> Result<HashMap<String, T>, DataLoadError> {
    let mut records = HashMap::new();

    if !dir.exists() {
        warn!("Record directory not found: {:?}", dir);
        return Ok(records);
    }

    let entries = fs::read_dir(dir).map_err(|e| DataLoadError::ReadError {
        path: dir.display().to_string(),
        details: e.to_string(),
    })?;

    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "ron") {
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                warn!("Skipping record with unreadable name: {:?}", path);
                continue;
            };
            let record = read_ron(&path)?;
            debug!("Loaded record '{}' from {:?}", id, path);
            records.insert(id.to_string(), record);
        }
    }

    info!("Loaded {} record(s) from {:?}", records.len(), dir);
    Ok(records)
}

/// Load a single-file table, or an empty one if the file is absent.
fn load_table<K, T>(path: &Path) -> Result<HashMap<K, T>, DataLoadError>
where
    K: DeserializeOwned + Eq + Hash,
    T: DeserializeOwned,
{
    if !path.exists() {
        warn!("Table not found: {:?}", path);
        return Ok(HashMap::new());
    }
    read_ron(path)
}
