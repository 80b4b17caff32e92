//! Save/Load functionality for persisting a round
//!
//! Uses bincode for a compact binary snapshot. Components are stored per
//! entity as optionals and reattached on load.

use std::collections::HashSet;
use std::io::{Read, Write};

use hecs::World;
use island_logic::difficulty::Difficulty;
use island_logic::items::{ItemId, ItemTable};
use island_logic::zones::Zone;
use serde::{Deserialize, Serialize};

use crate::components::*;
use crate::engine::{Phase, Timers};
use crate::events::MessageBoard;

/// Version number for save file format (increment when format changes)
pub const SAVE_VERSION: u32 = 2;

/// Serializable snapshot of a round
#[derive(Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    /// Seed every round's RNG is derived from
    pub seed: u64,
    /// Rounds started so far, so the next round continues the sequence
    pub rounds: u64,
    pub phase: Phase,
    pub difficulty: Difficulty,
    pub zone: Zone,
    pub items: ItemTable,
    pub collected: Vec<ItemId>,
    pub messages: MessageBoard,
    pub hud_collapsed: bool,
    pub timers: Timers,
    /// All entities with their components
    pub entities: Vec<SerializableEntity>,
}

/// All possible components for an entity, serialized as optionals
#[derive(Serialize, Deserialize, Default)]
pub struct SerializableEntity {
    // Shared
    pub body: Option<Body>,
    pub velocity: Option<Velocity>,
    pub facing: Option<Facing>,
    pub located: Option<Located>,

    // Actors
    pub player: Option<PlayerState>,
    pub guard: Option<Guard>,
    pub survivor: Option<Survivor>,

    pub bullet: Option<Bullet>,
}

fn serialize_entities(world: &World) -> Vec<SerializableEntity> {
    world
        .iter()
        .map(|entity| SerializableEntity {
            body: entity.get::<&Body>().map(|c| *c),
            velocity: entity.get::<&Velocity>().map(|c| *c),
            facing: entity.get::<&Facing>().map(|c| *c),
            located: entity.get::<&Located>().map(|c| *c),
            player: entity.get::<&PlayerState>().map(|c| (*c).clone()),
            guard: entity.get::<&Guard>().map(|c| (*c).clone()),
            survivor: entity.get::<&Survivor>().map(|c| *c),
            bullet: entity.get::<&Bullet>().map(|c| *c),
        })
        .collect()
}

/// Spawn an entity with all its components
fn spawn_entity(world: &mut World, se: SerializableEntity) {
    let entity = world.spawn(());

    if let Some(c) = se.body {
        let _ = world.insert_one(entity, c);
    }
    if let Some(c) = se.velocity {
        let _ = world.insert_one(entity, c);
    }
    if let Some(c) = se.facing {
        let _ = world.insert_one(entity, c);
    }
    if let Some(c) = se.located {
        let _ = world.insert_one(entity, c);
    }
    if let Some(c) = se.player {
        let _ = world.insert_one(entity, c);
    }
    if let Some(c) = se.guard {
        let _ = world.insert_one(entity, c);
    }
    if let Some(c) = se.survivor {
        let _ = world.insert_one(entity, c);
    }
    if let Some(c) = se.bullet {
        let _ = world.insert_one(entity, c);
    }
}

/// Save a round to a writer
#[allow(clippy::too_many_arguments)]
pub fn save_game<W: Write>(
    writer: W,
    world: &World,
    seed: u64,
    rounds: u64,
    phase: Phase,
    difficulty: Difficulty,
    zone: Zone,
    items: &ItemTable,
    collected: &HashSet<ItemId>,
    messages: &MessageBoard,
    hud_collapsed: bool,
    timers: &Timers,
) -> Result<(), SaveError> {
    let save_data = SaveData {
        version: SAVE_VERSION,
        seed,
        rounds,
        phase,
        difficulty,
        zone,
        items: items.clone(),
        collected: collected.iter().copied().collect(),
        messages: messages.clone(),
        hud_collapsed,
        timers: *timers,
        entities: serialize_entities(world),
    };

    bincode::serialize_into(writer, &save_data)?;
    log::debug!("Saved {} entities", save_data.entities.len());
    Ok(())
}

/// Load a round from a reader
pub fn load_game<R: Read>(reader: R) -> Result<LoadedGame, SaveError> {
    let save_data: SaveData = bincode::deserialize_from(reader)?;

    if save_data.version != SAVE_VERSION {
        log::warn!(
            "Rejected save with version {} (expected {})",
            save_data.version,
            SAVE_VERSION
        );
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save_data.version,
        });
    }

    let mut world = World::new();
    for se in save_data.entities {
        spawn_entity(&mut world, se);
    }

    Ok(LoadedGame {
        world,
        seed: save_data.seed,
        rounds: save_data.rounds,
        phase: save_data.phase,
        difficulty: save_data.difficulty,
        zone: save_data.zone,
        items: save_data.items,
        collected: save_data.collected.into_iter().collect(),
        messages: save_data.messages,
        hud_collapsed: save_data.hud_collapsed,
        timers: save_data.timers,
    })
}

/// Result of loading a round
pub struct LoadedGame {
    pub world: World,
    pub seed: u64,
    pub rounds: u64,
    pub phase: Phase,
    pub difficulty: Difficulty,
    pub zone: Zone,
    pub items: ItemTable,
    pub collected: HashSet<ItemId>,
    pub messages: MessageBoard,
    pub hud_collapsed: bool,
    pub timers: Timers,
}

/// Errors that can occur during save/load
#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Bincode(Box<bincode::ErrorKind>),
    VersionMismatch { expected: u32, found: u32 },
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SaveError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SaveError::Bincode(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::Bincode(e) => write!(f, "Serialization error: {}", e),
            SaveError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Save version mismatch: expected {}, found {}",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for SaveError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GameEngine;

    #[test]
    fn test_entities_survive_roundtrip() {
        let mut engine = GameEngine::new(21);
        engine.reset_round(Difficulty::Nightmare);
        let before = engine.world.len();

        let mut buffer = Vec::new();
        engine.save(&mut buffer).expect("Save failed");
        let loaded = load_game(&buffer[..]).expect("Load failed");

        assert_eq!(loaded.world.len(), before);
        assert_eq!(loaded.zone, Zone::Ground);
        assert_eq!(loaded.world.query::<&Guard>().iter().count(), 14);
    }

    #[test]
    fn test_version_mismatch() {
        let data = SaveData {
            version: SAVE_VERSION + 1,
            seed: 0,
            rounds: 0,
            phase: Phase::Playing,
            difficulty: Difficulty::Story,
            zone: Zone::Ground,
            items: ItemTable::default(),
            collected: Vec::new(),
            messages: MessageBoard::default(),
            hud_collapsed: false,
            timers: Timers::default(),
            entities: Vec::new(),
        };
        let buffer = bincode::serialize(&data).unwrap();
        match load_game(&buffer[..]) {
            Err(SaveError::VersionMismatch { expected, found }) => {
                assert_eq!(expected, SAVE_VERSION);
                assert_eq!(found, SAVE_VERSION + 1);
            }
            _ => panic!("expected a version mismatch"),
        }
    }

    #[test]
    fn test_truncated_save_is_an_error() {
        let mut engine = GameEngine::new(3);
        engine.reset_round(Difficulty::Story);
        let mut buffer = Vec::new();
        engine.save(&mut buffer).unwrap();
        buffer.truncate(buffer.len() / 2);
        assert!(matches!(load_game(&buffer[..]), Err(SaveError::Bincode(_))));
    }
}
