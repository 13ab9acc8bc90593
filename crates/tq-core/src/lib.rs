//! tq-core: world-simulation core for tilequest
//!
//! Contains the slot grid, entity model, monster AI, combat and loot logic.
//! Rendering, input and file loading are collaborators reached through the
//! `Renderer` and `EntityFactory` traits; this crate performs no I/O.

pub mod combat;
pub mod data;
pub mod dungeon;
pub mod entity;
pub mod monster;
pub mod player;

mod config;
mod error;
mod rng;

pub use config::{ViewConfig, WorldConfig, ATTACK_COOLDOWN_MS, SPAWN_COOLDOWN_MS, VIEW_LIMIT};
pub use dungeon::{Frame, Map};
pub use entity::{Direction, Entity, EntityKind, EntityUid, Position, TemplateId};
pub use error::WorldError;
pub use rng::GameRng;
