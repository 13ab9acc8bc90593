//! Entity model
//!
//! Every occupant of a slot is one variant of the closed [`Entity`] enum.
//! Slots and render passes switch on [`Entity::category`] instead of probing
//! concrete types.

mod kinds;
mod position;

use std::fmt;
use std::num::ParseIntError;
use std::sync::atomic::{AtomicU64, Ordering};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

pub use kinds::{Block, Item, Npc, Object, Portal, PortalLink, Tile};
pub use position::{Direction, Position};

use crate::monster::Monster;
use crate::player::Player;

/// Template identifier, written in hexadecimal in definition files
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct TemplateId(pub u32);

impl TemplateId {
    pub fn from_hex(raw: &str) -> Result<Self, ParseIntError> {
        let digits = raw
            .strip_prefix("0x")
            .or_else(|| raw.strip_prefix("0X"))
            .unwrap_or(raw);
        u32::from_str_radix(digits, 16).map(TemplateId)
    }

    /// Lowercase hex form used for definition file names
    pub fn hex(self) -> String {
        format!("{:x}", self.0)
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Unique identity of a live entity instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityUid(u64);

static NEXT_UID: AtomicU64 = AtomicU64::new(1);

impl EntityUid {
    pub fn next() -> Self {
        EntityUid(NEXT_UID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EntityFlags: u8 {
        /// Blocks movement; at most one per slot
        const STRONG = 0x01;
        /// Never drawn
        const INVISIBLE = 0x02;
    }
}

/// Fields shared by every entity variant
#[derive(Debug, Clone)]
pub struct EntityBase {
    pub uid: EntityUid,
    pub template: TemplateId,
    pub pos: Position,
    pub flags: EntityFlags,
}

impl EntityBase {
    pub fn new(template: TemplateId, flags: EntityFlags) -> Self {
        Self {
            uid: EntityUid::next(),
            template,
            pos: Position::ORIGIN,
            flags,
        }
    }
}

/// Variant tag of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum EntityKind {
    Tile,
    Portal,
    Item,
    Object,
    Block,
    Monster,
    Npc,
    Player,
}

/// Slot field an entity occupies
///
/// Declaration order is the render layer order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Category {
    Ground,
    Portal,
    Item,
    Strong,
    Object,
}

#[derive(Debug, Clone)]
pub enum Entity {
    Tile(Tile),
    Portal(Portal),
    Item(Item),
    Object(Object),
    Block(Block),
    Monster(Box<Monster>),
    Npc(Npc),
    Player(Box<Player>),
}

impl Entity {
    pub fn base(&self) -> &EntityBase {
        match self {
            Entity::Tile(e) => &e.base,
            Entity::Portal(e) => &e.base,
            Entity::Item(e) => &e.base,
            Entity::Object(e) => &e.base,
            Entity::Block(e) => &e.base,
            Entity::Monster(e) => &e.base,
            Entity::Npc(e) => &e.base,
            Entity::Player(e) => &e.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut EntityBase {
        match self {
            Entity::Tile(e) => &mut e.base,
            Entity::Portal(e) => &mut e.base,
            Entity::Item(e) => &mut e.base,
            Entity::Object(e) => &mut e.base,
            Entity::Block(e) => &mut e.base,
            Entity::Monster(e) => &mut e.base,
            Entity::Npc(e) => &mut e.base,
            Entity::Player(e) => &mut e.base,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Tile(_) => EntityKind::Tile,
            Entity::Portal(_) => EntityKind::Portal,
            Entity::Item(_) => EntityKind::Item,
            Entity::Object(_) => EntityKind::Object,
            Entity::Block(_) => EntityKind::Block,
            Entity::Monster(_) => EntityKind::Monster,
            Entity::Npc(_) => EntityKind::Npc,
            Entity::Player(_) => EntityKind::Player,
        }
    }

    /// Which slot field this entity goes into
    ///
    /// Tiles and portals keep their own layer even if flagged strong; a
    /// strong object occupies the strong field instead of the object field.
    pub fn category(&self) -> Category {
        match self {
            Entity::Tile(_) => Category::Ground,
            Entity::Portal(_) => Category::Portal,
            Entity::Object(_) if !self.is_strong() => Category::Object,
            _ if self.is_strong() => Category::Strong,
            _ => Category::Item,
        }
    }

    pub fn uid(&self) -> EntityUid {
        self.base().uid
    }

    pub fn template(&self) -> TemplateId {
        self.base().template
    }

    pub fn position(&self) -> Position {
        self.base().pos
    }

    pub fn set_position(&mut self, pos: Position) {
        self.base_mut().pos = pos;
    }

    pub fn is_strong(&self) -> bool {
        self.base().flags.contains(EntityFlags::STRONG)
    }

    pub fn is_invisible(&self) -> bool {
        self.base().flags.contains(EntityFlags::INVISIBLE)
    }

    /// Turn an agent to face `dir`; no-op for passive entities
    pub fn face(&mut self, dir: Direction) {
        match self {
            Entity::Monster(m) => m.facing = dir,
            Entity::Npc(n) => n.facing = dir,
            Entity::Player(p) => p.facing = dir,
            _ => {}
        }
    }
}
