//! Passive entity variants: ground tiles, portals, items, objects, blocks, NPCs

use super::{Direction, EntityBase, EntityFlags, EntityUid, Position, TemplateId};

/// Ground layer of a slot
#[derive(Debug, Clone)]
pub struct Tile {
    pub base: EntityBase,
}

impl Tile {
    pub fn new(template: TemplateId, flags: EntityFlags) -> Self {
        Self {
            base: EntityBase::new(template, flags),
        }
    }
}

/// Where a portal leads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortalLink {
    pub map: TemplateId,
    pub portal: TemplateId,
}

#[derive(Debug, Clone)]
pub struct Portal {
    pub base: EntityBase,
    pub destination: Option<PortalLink>,
}

impl Portal {
    pub fn new(template: TemplateId, flags: EntityFlags, destination: Option<PortalLink>) -> Self {
        Self {
            base: EntityBase::new(template, flags),
            destination,
        }
    }
}

/// Item lying on the ground or carried by the player
#[derive(Debug, Clone)]
pub struct Item {
    pub base: EntityBase,
    pub name: String,
}

impl Item {
    pub fn new(template: TemplateId, name: impl Into<String>) -> Self {
        Self {
            base: EntityBase::new(template, EntityFlags::empty()),
            name: name.into(),
        }
    }
}

/// Decoration spanning one or more cells
///
/// The object itself never blocks; each offset becomes a strong [`Block`]
/// when the object is placed on a map.
#[derive(Debug, Clone)]
pub struct Object {
    pub base: EntityBase,
    pub name: String,
    pub block_offsets: Vec<(i32, i32)>,
    /// Blocks spawned by the last placement, for removal
    pub(crate) placed_blocks: Vec<(EntityUid, Position)>,
}

impl Object {
    pub fn new(
        template: TemplateId,
        flags: EntityFlags,
        name: impl Into<String>,
        block_offsets: Vec<(i32, i32)>,
    ) -> Self {
        Self {
            base: EntityBase::new(template, flags),
            name: name.into(),
            block_offsets,
            placed_blocks: Vec::new(),
        }
    }

    pub fn placed_blocks(&self) -> &[(EntityUid, Position)] {
        &self.placed_blocks
    }
}

/// Invisible strong footprint cell of an [`Object`]
#[derive(Debug, Clone)]
pub struct Block {
    pub base: EntityBase,
    pub parent: EntityUid,
}

impl Block {
    pub fn new(parent: &Object) -> Self {
        Self {
            base: EntityBase::new(parent.base.template, EntityFlags::STRONG | EntityFlags::INVISIBLE),
            parent: parent.base.uid,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Npc {
    pub base: EntityBase,
    pub name: String,
    pub facing: Direction,
}

impl Npc {
    pub fn new(template: TemplateId, name: impl Into<String>) -> Self {
        Self {
            base: EntityBase::new(template, EntityFlags::STRONG),
            name: name.into(),
            facing: Direction::default(),
        }
    }
}
