//! Static template records

use crate::WorldError;
use crate::combat::SkillId;
use crate::entity::{EntityKind, PortalLink, TemplateId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileTemplate {
    pub id: TemplateId,
    pub invisible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalTemplate {
    pub id: TemplateId,
    pub invisible: bool,
    pub destination: Option<PortalLink>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemTemplate {
    pub id: TemplateId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectTemplate {
    pub id: TemplateId,
    pub name: String,
    pub strong: bool,
    /// Footprint cells relative to the anchor
    pub blocks: Vec<(i32, i32)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NpcTemplate {
    pub id: TemplateId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerTemplate {
    pub id: TemplateId,
    pub name: String,
    pub max_hp: i32,
    pub damage: i32,
}

/// One independent roll of a drop table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropEntry {
    pub item: TemplateId,
    /// Percent, 0..=100
    pub chance: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonsterTemplate {
    pub id: TemplateId,
    pub name: String,
    pub damage: i32,
    pub max_hp: i32,
    pub exp: u64,
    pub min_gold: u32,
    pub max_gold: u32,
    pub drops: Vec<DropEntry>,
    pub skills: Vec<SkillId>,
    pub respawn: bool,
}

impl MonsterTemplate {
    pub fn validate(&self) -> Result<(), WorldError> {
        let invalid = |reason: String| WorldError::InvalidTemplate {
            id: self.id,
            reason,
        };
        if self.max_hp <= 0 {
            return Err(invalid(format!("maxHP must be positive, got {}", self.max_hp)));
        }
        if self.max_gold < self.min_gold {
            return Err(invalid(format!(
                "maxGold {} is below minGold {}",
                self.max_gold, self.min_gold
            )));
        }
        if let Some(drop) = self.drops.iter().find(|d| d.chance > 100) {
            return Err(invalid(format!(
                "drop {} has chance {} above 100",
                drop.item, drop.chance
            )));
        }
        Ok(())
    }
}

/// Any template the registry can instantiate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Template {
    Tile(TileTemplate),
    Portal(PortalTemplate),
    Item(ItemTemplate),
    Object(ObjectTemplate),
    Npc(NpcTemplate),
    Monster(MonsterTemplate),
    Player(PlayerTemplate),
}

impl Template {
    pub fn id(&self) -> TemplateId {
        match self {
            Template::Tile(t) => t.id,
            Template::Portal(t) => t.id,
            Template::Item(t) => t.id,
            Template::Object(t) => t.id,
            Template::Npc(t) => t.id,
            Template::Monster(t) => t.id,
            Template::Player(t) => t.id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Template::Tile(_) => EntityKind::Tile,
            Template::Portal(_) => EntityKind::Portal,
            Template::Item(_) => EntityKind::Item,
            Template::Object(_) => EntityKind::Object,
            Template::Npc(_) => EntityKind::Npc,
            Template::Monster(_) => EntityKind::Monster,
            Template::Player(_) => EntityKind::Player,
        }
    }
}
