//! Attack skills

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkillId(pub u32);

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Basic melee strike every monster falls back to
pub const MELEE: SkillId = SkillId(0x700);

/// A skill bound to an attacker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skill {
    pub id: SkillId,
}

impl Skill {
    pub const fn new(id: SkillId) -> Self {
        Self { id }
    }

    /// Strike `target` with the attacker's damage
    ///
    /// Returns the damage actually dealt (hp never goes below zero).
    pub fn attack(&self, attacker_damage: i32, target: &mut Player) -> i32 {
        target.take_damage(attacker_damage.max(0))
    }
}
