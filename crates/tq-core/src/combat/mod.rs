//! Combat primitives
//!
//! Skills are the only way a monster damages the player.

mod skill;

pub use skill::{Skill, SkillId, MELEE};
