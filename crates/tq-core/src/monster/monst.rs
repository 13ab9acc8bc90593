//! Monster instances

use strum::Display;
use tracing::debug;

use super::IDLE_MOVE_PERIOD;
use crate::GameRng;
use crate::combat::{Skill, MELEE};
use crate::data::{DropEntry, MonsterTemplate};
use crate::entity::{Direction, EntityBase, EntityFlags, Position, TemplateId};

/// Monster behavior state
///
/// Aggro is sticky: nothing returns a monster to Idle. Dead is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum MonsterState {
    #[default]
    Idle,
    Aggro,
    Dead,
}

/// Monster instance
#[derive(Debug, Clone)]
pub struct Monster {
    pub base: EntityBase,
    pub name: String,
    pub damage: i32,
    pub exp: u64,
    pub min_gold: u32,
    pub max_gold: u32,
    pub drops: Vec<DropEntry>,
    pub skills: Vec<Skill>,
    pub facing: Direction,
    /// Whether a spawner brings this monster back after death
    pub respawn: bool,

    hp: i32,
    max_hp: i32,
    pub(super) state: MonsterState,
    /// Updates since the last move attempt
    pub(super) move_timer: u32,
    /// Updates between move attempts, redrawn after each attempt
    pub(super) move_period: u32,
    /// Earliest wall-clock time (ms) of the next attack
    pub(super) next_attack_ms: u64,
}

impl Monster {
    /// Build a fresh, full-health, idle instance of `template`
    pub fn from_template(template: &MonsterTemplate, rng: &mut GameRng) -> Self {
        let mut skills: Vec<Skill> = template.skills.iter().copied().map(Skill::new).collect();
        if skills.is_empty() {
            skills.push(Skill::new(MELEE));
        }

        Self {
            base: EntityBase::new(template.id, EntityFlags::STRONG),
            name: template.name.clone(),
            damage: template.damage,
            exp: template.exp,
            min_gold: template.min_gold,
            max_gold: template.max_gold,
            drops: template.drops.clone(),
            skills,
            facing: Direction::default(),
            respawn: template.respawn,
            hp: template.max_hp,
            max_hp: template.max_hp,
            state: MonsterState::Idle,
            move_timer: 0,
            move_period: rng.between(IDLE_MOVE_PERIOD.0, IDLE_MOVE_PERIOD.1),
            next_attack_ms: 0,
        }
    }

    pub fn template(&self) -> TemplateId {
        self.base.template
    }

    pub fn position(&self) -> Position {
        self.base.pos
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    /// Set hp; never exceeds max hp
    pub fn set_hp(&mut self, hp: i32) {
        self.hp = hp.min(self.max_hp);
    }

    pub fn state(&self) -> MonsterState {
        self.state
    }

    pub fn is_aggressive(&self) -> bool {
        self.state == MonsterState::Aggro
    }

    pub fn is_dead(&self) -> bool {
        self.state == MonsterState::Dead
    }

    pub fn move_timer(&self) -> u32 {
        self.move_timer
    }

    pub fn move_period(&self) -> u32 {
        self.move_period
    }

    pub fn next_attack_ms(&self) -> u64 {
        self.next_attack_ms
    }

    /// Skill used for melee strikes
    pub fn attack_skill(&self) -> Skill {
        self.skills.first().copied().unwrap_or(Skill::new(MELEE))
    }

    /// Take damage
    ///
    /// Any hit makes the monster aggressive and forces a movement decision on
    /// the next update. Returns true if hp dropped to zero or below, in which
    /// case the caller must run [`Monster::die`]. Dead monsters ignore hits.
    pub fn hit(&mut self, damage: i32) -> bool {
        if self.is_dead() {
            return false;
        }
        if self.state == MonsterState::Idle {
            debug!(monster = %self.name, "turns aggressive");
        }
        self.state = MonsterState::Aggro;
        self.move_timer = self.move_period;
        self.hp -= damage;
        self.hp <= 0
    }
}
