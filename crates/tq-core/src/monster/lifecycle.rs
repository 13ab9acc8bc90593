//! Monster death and loot resolution

use tracing::info;

use super::{Monster, MonsterState};
use crate::GameRng;
use crate::entity::{Position, TemplateId};

/// Everything a death hands out, resolved exactly once per monster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loot {
    pub monster: TemplateId,
    pub position: Position,
    /// Item templates that passed their drop roll
    pub drops: Vec<TemplateId>,
    pub exp: u64,
    pub gold: u64,
}

impl Monster {
    /// Enter the Dead state and roll rewards
    ///
    /// Returns `None` if the monster was already dead, so a second call never
    /// grants anything.
    pub fn die(&mut self, rng: &mut GameRng) -> Option<Loot> {
        if self.is_dead() {
            return None;
        }
        self.state = MonsterState::Dead;

        let loot = Loot {
            monster: self.template(),
            position: self.position(),
            drops: self.roll_drops(rng),
            exp: self.exp,
            gold: self.roll_gold(rng),
        };
        info!(
            monster = %self.name,
            x = loot.position.x,
            y = loot.position.y,
            drops = loot.drops.len(),
            gold = loot.gold,
            "monster slain"
        );
        Some(loot)
    }

    /// Roll every drop table entry independently
    ///
    /// Each entry draws from 1..=100 and drops when the roll is at most its
    /// chance: 100 always drops, 0 never does.
    pub fn roll_drops(&self, rng: &mut GameRng) -> Vec<TemplateId> {
        self.drops
            .iter()
            .filter(|entry| rng.rnd(100) <= u32::from(entry.chance))
            .map(|entry| entry.item)
            .collect()
    }

    /// Gold reward in `min_gold..max_gold`
    pub fn roll_gold(&self, rng: &mut GameRng) -> u64 {
        u64::from(rng.between(self.min_gold, self.max_gold))
    }
}
