//! The player entity

use tracing::info;

use super::Quest;
use crate::entity::{Direction, EntityBase, EntityFlags, Item, Position, TemplateId};

/// Max hp gained per level
const HP_PER_LEVEL: i32 = 10;

#[derive(Debug, Clone)]
pub struct Player {
    pub base: EntityBase,
    pub name: String,
    pub facing: Direction,
    pub damage: i32,
    hp: i32,
    max_hp: i32,
    exp: u64,
    level: u32,
    gold: u64,
    quests: Vec<Quest>,
    inventory: Vec<Item>,
}

impl Player {
    pub fn new(template: TemplateId, name: impl Into<String>, max_hp: i32, damage: i32) -> Self {
        Self {
            base: EntityBase::new(template, EntityFlags::STRONG),
            name: name.into(),
            facing: Direction::default(),
            damage,
            hp: max_hp,
            max_hp,
            exp: 0,
            level: 1,
            gold: 0,
            quests: Vec::new(),
            inventory: Vec::new(),
        }
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

    pub fn exp(&self) -> u64 {
        self.exp
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn gold(&self) -> u64 {
        self.gold
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    /// Set hp, clamped to `0..=max_hp`
    pub fn set_hp(&mut self, hp: i32) {
        self.hp = hp.clamp(0, self.max_hp);
    }

    /// Lose up to `damage` hp; returns the amount actually lost
    pub fn take_damage(&mut self, damage: i32) -> i32 {
        let before = self.hp;
        self.set_hp(self.hp - damage);
        before - self.hp
    }

    /// Add experience, levelling up once per `level * 100` cumulative exp
    pub fn gain_exp(&mut self, amount: u64) {
        self.exp += amount;
        while self.exp >= u64::from(self.level) * 100 {
            self.level += 1;
            self.max_hp += HP_PER_LEVEL;
            self.hp = self.max_hp;
            info!(player = %self.name, level = self.level, "level up");
        }
    }

    pub fn gain_gold(&mut self, amount: u64) {
        self.gold += amount;
    }

    pub fn add_quest(&mut self, quest: Quest) {
        self.quests.push(quest);
    }

    pub fn quests(&self) -> &[Quest] {
        &self.quests
    }

    /// Quests that still accept progress
    pub fn active_quests(&self) -> impl Iterator<Item = &Quest> {
        self.quests.iter().filter(|q| !q.is_complete())
    }

    pub fn active_quests_mut(&mut self) -> impl Iterator<Item = &mut Quest> {
        self.quests.iter_mut().filter(|q| !q.is_complete())
    }

    pub fn add_item(&mut self, item: Item) {
        self.inventory.push(item);
    }

    pub fn inventory(&self) -> &[Item] {
        &self.inventory
    }
}
