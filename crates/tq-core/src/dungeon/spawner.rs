//! Monster respawn bookkeeping

use crate::entity::{EntityUid, Position, TemplateId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnState {
    /// The bound monster is on the map
    Alive(EntityUid),
    /// Waiting for the cooldown; `armed` is set by the first tick after death
    Dead {
        position: Position,
        died_at: u64,
        armed: bool,
    },
}

/// Watches one monster and brings a fresh copy back after it dies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spawner {
    template: TemplateId,
    respawn: bool,
    cooldown_ms: u64,
    state: SpawnState,
}

impl Spawner {
    pub fn new(template: TemplateId, monster: EntityUid, respawn: bool, cooldown_ms: u64) -> Self {
        Self {
            template,
            respawn,
            cooldown_ms,
            state: SpawnState::Alive(monster),
        }
    }

    pub fn template(&self) -> TemplateId {
        self.template
    }

    pub fn state(&self) -> SpawnState {
        self.state
    }

    pub fn watches(&self, uid: EntityUid) -> bool {
        self.state == SpawnState::Alive(uid)
    }

    pub fn monster_died(&mut self, position: Position, now_ms: u64) {
        self.state = SpawnState::Dead {
            position,
            died_at: now_ms,
            armed: false,
        };
    }

    /// Where to respawn this tick, if anywhere
    ///
    /// The caller checks that the cell can take a strong entity and reports
    /// success through [`Spawner::respawned`].
    pub fn poll(&mut self, now_ms: u64) -> Option<Position> {
        let SpawnState::Dead {
            position,
            died_at,
            armed,
        } = &mut self.state
        else {
            return None;
        };
        if !self.respawn {
            return None;
        }
        if !*armed {
            *armed = true;
            return None;
        }
        (now_ms.saturating_sub(*died_at) >= self.cooldown_ms).then_some(*position)
    }

    pub fn respawned(&mut self, uid: EntityUid) {
        self.state = SpawnState::Alive(uid);
    }
}
