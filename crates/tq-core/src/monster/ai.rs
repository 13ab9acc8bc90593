//! Monster AI
//!
//! Timed movement (idle wander, aggro chase) and the melee attack check.
//! The AI only decides: it updates the monster's own position and facing
//! while the monster is lifted out of its slot, and reports what the map has
//! to apply.

use super::Monster;
use crate::GameRng;
use crate::combat::Skill;
use crate::entity::{Direction, Position};

/// Move period range while idle, in updates (high exclusive)
pub const IDLE_MOVE_PERIOD: (u32, u32) = (160, 300);

/// Move period range while aggressive, in updates (high exclusive)
pub const AGGRO_MOVE_PERIOD: (u32, u32) = (40, 80);

/// What one AI update asks the map to do
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Direction the monster stepped in, if it moved
    pub moved: Option<Direction>,
    /// Skill to strike the player with
    pub strike: Option<Skill>,
}

impl Monster {
    /// Run one AI update
    ///
    /// `can_enter` answers whether a cell is inside the map and free of
    /// strong entities. `now_ms` is the wall-clock time of the frame.
    pub fn update(
        &mut self,
        player: Option<Position>,
        now_ms: u64,
        attack_cooldown_ms: u64,
        can_enter: impl Fn(Position) -> bool,
        rng: &mut GameRng,
    ) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.is_dead() {
            return outcome;
        }

        if self.move_timer == self.move_period {
            self.move_timer = 0;
            outcome.moved = if self.is_aggressive() {
                self.move_period = rng.between(AGGRO_MOVE_PERIOD.0, AGGRO_MOVE_PERIOD.1);
                self.chase(player, &can_enter, rng)
            } else {
                self.move_period = rng.between(IDLE_MOVE_PERIOD.0, IDLE_MOVE_PERIOD.1);
                self.move_random(Direction::ALL.to_vec(), &can_enter, rng)
            };
        }
        self.move_timer += 1;

        if self.is_aggressive() {
            outcome.strike = self.try_attack(player, now_ms, attack_cooldown_ms);
        }
        outcome
    }

    /// Step in a random direction among `candidates`
    ///
    /// Blocked candidates are discarded and another is drawn from the rest.
    /// Returns `None` without moving once every candidate is exhausted.
    pub fn move_random(
        &mut self,
        mut candidates: Vec<Direction>,
        can_enter: impl Fn(Position) -> bool,
        rng: &mut GameRng,
    ) -> Option<Direction> {
        while let Some(idx) = rng.index(candidates.len()) {
            let dir = candidates.remove(idx);
            if self.try_step(dir, &can_enter) {
                return Some(dir);
            }
        }
        None
    }

    /// Head toward the player
    ///
    /// Off-axis: pick between the two directions of the player's quadrant.
    /// On a shared row or column: step straight at the player.
    fn chase(
        &mut self,
        player: Option<Position>,
        can_enter: impl Fn(Position) -> bool,
        rng: &mut GameRng,
    ) -> Option<Direction> {
        let target = player?;
        let here = self.position();
        let dx = target.x - here.x;
        let dy = target.y - here.y;

        if dx != 0 && dy != 0 {
            let pair = match (dx > 0, dy > 0) {
                (true, false) => [Direction::Up, Direction::Right],
                (true, true) => [Direction::Right, Direction::Down],
                (false, true) => [Direction::Down, Direction::Left],
                (false, false) => [Direction::Left, Direction::Up],
            };
            return self.move_random(pair.to_vec(), can_enter, rng);
        }

        let dir = match (dx.signum(), dy.signum()) {
            (0, 0) => return None,
            (0, 1) => Direction::Down,
            (0, _) => Direction::Up,
            (1, _) => Direction::Right,
            _ => Direction::Left,
        };
        self.try_step(dir, can_enter).then_some(dir)
    }

    /// Turn to `dir` and move there if the cell accepts us
    ///
    /// The monster keeps facing `dir` even when blocked.
    fn try_step(&mut self, dir: Direction, can_enter: impl Fn(Position) -> bool) -> bool {
        self.facing = dir;
        let dest = self.position().step(dir);
        if can_enter(dest) {
            self.base.pos = dest;
            true
        } else {
            false
        }
    }

    /// Melee check along the facing direction
    ///
    /// The cooldown only re-arms on a successful strike, so an out-of-range
    /// monster checks again on every update once the cooldown has run out.
    fn try_attack(
        &mut self,
        player: Option<Position>,
        now_ms: u64,
        attack_cooldown_ms: u64,
    ) -> Option<Skill> {
        if now_ms < self.next_attack_ms {
            return None;
        }
        let target = player?;
        if self.position().step(self.facing) != target {
            return None;
        }
        self.next_attack_ms = now_ms + attack_cooldown_ms;
        Some(self.attack_skill())
    }
}
