//! Monster system
//!
//! Contains the monster instance, its timed AI and its death resolution.

pub mod ai;
mod lifecycle;
mod monst;

pub use ai::{TickOutcome, AGGRO_MOVE_PERIOD, IDLE_MOVE_PERIOD};
pub use lifecycle::Loot;
pub use monst::{Monster, MonsterState};
