//! Player surface
//!
//! The state monsters and the map consult: position, facing, rewards and
//! active quests.

mod hero;
mod quest;

pub use hero::Player;
pub use quest::Quest;
