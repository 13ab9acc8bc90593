//! World constants and tunable configuration

use serde::{Deserialize, Serialize};

use crate::entity::Position;

/// Cells away from the viewport edge at which the camera starts to scroll
pub const VIEW_LIMIT: i32 = 4;

/// Minimum wall-clock time between two monster attacks
pub const ATTACK_COOLDOWN_MS: u64 = 2000;

/// Delay between a monster's death and its respawn
pub const SPAWN_COOLDOWN_MS: u64 = 2000;

/// Viewport dimensions in cells
///
/// The viewport is independent of any map: it is the window onto the grid
/// that the renderer draws, so the same config serves every map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub width: i32,
    pub height: i32,
    pub view_limit: i32,
}

impl ViewConfig {
    pub const fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            view_limit: VIEW_LIMIT,
        }
    }

    /// Screen-local bounds check
    pub const fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self::new(20, 15)
    }
}

/// Configuration shared by every map of a running world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub view: ViewConfig,
    pub attack_cooldown_ms: u64,
    pub spawn_cooldown_ms: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            view: ViewConfig::default(),
            attack_cooldown_ms: ATTACK_COOLDOWN_MS,
            spawn_cooldown_ms: SPAWN_COOLDOWN_MS,
        }
    }
}
