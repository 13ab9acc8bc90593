//! Kill-count quests

use tracing::info;

use crate::entity::TemplateId;

/// Quest tracking kills of one monster template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quest {
    pub id: u32,
    pub name: String,
    pub target: TemplateId,
    pub required: u32,
    progress: u32,
}

impl Quest {
    pub fn kill(id: u32, name: impl Into<String>, target: TemplateId, required: u32) -> Self {
        Self {
            id,
            name: name.into(),
            target,
            required,
            progress: 0,
        }
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= self.required
    }

    /// Record a kill; the quest decides whether `template` is relevant
    ///
    /// Returns true if progress advanced.
    pub fn notify_monster_killed(&mut self, template: TemplateId) -> bool {
        if template != self.target || self.is_complete() {
            return false;
        }
        self.progress += 1;
        if self.is_complete() {
            info!(quest = %self.name, "quest complete");
        }
        true
    }
}
