//! Map definition records

use crate::entity::TemplateId;

/// `amount` consecutive cells of ground tile `id`, in row-major order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRun {
    pub id: TemplateId,
    pub amount: usize,
}

/// An entity placed at an explicit cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub id: TemplateId,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapDefinition {
    pub id: TemplateId,
    pub name: String,
    pub width: i32,
    pub height: i32,
    pub tiles: Vec<TileRun>,
    pub portals: Vec<Placement>,
    pub monsters: Vec<Placement>,
    pub npcs: Vec<Placement>,
    pub objects: Vec<Placement>,
}

impl MapDefinition {
    /// Number of tiles the run list supplies, saturating at `usize::MAX`
    pub fn tile_supply(&self) -> usize {
        self.tiles
            .iter()
            .fold(0usize, |total, run| total.saturating_add(run.amount))
    }

    /// Run-length tile list expanded to one id per cell
    pub fn expand_tiles(&self) -> Vec<TemplateId> {
        self.tiles
            .iter()
            .flat_map(|run| std::iter::repeat_n(run.id, run.amount))
            .collect()
    }
}
