//! Plain-text rendering of the viewport

use std::fmt;

use tq_core::ViewConfig;
use tq_core::dungeon::{RenderPass, Renderer};
use tq_core::{Entity, Position};

/// Character grid the size of the viewport
///
/// Only the base pass is drawn; later layers overwrite earlier ones, so each
/// cell shows its topmost visible entity.
#[derive(Debug, Clone)]
pub struct AsciiView {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl AsciiView {
    pub fn new(view: ViewConfig) -> Self {
        let width = usize::try_from(view.width).unwrap_or(0);
        let height = usize::try_from(view.height).unwrap_or(0);
        Self {
            width,
            height,
            cells: vec![' '; width * height],
        }
    }

    pub fn glyph(entity: &Entity) -> char {
        match entity {
            Entity::Tile(_) => '.',
            Entity::Portal(_) => '>',
            Entity::Item(_) => '!',
            Entity::Object(_) | Entity::Block(_) => '#',
            Entity::Monster(_) => 'm',
            Entity::Npc(_) => 'N',
            Entity::Player(_) => '@',
        }
    }

    pub fn at(&self, screen: Position) -> Option<char> {
        self.index(screen).map(|i| self.cells[i])
    }

    fn index(&self, screen: Position) -> Option<usize> {
        let x = usize::try_from(screen.x).ok()?;
        let y = usize::try_from(screen.y).ok()?;
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }
}

impl Renderer for AsciiView {
    fn draw(&mut self, pass: RenderPass, entity: &Entity, screen: Position) {
        if pass != RenderPass::Base {
            return;
        }
        if let Some(i) = self.index(screen) {
            self.cells[i] = Self::glyph(entity);
        }
    }
}

impl fmt::Display for AsciiView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            let line: String = row.iter().collect();
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
