//! Draw-order contract between the map and a renderer

use strum::{Display, EnumIter};

use crate::entity::{Entity, Position};

/// Render pass, drawn in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum RenderPass {
    Base,
    Mid,
    Ui,
}

/// Receives every visible entity once per pass
///
/// `screen` is viewport-relative: (0, 0) is the top-left visible cell.
pub trait Renderer {
    fn draw(&mut self, pass: RenderPass, entity: &Entity, screen: Position);
}
