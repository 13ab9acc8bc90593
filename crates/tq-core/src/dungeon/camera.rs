//! Viewport offset and the input-side camera handle

use std::sync::{Arc, Mutex, PoisonError};

use crate::ViewConfig;
use crate::entity::Position;

/// Camera request queued from outside the update loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraCommand {
    Move { dx: i32, dy: i32 },
    Reset,
    Center,
}

/// Cloneable, thread-safe handle for queueing camera commands
///
/// Commands are applied at the start of the next [`Map::update`](super::Map::update).
#[derive(Debug, Clone, Default)]
pub struct CameraControl {
    queue: Arc<Mutex<Vec<CameraCommand>>>,
}

impl CameraControl {
    pub fn move_view(&self, dx: i32, dy: i32) {
        self.push(CameraCommand::Move { dx, dy });
    }

    pub fn reset(&self) {
        self.push(CameraCommand::Reset);
    }

    pub fn center(&self) {
        self.push(CameraCommand::Center);
    }

    pub fn push(&self, command: CameraCommand) {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(command);
    }

    pub(crate) fn drain(&self) -> Vec<CameraCommand> {
        std::mem::take(&mut *self.queue.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

/// Top-left map cell shown in the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Camera {
    offset: Position,
    view: ViewConfig,
    map_width: i32,
    map_height: i32,
}

impl Camera {
    pub fn new(view: ViewConfig, map_width: i32, map_height: i32) -> Self {
        Self {
            offset: Position::ORIGIN,
            view,
            map_width,
            map_height,
        }
    }

    pub fn offset(&self) -> Position {
        self.offset
    }

    pub fn view(&self) -> ViewConfig {
        self.view
    }

    fn scrolls_x(&self) -> bool {
        self.map_width > self.view.width
    }

    fn scrolls_y(&self) -> bool {
        self.map_height > self.view.height
    }

    /// Shift the offset; an axis only moves if the map is wider (or taller)
    /// than the viewport on that axis
    ///
    /// The offset stays within `0..=map - view` on each axis.
    pub fn move_view(&mut self, dx: i32, dy: i32) {
        if self.scrolls_x() {
            let max = self.map_width - self.view.width;
            self.offset.x = self.offset.x.saturating_add(dx).clamp(0, max);
        }
        if self.scrolls_y() {
            let max = self.map_height - self.view.height;
            self.offset.y = self.offset.y.saturating_add(dy).clamp(0, max);
        }
    }

    pub fn reset(&mut self) {
        self.move_view(-self.offset.x, -self.offset.y);
    }

    /// Scroll one cell at a time until `player` is at least `view_limit`
    /// cells away from the viewport edges
    ///
    /// Forward scrolling stops when `has_ground` reports no tile just past
    /// the current far edge, so the view never passes the last column or
    /// row. Backward scrolling stops at the origin.
    pub fn center(&mut self, player: Position, has_ground: impl Fn(Position) -> bool) {
        let limit = self.view.view_limit;

        while player.x >= self.view.width - limit + self.offset.x
            && has_ground(Position::new(self.view.width + self.offset.x, 0))
        {
            self.offset.x += 1;
        }
        while self.scrolls_x() && self.offset.x > 0 && player.x < self.offset.x + limit {
            self.offset.x -= 1;
        }

        while player.y >= self.view.height - limit + self.offset.y
            && has_ground(Position::new(0, self.view.height + self.offset.y))
        {
            self.offset.y += 1;
        }
        while self.scrolls_y() && self.offset.y > 0 && player.y < self.offset.y + limit {
            self.offset.y -= 1;
        }
    }

    pub(crate) fn apply(
        &mut self,
        command: CameraCommand,
        player: Option<Position>,
        has_ground: impl Fn(Position) -> bool,
    ) {
        match command {
            CameraCommand::Move { dx, dy } => self.move_view(dx, dy),
            CameraCommand::Reset => self.reset(),
            CameraCommand::Center => {
                if let Some(pos) = player {
                    self.center(pos, has_ground);
                }
            }
        }
    }

    /// Map cell to viewport cell
    pub fn to_screen(&self, pos: Position) -> Position {
        pos.relative_to(self.offset)
    }

    /// Viewport cell to map cell
    pub fn to_map(&self, screen: Position) -> Position {
        screen.offset(self.offset.x, self.offset.y)
    }
}
