//! Errors raised while building or populating a map

use thiserror::Error;

use crate::entity::{EntityKind, TemplateId};

/// Failures that prevent a map or an entity from being constructed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    #[error("invalid map dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("tile supply mismatch: map needs {expected} tiles, definition provides {actual}")]
    TileCountMismatch { expected: usize, actual: usize },

    #[error("unknown template {0}")]
    UnknownTemplate(TemplateId),

    #[error("template {id} is a {found}, expected a {expected}")]
    WrongKind {
        id: TemplateId,
        expected: EntityKind,
        found: EntityKind,
    },

    #[error("invalid template {id}: {reason}")]
    InvalidTemplate { id: TemplateId, reason: String },

    #[error("position ({x}, {y}) for {id} is outside the map")]
    OutOfBounds { id: TemplateId, x: i32, y: i32 },

    #[error("position ({x}, {y}) for {id} already holds a strong entity")]
    Occupied { id: TemplateId, x: i32, y: i32 },
}
