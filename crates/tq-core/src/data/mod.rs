//! Definition records and the entity factory
//!
//! Definitions are plain data produced by a definition source (see the
//! `tq-data` crate); the registry turns template ids into live entities.

mod map_def;
mod registry;
mod template;

pub use map_def::{MapDefinition, Placement, TileRun};
pub use registry::{EntityFactory, TemplateRegistry};
pub use template::{
    DropEntry, ItemTemplate, MonsterTemplate, NpcTemplate, ObjectTemplate, PlayerTemplate,
    PortalTemplate, Template, TileTemplate,
};
