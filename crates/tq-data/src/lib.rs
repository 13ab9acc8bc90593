//! tq-data: XML definition source for tilequest
//!
//! Parses entity catalogs, monster templates and map layouts into the
//! definition records of `tq-core`, and locates them in a data directory.

mod dir;
mod entities;
mod error;
mod map;
mod monster;
mod xml;

pub use dir::DataDir;
pub use entities::parse_entities;
pub use error::DataError;
pub use map::parse_map;
pub use monster::parse_monster;
