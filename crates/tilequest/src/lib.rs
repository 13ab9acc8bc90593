//! tilequest: headless driver for the world simulation
//!
//! Loads a data directory, puts a player on one map and runs the frame loop
//! against a simulated clock.

mod ascii;
mod session;
mod settings;

pub use ascii::AsciiView;
pub use session::{FRAME_MS, PlayerSummary, Session, SessionOptions, Summary};
pub use settings::{load_config, parse_config};
