//! Map structure: slot grid, camera, spawners and rendering order

mod camera;
mod frame;
mod map;
mod render;
mod slot;
mod spawner;

pub use camera::{Camera, CameraCommand, CameraControl};
pub use frame::Frame;
pub use map::{HitReport, Map};
pub use render::{RenderPass, Renderer};
pub use slot::Slot;
pub use spawner::{SpawnState, Spawner};
