//! Types shared between the playground runtime and its wgpu renderer:
//! POD uniform/instance layouts, the sprite shader, and 2D camera math.

pub mod math;
pub mod shaders;
pub mod sprite;

pub use math::{srgb_to_linear, Rect};
pub use sprite::{CameraBinding, CameraUniform, SpriteInstance};
