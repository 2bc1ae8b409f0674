//! Playground WebGPU backend.
//!
//! Draws the box sprites of a running playground into a winit window with a
//! single instanced pipeline. The renderer owns no simulation state: each
//! frame the caller hands it a bound camera and the sprite instances.

mod backend;

pub use backend::{RenderError, SpriteRenderer};
pub use playground_gpu_shared::sprite::{CameraBinding, SpriteInstance};
