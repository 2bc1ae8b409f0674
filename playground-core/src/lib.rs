//! Physics playground runtime.
//!
//! A field of rigid-body boxes in a `rapier2d` world, a 2D camera, and the
//! pointer controller that turns cursor motion into either a dragged box's
//! velocity or a camera pan. Windowing and rendering live in other crates;
//! they drive a [`Playground`] through the [`ViewHandler`] callbacks.

mod app;
pub mod camera;
pub mod config;
mod error;
pub mod input;
pub mod physics;
pub mod scene;

pub use app::{Playground, ViewHandler};
pub use camera::Camera2D;
pub use config::PlaygroundConfig;
pub use error::PlaygroundError;
pub use input::{PointerButton, PointerGesture, PointerInteractionController};
pub use physics::{PhysicsWorld, RapierWorld, ShapeFilter};
pub use playground_gpu_shared::sprite::{CameraBinding, SpriteInstance};
