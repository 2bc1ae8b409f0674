use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rapier2d::prelude::ColliderHandle;

use crate::camera::Camera2D;
use crate::config::PlaygroundConfig;
use crate::error::PlaygroundError;
use crate::input::{PointerButton, PointerGesture, PointerInteractionController};
use crate::physics::RapierWorld;
use crate::scene;
use playground_gpu_shared::math::srgb_to_linear;
use playground_gpu_shared::sprite::SpriteInstance;

/// Brightening applied to the box being dragged.
const HIGHLIGHT: f32 = 0.15;

/// Event callbacks a window shell drives.
///
/// Pointer coordinates are window pixels with a bottom-left origin.
pub trait ViewHandler {
    fn on_update(&mut self, dt: f64) -> Result<(), PlaygroundError>;
    fn on_pointer_move(&mut self, x: f64, y: f64);
    fn on_pointer_down(&mut self, x: f64, y: f64, button: PointerButton);
    fn on_pointer_up(&mut self, x: f64, y: f64, button: PointerButton);
    fn on_resize(&mut self, width: u32, height: u32);
}

/// The whole running demo: boxes in a rigid-body world, a camera, and the
/// pointer controller that moves one or the other.
pub struct Playground {
    config: PlaygroundConfig,
    camera: Camera2D,
    world: RapierWorld,
    controller: PointerInteractionController<ColliderHandle>,
    colors: HashMap<ColliderHandle, [f32; 4]>,
}

impl Playground {
    /// Build the playground, seeding the layout from `config.seed` or OS
    /// entropy.
    pub fn new(config: PlaygroundConfig) -> Result<Self, PlaygroundError> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, &mut rng)
    }

    pub fn with_rng<R: Rng + ?Sized>(config: PlaygroundConfig, rng: &mut R) -> Result<Self, PlaygroundError> {
        config.validate()?;

        let camera = Camera2D::for_window(config.window.width, config.window.height);
        let mut world = RapierWorld::new(&config);
        let colors = scene::spawn_boxes(&mut world, &config, rng)
            .into_iter()
            .map(|b| (b.shape, b.color))
            .collect();
        let controller = PointerInteractionController::new(config.physics.query_radius);

        Ok(Self {
            config,
            camera,
            world,
            controller,
            colors,
        })
    }

    pub fn config(&self) -> &PlaygroundConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub fn world(&self) -> &RapierWorld {
        &self.world
    }

    pub fn controller(&self) -> &PointerInteractionController<ColliderHandle> {
        &self.controller
    }

    /// Background in linear RGB, ready for an sRGB surface.
    pub fn clear_color(&self) -> [f64; 3] {
        self.config.window.background.map(srgb_to_linear)
    }

    /// Sprite instances for the current frame, in collider order.
    pub fn sprites(&self) -> Vec<SpriteInstance> {
        let dragged = match self.controller.gesture() {
            PointerGesture::DraggingBody(shape) => Some(shape),
            _ => None,
        };

        self.world
            .boxes()
            .map(|pose| {
                let mut color = self
                    .colors
                    .get(&pose.shape)
                    .copied()
                    .unwrap_or([1.0, 1.0, 1.0, 1.0]);
                if dragged == Some(pose.shape) {
                    for c in &mut color[..3] {
                        *c = (*c + HIGHLIGHT).min(1.0);
                    }
                }
                SpriteInstance {
                    center: pose.center.as_vec2().to_array(),
                    half_size: pose.half_extents.as_vec2().to_array(),
                    rotation: pose.rotation as f32,
                    color,
                }
            })
            .collect()
    }
}

impl ViewHandler for Playground {
    fn on_update(&mut self, dt: f64) -> Result<(), PlaygroundError> {
        self.controller.update(dt, &mut self.world, &mut self.camera)
    }

    fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.controller.on_pointer_move(x, y);
    }

    // The press position is the last motion sample; the controller queries
    // at that point.
    fn on_pointer_down(&mut self, _x: f64, _y: f64, button: PointerButton) {
        self.controller.on_pointer_down(button, &self.world, &self.camera);
    }

    fn on_pointer_up(&mut self, _x: f64, _y: f64, button: PointerButton) {
        self.controller.on_pointer_up(button);
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        log::debug!("Resize to {width}x{height}");
        self.camera.set_size(width, height);
    }
}
