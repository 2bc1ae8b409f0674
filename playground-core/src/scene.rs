use glam::DVec2;
use rand::Rng;
use rapier2d::prelude::ColliderHandle;

use crate::config::PlaygroundConfig;
use crate::physics::RapierWorld;
use playground_gpu_shared::math::srgb_to_linear;

/// Base crate color (sRGB); each box gets a small random tint.
const CRATE_COLOR: [f32; 3] = [0.62, 0.41, 0.20];
const TINT_RANGE: f32 = 0.08;

/// One spawned box and the color it is drawn with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnedBox {
    pub shape: ColliderHandle,
    pub color: [f32; 4],
}

/// Scatter `config.boxes.count` boxes over the initial window area.
///
/// Centers are whole world units drawn uniformly from
/// `[0, width) x [0, height)`; pass a seeded `rng` for a reproducible
/// layout.
pub fn spawn_boxes<R: Rng + ?Sized>(
    world: &mut RapierWorld,
    config: &PlaygroundConfig,
    rng: &mut R,
) -> Vec<SpawnedBox> {
    let (width, height) = (config.window.width, config.window.height);

    let spawned: Vec<SpawnedBox> = (0..config.boxes.count)
        .map(|_| {
            let x = rng.gen_range(0..width) as f64;
            let y = rng.gen_range(0..height) as f64;
            let tint = rng.gen_range(-TINT_RANGE..=TINT_RANGE);
            let shape = world.spawn_box(DVec2::new(x, y), config.boxes.half_extent);
            let [r, g, b] = CRATE_COLOR.map(|c| linear_channel(c + tint));
            SpawnedBox {
                shape,
                color: [r, g, b, 1.0],
            }
        })
        .collect();

    log::info!("Spawned {} boxes over {width}x{height}", spawned.len());
    spawned
}

fn linear_channel(srgb: f32) -> f32 {
    srgb_to_linear(srgb.clamp(0.0, 1.0) as f64) as f32
}
