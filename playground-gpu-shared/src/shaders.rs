/// Embedded WGSL shader source strings for the sprite pipeline.

pub const SPRITE_WGSL: &str = include_str!("../shaders/sprite.wgsl");
