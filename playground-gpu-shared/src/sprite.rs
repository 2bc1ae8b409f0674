use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::math::Rect;

/// Camera uniform block (group 0, binding 0 in `sprite.wgsl`).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn from_matrix(view_proj: Mat4) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
        }
    }
}

/// Per-instance data for one box sprite.
///
/// Layout must match `InstanceInput` in `sprite.wgsl`:
/// locations 0..=3 are center, half_size, rotation, color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    /// World-space center.
    pub center: [f32; 2],
    pub half_size: [f32; 2],
    /// Radians, counter-clockwise.
    pub rotation: f32,
    /// Linear RGBA.
    pub color: [f32; 4],
}

/// A camera bound for the duration of one draw call: the view-projection
/// uniform plus the viewport rectangle (window pixels, bottom-left origin).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBinding {
    pub uniform: CameraUniform,
    pub viewport: Rect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_is_tightly_packed() {
        // 2 + 2 + 1 + 4 floats, no padding between attributes
        assert_eq!(std::mem::size_of::<SpriteInstance>(), 36);
    }

    #[test]
    fn test_camera_uniform_column_major() {
        let m = Mat4::from_translation(glam::Vec3::new(3.0, 4.0, 0.0));
        let u = CameraUniform::from_matrix(m);
        assert_eq!(u.view_proj[3][0], 3.0);
        assert_eq!(u.view_proj[3][1], 4.0);
        assert_eq!(bytemuck::bytes_of(&u).len(), 64);
    }
}
