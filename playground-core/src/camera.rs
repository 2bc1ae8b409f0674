use glam::{DVec2, Mat4};
use playground_gpu_shared::math::{self, Rect};
use playground_gpu_shared::sprite::{CameraBinding, CameraUniform};

/// 2D orthographic camera.
///
/// `projection` is in camera-local world units and is offset by `position`;
/// `viewport` is the window-pixel rectangle (bottom-left origin) the
/// projection is mapped onto.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera2D {
    pub position: DVec2,
    pub projection: Rect,
    pub viewport: Rect,
}

impl Camera2D {
    pub fn new(position: DVec2, projection: Rect, viewport: Rect) -> Self {
        Self {
            position,
            projection,
            viewport,
        }
    }

    /// Camera at the origin whose projection and viewport both cover a
    /// `width` x `height` window.
    pub fn for_window(width: u32, height: u32) -> Self {
        let (w, h) = (width as f64, height as f64);
        Self::new(DVec2::ZERO, Rect::lrbt(0.0, w, 0.0, h), Rect::xywh(0.0, 0.0, w, h))
    }

    /// Fit projection and viewport to a new window size. Zero-sized windows
    /// (minimised) leave the camera untouched.
    pub fn set_size(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let (w, h) = (width as f64, height as f64);
        self.projection = Rect::lrbt(0.0, w, 0.0, h);
        self.viewport = Rect::xywh(0.0, 0.0, w, h);
    }

    pub fn width(&self) -> f64 {
        self.projection.width()
    }

    pub fn height(&self) -> f64 {
        self.projection.height()
    }

    pub fn view_projection(&self) -> Mat4 {
        math::ortho_view_projection(&self.projection, self.position)
    }

    pub fn screen_to_world(&self, screen: DVec2) -> DVec2 {
        math::screen_to_world(screen, &self.viewport, &self.projection, self.position)
    }

    /// Bind this camera for one draw call.
    pub fn activate(&self) -> CameraBinding {
        CameraBinding {
            uniform: CameraUniform::from_matrix(self.view_projection()),
            viewport: self.viewport,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn test_for_window_covers_window() {
        let camera = Camera2D::for_window(1024, 768);
        assert_eq!(camera.position, DVec2::ZERO);
        assert_eq!(camera.projection, Rect::lrbt(0.0, 1024.0, 0.0, 768.0));
        assert_eq!(camera.viewport, Rect::xywh(0.0, 0.0, 1024.0, 768.0));
    }

    #[test]
    fn test_set_size_syncs_projection_and_viewport() {
        let mut camera = Camera2D::for_window(1024, 1024);
        camera.position = DVec2::new(30.0, -5.0);
        camera.set_size(640, 480);

        assert_eq!(camera.width(), 640.0);
        assert_eq!(camera.height(), 480.0);
        assert_eq!(camera.viewport, Rect::xywh(0.0, 0.0, 640.0, 480.0));
        // Resizing does not move the camera
        assert_eq!(camera.position, DVec2::new(30.0, -5.0));
    }

    #[test]
    fn test_set_size_ignores_minimised_window() {
        let mut camera = Camera2D::for_window(800, 600);
        camera.set_size(0, 0);
        assert_eq!(camera, Camera2D::for_window(800, 600));
    }

    #[test]
    fn test_screen_to_world_inverts_pan() {
        let mut camera = Camera2D::for_window(800, 600);
        camera.position = DVec2::new(-100.0, 25.0);
        assert_eq!(camera.screen_to_world(DVec2::new(0.0, 0.0)), DVec2::new(-100.0, 25.0));
        assert_eq!(camera.screen_to_world(DVec2::new(400.0, 300.0)), DVec2::new(300.0, 325.0));
    }

    #[test]
    fn test_activate_captures_current_state() {
        let mut camera = Camera2D::for_window(200, 100);
        camera.position = DVec2::new(50.0, 0.0);
        let binding = camera.activate();

        assert_eq!(binding.viewport, camera.viewport);
        let vp = Mat4::from_cols_array_2d(&binding.uniform.view_proj);
        let left_edge = vp * Vec4::new(50.0, 0.0, 0.0, 1.0);
        assert!((left_edge.x + 1.0).abs() < 1e-5, "left edge -> {left_edge:?}");
    }
}
