use glam::{DVec2, Mat4};

/// Axis-aligned rectangle in a y-up coordinate system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl Rect {
    /// Rectangle from its left, right, bottom and top edges.
    pub const fn lrbt(left: f64, right: f64, bottom: f64, top: f64) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    /// Rectangle anchored at its bottom-left corner.
    pub fn xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::lrbt(x, x + width, y, y + height)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }
}

/// Orthographic view-projection for a camera at `position` looking at the
/// camera-local `projection` rectangle.
pub fn ortho_view_projection(projection: &Rect, position: DVec2) -> Mat4 {
    Mat4::orthographic_rh(
        (projection.left + position.x) as f32,
        (projection.right + position.x) as f32,
        (projection.bottom + position.y) as f32,
        (projection.top + position.y) as f32,
        -1.0,
        1.0,
    )
}

/// Map a point in viewport pixels to world space.
///
/// Degenerate viewports (zero width or height) map every point onto the
/// projection's bottom-left corner along that axis.
pub fn screen_to_world(screen: DVec2, viewport: &Rect, projection: &Rect, position: DVec2) -> DVec2 {
    let u = if viewport.width() != 0.0 {
        (screen.x - viewport.left) / viewport.width()
    } else {
        0.0
    };
    let v = if viewport.height() != 0.0 {
        (screen.y - viewport.bottom) / viewport.height()
    } else {
        0.0
    };

    DVec2::new(
        position.x + projection.left + u * projection.width(),
        position.y + projection.bottom + v * projection.height(),
    )
}

/// Decode one sRGB-encoded channel in `[0, 1]` to linear light, for
/// writing into an sRGB render target.
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
