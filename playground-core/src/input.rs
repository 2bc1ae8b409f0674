use std::fmt::Debug;

use glam::DVec2;

use crate::camera::Camera2D;
use crate::error::PlaygroundError;
use crate::physics::{PhysicsWorld, ShapeFilter};

/// Default pick radius around the cursor, in world units.
pub const DEFAULT_QUERY_RADIUS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Other(u16),
}

/// What a held primary button is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerGesture<S> {
    Idle,
    DraggingBody(S),
    DraggingCamera,
}

/// Couples cursor motion to either a dragged body's velocity or the camera
/// position.
///
/// Motion events only record the cursor; the delta since the previous frame
/// is consumed in [`update`](Self::update), so input frequency and step
/// frequency stay independent. Cursor samples are window pixels with a
/// bottom-left origin.
#[derive(Debug, Clone)]
pub struct PointerInteractionController<S> {
    current_point: DVec2,
    previous_point: DVec2,
    drag_target: Option<S>,
    dragging_camera: bool,
    query_radius: f64,
}

impl<S: Copy + Eq + Debug> PointerInteractionController<S> {
    pub fn new(query_radius: f64) -> Self {
        Self {
            current_point: DVec2::ZERO,
            previous_point: DVec2::ZERO,
            drag_target: None,
            dragging_camera: false,
            query_radius,
        }
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.current_point = DVec2::new(x, y);
    }

    /// Start a gesture: grab the first shape under the cursor, or start
    /// panning the camera if there is none.
    pub fn on_pointer_down<W>(&mut self, button: PointerButton, world: &W, camera: &Camera2D)
    where
        W: PhysicsWorld<Shape = S>,
    {
        if button != PointerButton::Primary {
            return;
        }

        match self.shapes_under_cursor(world, camera).first() {
            Some(&shape) => {
                self.drag_target = Some(shape);
                self.dragging_camera = false;
            }
            None => {
                self.drag_target = None;
                self.dragging_camera = true;
            }
        }
        log::debug!("Pointer down at {:?}: {:?}", self.current_point, self.gesture());
    }

    /// End any gesture. Safe to call repeatedly.
    pub fn on_pointer_up(&mut self, button: PointerButton) {
        if button != PointerButton::Primary {
            return;
        }
        if self.gesture() != PointerGesture::Idle {
            log::debug!("Pointer up: releasing {:?}", self.gesture());
        }
        self.drag_target = None;
        self.dragging_camera = false;
    }

    /// Apply this frame's cursor delta, then step the world.
    ///
    /// `dt` must be finite and positive; anything else is rejected before
    /// any state changes.
    pub fn update<W>(&mut self, dt: f64, world: &mut W, camera: &mut Camera2D) -> Result<(), PlaygroundError>
    where
        W: PhysicsWorld<Shape = S>,
    {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(PlaygroundError::InvalidTimestep(dt));
        }

        let delta = self.current_point - self.previous_point;

        match (self.drag_target, self.dragging_camera) {
            (Some(shape), false) => {
                if !world.set_velocity(shape, delta / dt) {
                    log::debug!("Drag target {shape:?} no longer exists, dropping it");
                    self.drag_target = None;
                }
            }
            (_, true) => {
                camera.position -= delta;
            }
            (None, false) => {}
        }

        world.step(dt);
        self.previous_point = self.current_point;
        Ok(())
    }

    /// Shapes under the cursor, in the world's query order.
    pub fn shapes_under_cursor<W>(&self, world: &W, camera: &Camera2D) -> Vec<S>
    where
        W: PhysicsWorld<Shape = S>,
    {
        let world_point = camera.screen_to_world(self.current_point);
        world.point_query(world_point, self.query_radius, ShapeFilter::all())
    }

    pub fn gesture(&self) -> PointerGesture<S> {
        match (self.drag_target, self.dragging_camera) {
            (_, true) => PointerGesture::DraggingCamera,
            (Some(shape), false) => PointerGesture::DraggingBody(shape),
            (None, false) => PointerGesture::Idle,
        }
    }

    pub fn current_point(&self) -> DVec2 {
        self.current_point
    }

    pub fn previous_point(&self) -> DVec2 {
        self.previous_point
    }

    pub fn drag_target(&self) -> Option<S> {
        self.drag_target
    }

    pub fn is_dragging_camera(&self) -> bool {
        self.dragging_camera
    }
}

impl<S: Copy + Eq + Debug> Default for PointerInteractionController<S> {
    fn default() -> Self {
        Self::new(DEFAULT_QUERY_RADIUS)
    }
}
