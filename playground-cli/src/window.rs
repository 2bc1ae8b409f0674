use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use glam::DVec2;
use playground_core::{Playground, PointerButton, ViewHandler};
use playground_wgpu::SpriteRenderer;
use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

use crate::frame_clock::FrameClock;

/// Winit shell around a [`Playground`]: forwards window events, runs
/// fixed-step updates, and draws through the sprite renderer.
struct PlaygroundShell {
    playground: Playground,
    window: Option<Arc<Window>>,
    renderer: Option<SpriteRenderer>,
    /// Last cursor sample, bottom-left origin.
    cursor: DVec2,
    clock: FrameClock,
    init_error: Option<anyhow::Error>,
}

impl PlaygroundShell {
    fn new(playground: Playground, step: Duration) -> Self {
        Self {
            playground,
            window: None,
            renderer: None,
            cursor: DVec2::ZERO,
            clock: FrameClock::new(step),
            init_error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let config = self.playground.config().window.clone();
        let attributes = WindowAttributes::default()
            .with_title(config.title)
            .with_inner_size(PhysicalSize::new(config.width, config.height))
            .with_resizable(true);
        let window = Arc::new(event_loop.create_window(attributes).context("create window")?);

        let size = window.inner_size();
        let renderer = SpriteRenderer::new(window.clone(), size.width, size.height)
            .context("wgpu init")?;

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.playground.on_resize(size.width, size.height);
        Ok(())
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        if let Some(renderer) = &mut self.renderer {
            renderer.resize(size.width, size.height);
        }
        self.playground.on_resize(size.width, size.height);
    }

    fn cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        let Some(window) = &self.window else { return };
        // winit is top-left origin, the playground is bottom-left
        let height = window.inner_size().height as f64;
        self.cursor = DVec2::new(position.x, height - position.y);
        self.playground.on_pointer_move(self.cursor.x, self.cursor.y);
    }

    fn mouse_input(&mut self, state: ElementState, button: MouseButton) {
        let button = pointer_button(button);
        let (x, y) = (self.cursor.x, self.cursor.y);
        match state {
            ElementState::Pressed => self.playground.on_pointer_down(x, y, button),
            ElementState::Released => self.playground.on_pointer_up(x, y, button),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(renderer)) = (&self.window, &mut self.renderer) else {
            return;
        };
        let camera = self.playground.camera().activate();
        let sprites = self.playground.sprites();
        if let Err(e) = renderer.render(&camera, &sprites, self.playground.clear_color()) {
            if e.needs_reconfigure() {
                let size = window.inner_size();
                renderer.resize(size.width, size.height);
            } else if e.is_fatal() {
                log::error!("Render failed: {e}");
                event_loop.exit();
            } else {
                log::warn!("Render error: {e}");
            }
        }
    }

    fn tick(&mut self) {
        let dt = self.clock.step_secs();
        for _ in 0..self.clock.advance(Instant::now()) {
            if let Err(e) = self.playground.on_update(dt) {
                log::warn!("Skipped update: {e}");
            }
        }
    }
}

fn pointer_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        MouseButton::Middle => PointerButton::Middle,
        MouseButton::Back => PointerButton::Other(3),
        MouseButton::Forward => PointerButton::Other(4),
        MouseButton::Other(n) => PointerButton::Other(n),
    }
}

impl ApplicationHandler for PlaygroundShell {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            log::error!("Startup failed: {e:#}");
            self.init_error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        match &self.window {
            Some(window) if window.id() == window_id => {}
            _ => return,
        }
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => self.resize(size),
            WindowEvent::CursorMoved { position, .. } => self.cursor_moved(position),
            WindowEvent::MouseInput { state, button, .. } => self.mouse_input(state, button),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        self.tick();
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Open the window and run until it is closed.
pub fn run(playground: Playground) -> anyhow::Result<()> {
    let timestep = playground.config().physics.timestep;
    let step = Duration::try_from_secs_f64(timestep)
        .with_context(|| format!("invalid physics.timestep {timestep}"))?;
    let event_loop = EventLoop::new()?;
    let mut shell = PlaygroundShell::new(playground, step);
    event_loop.run_app(&mut shell)?;
    match shell.init_error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_button_is_primary() {
        assert_eq!(pointer_button(MouseButton::Left), PointerButton::Primary);
        assert_eq!(pointer_button(MouseButton::Right), PointerButton::Secondary);
        assert_eq!(pointer_button(MouseButton::Other(9)), PointerButton::Other(9));
    }
}
