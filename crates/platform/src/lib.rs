//! Platform layer: windowing, event loop, frame scheduling glue.
//!
//! Maps winit callbacks onto the corelib scheduler: one redraw = one
//! fixed simulation tick + one render. While paused the redraw chain is
//! simply not re-armed, so the process idles at zero CPU.

use std::sync::Arc;

use anyhow::{Context, Result};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use corelib::scheduler::Scheduler;
use corelib::state::SimContext;
use corelib::variant::SceneVariant;
use corelib::{vec2, Vec2};
use renderer::GpuState;

/// Startup options resolved from the CLI.
#[derive(Clone, Copy, Debug)]
pub struct RunConfig {
    pub backends: wgpu::Backends,
    pub width: u32,
    pub height: u32,
    pub variant: SceneVariant,
}

struct App {
    config: RunConfig,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    scheduler: Scheduler,
    ctx: SimContext,
    init_error: Option<anyhow::Error>,
}

impl App {
    fn new(config: RunConfig) -> Self {
        Self {
            config,
            window: None,
            gpu: None,
            scheduler: Scheduler::new(),
            ctx: SimContext::new(config.variant),
            init_error: None,
        }
    }

    fn publish_pointer(&mut self, px: f64, py: f64) {
        let Some(window) = &self.window else { return };
        let size = window.inner_size();
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.ctx
            .pointer
            .set_raw(normalize_pointer(px, py, size.width, size.height));
    }

    fn toggle_pause(&mut self) {
        if self.scheduler.pause() {
            log::info!("Paused");
        } else if self.scheduler.resume() {
            log::info!("Resumed");
            // Re-arm the redraw chain exactly once on the resume edge.
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Kanjon3D")
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.init_error = Some(anyhow::Error::new(e).context("Failed to create window"));
                event_loop.exit();
                return;
            }
        };
        log::info!(
            "Window created: {}x{}",
            window.inner_size().width,
            window.inner_size().height
        );

        match pollster::block_on(GpuState::new(
            window.clone(),
            self.config.backends,
            self.config.variant,
        )) {
            Ok(gpu) => {
                self.gpu = Some(gpu);
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                // Fatal startup condition: report once, never enter the
                // frame loop.
                log::error!("Renderer init failed: {e:#}");
                self.init_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested. Exiting event loop.");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                log::info!("Resized: {}x{}", new_size.width, new_size.height);
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.publish_pointer(position.x, position.y);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match code {
                KeyCode::Space => self.toggle_pause(),
                KeyCode::Escape => event_loop.exit(),
                _ => {}
            },
            WindowEvent::RedrawRequested => {
                // Advance only while running, but repaint regardless: an
                // OS expose or resize during pause must keep the frozen
                // frame on screen, not blank the surface.
                self.scheduler.tick(&mut self.ctx);
                let Some(gpu) = &mut self.gpu else { return };
                match gpu.render(&self.ctx) {
                    Ok(()) => {}
                    Err(e) if GpuState::is_surface_lost(&e) => {
                        log::warn!("Surface lost/outdated; reconfiguring.");
                        gpu.recreate_surface();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of GPU memory. Exiting.");
                        event_loop.exit();
                    }
                    Err(e) => log::warn!("Frame dropped: {e:?}"),
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // Keep the frame chain alive only while running; a paused scene
        // must not burn CPU on redraws.
        if self.scheduler.is_running() {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }
}

/// Map a cursor position in pixels to [-1, 1] per axis, +y up.
fn normalize_pointer(px: f64, py: f64, width: u32, height: u32) -> Vec2 {
    let x = (px / width as f64) * 2.0 - 1.0;
    let y = 1.0 - (py / height as f64) * 2.0;
    vec2(x as f32, y as f32)
}

/// Run the scene until the window closes. Returns an error for fatal
/// initialization failures.
pub fn run(config: RunConfig) -> Result<()> {
    let event_loop: EventLoop<()> =
        EventLoop::new().context("Failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);
    event_loop
        .run_app(&mut app)
        .map_err(|e| anyhow::anyhow!("Event loop error: {e:?}"))?;

    if let Some(err) = app.init_error.take() {
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_corners_map_to_unit_corners() {
        let (w, h) = (1280, 720);
        // +y is up: the top-left pixel is (-1, 1).
        assert_eq!(normalize_pointer(0.0, 0.0, w, h), vec2(-1.0, 1.0));
        assert_eq!(normalize_pointer(1280.0, 0.0, w, h), vec2(1.0, 1.0));
        assert_eq!(normalize_pointer(0.0, 720.0, w, h), vec2(-1.0, -1.0));
        assert_eq!(normalize_pointer(1280.0, 720.0, w, h), vec2(1.0, -1.0));
    }

    #[test]
    fn window_center_maps_to_the_origin() {
        assert_eq!(normalize_pointer(640.0, 360.0, 1280, 720), vec2(0.0, 0.0));
    }
}
