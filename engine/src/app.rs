use std::collections::HashSet;
use std::time::{Duration, Instant};

use log::{debug, error, info};
use pixels::{PixelsBuilder, SurfaceTexture};
use thiserror::Error;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::graphics::Renderer2d;
use crate::pixels_renderer::PixelsRenderer2d;
use crate::surface::SurfaceSize;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("failed to create pixel surface: {0}")]
    Surface(#[from] pixels::Error),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    /// Logical size of both the window and the draw buffer.
    pub size: SurfaceSize,
    pub target_fps: u32,
    pub resizable: bool,
    pub vsync: bool,
}

impl AppConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.target_fps.max(1)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// A windowed game driven by `run_game`.
///
/// All callbacks run on the event-loop thread, one at a time.
pub trait GameApp {
    /// A key went down. Holding a key delivers one call; OS auto-repeat is filtered out.
    fn on_key(&mut self, key: VirtualKeyCode, now: Instant) -> Flow;

    /// Called once per frame before `render`.
    fn update(&mut self, _now: Instant) -> Flow {
        Flow::Continue
    }

    fn render(&mut self, gfx: &mut dyn Renderer2d);
}

/// Keys that are currently down.
///
/// winit reports auto-repeat as further `Pressed` events; only the first one per physical
/// press gets through.
#[derive(Debug, Default)]
pub struct HeldKeys {
    down: HashSet<VirtualKeyCode>,
}

impl HeldKeys {
    /// Records a press. Returns false if `key` was already down.
    pub fn press(&mut self, key: VirtualKeyCode) -> bool {
        self.down.insert(key)
    }

    pub fn release(&mut self, key: VirtualKeyCode) {
        self.down.remove(&key);
    }

    /// Forgets every key, e.g. when focus is lost and releases will not arrive.
    pub fn clear(&mut self) {
        self.down.clear();
    }

    pub fn is_held(&self, key: VirtualKeyCode) -> bool {
        self.down.contains(&key)
    }
}

/// Opens the window and runs `game` until it returns `Flow::Exit` or the window is closed.
///
/// Only returns on startup failure; a normal exit ends the process with status 0.
pub fn run_game<G: GameApp + 'static>(config: AppConfig, mut game: G) -> Result<(), AppError> {
    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(config.title.clone())
        .with_inner_size(LogicalSize::new(config.size.width, config.size.height))
        .with_resizable(config.resizable)
        .build(&event_loop)?;

    let inner = window.inner_size();
    let surface_size = SurfaceSize::new(inner.width, inner.height);
    let surface_texture = SurfaceTexture::new(surface_size.width, surface_size.height, &window);
    let pixels = PixelsBuilder::new(config.size.width, config.size.height, surface_texture)
        .enable_vsync(config.vsync)
        .build()?;
    let mut renderer = PixelsRenderer2d::new(pixels, config.size)?;

    let frame_interval = config.frame_interval();
    let mut next_frame = Instant::now();
    let mut held = HeldKeys::default();
    info!(
        "window open: {}x{} logical, {}x{} surface, {} fps cap",
        config.size.width,
        config.size.height,
        surface_size.width,
        surface_size.height,
        config.target_fps
    );

    event_loop.run(move |event, _, control_flow| {
        if matches!(*control_flow, ControlFlow::ExitWithCode(_)) {
            return;
        }
        *control_flow = ControlFlow::WaitUntil(next_frame);

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("window closed");
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => {
                    let size = SurfaceSize::new(size.width, size.height);
                    if let Err(err) = renderer.resize_surface(size) {
                        error!("resize failed: {err}");
                    }
                }
                WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                    let size = SurfaceSize::new(new_inner_size.width, new_inner_size.height);
                    if let Err(err) = renderer.resize_surface(size) {
                        error!("resize failed: {err}");
                    }
                }
                WindowEvent::Focused(false) => held.clear(),
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state,
                            virtual_keycode: Some(key),
                            ..
                        },
                    ..
                } => match state {
                    ElementState::Pressed => {
                        if !held.press(key) {
                            return;
                        }
                        debug!("key pressed: {key:?}");
                        if game.on_key(key, Instant::now()) == Flow::Exit {
                            *control_flow = ControlFlow::Exit;
                        }
                    }
                    ElementState::Released => held.release(key),
                },
                _ => {}
            },
            Event::MainEventsCleared => {
                if Instant::now() >= next_frame {
                    window.request_redraw();
                }
            }
            Event::RedrawRequested(_) => {
                let now = Instant::now();
                next_frame = now + frame_interval;
                *control_flow = ControlFlow::WaitUntil(next_frame);

                let flow = game.update(now);
                renderer.draw_frame(|gfx| game.render(gfx));
                if let Err(err) = renderer.present() {
                    error!("present failed: {err}");
                    *control_flow = ControlFlow::Exit;
                    return;
                }
                if flow == Flow::Exit {
                    *control_flow = ControlFlow::Exit;
                }
            }
            _ => {}
        }
    });

    #[allow(unreachable_code)]
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_interval_follows_target_fps() {
        let mut config = AppConfig {
            title: "t".to_string(),
            size: SurfaceSize::square(400),
            target_fps: 50,
            resizable: false,
            vsync: true,
        };
        assert_eq!(config.frame_interval(), Duration::from_millis(20));

        config.target_fps = 0;
        assert_eq!(config.frame_interval(), Duration::from_secs(1));
    }

    #[test]
    fn held_key_repeats_are_swallowed_until_release() {
        let mut held = HeldKeys::default();
        assert!(held.press(VirtualKeyCode::Left));
        assert!(!held.press(VirtualKeyCode::Left));
        assert!(!held.press(VirtualKeyCode::Left));
        assert!(held.is_held(VirtualKeyCode::Left));

        // Other keys are tracked on their own.
        assert!(held.press(VirtualKeyCode::Up));

        held.release(VirtualKeyCode::Left);
        assert!(!held.is_held(VirtualKeyCode::Left));
        assert!(held.press(VirtualKeyCode::Left));
    }

    #[test]
    fn losing_focus_forgets_held_keys() {
        let mut held = HeldKeys::default();
        held.press(VirtualKeyCode::Down);
        held.clear();
        assert!(held.press(VirtualKeyCode::Down));
    }
}
