use anyhow::Context;
use pixels::{Pixels, SurfaceTexture};
use snakle::{
    Config, Container, FrameHandle, FrameScheduler, PixelSurface, SnakeController, SurfaceSize,
};
use std::time::Instant;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use winit::dpi::LogicalSize;
use winit::event::{Event, VirtualKeyCode};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;
use winit_input_helper::WinitInputHelper;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;

/// The window's client area, as last reported by winit.
struct WindowContainer {
    size: SurfaceSize,
}

impl Container for WindowContainer {
    type Surface = PixelSurface;

    fn content_size(&self) -> SurfaceSize {
        self.size
    }

    fn attach(&mut self, size: SurfaceSize) -> PixelSurface {
        debug!(width = size.width, height = size.height, "surface attached");
        PixelSurface::new(size)
    }

    fn detach(&mut self, _surface: PixelSurface) {
        debug!("surface detached");
    }
}

/// One outstanding frame at a time, handed out on the next loop pass.
#[derive(Default)]
struct RedrawScheduler {
    next: u64,
    pending: Option<FrameHandle>,
}

impl RedrawScheduler {
    fn take(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }
}

impl FrameScheduler for RedrawScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        let handle = FrameHandle(self.next);
        self.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };

    let event_loop = EventLoop::new();
    let mut input = WinitInputHelper::new();

    let window = WindowBuilder::new()
        .with_title("snakle")
        .with_inner_size(LogicalSize::new(WIDTH, HEIGHT))
        .build(&event_loop)
        .context("creating window")?;

    let window_size = window.inner_size();
    let mut buffer_size = SurfaceSize::new(window_size.width, window_size.height);
    let mut pixels = {
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
        Pixels::new(buffer_size.width, buffer_size.height, surface_texture)?
    };

    let container = WindowContainer { size: buffer_size };
    let mut snake = SnakeController::new(container, RedrawScheduler::default(), config);
    snake.init().play();
    info!("space: play/pause, r: reset, s: stop, d: destroy/init, esc: quit");

    let origin = Instant::now();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        if let Event::RedrawRequested(_) = event {
            let frame = pixels.frame_mut();
            match snake.surface() {
                Some(surface) if surface.frame().len() == frame.len() => {
                    frame.copy_from_slice(surface.frame());
                }
                _ => frame.fill(0),
            }
            if let Err(err) = pixels.render() {
                error!(%err, "render failed");
                *control_flow = ControlFlow::Exit;
            }
        }

        if input.update(&event) {
            if input.key_pressed(VirtualKeyCode::Escape)
                || input.close_requested()
                || input.destroyed()
            {
                snake.destroy();
                *control_flow = ControlFlow::Exit;
                return;
            }

            if let Some(size) = input.window_resized() {
                if size.width > 0 && size.height > 0 {
                    if let Err(err) = pixels.resize_surface(size.width, size.height) {
                        error!(%err, "resizing surface failed");
                        *control_flow = ControlFlow::Exit;
                        return;
                    }
                    snake.container_mut().size = SurfaceSize::new(size.width, size.height);
                    snake.notify_resize(origin.elapsed());
                }
            }

            if input.key_pressed(VirtualKeyCode::Space) {
                if snake.is_playing() {
                    snake.pause();
                } else {
                    snake.play();
                }
            }
            if input.key_pressed(VirtualKeyCode::R) {
                snake.reset();
            }
            if input.key_pressed(VirtualKeyCode::S) {
                snake.stop();
            }
            if input.key_pressed(VirtualKeyCode::D) {
                if snake.is_initialized() {
                    snake.destroy();
                } else {
                    snake.init();
                }
            }

            let now = origin.elapsed();
            snake.poll(now);

            // The framebuffer follows the throttled size, not every window event.
            if let Some(size) = snake.size() {
                if size != buffer_size {
                    if let Err(err) = pixels.resize_buffer(size.width, size.height) {
                        error!(%err, "resizing buffer failed");
                        *control_flow = ControlFlow::Exit;
                        return;
                    }
                    buffer_size = size;
                }
            }

            if let Some(handle) = snake.scheduler_mut().take() {
                snake.frame(handle, now);
            }

            window.request_redraw();
        }
    });
}
