//! A fixed-length snake that chases itself around the inside border of a
//! rectangular surface.
//!
//! The engine is host-agnostic: a [`Container`] hands out the [`Surface`] to
//! paint on and a [`FrameScheduler`] delivers display refreshes. Both are
//! driven from a single thread through [`SnakeController`].

pub mod chain;
pub mod color;
pub mod config;
pub mod controller;
pub mod driver;
pub mod events;
pub mod motion;
pub mod render;
pub mod surface;
pub mod throttle;

pub use chain::{Chain, Segment};
pub use color::{Color, Palette, Rgb, blend};
pub use config::Config;
pub use controller::{RESIZE_DELAY, SnakeController};
pub use driver::{AnimationDriver, FrameHandle, FrameScheduler};
pub use events::{Event, ListenerId};
pub use motion::{Direction, MotionState};
pub use render::render;
pub use surface::{Container, PixelSurface, Surface, SurfaceSize};
