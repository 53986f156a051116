//! Animated "liquid fill" progress meter.
//!
//! A wavy vertical boundary eases left and right as progress changes while
//! the wave keeps rolling on its own clock. The engine paints through a
//! [`DrawContext`] it obtains from a [`RenderSink`], and a [`FrameLoop`]
//! drives it once per frame on a calloop event loop.

pub mod config;
pub mod engine;
pub mod error;
pub mod frame_loop;
pub mod gfx;
pub mod progress;
pub mod sink;

pub use config::{Config, CounterFormat, MeterConfig};
pub use engine::{AnimationState, WaveProgress};
pub use error::{ConfigError, WaveError};
pub use frame_loop::{FrameLoop, FrameTarget};
pub use gfx::draw::{DrawContext, LinearGradient};
pub use gfx::skia::SkiaCanvas;
pub use sink::RenderSink;
