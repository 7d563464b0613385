//! Shoreline renders an animated sunset beach: a gradient sky, a breathing sun, a shimmering
//! ocean with its reflection, sand, sparkles, two seated silhouettes with name labels and an
//! ambient glow.
//!
//! Each frame flows through three stages:
//! 1. [`SceneRenderer::paint`] records a backend-agnostic [`FramePlan`] in viewport units.
//! 2. A [`RenderBackend`] (normally [`CpuBackend`]) rasterizes the plan into premultiplied RGBA8.
//! 3. A [`FrameSink`] consumes the frames (memory, PNG sequence or MP4 via `ffmpeg`).
//!
//! [`SceneRenderer::run`] drives all three from a [`FrameScheduler`].
#![forbid(unsafe_code)]

mod encode;
mod foundation;
mod plan;
mod render;
mod scene;
mod session;
mod text;

pub use encode::ffmpeg::{FfmpegSink, is_ffmpeg_on_path, validate_mp4_config};
pub use encode::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig};
pub use foundation::core::{
    Affine, BezPath, Fps, FrameIndex, FrameRange, Point, Rect, Rgba, Vec2, Viewport,
};
pub use foundation::error::{ShorelineError, ShorelineResult};
pub use plan::builder::PlanBuilder;
pub use plan::model::{
    BlendMode, DrawOp, FramePlan, LinearGradient, Paint, Pass, RadialGradient, ShadowPass, Shape,
    TextRun,
};
pub use render::backend::{FrameRGBA, RenderBackend};
pub use render::cpu::{CpuBackend, CpuBackendOpts};
pub use scene::config::{
    BandConfig, FigureConfig, GlowConfig, GradientStop, GroundShadowConfig, LabelConfig,
    LayoutConfig, PulsingStop, ReflectionConfig, SceneConfig, ShadowStyle, SkyConfig,
    SparkleConfig, SunConfig, VignetteConfig, WaveConfig,
};
pub use scene::layout::SceneLayout;
pub use scene::particles::{Particle, ParticleField, Sparkle};
pub use scene::renderer::SceneRenderer;
pub use scene::surface::{MAX_PIXEL_RATIO, MIN_PIXEL_RATIO, Surface, clamp_pixel_ratio};
pub use session::scheduler::{FixedTickScheduler, FrameScheduler, FrameTick, RenderStats};
pub use text::layout::TextLayoutEngine;
pub use text::measure::{FixedAdvance, TextMeasure};
