use crate::foundation::error::{ShorelineError, ShorelineResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Zero-based index of a painted frame.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Half-open range of frame indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// First frame in the range.
    pub start: FrameIndex,
    /// One past the last frame.
    pub end: FrameIndex,
}

impl FrameRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> ShorelineResult<Self> {
        if start.0 > end.0 {
            return Err(ShorelineError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of frames in the range.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// `true` when the range holds no frames.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// `true` when `f` lies inside the range.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }
}

/// Rational frames-per-second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator.
    pub num: u32,
    /// Denominator, always > 0.
    pub den: u32,
}

impl Fps {
    /// Build a frame rate, rejecting zero numerator or denominator.
    pub fn new(num: u32, den: u32) -> ShorelineResult<Self> {
        if den == 0 {
            return Err(ShorelineError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(ShorelineError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frames per second as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Elapsed seconds at the start of frame `frames`.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    /// Whole frames that fit in `secs` (never negative).
    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * self.as_f64()).floor().max(0.0) as u64
    }
}

/// Straight-alpha sRGB color: 8-bit channels and a unit-range alpha.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha in `[0, 1]`.
    pub a: f32,
}

impl Rgba {
    /// Build a color; alpha is clamped to `[0, 1]`.
    pub fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r,
            g,
            b,
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Fully opaque color.
    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0.0)
    }

    /// Same color with alpha multiplied by `k`.
    pub fn with_alpha_mul(self, k: f32) -> Self {
        Self::new(self.r, self.g, self.b, self.a * k)
    }

    /// Alpha quantized to 8 bits.
    pub fn alpha_u8(self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    /// `[r, g, b, a]` with alpha quantized to 8 bits (straight, not premultiplied).
    pub fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.alpha_u8()]
    }
}

/// Viewport as reported by the host: CSS-pixel size plus raw device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in viewport units.
    pub width: f64,
    /// Height in viewport units.
    pub height: f64,
    /// Device pixel ratio, `None` when the host does not report one.
    pub pixel_ratio: Option<f64>,
}

impl Viewport {
    /// Viewport with an explicit pixel ratio.
    pub fn new(width: f64, height: f64, pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            pixel_ratio: Some(pixel_ratio),
        }
    }

    /// Shorter of the two sides.
    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
