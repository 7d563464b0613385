use crate::foundation::core::{Affine, Viewport};
use crate::foundation::error::{ShorelineError, ShorelineResult};

/// Smallest device pixel ratio honoured by [`Surface::reconfigure`].
pub const MIN_PIXEL_RATIO: f64 = 1.0;
/// Largest device pixel ratio honoured by [`Surface::reconfigure`].
pub const MAX_PIXEL_RATIO: f64 = 2.0;
/// Largest backing dimension the CPU rasterizer can address.
pub const MAX_BACKING_SIDE: u32 = u16::MAX as u32;

/// Drawing target configuration: backing resolution plus the viewport it displays.
///
/// All drawing is expressed in viewport units; [`Surface::transform`] maps them onto backing pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Surface {
    viewport_width: f64,
    viewport_height: f64,
    pixel_ratio: f64,
    backing_width: u32,
    backing_height: u32,
}

impl Surface {
    /// Configure a fresh surface for `viewport`.
    pub fn new(viewport: Viewport) -> ShorelineResult<Self> {
        let mut surface = Self {
            viewport_width: 0.0,
            viewport_height: 0.0,
            pixel_ratio: MIN_PIXEL_RATIO,
            backing_width: 0,
            backing_height: 0,
        };
        surface.reconfigure(viewport)?;
        Ok(surface)
    }

    /// Match the backing resolution to `viewport` and its (clamped) pixel ratio.
    ///
    /// Idempotent. On error the previous configuration is left untouched.
    pub fn reconfigure(&mut self, viewport: Viewport) -> ShorelineResult<()> {
        let Viewport { width, height, .. } = viewport;
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return Err(ShorelineError::validation(format!(
                "viewport size must be finite and non-negative, got {width}x{height}"
            )));
        }

        let ratio = clamp_pixel_ratio(viewport.pixel_ratio);
        let backing_w = (width * ratio).floor();
        let backing_h = (height * ratio).floor();
        if backing_w > f64::from(MAX_BACKING_SIDE) || backing_h > f64::from(MAX_BACKING_SIDE) {
            return Err(ShorelineError::validation(format!(
                "backing resolution {backing_w}x{backing_h} exceeds {MAX_BACKING_SIDE} pixels per side"
            )));
        }

        *self = Self {
            viewport_width: width,
            viewport_height: height,
            pixel_ratio: ratio,
            backing_width: backing_w as u32,
            backing_height: backing_h as u32,
        };
        tracing::debug!(
            width,
            height,
            ratio,
            backing_w = self.backing_width,
            backing_h = self.backing_height,
            "surface reconfigured"
        );
        Ok(())
    }

    /// Backing resolution in device pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        (self.backing_width, self.backing_height)
    }

    /// Displayed size in viewport units.
    pub fn display_size(&self) -> (f64, f64) {
        (self.viewport_width, self.viewport_height)
    }

    /// Clamped device pixel ratio in effect.
    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    /// Viewport-unit to device-pixel transform (uniform scale by the pixel ratio).
    pub fn transform(&self) -> Affine {
        Affine::scale(self.pixel_ratio)
    }

    /// `true` when the backing store holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.backing_width == 0 || self.backing_height == 0
    }
}

/// Clamp a host-reported device pixel ratio into `[1, 2]`; missing or non-finite ratios become 1.
pub fn clamp_pixel_ratio(ratio: Option<f64>) -> f64 {
    match ratio {
        Some(r) if r.is_finite() => r.clamp(MIN_PIXEL_RATIO, MAX_PIXEL_RATIO),
        _ => MIN_PIXEL_RATIO,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/surface.rs"]
mod tests;
