use crate::foundation::error::{ShorelineError, ShorelineResult};
use crate::plan::model::FramePlan;
use crate::render::composite::unpremultiply_in_place;
use crate::text::measure::TextMeasure;

/// A rendered frame as RGBA8 pixels at backing resolution.
///
/// Frames are **premultiplied alpha**; the `premultiplied` flag makes that explicit at API
/// boundaries.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Fully transparent frame.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
            premultiplied: true,
        }
    }

    /// Pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data.get(i..i + 4).map(|p| [p[0], p[1], p[2], p[3]])
    }

    /// Straight-alpha copy, suitable for PNG output.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            unpremultiply_in_place(&mut out);
        }
        out
    }

    /// Convert into an `image` buffer with straight alpha.
    pub fn to_rgba_image(&self) -> ShorelineResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.to_straight_rgba8())
            .ok_or_else(|| ShorelineError::encode("frame buffer size mismatch"))
    }
}

/// A rasterizer that executes a [`FramePlan`] into a [`FrameRGBA`].
///
/// Backends also measure text, so plans recorded against [`RenderBackend::text_measure`] size
/// label backings to the glyphs the backend draws.
pub trait RenderBackend {
    /// Rasterize `plan` at its surface's backing resolution.
    fn render_plan(&mut self, plan: &FramePlan) -> ShorelineResult<FrameRGBA>;

    /// Text measurer consistent with how this backend draws text.
    fn text_measure(&mut self) -> &mut dyn TextMeasure;
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
