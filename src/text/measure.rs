/// Text measurement used while recording a frame plan.
///
/// Backends that rasterize text also measure it, so plans recorded against a backend's measurer
/// size label backings to the glyphs that backend will draw.
pub trait TextMeasure {
    /// Advance width of `text` laid out on one line at `font_size`, in the same units.
    fn measure_width(&mut self, text: &str, font_size: f64) -> f64;
}

/// Deterministic measurer: every character advances by `em_advance × font_size`.
///
/// Useful for computing plans without any font available.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvance {
    /// Advance per character, in ems.
    pub em_advance: f64,
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self { em_advance: 0.55 }
    }
}

impl TextMeasure for FixedAdvance {
    fn measure_width(&mut self, text: &str, font_size: f64) -> f64 {
        text.chars().count() as f64 * self.em_advance * font_size
    }
}
