use std::borrow::Cow;
use std::path::Path;

use crate::foundation::error::{ShorelineError, ShorelineResult};
use crate::text::measure::TextMeasure;

/// Brush carried through Parley layouts (straight-alpha RGBA8).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextBrush {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

/// Shapes single-line label text with Parley.
///
/// Fonts come from the system collection, or from one registered font file.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    family: String,
}

impl TextLayoutEngine {
    /// Engine resolving `family` (a CSS-style family list) against system fonts.
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            family: family.into(),
        }
    }

    /// Engine that shapes with the first family found in a TTF/OTF file.
    pub fn with_font_file(path: &Path) -> ShorelineResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            ShorelineError::validation(format!("read font file '{}': {e}", path.display()))
        })?;
        let mut engine = Self::new(String::new());
        let families = engine
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            ShorelineError::validation(format!(
                "no font families registered from '{}'",
                path.display()
            ))
        })?;
        engine.family = engine
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ShorelineError::validation("registered font family has no name"))?
            .to_string();
        Ok(engine)
    }

    /// Family list the engine requests.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Lay out `text` on a single line.
    pub fn layout_line(
        &mut self,
        text: &str,
        font_size: f32,
        brush: TextBrush,
    ) -> parley::Layout<TextBrush> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font_size));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);
        layout.align(
            None,
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );
        layout
    }
}

impl TextMeasure for TextLayoutEngine {
    fn measure_width(&mut self, text: &str, font_size: f64) -> f64 {
        if text.is_empty() || !(font_size.is_finite() && font_size > 0.0) {
            return 0.0;
        }
        let layout = self.layout_line(text, font_size as f32, TextBrush::default());
        f64::from(layout.width())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/layout.rs"]
mod tests;
