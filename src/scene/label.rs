use crate::foundation::core::{Point, Rect};
use crate::plan::builder::PlanBuilder;
use crate::plan::model::Paint;
use crate::scene::config::LabelConfig;

/// Resolved geometry of one name label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelGeometry {
    /// Font size, floored to whole units.
    pub font_size: f64,
    /// Measured advance width of the text.
    pub text_width: f64,
    /// Backing rectangle, centred on the label anchor.
    pub backing: Rect,
    /// Corner radius after clamping to the backing size.
    pub corner_radius: f64,
}

/// Size the backing of `text` centred on `center` at `scale`.
pub fn label_geometry(
    b: &mut PlanBuilder<'_>,
    text: &str,
    center: Point,
    scale: f64,
    cfg: &LabelConfig,
) -> LabelGeometry {
    let font_size = (cfg.font_size * scale).floor();
    let text_width = b.measure_text(text, font_size);
    let w = text_width + 2.0 * cfg.padding_x * scale;
    let h = cfg.line_height * scale + cfg.padding_y * scale;
    let backing = Rect::from_center_size(center, (w, h));
    LabelGeometry {
        font_size,
        text_width,
        backing,
        corner_radius: (cfg.corner_radius * scale).min(w / 2.0).min(h / 2.0),
    }
}

/// Paint a translucent pill with `text` centred on it, both drop-shadowed.
pub fn paint_label(
    b: &mut PlanBuilder<'_>,
    text: &str,
    center: Point,
    scale: f64,
    cfg: &LabelConfig,
) -> LabelGeometry {
    let g = label_geometry(b, text, center, scale, cfg);
    b.save();
    b.set_shadow(Some(cfg.backing_shadow));
    b.fill_rounded_rect(
        g.backing.x0,
        g.backing.y0,
        g.backing.width(),
        g.backing.height(),
        g.corner_radius,
        Paint::Solid(cfg.backing),
    );
    b.set_shadow(Some(cfg.text_shadow));
    b.fill_text(text, center, g.font_size, Paint::Solid(cfg.text));
    b.restore();
    g
}

#[cfg(test)]
#[path = "../../tests/unit/scene/label.rs"]
mod tests;
