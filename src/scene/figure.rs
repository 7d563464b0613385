use crate::foundation::core::{Point, Rect};
use crate::plan::builder::PlanBuilder;
use crate::plan::model::{LinearGradient, Paint};
use crate::scene::config::FigureConfig;

/// Whether a silhouette block is drawn at the reduced arm alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Part {
    Body,
    Arm,
}

/// Blocks of the seated figure at scale 1: `(x, y, w, h)` relative to the anchor, in paint order.
const BLOCKS: [(Part, [f64; 4]); 10] = [
    (Part::Body, [-22.0, -180.0, 44.0, 44.0]), // head
    (Part::Body, [-30.0, -136.0, 60.0, 70.0]), // torso
    (Part::Arm, [-44.0, -128.0, 16.0, 56.0]),  // back arm
    (Part::Arm, [28.0, -124.0, 16.0, 52.0]),   // front arm
    (Part::Body, [-30.0, -66.0, 30.0, 30.0]),  // upper legs
    (Part::Body, [0.0, -66.0, 30.0, 30.0]),
    (Part::Body, [-30.0, -36.0, 26.0, 46.0]), // lower legs
    (Part::Body, [4.0, -36.0, 26.0, 46.0]),
    (Part::Body, [-34.0, 10.0, 32.0, 14.0]), // feet
    (Part::Body, [2.0, 10.0, 32.0, 14.0]),
];

/// Local-space rectangles of the figure at `scale`, in paint order.
pub fn figure_blocks(scale: f64) -> impl Iterator<Item = Rect> {
    BLOCKS.iter().map(move |(_, [x, y, w, h])| {
        Rect::new(x * scale, y * scale, (x + w) * scale, (y + h) * scale)
    })
}

/// Tilts of the left and right figure at time `t`; the shared rock is applied with opposite signs.
pub fn figure_tilts(cfg: &FigureConfig, t: f64) -> (f64, f64) {
    let bob = cfg.rock_amplitude * (cfg.rock_rate * t).sin();
    (cfg.left_tilt + bob, cfg.right_tilt - bob)
}

/// Paint one seated block silhouette anchored (feet line) at `anchor`.
pub fn paint_figure(
    b: &mut PlanBuilder<'_>,
    anchor: Point,
    scale: f64,
    tilt: f64,
    cfg: &FigureConfig,
) {
    let paint = Paint::Linear(LinearGradient {
        start: Point::new(0.0, cfg.gradient_top * scale),
        end: Point::new(0.0, cfg.gradient_bottom * scale),
        stops: cfg.stops.clone(),
    });

    b.save();
    b.translate(anchor.x, anchor.y);
    b.rotate(tilt);
    b.set_shadow(Some(cfg.shadow));
    for ((part, _), rect) in BLOCKS.iter().zip(figure_blocks(scale)) {
        b.set_global_alpha(match part {
            Part::Arm => cfg.arm_alpha,
            Part::Body => 1.0,
        });
        b.fill_rect(rect.x0, rect.y0, rect.width(), rect.height(), paint.clone());
    }
    b.restore();
}

#[cfg(test)]
#[path = "../../tests/unit/scene/figure.rs"]
mod tests;
