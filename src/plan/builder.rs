use crate::foundation::core::{Affine, BezPath, Point, Rect, Vec2};
use crate::plan::model::{BlendMode, DrawOp, FramePlan, Paint, Pass, ShadowPass, Shape, TextRun};
use crate::scene::config::ShadowStyle;
use crate::scene::surface::Surface;
use crate::text::measure::TextMeasure;

#[derive(Clone, Copy, Debug)]
struct DrawState {
    transform: Affine,
    alpha: f32,
    blend: BlendMode,
    shadow: Option<ShadowStyle>,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            alpha: 1.0,
            blend: BlendMode::Normal,
            shadow: None,
        }
    }
}

/// Immediate-mode 2D drawing context that records fills into a [`FramePlan`].
///
/// Mirrors the canvas state model: `save`/`restore` snapshot transform, global alpha, blend mode
/// and shadow. Coordinates are viewport units; the surface's pixel-ratio scale is applied by the
/// backend.
pub struct PlanBuilder<'m> {
    surface: Surface,
    measure: &'m mut dyn TextMeasure,
    state: DrawState,
    stack: Vec<DrawState>,
    passes: Vec<Pass>,
}

impl<'m> PlanBuilder<'m> {
    /// Start recording a frame for `surface`.
    pub fn new(surface: Surface, measure: &'m mut dyn TextMeasure) -> Self {
        Self {
            surface,
            measure,
            state: DrawState::default(),
            stack: Vec::new(),
            passes: Vec::new(),
        }
    }

    /// Push a copy of the current drawing state.
    pub fn save(&mut self) {
        self.stack.push(self.state);
    }

    /// Pop the last saved drawing state; a restore without a save resets to defaults.
    pub fn restore(&mut self) {
        self.state = self.stack.pop().unwrap_or_default();
    }

    /// Post-multiply a translation onto the current transform.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.state.transform *= Affine::translate(Vec2::new(dx, dy));
    }

    /// Post-multiply a rotation (radians, clockwise in y-down space).
    pub fn rotate(&mut self, radians: f64) {
        self.state.transform *= Affine::rotate(radians);
    }

    /// Current local-to-viewport transform.
    pub fn transform(&self) -> Affine {
        self.state.transform
    }

    /// Set global alpha, clamped to `[0, 1]`.
    pub fn set_global_alpha(&mut self, alpha: f32) {
        self.state.alpha = alpha.clamp(0.0, 1.0);
    }

    /// Set the compositing mode for subsequent fills.
    pub fn set_blend(&mut self, blend: BlendMode) {
        self.state.blend = blend;
    }

    /// Set or clear the drop shadow cast by subsequent fills.
    pub fn set_shadow(&mut self, shadow: Option<ShadowStyle>) {
        self.state.shadow = shadow;
    }

    /// Advance width of `text` at `font_size`.
    pub fn measure_text(&mut self, text: &str, font_size: f64) -> f64 {
        self.measure.measure_width(text, font_size)
    }

    /// Fill `shape` with `paint` under the current state.
    pub fn fill(&mut self, shape: Shape, paint: Paint) {
        let op = DrawOp {
            shape,
            paint: paint.with_alpha_mul(self.state.alpha),
            transform: self.state.transform,
            alpha: self.state.alpha,
            blend: self.state.blend,
        };

        match (self.state.shadow, self.passes.last_mut()) {
            (Some(shadow), Some(Pass::Shadowed(p))) if p.shadow == shadow => p.ops.push(op),
            (Some(shadow), _) => self.passes.push(Pass::Shadowed(ShadowPass {
                shadow,
                ops: vec![op],
            })),
            (None, Some(Pass::Draw(ops))) => ops.push(op),
            (None, _) => self.passes.push(Pass::Draw(vec![op])),
        }
    }

    /// Fill an axis-aligned rectangle given by origin and size.
    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, paint: Paint) {
        self.fill(Shape::Rect(Rect::new(x, y, x + w, y + h)), paint);
    }

    /// Fill a rounded rectangle; the radius is clamped to half the shorter side.
    pub fn fill_rounded_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64, paint: Paint) {
        let radius = radius.min(w / 2.0).min(h / 2.0).max(0.0);
        self.fill(
            Shape::RoundedRect {
                rect: Rect::new(x, y, x + w, y + h),
                radius,
            },
            paint,
        );
    }

    /// Fill a circle.
    pub fn fill_circle(&mut self, center: Point, radius: f64, paint: Paint) {
        self.fill(Shape::Circle { center, radius }, paint);
    }

    /// Fill an axis-aligned ellipse.
    pub fn fill_ellipse(&mut self, center: Point, radii: Vec2, paint: Paint) {
        self.fill(Shape::Ellipse { center, radii }, paint);
    }

    /// Fill an arbitrary path.
    pub fn fill_path(&mut self, path: BezPath, paint: Paint) {
        self.fill(Shape::Path(path), paint);
    }

    /// Fill one line of text centred on `center`.
    pub fn fill_text(&mut self, text: &str, center: Point, font_size: f64, paint: Paint) {
        let measured_width = self.measure_text(text, font_size);
        self.fill(
            Shape::Text(TextRun {
                text: text.to_owned(),
                font_size,
                center,
                measured_width,
            }),
            paint,
        );
    }

    /// Finish recording.
    pub fn finish(self, time_secs: f64) -> FramePlan {
        FramePlan {
            time_secs,
            surface: self.surface,
            passes: self.passes,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plan/builder.rs"]
mod tests;
