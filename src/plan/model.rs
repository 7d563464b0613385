use crate::foundation::core::{Affine, BezPath, Point, Rect, Rgba, Vec2};
use crate::scene::config::{GradientStop, ShadowStyle};
use crate::scene::surface::Surface;

/// How a draw operation combines with what is already on the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Source-over compositing.
    #[default]
    Normal,
    /// Additive-looking "screen" blend: overlapping draws brighten instead of occluding.
    Screen,
}

/// Linear gradient between two points, in the op's local space.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LinearGradient {
    /// Where offset 0 sits.
    pub start: Point,
    /// Where offset 1 sits.
    pub end: Point,
    /// Color stops, ascending.
    pub stops: Vec<GradientStop>,
}

/// Two-circle radial gradient (canvas `createRadialGradient` semantics).
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RadialGradient {
    /// Centre of the inner circle.
    pub start_center: Point,
    /// Radius of the inner circle.
    pub start_radius: f64,
    /// Centre of the outer circle.
    pub end_center: Point,
    /// Radius of the outer circle.
    pub end_radius: f64,
    /// Color stops, ascending.
    pub stops: Vec<GradientStop>,
}

/// Fill source of a draw operation.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Paint {
    /// Uniform color.
    Solid(Rgba),
    /// Linear gradient.
    Linear(LinearGradient),
    /// Radial gradient.
    Radial(RadialGradient),
}

impl Paint {
    /// Same paint with every color's alpha multiplied by `k` (canvas global alpha).
    pub fn with_alpha_mul(self, k: f32) -> Self {
        if k >= 1.0 {
            return self;
        }
        let scale = |stops: Vec<GradientStop>| -> Vec<GradientStop> {
            stops
                .into_iter()
                .map(|s| GradientStop::new(s.offset, s.color.with_alpha_mul(k)))
                .collect()
        };
        match self {
            Self::Solid(c) => Self::Solid(c.with_alpha_mul(k)),
            Self::Linear(g) => Self::Linear(LinearGradient {
                stops: scale(g.stops),
                ..g
            }),
            Self::Radial(g) => Self::Radial(RadialGradient {
                stops: scale(g.stops),
                ..g
            }),
        }
    }

    /// Every color appearing in the paint.
    pub fn colors(&self) -> Vec<Rgba> {
        match self {
            Self::Solid(c) => vec![*c],
            Self::Linear(g) => g.stops.iter().map(|s| s.color).collect(),
            Self::Radial(g) => g.stops.iter().map(|s| s.color).collect(),
        }
    }
}

/// A line of text centred on a point (canvas `textAlign = center`, `textBaseline = middle`).
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TextRun {
    /// Text to draw.
    pub text: String,
    /// Font size in viewport units.
    pub font_size: f64,
    /// Visual centre of the line.
    pub center: Point,
    /// Advance width measured when the plan was recorded.
    pub measured_width: f64,
}

/// Geometry of a draw operation, in the op's local space.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// Axis-aligned rectangle.
    Rect(Rect),
    /// Rectangle with uniformly rounded corners.
    RoundedRect {
        /// Outer bounds.
        rect: Rect,
        /// Corner radius.
        radius: f64,
    },
    /// Full circle.
    Circle {
        /// Centre.
        center: Point,
        /// Radius.
        radius: f64,
    },
    /// Axis-aligned ellipse.
    Ellipse {
        /// Centre.
        center: Point,
        /// Horizontal and vertical radii.
        radii: Vec2,
    },
    /// Arbitrary closed path (non-zero fill).
    Path(BezPath),
    /// A line of text.
    Text(TextRun),
}

impl Shape {
    /// Local-space bounds; text bounds are estimated from the measured width and font size.
    pub fn bounds(&self) -> Rect {
        use kurbo::Shape as _;
        match self {
            Self::Rect(r) => *r,
            Self::RoundedRect { rect, .. } => *rect,
            Self::Circle { center, radius } => {
                Rect::from_center_size(*center, (radius * 2.0, radius * 2.0))
            }
            Self::Ellipse { center, radii } => {
                Rect::from_center_size(*center, (radii.x * 2.0, radii.y * 2.0))
            }
            Self::Path(p) => p.bounding_box(),
            Self::Text(t) => Rect::from_center_size(
                t.center,
                (t.measured_width + t.font_size, t.font_size * 2.0),
            ),
        }
    }
}

/// One recorded fill.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DrawOp {
    /// Geometry in local space.
    pub shape: Shape,
    /// Fill source, with global alpha already applied.
    pub paint: Paint,
    /// Local space to viewport units.
    pub transform: Affine,
    /// Global alpha that was in effect (already folded into `paint`).
    pub alpha: f32,
    /// Compositing mode.
    pub blend: BlendMode,
}

/// Consecutive ops drawn over a shared blurred drop shadow.
///
/// The pass casts one shadow from the union of its ops' coverage, unlike canvas, which blurs each
/// fill separately. Where the shapes of one pass overlap, the shadow is therefore lighter than
/// the sum of per-fill shadows.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ShadowPass {
    /// Shadow styling in viewport units.
    pub shadow: ShadowStyle,
    /// Ops casting the shadow; drawn after it.
    pub ops: Vec<DrawOp>,
}

/// A step of a [`FramePlan`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pass {
    /// Plain fills, in order.
    Draw(Vec<DrawOp>),
    /// Fills with a drop shadow beneath them.
    Shadowed(ShadowPass),
}

impl Pass {
    /// Ops of this pass, in paint order.
    pub fn ops(&self) -> &[DrawOp] {
        match self {
            Self::Draw(ops) => ops,
            Self::Shadowed(p) => &p.ops,
        }
    }
}

/// Backend-agnostic description of one frame, in viewport units.
///
/// Paint order is the order of `passes` and of the ops inside each pass.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FramePlan {
    /// Elapsed time the frame was painted for, in seconds.
    pub time_secs: f64,
    /// Surface the plan targets.
    pub surface: Surface,
    /// Passes, back to front.
    pub passes: Vec<Pass>,
}

impl FramePlan {
    /// All ops in paint order.
    pub fn ops(&self) -> impl Iterator<Item = &DrawOp> {
        self.passes.iter().flat_map(|p| p.ops().iter())
    }

    /// Total number of recorded ops.
    pub fn op_count(&self) -> usize {
        self.passes.iter().map(|p| p.ops().len()).sum()
    }

    /// JSON dump for inspection.
    pub fn to_json_pretty(&self) -> crate::foundation::error::ShorelineResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            crate::foundation::error::ShorelineError::serde(format!("serialize frame plan: {e}"))
        })
    }
}
