use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::foundation::core::{Affine, BezPath, Rect, Rgba, Vec2};
use crate::foundation::error::{ShorelineError, ShorelineResult};
use crate::plan::model::{BlendMode, DrawOp, FramePlan, Paint, Pass, ShadowPass, Shape, TextRun};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::blur::{blur_rgba8_premul, gaussian_kernel_q16, shadow_blur_params};
use crate::render::composite::tint_coverage_in_place;
use crate::scene::config::LabelConfig;
use crate::text::layout::{TextBrush, TextLayoutEngine};
use crate::text::measure::TextMeasure;

/// Options for [`CpuBackend`].
#[derive(Debug, Clone, PartialEq)]
pub struct CpuBackendOpts {
    /// If set, the frame is cleared to this straight-alpha RGBA8 color before drawing.
    pub clear_rgba: Option<[u8; 4]>,
    /// Family list used for label text.
    pub font_family: String,
    /// Font file used instead of system fonts.
    pub font_path: Option<PathBuf>,
}

impl Default for CpuBackendOpts {
    fn default() -> Self {
        Self {
            clear_rgba: Some([0, 0, 0, 255]),
            font_family: LabelConfig::default().font_family,
            font_path: None,
        }
    }
}

impl CpuBackendOpts {
    /// Options drawing label text the way `labels` asks for.
    pub fn for_labels(labels: &LabelConfig) -> Self {
        Self {
            font_family: labels.font_family.clone(),
            font_path: labels.font_path.clone(),
            ..Self::default()
        }
    }

    /// Return options with a configured clear color.
    pub fn with_clear_rgba(mut self, clear: Option<[u8; 4]>) -> Self {
        self.clear_rgba = clear;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct FontKey {
    blob: u64,
    index: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct BlurKernelKey {
    radius_px: u32,
    sigma_bits: u32,
}

/// Device-pixel rectangle a drop shadow is rasterized into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ShadowRegion {
    x: u32,
    y: u32,
    width: u16,
    height: u16,
}

/// CPU raster backend powered by `vello_cpu`.
pub struct CpuBackend {
    opts: CpuBackendOpts,
    ctx: Option<vello_cpu::RenderContext>,
    text: TextLayoutEngine,
    font_cache: HashMap<FontKey, vello_cpu::peniko::FontData>,
    blur_kernel_cache: HashMap<BlurKernelKey, Arc<Vec<u32>>>,
    blur_scratch_a: Vec<u8>,
    blur_scratch_b: Vec<u8>,
}

impl CpuBackend {
    /// Create a backend; fails only when a configured font file cannot be loaded.
    pub fn new(opts: CpuBackendOpts) -> ShorelineResult<Self> {
        let text = match &opts.font_path {
            Some(path) => TextLayoutEngine::with_font_file(path)?,
            None => TextLayoutEngine::new(opts.font_family.clone()),
        };
        Ok(Self {
            opts,
            ctx: None,
            text,
            font_cache: HashMap::new(),
            blur_kernel_cache: HashMap::new(),
            blur_scratch_a: Vec::new(),
            blur_scratch_b: Vec::new(),
        })
    }

    /// Options the backend was built with.
    pub fn opts(&self) -> &CpuBackendOpts {
        &self.opts
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> ShorelineResult<R>,
    ) -> ShorelineResult<R> {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx);
        self.ctx = Some(ctx);
        out
    }

    fn draw_op(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        op: &DrawOp,
        device: Affine,
        blend: BlendMode,
    ) -> ShorelineResult<()> {
        ctx.set_blend_mode(blend_to_cpu(blend));
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(affine_to_cpu(device * op.transform));

        match &op.shape {
            Shape::Text(run) => self.draw_text(ctx, run, &op.paint, device * op.transform),
            Shape::Rect(r) => {
                set_paint(ctx, &op.paint);
                ctx.fill_rect(&rect_to_cpu(*r));
                Ok(())
            }
            Shape::RoundedRect { rect, radius } => {
                set_paint(ctx, &op.paint);
                ctx.fill_path(&shape_to_cpu(&kurbo::RoundedRect::from_rect(*rect, *radius)));
                Ok(())
            }
            Shape::Circle { center, radius } => {
                set_paint(ctx, &op.paint);
                ctx.fill_path(&shape_to_cpu(&kurbo::Circle::new(*center, *radius)));
                Ok(())
            }
            Shape::Ellipse { center, radii } => {
                set_paint(ctx, &op.paint);
                ctx.fill_path(&shape_to_cpu(&kurbo::Ellipse::new(*center, *radii, 0.0)));
                Ok(())
            }
            Shape::Path(path) => {
                set_paint(ctx, &op.paint);
                ctx.fill_path(&bezpath_to_cpu(path));
                Ok(())
            }
        }
    }

    /// Draw a single line of text centred on `run.center` in the op's local space.
    fn draw_text(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        run: &TextRun,
        paint: &Paint,
        transform: Affine,
    ) -> ShorelineResult<()> {
        if run.text.is_empty() || !(run.font_size.is_finite() && run.font_size > 0.0) {
            return Ok(());
        }
        let color = text_color(paint);
        let layout = self.text.layout_line(&run.text, run.font_size as f32, color);
        let origin = Vec2::new(
            run.center.x - f64::from(layout.width()) * 0.5,
            run.center.y - f64::from(layout.height()) * 0.5,
        );
        ctx.set_transform(affine_to_cpu(transform * Affine::translate(origin)));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };
                let brush = glyph_run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let run_font = glyph_run.run().font();
                let font = self.font_data(run_font.data.id(), run_font.index, run_font.data.data());
                let glyphs = glyph_run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&font)
                    .font_size(glyph_run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        Ok(())
    }

    fn font_data(&mut self, blob: u64, index: u32, bytes: &[u8]) -> vello_cpu::peniko::FontData {
        self.font_cache
            .entry(FontKey { blob, index })
            .or_insert_with(|| {
                vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(bytes.to_vec()),
                    index,
                )
            })
            .clone()
    }

    fn kernel(&mut self, radius_px: u32, sigma: f32) -> ShorelineResult<Arc<Vec<u32>>> {
        let key = BlurKernelKey {
            radius_px,
            sigma_bits: sigma.to_bits(),
        };
        if let Some(k) = self.blur_kernel_cache.get(&key) {
            return Ok(k.clone());
        }
        let k = Arc::new(gaussian_kernel_q16(radius_px, sigma)?);
        self.blur_kernel_cache.insert(key, k.clone());
        Ok(k)
    }

    /// Rasterize the blurred silhouette of `pass` beneath whatever `ctx` draws next.
    fn draw_shadow(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        pass: &ShadowPass,
        device: Affine,
        pixel_ratio: f64,
        frame: (u32, u32),
    ) -> ShorelineResult<()> {
        let shadow = pass.shadow;
        if shadow.color.a <= 0.0 || pass.ops.is_empty() {
            return Ok(());
        }
        let (radius, sigma) = shadow_blur_params(shadow.blur, pixel_ratio);
        let offset = Vec2::new(shadow.offset_x, shadow.offset_y) * pixel_ratio;
        let Some(region) = shadow_region(pass, device, offset, radius, frame) else {
            return Ok(());
        };

        let place = Affine::translate(offset - Vec2::new(f64::from(region.x), f64::from(region.y)));
        let mut silhouette = vello_cpu::RenderContext::new(region.width, region.height);
        for op in &pass.ops {
            self.draw_op(&mut silhouette, op, place * device, BlendMode::Normal)?;
        }
        silhouette.flush();
        let mut pixmap = vello_cpu::Pixmap::new(region.width, region.height);
        silhouette.render_to_pixmap(&mut pixmap);

        let mut coverage = pixmap.data_as_u8_slice().to_vec();
        tint_coverage_in_place(&mut coverage, shadow.color.to_rgba8());

        let kernel = self.kernel(radius, sigma)?;
        self.blur_scratch_a.resize(coverage.len(), 0);
        self.blur_scratch_b.resize(coverage.len(), 0);
        blur_rgba8_premul(
            &coverage,
            &mut self.blur_scratch_b,
            &mut self.blur_scratch_a,
            u32::from(region.width),
            u32::from(region.height),
            &kernel,
        )?;
        let image = rgba_premul_to_image(&self.blur_scratch_b, region.width, region.height)?;

        let (x, y) = (f64::from(region.x), f64::from(region.y));
        ctx.set_blend_mode(blend_to_cpu(BlendMode::Normal));
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::translate((x, y)));
        ctx.set_paint(image);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            x,
            y,
            x + f64::from(region.width),
            y + f64::from(region.height),
        ));
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }
}

impl RenderBackend for CpuBackend {
    #[tracing::instrument(skip(self, plan), fields(t = plan.time_secs, ops = plan.op_count()))]
    fn render_plan(&mut self, plan: &FramePlan) -> ShorelineResult<FrameRGBA> {
        let (width, height) = plan.surface.backing_size();
        if plan.surface.is_empty() {
            return Ok(FrameRGBA::transparent(width, height));
        }
        let w16: u16 = width
            .try_into()
            .map_err(|_| ShorelineError::render("frame width exceeds u16"))?;
        let h16: u16 = height
            .try_into()
            .map_err(|_| ShorelineError::render("frame height exceeds u16"))?;
        let device = plan.surface.transform();
        let pixel_ratio = plan.surface.pixel_ratio();
        let clear = self.opts.clear_rgba;

        let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
        self.with_ctx_mut(w16, h16, |this, ctx| {
            if let Some([r, g, b, a]) = clear {
                ctx.set_blend_mode(blend_to_cpu(BlendMode::Normal));
                ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                    0.0,
                    0.0,
                    f64::from(width),
                    f64::from(height),
                ));
            }

            for pass in &plan.passes {
                if let Pass::Shadowed(shadowed) = pass {
                    this.draw_shadow(ctx, shadowed, device, pixel_ratio, (width, height))?;
                }
                for op in pass.ops() {
                    this.draw_op(ctx, op, device, op.blend)?;
                }
            }

            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            Ok(())
        })?;

        Ok(FrameRGBA {
            width,
            height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn text_measure(&mut self) -> &mut dyn TextMeasure {
        &mut self.text
    }
}

/// Union of the ops' device bounds, shifted by the shadow offset, grown by the blur radius and
/// clipped to the frame.
fn shadow_region(
    pass: &ShadowPass,
    device: Affine,
    offset: Vec2,
    blur_radius: u32,
    (frame_w, frame_h): (u32, u32),
) -> Option<ShadowRegion> {
    let bounds = pass
        .ops
        .iter()
        .map(|op| (device * op.transform).transform_rect_bbox(op.shape.bounds()))
        .reduce(|a, b| a.union(b))?;
    let grown = (bounds + offset)
        .inflate(f64::from(blur_radius), f64::from(blur_radius))
        .expand()
        .intersect(Rect::new(0.0, 0.0, f64::from(frame_w), f64::from(frame_h)));
    if !(grown.width() >= 1.0 && grown.height() >= 1.0) {
        return None;
    }
    Some(ShadowRegion {
        x: grown.x0 as u32,
        y: grown.y0 as u32,
        width: grown.width().min(f64::from(u16::MAX)) as u16,
        height: grown.height().min(f64::from(u16::MAX)) as u16,
    })
}

fn text_color(paint: &Paint) -> TextBrush {
    let c = paint
        .colors()
        .first()
        .copied()
        .unwrap_or_else(Rgba::transparent);
    TextBrush {
        r: c.r,
        g: c.g,
        b: c.b,
        a: c.alpha_u8(),
    }
}

fn set_paint(ctx: &mut vello_cpu::RenderContext, paint: &Paint) {
    match paint {
        Paint::Solid(c) => ctx.set_paint(color_to_cpu(*c)),
        Paint::Linear(g) => ctx.set_paint(
            vello_cpu::peniko::Gradient::new_linear(
                vello_cpu::kurbo::Point::new(g.start.x, g.start.y),
                vello_cpu::kurbo::Point::new(g.end.x, g.end.y),
            )
            .with_stops(color_stops(&g.stops).as_slice()),
        ),
        Paint::Radial(g) => ctx.set_paint(
            vello_cpu::peniko::Gradient::new_two_point_radial(
                vello_cpu::kurbo::Point::new(g.start_center.x, g.start_center.y),
                g.start_radius as f32,
                vello_cpu::kurbo::Point::new(g.end_center.x, g.end_center.y),
                g.end_radius as f32,
            )
            .with_stops(color_stops(&g.stops).as_slice()),
        ),
    }
}

fn color_to_cpu(c: Rgba) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.alpha_u8())
}

fn color_stops(
    stops: &[crate::scene::config::GradientStop],
) -> Vec<vello_cpu::peniko::ColorStop> {
    stops
        .iter()
        .map(|s| vello_cpu::peniko::ColorStop::from((s.offset, color_to_cpu(s.color))))
        .collect()
}

fn blend_to_cpu(blend: BlendMode) -> vello_cpu::peniko::BlendMode {
    use vello_cpu::peniko::{Compose, Mix};
    match blend {
        BlendMode::Normal => vello_cpu::peniko::BlendMode::new(Mix::Normal, Compose::SrcOver),
        BlendMode::Screen => vello_cpu::peniko::BlendMode::new(Mix::Screen, Compose::SrcOver),
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn shape_to_cpu(shape: &impl kurbo::Shape) -> vello_cpu::kurbo::BezPath {
    bezpath_to_cpu(&shape.to_path(0.1))
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn rgba_premul_to_image(
    bytes: &[u8],
    width: u16,
    height: u16,
) -> ShorelineResult<vello_cpu::Image> {
    if bytes.len() != usize::from(width) * usize::from(height) * 4 {
        return Err(ShorelineError::render("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect();
    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, width, height, true);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
