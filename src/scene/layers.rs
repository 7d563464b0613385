//! Painters for the background and ambient layers, back to front.
//!
//! Each `paint_*` function records one layer into a [`PlanBuilder`]; the geometry helpers next to
//! them are the closed-form parametrizations those painters use.

use crate::foundation::core::{BezPath, Point, Rect, Rgba, Vec2};
use crate::foundation::math::lerp;
use crate::plan::builder::PlanBuilder;
use crate::plan::model::{BlendMode, LinearGradient, Paint, RadialGradient};
use crate::scene::config::{
    BandConfig, GlowConfig, GradientStop, GroundShadowConfig, ReflectionConfig, SkyConfig,
    SparkleConfig, SunConfig, VignetteConfig, WaveConfig,
};
use crate::scene::layout::SceneLayout;
use crate::scene::particles::ParticleField;

fn linear(start: Point, end: Point, stops: &[GradientStop]) -> Paint {
    Paint::Linear(LinearGradient {
        start,
        end,
        stops: stops.to_vec(),
    })
}

fn radial(center: Point, inner: f64, outer: f64, stops: &[GradientStop]) -> Paint {
    Paint::Radial(RadialGradient {
        start_center: center,
        start_radius: inner,
        end_center: center,
        end_radius: outer,
        stops: stops.to_vec(),
    })
}

/// Sky stops at time `t`, channels floored to integers.
pub fn sky_stops(cfg: &SkyConfig, t: f64) -> Vec<GradientStop> {
    let pulse = 0.5 + 0.5 * (cfg.pulse_rate * t).sin();
    let channel = |base: f64, swing: f64| (base + swing * pulse).floor().clamp(0.0, 255.0) as u8;
    cfg.stops
        .iter()
        .map(|s| {
            GradientStop::new(
                s.offset,
                Rgba::opaque(
                    channel(s.base[0], s.swing[0]),
                    channel(s.base[1], s.swing[1]),
                    channel(s.base[2], s.swing[2]),
                ),
            )
        })
        .collect()
}

/// Fill the viewport with the pulsing sky gradient.
pub fn paint_sky(b: &mut PlanBuilder<'_>, l: &SceneLayout, cfg: &SkyConfig, t: f64) {
    let paint = linear(
        Point::ZERO,
        Point::new(0.0, l.horizon),
        &sky_stops(cfg, t),
    );
    b.fill_rect(0.0, 0.0, l.width, l.height, paint);
}

/// Sun centre and disk radius at time `t`.
pub fn sun_disk(l: &SceneLayout, cfg: &SunConfig, t: f64) -> (Point, f64) {
    let center = Point::new(
        l.width * cfg.x_frac,
        l.horizon - l.height * cfg.lift_frac + cfg.bob_amplitude * (cfg.bob_rate * t).sin(),
    );
    (center, l.min_side() * cfg.radius_frac)
}

/// Sun halo, then the disk on top.
pub fn paint_sun(b: &mut PlanBuilder<'_>, l: &SceneLayout, cfg: &SunConfig, t: f64) {
    let (c, r) = sun_disk(l, cfg, t);
    let glow_r = r * cfg.glow_outer;
    b.fill_circle(
        c,
        glow_r,
        radial(c, r * cfg.glow_inner, glow_r, &cfg.glow_stops),
    );
    b.fill_circle(c, r, radial(c, r * cfg.disk_inner, r, &cfg.disk_stops));
}

/// Fill a full-width band between `top` and `bottom` with a vertical gradient.
pub fn paint_band(b: &mut PlanBuilder<'_>, l: &SceneLayout, top: f64, bottom: f64, cfg: &BandConfig) {
    let paint = linear(Point::new(0.0, top), Point::new(0.0, bottom), &cfg.stops);
    b.fill_rect(0.0, top, l.width, bottom - top, paint);
}

/// Rectangle of reflection band `i` at time `t`.
pub fn reflection_band(l: &SceneLayout, cfg: &ReflectionConfig, sun_x: f64, i: u32, t: f64) -> Rect {
    let last = f64::from(cfg.bands.saturating_sub(1).max(1));
    let k = f64::from(i) / last;
    let fi = f64::from(i);
    let y = lerp(l.horizon + cfg.top_inset, l.beach - cfg.bottom_inset, k);
    let wave = ((cfg.wave_rates[0] * t + cfg.wave_band_phase[0] * fi).sin()
        + (cfg.wave_rates[1] * t + cfg.wave_band_phase[1] * fi).sin())
        * 0.5;
    let widest = l.width * cfg.width_frac;
    let width = lerp(widest * cfg.min_width_frac, widest, 1.0 - k)
        * (1.0 - cfg.width_wobble + cfg.width_wobble * wave);
    let thick = cfg.thick_every > 0 && i % cfg.thick_every == 0;
    let height = cfg.band_height + if thick { 1.0 } else { 0.0 };
    let y0 = y + cfg.vertical_wobble * wave;
    Rect::new(sun_x - width / 2.0, y0, sun_x + width / 2.0, y0 + height)
}

/// Stack of shimmering reflection bands under the sun.
pub fn paint_reflection(
    b: &mut PlanBuilder<'_>,
    l: &SceneLayout,
    cfg: &ReflectionConfig,
    sun_x: f64,
    t: f64,
) {
    let paint = linear(
        Point::new(sun_x, l.horizon),
        Point::new(sun_x, l.beach),
        &cfg.stops,
    );
    b.save();
    b.set_global_alpha(cfg.alpha);
    for i in 0..cfg.bands {
        let r = reflection_band(l, cfg, sun_x, i, t);
        b.fill_rect(r.x0, r.y0, r.width(), r.height(), paint.clone());
    }
    b.restore();
}

/// Closed outline of wave band `i` at time `t`.
pub fn wave_path(l: &SceneLayout, cfg: &WaveConfig, i: u32, t: f64) -> BezPath {
    let fi = f64::from(i);
    let y = l.horizon + fi / f64::from(cfg.bands.max(1)) * (l.beach - l.horizon);
    let amp = cfg.base_amplitude + cfg.amplitude_per_band * fi;
    let phase = cfg.time_rate * t + cfg.band_phase * fi;

    let mut path = BezPath::new();
    let mut n = 0u32;
    loop {
        let x = f64::from(n) * cfg.sample_step;
        if x > l.width {
            break;
        }
        let p = Point::new(x, y + (cfg.spatial_freq * x + phase).sin() * amp * cfg.amplitude_scale);
        if n == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
        n += 1;
    }
    path.line_to((l.width, y + cfg.thickness));
    path.line_to((0.0, y + cfg.thickness));
    path.close_path();
    path
}

pub fn paint_waves(b: &mut PlanBuilder<'_>, l: &SceneLayout, cfg: &WaveConfig, t: f64) {
    b.save();
    b.set_global_alpha(cfg.alpha);
    for i in 0..cfg.bands {
        b.fill_path(wave_path(l, cfg, i, t), Paint::Solid(cfg.color));
    }
    b.restore();
}

/// Radial darkening over the whole viewport.
pub fn paint_vignette(b: &mut PlanBuilder<'_>, l: &SceneLayout, cfg: &VignetteConfig) {
    let m = l.min_side();
    let c = Point::new(l.center_x, l.height * cfg.center_y_frac);
    b.fill_rect(
        0.0,
        0.0,
        l.width,
        l.height,
        radial(c, m * cfg.inner, m * cfg.outer, &cfg.stops),
    );
}

/// Advance the particle phases and paint every sparkle with the screen blend.
pub fn paint_sparkles(
    b: &mut PlanBuilder<'_>,
    l: &SceneLayout,
    field: &mut ParticleField,
    cfg: &SparkleConfig,
    t: f64,
) {
    field.advance(cfg);
    b.save();
    b.set_blend(BlendMode::Screen);
    for s in field.sparkles(t, l.width, l.height, cfg) {
        b.fill_circle(
            s.center,
            s.radius,
            Paint::Solid(Rgba::new(255, 255, 255, s.alpha)),
        );
    }
    b.restore();
}

/// One contact ellipse under each figure.
pub fn paint_ground_shadows(b: &mut PlanBuilder<'_>, l: &SceneLayout, cfg: &GroundShadowConfig) {
    b.save();
    b.set_global_alpha(cfg.alpha);
    for x in [l.left_x, l.right_x] {
        b.fill_ellipse(
            Point::new(x, l.sit + cfg.drop),
            Vec2::new(cfg.radius_x, cfg.radius_y),
            Paint::Solid(cfg.color),
        );
    }
    b.restore();
}

/// Centre and radius of the ambient glow at time `t`.
pub fn glow_disk(l: &SceneLayout, cfg: &GlowConfig, t: f64) -> (Point, f64) {
    (
        Point::new(l.center_x, l.sit - cfg.rise),
        cfg.radius + cfg.breathe_amplitude * (cfg.breathe_rate * t).sin(),
    )
}

pub fn paint_glow(b: &mut PlanBuilder<'_>, l: &SceneLayout, cfg: &GlowConfig, t: f64) {
    let (c, r) = glow_disk(l, cfg, t);
    b.save();
    b.set_blend(BlendMode::Screen);
    b.fill_circle(c, r, radial(c, 0.0, r, &cfg.stops));
    b.restore();
}

#[cfg(test)]
#[path = "../../tests/unit/scene/layers.rs"]
mod tests;
