use super::*;
use crate::foundation::core::Viewport;
use crate::plan::model::Shape;
use crate::scene::config::LayoutConfig;
use crate::scene::surface::Surface;
use crate::text::measure::FixedAdvance;

fn layout(w: f64, h: f64) -> SceneLayout {
    SceneLayout::compute(w, h, &LayoutConfig::default())
}

#[test]
fn sky_stops_are_floored_default_colors_at_zero() {
    // pulse(0) = 0.5
    let stops = sky_stops(&SkyConfig::default(), 0.0);
    assert_eq!(stops.len(), 3);
    assert_eq!(stops[0].color, Rgba::opaque(47, 46, 116));
    assert_eq!(stops[1].color, Rgba::opaque(255, 95, 125));
    assert_eq!(stops[2].color, Rgba::opaque(255, 185, 95));
    assert_eq!(
        stops.iter().map(|s| s.offset).collect::<Vec<_>>(),
        vec![0.0, 0.5, 1.0]
    );
}

#[test]
fn sky_colors_change_by_at_most_one_step_over_small_dt() {
    let cfg = SkyConfig::default();
    for k in 0..400 {
        let t = f64::from(k) * 0.173;
        let a = sky_stops(&cfg, t);
        let b = sky_stops(&cfg, t + 1e-3);
        for (x, y) in a.iter().zip(&b) {
            for (ca, cb) in [(x.color.r, y.color.r), (x.color.g, y.color.g), (x.color.b, y.color.b)] {
                assert!(ca.abs_diff(cb) <= 1, "t={t}");
            }
        }
    }
}

#[test]
fn sun_stays_within_bob_of_rest_height() {
    let l = layout(1920.0, 1080.0);
    let cfg = SunConfig::default();
    let rest = l.horizon - 0.08 * 1080.0;
    for k in 0..1000 {
        let (c, r) = sun_disk(&l, &cfg, f64::from(k) * 0.05);
        assert_eq!(c.x, 960.0);
        assert!((c.y - rest).abs() <= 6.0 + 1e-9);
        assert!((r - 0.085 * 1080.0).abs() < 1e-9);
    }
}

#[test]
fn reflection_bands_span_ocean_and_narrow_with_depth() {
    let l = layout(1000.0, 1000.0);
    let cfg = ReflectionConfig::default();
    let first = reflection_band(&l, &cfg, 500.0, 0, 0.0);
    let last = reflection_band(&l, &cfg, 500.0, 37, 0.0);
    // wave(0, 0) = 0 → y exact at band 0, width scaled by 0.85
    assert!((first.y0 - (560.0 + 8.0)).abs() < 1e-9);
    assert!((first.width() - 300.0 * 0.85).abs() < 1e-9);
    assert_eq!(first.height(), 3.0);
    assert!(last.width() < first.width());
    assert!((first.center().x - 500.0).abs() < 1e-9);

    let b1 = reflection_band(&l, &cfg, 500.0, 1, 0.0);
    assert_eq!(b1.height(), 2.0);
}

#[test]
fn wave_path_samples_every_step_and_closes() {
    let l = layout(100.0, 100.0);
    let cfg = WaveConfig::default();
    let path = wave_path(&l, &cfg, 0, 0.0);
    // x = 0, 18, 36, 54, 72, 90 then two bottom corners and close
    assert_eq!(path.elements().len(), 6 + 2 + 1);
    let bbox = kurbo::Shape::bounding_box(&path);
    assert_eq!(bbox.x0, 0.0);
    assert_eq!(bbox.x1, 100.0);
    assert!((bbox.y1 - (l.horizon + 6.0)).abs() < 1e-9);
}

#[test]
fn glow_breathes_around_base_radius() {
    let l = layout(800.0, 600.0);
    let cfg = GlowConfig::default();
    for k in 0..200 {
        let (c, r) = glow_disk(&l, &cfg, f64::from(k) * 0.1);
        assert_eq!(c, Point::new(400.0, l.sit - 90.0));
        assert!((112.0..=128.0).contains(&r));
    }
}

#[test]
fn layer_painters_record_expected_ops() {
    let surface = Surface::new(Viewport::new(400.0, 300.0, 1.0)).unwrap();
    let l = layout(400.0, 300.0);
    let mut m = FixedAdvance::default();
    let mut b = PlanBuilder::new(surface, &mut m);
    let sparkle_cfg = SparkleConfig {
        count: 5,
        ..SparkleConfig::default()
    };
    let mut field = ParticleField::seeded(1, &sparkle_cfg);

    paint_reflection(&mut b, &l, &ReflectionConfig::default(), 200.0, 0.0);
    paint_waves(&mut b, &l, &WaveConfig::default(), 0.0);
    paint_sparkles(&mut b, &l, &mut field, &sparkle_cfg, 0.0);
    paint_ground_shadows(&mut b, &l, &GroundShadowConfig::default());
    let plan = b.finish(0.0);

    let ops: Vec<_> = plan.ops().collect();
    assert_eq!(ops.len(), 38 + 30 + 5 + 2);
    assert!(ops[..38].iter().all(|op| op.alpha == 0.85));
    assert!(ops[38..68].iter().all(|op| op.alpha == 0.35 && matches!(op.shape, Shape::Path(_))));
    assert!(ops[68..73].iter().all(|op| op.blend == BlendMode::Screen));
    assert!(ops[73..].iter().all(|op| op.alpha == 0.5 && op.blend == BlendMode::Normal));
    assert!(field.particles().iter().all(|p| p.phase > 0.0));
}
