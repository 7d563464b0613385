use super::*;
use crate::foundation::core::{Affine, Vec2, Viewport};
use crate::plan::model::{Pass, Shape};
use crate::scene::surface::Surface;
use crate::text::measure::FixedAdvance;

#[test]
fn blocks_scale_with_figure() {
    let one: Vec<Rect> = figure_blocks(1.0).collect();
    let two: Vec<Rect> = figure_blocks(2.0).collect();
    assert_eq!(one.len(), 10);
    assert_eq!(one[0], Rect::new(-22.0, -180.0, 22.0, -136.0));
    assert_eq!(one[9], Rect::new(2.0, 10.0, 34.0, 24.0));
    for (a, b) in one.iter().zip(&two) {
        assert_eq!(a.width() * 2.0, b.width());
        assert_eq!(a.y0 * 2.0, b.y0);
    }
}

#[test]
fn tilts_rock_in_opposite_directions() {
    let cfg = FigureConfig::default();
    assert_eq!(figure_tilts(&cfg, 0.0), (-0.05, 0.04));
    for k in 0..100 {
        let t = f64::from(k) * 0.37;
        let (l, r) = figure_tilts(&cfg, t);
        assert!(((l + 0.05) + (r - 0.04)).abs() < 1e-12);
        assert!((l + 0.05).abs() <= 0.015 + 1e-12);
    }
}

#[test]
fn figure_is_one_shadowed_pass_with_translucent_arms() {
    let surface = Surface::new(Viewport::new(400.0, 400.0, 1.0)).unwrap();
    let mut m = FixedAdvance::default();
    let mut b = PlanBuilder::new(surface, &mut m);
    let cfg = FigureConfig::default();
    paint_figure(&mut b, Point::new(100.0, 300.0), 1.0, 0.1, &cfg);
    let plan = b.finish(0.0);

    assert_eq!(plan.passes.len(), 1);
    let Pass::Shadowed(pass) = &plan.passes[0] else {
        panic!("figure should cast a shadow");
    };
    assert_eq!(pass.shadow, cfg.shadow);
    assert_eq!(pass.ops.len(), 10);
    let alphas: Vec<f32> = pass.ops.iter().map(|op| op.alpha).collect();
    assert_eq!(
        alphas,
        vec![1.0, 1.0, 0.95, 0.95, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]
    );
    let expected = Affine::translate(Vec2::new(100.0, 300.0)) * Affine::rotate(0.1);
    assert!(pass.ops.iter().all(|op| op.transform == expected));
    assert!(matches!(pass.ops[0].shape, Shape::Rect(_)));
}
