use super::*;
use crate::foundation::core::Viewport;
use crate::plan::model::{Pass, Shape};
use crate::scene::surface::Surface;
use crate::text::measure::FixedAdvance;

fn surface() -> Surface {
    Surface::new(Viewport::new(800.0, 600.0, 1.0)).unwrap()
}

#[test]
fn isabel_backing_fits_text_plus_padding() {
    let mut m = FixedAdvance { em_advance: 0.5 };
    let mut b = PlanBuilder::new(surface(), &mut m);
    let cfg = LabelConfig::default();
    let g = paint_label(&mut b, "Isabel", Point::new(300.0, 200.0), 1.0, &cfg);

    assert_eq!(g.font_size, 16.0);
    assert_eq!(g.text_width, 6.0 * 0.5 * 16.0);
    assert!(g.backing.width() >= g.text_width + 24.0);
    assert_eq!(g.backing.height(), 36.0);
    assert_eq!(g.backing.center(), Point::new(300.0, 200.0));
    assert_eq!(g.corner_radius, 12.0);

    let plan = b.finish(0.0);
    assert_eq!(plan.passes.len(), 2);
    match (&plan.passes[0], &plan.passes[1]) {
        (Pass::Shadowed(backing), Pass::Shadowed(text)) => {
            assert_eq!(backing.shadow, cfg.backing_shadow);
            assert!(matches!(backing.ops[0].shape, Shape::RoundedRect { .. }));
            assert_eq!(text.shadow, cfg.text_shadow);
            assert!(matches!(&text.ops[0].shape, Shape::Text(run) if run.text == "Isabel"));
        }
        other => panic!("unexpected passes {other:?}"),
    }
}

#[test]
fn empty_text_still_gets_a_backing() {
    let mut m = FixedAdvance::default();
    let mut b = PlanBuilder::new(surface(), &mut m);
    let g = paint_label(&mut b, "", Point::new(0.0, 0.0), 1.0, &LabelConfig::default());
    assert_eq!(g.text_width, 0.0);
    assert_eq!(g.backing.width(), 24.0);
    assert_eq!(g.backing.height(), 36.0);
    assert_eq!(g.corner_radius, 12.0);
}

#[test]
fn long_text_grows_backing_and_scale_floors_font() {
    let mut m = FixedAdvance::default();
    let mut b = PlanBuilder::new(surface(), &mut m);
    let cfg = LabelConfig::default();
    let short = label_geometry(&mut b, "Ana", Point::ZERO, 1.0, &cfg);
    let long = label_geometry(&mut b, "Angelina Angelina Angelina", Point::ZERO, 1.0, &cfg);
    assert!(long.backing.width() > short.backing.width());

    let scaled = label_geometry(&mut b, "Ana", Point::ZERO, 1.3, &cfg);
    assert_eq!(scaled.font_size, 20.0);
    assert!((scaled.backing.height() - 36.0 * 1.3).abs() < 1e-9);
}

#[test]
fn corner_radius_clamps_to_small_backings() {
    let mut m = FixedAdvance::default();
    let mut b = PlanBuilder::new(surface(), &mut m);
    let g = label_geometry(&mut b, "", Point::ZERO, 0.25, &LabelConfig::default());
    // 6 wide × 9 tall
    assert_eq!(g.corner_radius, 3.0);
}
