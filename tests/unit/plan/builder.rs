use super::*;
use crate::foundation::core::{Rgba, Viewport};
use crate::text::measure::FixedAdvance;

fn surface() -> Surface {
    Surface::new(Viewport::new(200.0, 100.0, 1.0)).unwrap()
}

fn white() -> Paint {
    Paint::Solid(Rgba::opaque(255, 255, 255))
}

fn shadow(blur: f64) -> ShadowStyle {
    ShadowStyle {
        color: Rgba::new(0, 0, 0, 0.5),
        blur,
        offset_x: 0.0,
        offset_y: 4.0,
    }
}

#[test]
fn save_restore_round_trips_state() {
    let mut m = FixedAdvance::default();
    let mut b = PlanBuilder::new(surface(), &mut m);
    b.save();
    b.translate(10.0, 20.0);
    b.rotate(0.3);
    b.set_global_alpha(0.5);
    b.set_blend(BlendMode::Screen);
    b.fill_rect(0.0, 0.0, 1.0, 1.0, white());
    b.restore();
    b.fill_rect(0.0, 0.0, 1.0, 1.0, white());

    let plan = b.finish(1.0);
    let ops: Vec<_> = plan.ops().collect();
    assert_eq!(ops.len(), 2);
    assert_eq!(
        ops[0].transform,
        Affine::translate(Vec2::new(10.0, 20.0)) * Affine::rotate(0.3)
    );
    assert_eq!(ops[0].blend, BlendMode::Screen);
    assert_eq!(ops[0].paint, Paint::Solid(Rgba::new(255, 255, 255, 0.5)));
    assert_eq!(ops[1].transform, Affine::IDENTITY);
    assert_eq!(ops[1].blend, BlendMode::Normal);
    assert_eq!(ops[1].alpha, 1.0);
    assert_eq!(plan.time_secs, 1.0);
}

#[test]
fn unbalanced_restore_resets_to_defaults() {
    let mut m = FixedAdvance::default();
    let mut b = PlanBuilder::new(surface(), &mut m);
    b.translate(5.0, 5.0);
    b.restore();
    assert_eq!(b.transform(), Affine::IDENTITY);
}

#[test]
fn global_alpha_is_clamped() {
    let mut m = FixedAdvance::default();
    let mut b = PlanBuilder::new(surface(), &mut m);
    b.set_global_alpha(3.0);
    b.fill_rect(0.0, 0.0, 1.0, 1.0, white());
    b.set_global_alpha(-1.0);
    b.fill_rect(0.0, 0.0, 1.0, 1.0, white());
    let plan = b.finish(0.0);
    let alphas: Vec<f32> = plan.ops().map(|op| op.alpha).collect();
    assert_eq!(alphas, vec![1.0, 0.0]);
}

#[test]
fn consecutive_ops_group_into_passes() {
    let mut m = FixedAdvance::default();
    let mut b = PlanBuilder::new(surface(), &mut m);
    b.fill_rect(0.0, 0.0, 1.0, 1.0, white());
    b.fill_rect(1.0, 0.0, 1.0, 1.0, white());
    b.set_shadow(Some(shadow(10.0)));
    b.fill_rect(2.0, 0.0, 1.0, 1.0, white());
    b.fill_rect(3.0, 0.0, 1.0, 1.0, white());
    b.set_shadow(Some(shadow(20.0)));
    b.fill_rect(4.0, 0.0, 1.0, 1.0, white());
    b.set_shadow(None);
    b.fill_rect(5.0, 0.0, 1.0, 1.0, white());

    let plan = b.finish(0.0);
    assert_eq!(plan.passes.len(), 4);
    assert!(matches!(&plan.passes[0], Pass::Draw(ops) if ops.len() == 2));
    assert!(matches!(&plan.passes[1], Pass::Shadowed(p) if p.ops.len() == 2 && p.shadow.blur == 10.0));
    assert!(matches!(&plan.passes[2], Pass::Shadowed(p) if p.ops.len() == 1 && p.shadow.blur == 20.0));
    assert!(matches!(&plan.passes[3], Pass::Draw(ops) if ops.len() == 1));
    assert_eq!(plan.op_count(), 6);
}

#[test]
fn rounded_rect_radius_is_clamped_to_half_side() {
    let mut m = FixedAdvance::default();
    let mut b = PlanBuilder::new(surface(), &mut m);
    b.fill_rounded_rect(0.0, 0.0, 40.0, 10.0, 12.0, white());
    b.fill_rounded_rect(0.0, 0.0, 40.0, 30.0, 12.0, white());
    let plan = b.finish(0.0);
    let radii: Vec<f64> = plan
        .ops()
        .map(|op| match op.shape {
            Shape::RoundedRect { radius, .. } => radius,
            _ => f64::NAN,
        })
        .collect();
    assert_eq!(radii, vec![5.0, 12.0]);
}

#[test]
fn text_records_measured_width() {
    let mut m = FixedAdvance { em_advance: 0.5 };
    let mut b = PlanBuilder::new(surface(), &mut m);
    assert_eq!(b.measure_text("abcd", 10.0), 20.0);
    b.fill_text("abcd", Point::new(50.0, 50.0), 10.0, white());
    let plan = b.finish(0.0);
    let op = plan.ops().next().unwrap();
    match &op.shape {
        Shape::Text(run) => {
            assert_eq!(run.text, "abcd");
            assert_eq!(run.measured_width, 20.0);
            assert_eq!(run.center, Point::new(50.0, 50.0));
        }
        other => panic!("expected text, got {other:?}"),
    }
}
