use super::*;

#[test]
fn initial_ranges_hold() {
    let cfg = SparkleConfig::default();
    let field = ParticleField::seeded(7, &cfg);
    assert_eq!(field.len(), 90);
    for p in field.particles() {
        assert!((0.0..1.0).contains(&p.x));
        assert!((0.0..1.0).contains(&p.y));
        assert!((0.6..2.4).contains(&p.radius));
        assert!((0.0..1.0).contains(&p.phase));
        assert!((0.1..0.45).contains(&p.speed));
        assert!((0.6..1.8).contains(&p.weight));
    }
}

#[test]
fn same_seed_same_field() {
    let cfg = SparkleConfig::default();
    let a = ParticleField::seeded(42, &cfg);
    let b = ParticleField::seeded(42, &cfg);
    let c = ParticleField::seeded(43, &cfg);
    assert_eq!(a.particles(), b.particles());
    assert_ne!(a.particles(), c.particles());
}

#[test]
fn count_never_changes_and_phases_strictly_grow() {
    let cfg = SparkleConfig::default();
    let mut field = ParticleField::seeded(1, &cfg);
    let mut prev: Vec<f64> = field.particles().iter().map(|p| p.phase).collect();
    for frame in 0..500 {
        field.advance(&cfg);
        assert_eq!(field.len(), 90, "frame {frame}");
        for (p, before) in field.particles().iter().zip(&prev) {
            assert!(p.phase > *before);
            assert!((p.phase - before - p.speed * 0.003).abs() < 1e-12);
        }
        prev = field.particles().iter().map(|p| p.phase).collect();
    }
}

#[test]
fn sparkle_x_stays_inside_viewport() {
    let cfg = SparkleConfig::default();
    let mut field = ParticleField::seeded(3, &cfg);
    for &w in &[1.0, 17.0, 320.0, 1920.0] {
        for step in 0..200 {
            let t = f64::from(step) * 3.7;
            field.advance(&cfg);
            for s in field.sparkles(t, w, 600.0, &cfg) {
                assert!(s.center.x >= 0.0 && s.center.x < w, "x={} w={w}", s.center.x);
            }
        }
    }
}

#[test]
fn sparkle_shading_matches_twinkle_bounds() {
    let cfg = SparkleConfig::default();
    let field = ParticleField::seeded(9, &cfg);
    for s in field.sparkles(12.5, 800.0, 600.0, &cfg) {
        assert!(s.alpha >= 0.08 - 1e-6 && s.alpha <= 0.30 + 1e-6);
        assert!(s.center.y >= -10.0 && s.center.y <= 600.0 * 0.55 + 10.0);
    }
    for (p, s) in field.particles().iter().zip(field.sparkles(0.0, 800.0, 600.0, &cfg)) {
        assert!(s.radius >= p.radius * 0.6 - 1e-9 && s.radius <= p.radius * 1.4 + 1e-9);
    }
}

#[test]
fn empty_field_is_allowed() {
    let cfg = SparkleConfig {
        count: 0,
        ..SparkleConfig::default()
    };
    let mut field = ParticleField::seeded(0, &cfg);
    field.advance(&cfg);
    assert!(field.is_empty());
    assert_eq!(field.sparkles(1.0, 10.0, 10.0, &cfg).count(), 0);
}
