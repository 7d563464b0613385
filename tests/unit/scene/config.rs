use super::*;

#[test]
fn default_config_is_valid() {
    SceneConfig::default().validate().unwrap();
}

#[test]
fn default_holds_shipped_scene_constants() {
    let cfg = SceneConfig::default();
    assert_eq!(cfg.reflection.bands, 38);
    assert_eq!(cfg.waves.bands, 30);
    assert_eq!(cfg.waves.sample_step, 18.0);
    assert_eq!(cfg.sparkles.count, 90);
    assert_eq!(cfg.layout.horizon_frac, 0.56);
    assert_eq!(cfg.layout.beach_frac, 0.78);
    assert_eq!(cfg.labels.names, vec!["Isabel", "Angelina"]);
    assert_eq!(cfg.vignette.stops[1].color.a, 0.36);
}

#[test]
fn json_roundtrip_preserves_table() {
    let cfg = SceneConfig::default();
    let json = cfg.to_json_pretty().unwrap();
    let back = SceneConfig::from_json_str(&json).unwrap();
    assert_eq!(back, cfg);
}

#[test]
fn partial_json_falls_back_to_defaults() {
    let cfg = SceneConfig::from_json_str(
        r#"{ "seed": 7, "sparkles": { "count": 12 }, "labels": { "names": ["A", "B"] } }"#,
    )
    .unwrap();
    assert_eq!(cfg.seed, 7);
    assert_eq!(cfg.sparkles.count, 12);
    assert_eq!(cfg.sparkles.phase_step, 0.003);
    assert_eq!(cfg.labels.names, vec!["A", "B"]);
    assert_eq!(cfg.labels.rise, 205.0);
    assert_eq!(cfg.waves, WaveConfig::default());
}

#[test]
fn validation_rejects_broken_tables() {
    let err = SceneConfig::from_json_str(r#"{ "labels": { "names": ["solo"] } }"#).unwrap_err();
    assert!(err.to_string().contains("exactly 2 names"));

    let err =
        SceneConfig::from_json_str(r#"{ "layout": { "horizon_frac": 0.9, "beach_frac": 0.5 } }"#)
            .unwrap_err();
    assert!(err.to_string().contains("horizon_frac"));

    let mut cfg = SceneConfig::default();
    cfg.reflection.bands = 1;
    assert!(cfg.validate().is_err());

    let mut cfg = SceneConfig::default();
    cfg.glow.stops = vec![
        GradientStop::new(0.8, Rgba::transparent()),
        GradientStop::new(0.2, Rgba::transparent()),
    ];
    assert!(cfg.validate().is_err());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = SceneConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, ShorelineError::Serde(_)));
}

#[test]
fn from_path_reports_missing_file() {
    let err = SceneConfig::from_path("target/does/not/exist.json").unwrap_err();
    assert!(err.to_string().contains("open scene config"));
}

#[test]
fn validation_rejects_degenerate_rates_and_sizes() {
    for json in [
        r#"{ "sky": { "pulse_rate": -1.0 } }"#,
        r#"{ "sun": { "bob_rate": 0.0 } }"#,
        r#"{ "sun": { "radius_frac": 0.0 } }"#,
        r#"{ "figures": { "rock_rate": -0.9 } }"#,
        r#"{ "glow": { "radius": -500.0 } }"#,
        r#"{ "glow": { "breathe_rate": 0.0 } }"#,
        r#"{ "glow": { "radius": 6.0, "breathe_amplitude": 8.0 } }"#,
        r#"{ "sparkles": { "twinkle_rate": 0.0 } }"#,
        r#"{ "sparkles": { "drift_x_rate": -0.08 } }"#,
        r#"{ "sparkles": { "drift_y_rate": 0.0 } }"#,
        r#"{ "sparkles": { "count": 0 } }"#,
        r#"{ "waves": { "time_rate": 0.0 } }"#,
        r#"{ "reflection": { "wave_rates": [1.6, 0.0] } }"#,
        r#"{ "labels": { "font_size": 0.0 } }"#,
        r#"{ "vignette": { "inner": 0.9, "outer": 0.5 } }"#,
    ] {
        let err = SceneConfig::from_json_str(json).unwrap_err();
        assert!(
            matches!(err, ShorelineError::Validation(_)),
            "{json} should fail validation, got {err}"
        );
    }
}

#[test]
fn wave_sample_step_has_a_floor() {
    let err = SceneConfig::from_json_str(r#"{ "waves": { "sample_step": 1e-9 } }"#).unwrap_err();
    assert!(err.to_string().contains("waves.sample_step"));

    let mut cfg = SceneConfig::default();
    cfg.waves.sample_step = MIN_WAVE_SAMPLE_STEP;
    cfg.validate().unwrap();
}

#[test]
fn validation_rejects_non_finite_numbers() {
    let mut cfg = SceneConfig::default();
    cfg.sparkles.drift_x_amplitude = f64::NAN;
    assert!(cfg.validate().is_err());

    let mut cfg = SceneConfig::default();
    cfg.figures.shadow.blur = f64::INFINITY;
    assert!(cfg.validate().is_err());

    let mut cfg = SceneConfig::default();
    cfg.sky.stops[1].swing[2] = f64::NEG_INFINITY;
    assert!(cfg.validate().is_err());

    let mut cfg = SceneConfig::default();
    cfg.waves.alpha = 1.5;
    assert!(cfg.validate().is_err());
}
