use super::*;
use crate::text::measure::FixedAdvance;

#[test]
fn fixed_advance_scales_with_chars_and_size() {
    let mut m = FixedAdvance::default();
    assert_eq!(m.measure_width("", 16.0), 0.0);
    assert!((m.measure_width("Isabel", 16.0) - 6.0 * 0.55 * 16.0).abs() < 1e-9);
    assert!((m.measure_width("Isabel", 32.0) - 2.0 * m.measure_width("Isabel", 16.0)).abs() < 1e-9);
}

#[test]
fn engine_measures_empty_and_degenerate_input_as_zero() {
    let mut engine = TextLayoutEngine::new("sans-serif");
    assert_eq!(engine.measure_width("", 16.0), 0.0);
    assert_eq!(engine.measure_width("abc", 0.0), 0.0);
    assert_eq!(engine.measure_width("abc", f64::NAN), 0.0);
}

#[test]
fn engine_width_grows_with_text_when_fonts_exist() {
    let mut engine = TextLayoutEngine::new("sans-serif");
    let short = engine.measure_width("Isa", 16.0);
    let long = engine.measure_width("Isabel Isabel", 16.0);
    // Headless machines may have no system fonts at all; then nothing is shaped.
    if short > 0.0 {
        assert!(long > short);
    }
}

#[test]
fn missing_font_file_is_a_validation_error() {
    let err = TextLayoutEngine::with_font_file(Path::new("target/no-such-font.ttf"))
        .err()
        .unwrap();
    assert!(err.to_string().contains("read font file"));
}
