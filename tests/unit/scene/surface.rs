use super::*;

#[test]
fn backing_is_floor_of_scaled_viewport() {
    for &(w, h, r) in &[
        (1920.0, 1080.0, 1.0),
        (1280.5, 719.3, 1.5),
        (333.3, 777.7, 2.0),
        (1.0, 1.0, 1.25),
    ] {
        let s = Surface::new(Viewport::new(w, h, r)).unwrap();
        assert_eq!(
            s.backing_size(),
            ((w * r).floor() as u32, (h * r).floor() as u32)
        );
        assert_eq!(s.pixel_ratio(), r);
        assert_eq!(s.transform(), Affine::scale(r));
        assert_eq!(s.display_size(), (w, h));
    }
}

#[test]
fn pixel_ratio_is_clamped() {
    assert_eq!(clamp_pixel_ratio(Some(0.5)), 1.0);
    assert_eq!(clamp_pixel_ratio(Some(3.0)), 2.0);
    assert_eq!(clamp_pixel_ratio(Some(f64::NAN)), 1.0);
    assert_eq!(clamp_pixel_ratio(None), 1.0);

    let s = Surface::new(Viewport::new(100.0, 50.0, 4.0)).unwrap();
    assert_eq!(s.backing_size(), (200, 100));
}

#[test]
fn missing_ratio_defaults_to_one() {
    let s = Surface::new(Viewport {
        width: 640.0,
        height: 360.0,
        pixel_ratio: None,
    })
    .unwrap();
    assert_eq!(s.pixel_ratio(), 1.0);
    assert_eq!(s.backing_size(), (640, 360));
}

#[test]
fn reconfigure_is_idempotent() {
    let vp = Viewport::new(1024.0, 768.0, 1.5);
    let mut a = Surface::new(vp).unwrap();
    let once = a;
    a.reconfigure(vp).unwrap();
    assert_eq!(a, once);
}

#[test]
fn invalid_viewport_keeps_previous_configuration() {
    let mut s = Surface::new(Viewport::new(800.0, 600.0, 1.0)).unwrap();
    let before = s;
    assert!(s.reconfigure(Viewport::new(f64::INFINITY, 600.0, 1.0)).is_err());
    assert!(s.reconfigure(Viewport::new(-1.0, 600.0, 1.0)).is_err());
    assert!(s.reconfigure(Viewport::new(70_000.0, 600.0, 1.0)).is_err());
    assert_eq!(s, before);
}

#[test]
fn zero_sized_viewport_is_empty() {
    let s = Surface::new(Viewport::new(0.0, 10.0, 2.0)).unwrap();
    assert!(s.is_empty());
}
