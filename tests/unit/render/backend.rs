use super::*;

#[test]
fn transparent_frame_has_expected_size() {
    let f = FrameRGBA::transparent(3, 2);
    assert_eq!(f.data.len(), 24);
    assert!(f.data.iter().all(|&b| b == 0));
    assert_eq!(f.pixel(2, 1), Some([0, 0, 0, 0]));
    assert_eq!(f.pixel(3, 0), None);
    assert_eq!(f.pixel(0, 2), None);
}

#[test]
fn straight_conversion_unpremultiplies() {
    let f = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![128, 0, 0, 128, 10, 20, 30, 255],
        premultiplied: true,
    };
    let img = f.to_rgba_image().unwrap();
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 128]);
    assert_eq!(img.get_pixel(1, 0).0, [10, 20, 30, 255]);

    let straight = FrameRGBA {
        premultiplied: false,
        ..f.clone()
    };
    assert_eq!(straight.to_straight_rgba8(), f.data);
}

#[test]
fn empty_frame_converts() {
    let img = FrameRGBA::transparent(0, 0).to_rgba_image().unwrap();
    assert_eq!(img.dimensions(), (0, 0));
}
