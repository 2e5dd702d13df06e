//! Integration test: load an image scaled into a narrow container, drag
//! the crop region, crop, and export.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use cropper_core::{
    CropConfig, CropRegion, CropSession, Dimensions, GestureKind, Handle, Point, PixelRect,
    SourceImage,
};

/// A 1000x1000 PNG: green in the top-left quadrant, gray elsewhere.
fn quadrant_png() -> Vec<u8> {
    let img = image::RgbaImage::from_fn(1000, 1000, |x, y| {
        if x < 500 && y < 500 {
            image::Rgba([0, 200, 0, 255])
        } else {
            image::Rgba([128, 128, 128, 255])
        }
    });
    let mut buf = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut buf);
    image::ImageEncoder::write_image(
        encoder,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ExtendedColorType::Rgba8,
    )
    .unwrap();
    buf
}

#[test]
fn load_drag_crop_export() {
    let mut session = CropSession::new(CropConfig::default());

    let ticket = session.begin_load();
    let source = SourceImage::decode(&quadrant_png(), Some(500.0));
    assert!(session.complete_load(ticket, source).unwrap());
    assert_eq!(
        session.region(),
        CropRegion::new(150.0, 150.0, 200.0, 200.0),
        "default region should be centered on the 500x500 display"
    );

    // Shrink from the bottom-right to 100x100.
    assert!(session.press(GestureKind::Resize(Handle::BottomRight), Point::new(350.0, 350.0)));
    session.pointer_moved(Point::new(250.0, 250.0));
    assert!(session.pointer_released());
    assert_eq!(session.region(), CropRegion::new(150.0, 150.0, 100.0, 100.0));

    // Move it to (100, 100).
    assert!(session.press(GestureKind::Move, Point::new(200.0, 200.0)));
    session.pointer_moved(Point::new(150.0, 150.0));
    assert!(session.pointer_released());
    assert_eq!(session.region(), CropRegion::new(100.0, 100.0, 100.0, 100.0));

    let artifact = session.crop().expect("crop should succeed");
    assert_eq!(artifact.dimensions, Dimensions::new(100, 100));
    assert_eq!(artifact.source_rect, PixelRect {
        x: 200,
        y: 200,
        width: 200,
        height: 200,
    });

    let export = session.export().expect("artifact should be exportable");
    assert_eq!(export.filename, "cropped-image.jpeg");

    let decoded = image::load_from_memory(export.bytes).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (100, 100));
    let image::Rgb([r, g, b]) = *decoded.get_pixel(50, 50);
    assert!(g > 150 && r < 60 && b < 60, "expected green, got {r},{g},{b}");
}

#[test]
fn failed_reload_keeps_working_session() {
    let mut session = CropSession::new(CropConfig::default());
    session.load(SourceImage::decode(&quadrant_png(), Some(500.0)).unwrap());
    session.crop().unwrap();

    let ticket = session.begin_load();
    let bad = SourceImage::decode(b"definitely not an image", Some(500.0));
    let err = session.complete_load(ticket, bad).unwrap_err();
    assert!(err.is_decode_failure());

    assert!(session.export().is_some());
    assert!(session.press(GestureKind::Move, Point::new(0.0, 0.0)));
}
