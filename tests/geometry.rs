use image::{DynamicImage, RgbaImage};
use wallmark::viewport::{FilledRect, fill_size, filled_rect};
use wallmark::{CropMode, Position, ViewportSpec, crop, padding, resolve_anchor};

#[test]
fn full_hd_reference_crops_a_two_to_one_photo() {
    // 2000x1000 (ratio 2.0) against a 1920x1080 reference (ratio ~1.778)
    let spec = ViewportSpec::new(1920.0, 1080.0);
    let (w, h) = fill_size(2000.0, 1000.0, &spec);
    assert!((w - 1777.8).abs() < 0.1);
    assert_eq!(h, 1000.0);

    let rect = filled_rect(2000.0, 1000.0, &spec);
    assert!((rect.x - 111.1).abs() < 0.1);
    assert_eq!(rect.y, 0.0);

    let src = RgbaImage::from_pixel(2000, 1000, image::Rgba([9, 9, 9, 255]));
    let cropped = crop::crop(DynamicImage::ImageRgba8(src), CropMode::Always, &spec);
    let (cw, ch) = cropped.dimensions();
    assert_eq!(ch, 1000);
    assert!((1776..=1778).contains(&cw));
    // symmetric cuts within a pixel of rounding
    let left_cut = 111;
    assert!((2000 - i64::from(cw) - 2 * left_cut).abs() <= 2);
}

#[test]
fn bottom_right_anchor_on_full_hd_canvas() {
    let frame = FilledRect {
        x: 0.0,
        y: 0.0,
        width: 1920.0,
        height: 1080.0,
    };
    let anchor = resolve_anchor(Position::BottomRight, 0.05, 0.05, &frame);
    assert_eq!((anchor.x, anchor.y), (1824.0, 1026.0));
    assert_eq!((anchor.ax, anchor.ay), (1.0, 1.0));
}

#[test]
fn single_padding_value_expands_per_axis() {
    assert_eq!(
        padding::normalize(&[0.1], 200.0, 50.0),
        [5.0, 20.0, 5.0, 20.0]
    );
}
