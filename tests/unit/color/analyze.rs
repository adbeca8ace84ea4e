use std::sync::Arc;

use super::*;

fn solid_image(width: u32, height: u32, rgba: [u8; 4]) -> SourceImage {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for _ in 0..(width * height) {
        data.extend_from_slice(&rgba);
    }
    SourceImage {
        width,
        height,
        rgba8: Arc::new(data),
    }
}

fn with_center_rect(mut base: SourceImage, rgba: [u8; 4]) -> SourceImage {
    let data = Arc::make_mut(&mut base.rgba8);
    let (x0, x1) = (base.width / 4, base.width * 3 / 4);
    let (y0, y1) = (base.height / 4, base.height * 3 / 4);
    for y in y0..y1 {
        for x in x0..x1 {
            let idx = ((y * base.width + x) * 4) as usize;
            data[idx..idx + 4].copy_from_slice(&rgba);
        }
    }
    base
}

#[test]
fn uniform_gray_yields_zero_saturation_and_forced_lightness() {
    let analysis = analyze(&solid_image(40, 40, [128, 128, 128, 255]));
    assert_eq!(analysis.average.s, 0.0);
    assert_eq!(analysis.average.h, 0.0);

    // Gray 128 sits just above the 50% threshold, so the recommendation must
    // be the dark variant. Hue stays finite through the complementary shift.
    assert_eq!(analysis.recommended.l, 20.0);
    assert_eq!(analysis.recommended.s, 0.0);
    assert_eq!(analysis.recommended.h, 180.0);
    assert!(analysis.recommended.h.is_finite());
}

#[test]
fn dark_gray_gets_the_light_recommendation() {
    let analysis = analyze(&solid_image(40, 40, [100, 100, 100, 255]));
    assert_eq!(analysis.recommended.l, 80.0);
}

#[test]
fn sampling_reads_only_the_center_region() {
    // Blue border, red center square covering the sampled region.
    let image = with_center_rect(
        solid_image(100, 100, [0, 0, 255, 255]),
        [255, 0, 0, 255],
    );
    let analysis = analyze(&image);
    assert_eq!(analysis.average.h, 0.0);
    assert_eq!(analysis.average.s, 100.0);
    assert_eq!(analysis.average.l, 50.0);
}

#[test]
fn analysis_is_deterministic_and_ignores_alpha() {
    let opaque = solid_image(30, 50, [10, 200, 60, 255]);
    let translucent = solid_image(30, 50, [10, 200, 60, 32]);
    assert_eq!(analyze(&opaque), analyze(&opaque));
    assert_eq!(analyze(&opaque).average, analyze(&translucent).average);
}

#[test]
fn recommend_rotates_hue_and_caps_saturation() {
    let rec = recommend(Hsl::new(300.0, 100.0, 10.0));
    assert_eq!(rec.h, 120.0);
    assert_eq!(rec.s, 70.0);
    assert_eq!(rec.l, 80.0);

    let rec = recommend(Hsl::new(10.0, 50.0, 90.0));
    assert_eq!(rec.h, 190.0);
    assert_eq!(rec.s, 40.0);
    assert_eq!(rec.l, 20.0);
}

#[test]
fn tiny_images_are_sampled_without_panicking() {
    let analysis = analyze(&solid_image(1, 1, [255, 255, 255, 255]));
    assert_eq!(analysis.average.l, 100.0);
    assert_eq!(analysis.recommended.l, 20.0);
}
