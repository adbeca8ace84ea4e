use super::*;

fn hex_channels(hex: &str) -> [u8; 3] {
    let s = hex.trim_start_matches('#');
    [
        u8::from_str_radix(&s[0..2], 16).unwrap(),
        u8::from_str_radix(&s[2..4], 16).unwrap(),
        u8::from_str_radix(&s[4..6], 16).unwrap(),
    ]
}

#[test]
fn primary_colors_parse_to_expected_hsl() {
    let red = Hsl::from_hex("#ff0000").unwrap();
    assert_eq!((red.h, red.s, red.l), (0.0, 100.0, 50.0));

    let lime = Hsl::from_hex("00ff00").unwrap();
    assert_eq!((lime.h, lime.s, lime.l), (120.0, 100.0, 50.0));

    let blue = Hsl::from_hex("#0000FF").unwrap();
    assert_eq!((blue.h, blue.s, blue.l), (240.0, 100.0, 50.0));
}

#[test]
fn hex_roundtrip_is_stable_within_one_unit_per_channel() {
    let samples = [
        "#000000", "#ffffff", "#808080", "#ff0000", "#00ff00", "#0000ff", "#123456", "#abcdef",
        "#d2691e", "#7f00ff", "#010203", "#fefdfc",
    ];
    for hex in samples {
        let parsed = Hsl::from_hex(hex).unwrap();
        let [r0, g0, b0] = hex_channels(hex);
        let [r1, g1, b1] = parsed.to_rgb8();
        assert!(r0.abs_diff(r1) <= 1, "{hex}: r {r0} vs {r1}");
        assert!(g0.abs_diff(g1) <= 1, "{hex}: g {g0} vs {g1}");
        assert!(b0.abs_diff(b1) <= 1, "{hex}: b {b0} vs {b1}");

        // A second pass through hex must be idempotent.
        let rehexed = parsed.to_hex();
        assert_eq!(Hsl::from_hex(&rehexed).unwrap().to_hex(), rehexed);
    }
}

#[test]
fn gray_is_achromatic() {
    let gray = Hsl::from_rgb8(128, 128, 128);
    assert_eq!(gray.s, 0.0);
    assert_eq!(gray.h, 0.0);
    assert_eq!(gray.to_hex(), "#808080");
}

#[test]
fn hue_wraps_and_channels_clamp() {
    let a = Hsl::new(360.0, 100.0, 50.0).to_rgb8();
    let b = Hsl::new(0.0, 100.0, 50.0).to_rgb8();
    assert_eq!(a, b);

    let c = Hsl::new(-120.0, 100.0, 50.0).to_rgb8();
    let d = Hsl::new(240.0, 100.0, 50.0).to_rgb8();
    assert_eq!(c, d);

    // Out-of-range saturation/lightness clamp instead of overflowing.
    assert_eq!(Hsl::new(0.0, 250.0, 150.0).to_rgb8(), [255, 255, 255]);
}

#[test]
fn invalid_hex_is_rejected() {
    assert!(Hsl::from_hex("").is_err());
    assert!(Hsl::from_hex("#12345").is_err());
    assert!(Hsl::from_hex("#1234567").is_err());
    assert!(Hsl::from_hex("#gggggg").is_err());
    assert!(Hsl::from_hex("#ff00").is_err());
}
