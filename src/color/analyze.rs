use crate::{assets::decode::SourceImage, color::model::Hsl};

/// Sampling resolution of the center-region grid.
pub const SAMPLE_GRID: u32 = 100;

/// Result of analyzing an image's dominant center tone.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ColorAnalysis {
    /// Mean color of the sampled center region.
    pub average: Hsl,
    /// High-contrast caption color derived from the mean.
    pub recommended: Hsl,
}

/// Sample the image's center region and derive a recommended caption color.
///
/// The region is a centered square covering 50% of the shorter dimension,
/// read on a fixed [`SAMPLE_GRID`]x[`SAMPLE_GRID`] grid. Red, green and blue
/// are averaged arithmetically; alpha is ignored. Deterministic for a given
/// image, and never mutates it.
#[tracing::instrument(skip(image))]
pub fn analyze(image: &SourceImage) -> ColorAnalysis {
    let side = ((f64::from(image.width.min(image.height))) * 0.5)
        .round()
        .max(1.0) as u32;
    let x0 = (image.width - side.min(image.width)) / 2;
    let y0 = (image.height - side.min(image.height)) / 2;

    let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
    for gy in 0..SAMPLE_GRID {
        for gx in 0..SAMPLE_GRID {
            let sx = (x0 + gx * side / SAMPLE_GRID).min(image.width - 1);
            let sy = (y0 + gy * side / SAMPLE_GRID).min(image.height - 1);
            let px = image.rgba_at(sx, sy);
            r += u64::from(px[0]);
            g += u64::from(px[1]);
            b += u64::from(px[2]);
        }
    }

    let n = f64::from(SAMPLE_GRID * SAMPLE_GRID);
    let mean = |sum: u64| (sum as f64 / n).round().clamp(0.0, 255.0) as u8;
    let average = Hsl::from_rgb8(mean(r), mean(g), mean(b));
    ColorAnalysis {
        average,
        recommended: recommend(average),
    }
}

/// Derive the complementary, contrast-forced caption color for a base tone.
///
/// Hue is rotated 180 degrees, saturation capped at `min(s * 0.8, 70)`, and
/// lightness forced to 20 for light sources or 80 for dark ones so the
/// caption stays legible regardless of the image.
pub fn recommend(base: Hsl) -> Hsl {
    Hsl::new(
        (base.h + 180.0) % 360.0,
        (base.s * 0.8).min(70.0),
        if base.l > 50.0 { 20.0 } else { 80.0 },
    )
}

#[cfg(test)]
#[path = "../../tests/unit/color/analyze.rs"]
mod tests;
