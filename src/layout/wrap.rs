use crate::foundation::error::SubplateResult;

/// Horizontal margin on each side of the caption area, in pixels.
pub const SIDE_MARGIN_PX: u32 = 40;

/// Injected text-measurement capability.
///
/// The wrap algorithm never touches a rendering surface directly; it asks the
/// measurer for the pixel width of candidate strings at the fixed caption
/// face. Tests substitute a deterministic fake.
pub trait MeasureText {
    /// Measured pixel width of `text` at `font_size_px`.
    fn measure_px(&mut self, text: &str, font_size_px: f32) -> SubplateResult<f32>;
}

/// Split caption text into display lines for an image `image_width` wide.
///
/// Explicit newlines are honored first and lines that are empty after
/// trimming are dropped. Lines that fit the width budget
/// (`image_width - 2 * SIDE_MARGIN_PX`) are kept verbatim (trimmed);
/// anything wider is wrapped greedily at **character** granularity, which
/// keeps dense CJK text usable and is deliberately not word wrapping.
///
/// Empty or all-whitespace input yields an empty vec; callers treat that as
/// "no caption to draw".
pub fn wrap_caption(
    text: &str,
    image_width: u32,
    font_size_px: u32,
    measure: &mut dyn MeasureText,
) -> SubplateResult<Vec<String>> {
    let max_width = image_width as f32 - (2 * SIDE_MARGIN_PX) as f32;
    let size = font_size_px as f32;

    let mut out = Vec::new();
    for raw in text.split('\n') {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if measure.measure_px(line, size)? <= max_width {
            out.push(line.to_string());
            continue;
        }

        let mut candidate = String::new();
        for ch in line.chars() {
            let mut widened = candidate.clone();
            widened.push(ch);
            if measure.measure_px(&widened, size)? > max_width && !candidate.is_empty() {
                out.push(std::mem::take(&mut candidate));
                candidate.push(ch);
            } else {
                candidate = widened;
            }
        }
        if !candidate.is_empty() {
            out.push(candidate);
        }
    }

    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/wrap.rs"]
mod tests;
