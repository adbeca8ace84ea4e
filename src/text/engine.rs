use crate::{
    foundation::error::{SubplateError, SubplateResult},
    layout::wrap::MeasureText,
};

/// RGBA8 brush color used by Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

/// Stateful helper for shaping and measuring caption lines with Parley.
///
/// One font is registered at construction and used, at bold weight, for
/// every layout. Glyph painting happens elsewhere; the engine only produces
/// positioned layouts and widths.
pub struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
}

impl TextEngine {
    /// Register `font_bytes` and build fresh Parley contexts around it.
    pub fn new(font_bytes: &[u8]) -> SubplateResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            SubplateError::validation("no font families registered from font bytes")
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| SubplateError::validation("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    /// Resolved family name of the registered caption face.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Shape one display line at `size_px` without any width constraint.
    pub fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
    ) -> SubplateResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(SubplateError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::BOLD,
        ));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

impl MeasureText for TextEngine {
    fn measure_px(&mut self, text: &str, font_size_px: f32) -> SubplateResult<f32> {
        let layout = self.layout_line(text, font_size_px)?;
        let mut width = 0.0f32;
        for line in layout.lines() {
            width = width.max(line.metrics().advance);
        }
        Ok(width)
    }
}
