use std::sync::Arc;

use crate::{
    assets::decode::SourceImage,
    color::model::Hsl,
    foundation::core::FontSizePx,
    foundation::error::{SubplateError, SubplateResult},
    layout::wrap::{SIDE_MARGIN_PX, wrap_caption},
    render::encode::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place},
    text::engine::TextEngine,
};

/// Vertical gap between stacked caption bands, in pixels.
pub const LINE_SPACING_PX: u32 = 8;
/// Gap between the lowest band and the bottom edge, in pixels.
pub const BOTTOM_MARGIN_PX: u32 = 30;

/// Background plate color: black at 0.6 opacity.
const PLATE_RGBA: [u8; 4] = [0, 0, 0, 153];

/// A composited frame as straight-alpha RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct RenderedFrame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major, straight alpha.
    pub data: Vec<u8>,
}

/// Shaped glyphs and extents for one caption band.
struct LinePlan {
    glyphs: Vec<vello_cpu::Glyph>,
    width: f32,
    height: f32,
}

/// CPU compositor: source raster, per-line background plates, then
/// stroke+fill caption text, all rasterized with `vello_cpu`.
///
/// The caption face is fixed at construction. The `vello_cpu` context and
/// the source-image paint are reused across renders of the same session.
pub struct Compositor {
    engine: TextEngine,
    font: vello_cpu::peniko::FontData,
    ctx: Option<vello_cpu::RenderContext>,
    image_paint: Option<(usize, vello_cpu::Image)>,
}

impl Compositor {
    /// Build a compositor around the given caption font bytes.
    pub fn new(font_bytes: Vec<u8>) -> SubplateResult<Self> {
        let engine = TextEngine::new(&font_bytes)?;
        let font =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);
        Ok(Self {
            engine,
            font,
            ctx: None,
            image_paint: None,
        })
    }

    /// Composite `caption` over `image` and return the finished frame.
    ///
    /// An empty or whitespace-only caption returns the unmodified image
    /// content. Rendering never suspends and is deterministic for a given
    /// input.
    #[tracing::instrument(skip(self, image, caption))]
    pub fn render(
        &mut self,
        image: &SourceImage,
        caption: &str,
        size: FontSizePx,
        color: Hsl,
    ) -> SubplateResult<RenderedFrame> {
        if caption.trim().is_empty() {
            return Ok(image_only_frame(image));
        }
        let lines = wrap_caption(caption, image.width, size.get(), &mut self.engine)?;
        if lines.is_empty() {
            return Ok(image_only_frame(image));
        }

        let size_f = size.get() as f32;
        let mut plans = Vec::<Option<LinePlan>>::with_capacity(lines.len());
        for line in &lines {
            plans.push(self.plan_line(line, size_f)?);
        }

        let width_u16: u16 = image
            .width
            .try_into()
            .map_err(|_| SubplateError::validation("image width exceeds u16"))?;
        let height_u16: u16 = image
            .height
            .try_into()
            .map_err(|_| SubplateError::validation("image height exceeds u16"))?;
        let img_paint = self.image_paint_for(image)?;

        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width_u16, height_u16),
            Some(ctx) if ctx.width() == width_u16 && ctx.height() == height_u16 => ctx,
            Some(_) => vello_cpu::RenderContext::new(width_u16, height_u16),
        };
        ctx.reset();

        let w = f64::from(image.width);
        let h = f64::from(image.height);

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(img_paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));

        // Whitespace-only bands keep their slot in the stack but draw nothing.
        let line_height = f64::from(size.line_height_px());
        let spacing = f64::from(LINE_SPACING_PX);
        let total = (plans.len() as f64) * line_height + (plans.len() as f64 - 1.0) * spacing;
        let mut y = h - total - f64::from(BOTTOM_MARGIN_PX);

        let [fr, fg, fb] = color.to_rgb8();
        let margin = f64::from(SIDE_MARGIN_PX);

        for plan in &plans {
            if let Some(plan) = plan {
                ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    PLATE_RGBA[0],
                    PLATE_RGBA[1],
                    PLATE_RGBA[2],
                    PLATE_RGBA[3],
                ));
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                    margin,
                    y,
                    w - margin,
                    y + line_height,
                ));

                let tx = (w - f64::from(plan.width)) / 2.0;
                let ty = y + (line_height - f64::from(plan.height)) / 2.0;
                ctx.set_transform(vello_cpu::kurbo::Affine::translate((tx, ty)));

                ctx.set_stroke(
                    vello_cpu::kurbo::Stroke::new(size.stroke_width_px())
                        .with_join(vello_cpu::kurbo::Join::Round),
                );
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(0, 0, 0, 255));
                ctx.glyph_run(&self.font)
                    .font_size(size_f)
                    .stroke_glyphs(plan.glyphs.iter().copied());

                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(fr, fg, fb, 255));
                ctx.glyph_run(&self.font)
                    .font_size(size_f)
                    .fill_glyphs(plan.glyphs.iter().copied());
            }
            y += line_height + spacing;
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(width_u16, height_u16);
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(ctx);

        let mut data = pixmap.data_as_u8_slice().to_vec();
        unpremultiply_rgba8_in_place(&mut data);
        Ok(RenderedFrame {
            width: image.width,
            height: image.height,
            data,
        })
    }

    /// Shape one band. Returns `None` for bands with nothing to draw.
    fn plan_line(&mut self, line: &str, size_px: f32) -> SubplateResult<Option<LinePlan>> {
        if line.trim().is_empty() {
            return Ok(None);
        }

        let layout = self.engine.layout_line(line, size_px)?;
        let mut glyphs = Vec::new();
        let mut width = 0.0f32;
        let mut height = 0.0f32;
        for l in layout.lines() {
            let m = l.metrics();
            width = width.max(m.advance);
            height += m.ascent + m.descent + m.leading;
            for item in l.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                glyphs.extend(run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                }));
            }
        }

        if glyphs.is_empty() || width <= 0.0 {
            return Ok(None);
        }
        Ok(Some(LinePlan {
            glyphs,
            width,
            height,
        }))
    }

    /// Build (or reuse) the premultiplied `vello_cpu` paint for the source
    /// image, keyed on the pixel buffer identity.
    fn image_paint_for(&mut self, image: &SourceImage) -> SubplateResult<vello_cpu::Image> {
        let key = Arc::as_ptr(&image.rgba8) as usize;
        if let Some((cached_key, paint)) = &self.image_paint
            && *cached_key == key
        {
            return Ok(paint.clone());
        }

        let mut premul = image.rgba8.as_ref().clone();
        premultiply_rgba8_in_place(&mut premul);
        let pixmap = pixmap_from_premul_bytes(&premul, image.width, image.height)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.image_paint = Some((key, paint.clone()));
        Ok(paint)
    }
}

fn image_only_frame(image: &SourceImage) -> RenderedFrame {
    RenderedFrame {
        width: image.width,
        height: image.height,
        data: image.rgba8.as_ref().clone(),
    }
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> SubplateResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| SubplateError::validation("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| SubplateError::validation("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(SubplateError::validation("pixmap byte len mismatch"));
    }

    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}
