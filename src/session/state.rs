use std::{
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::Context;

use crate::{
    assets::decode::{SourceImage, UploadBlob, ingest_image},
    assets::fonts::FontSource,
    color::analyze::analyze,
    color::model::Hsl,
    foundation::core::FontSizePx,
    foundation::error::{SubplateError, SubplateResult},
    render::compositor::Compositor,
    render::encode::{encode_png, export_file_name},
};

/// One in-memory captioning session.
///
/// Owns the loaded image, the caption text, the active font size, and the
/// current/recommended color pair. Every accepted mutation re-runs the
/// compositor synchronously, so [`Session::render_result`] always reflects
/// the latest state. There is no deferred or concurrent rendering.
pub struct Session {
    image: Option<SourceImage>,
    caption: String,
    size: FontSizePx,
    current: Option<Hsl>,
    recommended: Option<Hsl>,
    font: FontSource,
    compositor: Option<Compositor>,
    result: Option<Vec<u8>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create an empty session that discovers its caption font on first use.
    pub fn new() -> Self {
        Self::with_font_source(FontSource::Discover)
    }

    /// Create an empty session with an explicit caption font source.
    pub fn with_font_source(font: FontSource) -> Self {
        Self {
            image: None,
            caption: String::new(),
            size: FontSizePx::default(),
            current: None,
            recommended: None,
            font,
            compositor: None,
            result: None,
        }
    }

    /// Validate, decode and adopt an uploaded image, then re-render.
    ///
    /// On failure the prior session state is left untouched. On success the
    /// recommended color is recomputed for the new image and the current
    /// color is initialized to it if the user never picked one.
    pub fn load_image(&mut self, blob: &UploadBlob) -> SubplateResult<()> {
        let image = ingest_image(blob)?;
        let analysis = analyze(&image);

        self.image = Some(image);
        self.recommended = Some(analysis.recommended);
        if self.current.is_none() {
            self.current = Some(analysis.recommended);
        }
        self.rerender()
    }

    /// Replace the caption text and re-render.
    pub fn set_text(&mut self, text: impl Into<String>) -> SubplateResult<()> {
        self.caption = text.into();
        self.rerender()
    }

    /// Set the font size. Out-of-range values are silently ignored and the
    /// prior size is retained.
    pub fn set_size(&mut self, size_px: u32) -> SubplateResult<()> {
        let Some(size) = FontSizePx::new(size_px) else {
            return Ok(());
        };
        self.size = size;
        self.rerender()
    }

    /// Set the current caption color and re-render.
    pub fn set_color(&mut self, color: Hsl) -> SubplateResult<()> {
        self.current = Some(color);
        self.rerender()
    }

    /// Set the current caption color from a 6-digit hex string.
    pub fn set_color_hex(&mut self, hex: &str) -> SubplateResult<()> {
        let color = Hsl::from_hex(hex)?;
        self.set_color(color)
    }

    /// Restore the current color to the recommendation for the loaded image.
    pub fn reset_color_to_recommended(&mut self) -> SubplateResult<()> {
        if let Some(recommended) = self.recommended {
            self.current = Some(recommended);
        }
        self.rerender()
    }

    /// Currently loaded image, if any.
    pub fn image(&self) -> Option<&SourceImage> {
        self.image.as_ref()
    }

    /// Active caption text.
    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Active font size in pixels.
    pub fn size_px(&self) -> u32 {
        self.size.get()
    }

    /// Active caption color, if an image was loaded or a color was picked.
    pub fn current_color(&self) -> Option<Hsl> {
        self.current
    }

    /// Recommended caption color for the loaded image.
    pub fn recommended_color(&self) -> Option<Hsl> {
        self.recommended
    }

    /// Encoded PNG of the most recent composite, if an image is loaded.
    pub fn render_result(&self) -> Option<&[u8]> {
        self.result.as_deref()
    }

    /// Write the last render result into `dir` as
    /// `subtitle-image-<unix-millis>.png` and return the path.
    pub fn export_into(&self, dir: &Path) -> SubplateResult<PathBuf> {
        let png = self.result.as_deref().ok_or(SubplateError::NothingToExport)?;

        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let path = dir.join(export_file_name(millis));
        std::fs::write(&path, png)
            .with_context(|| format!("write export '{}'", path.display()))?;
        Ok(path)
    }

    fn rerender(&mut self) -> SubplateResult<()> {
        let Some(image) = &self.image else {
            self.result = None;
            return Ok(());
        };

        // Stale output must not survive a failed render.
        self.result = None;

        if self.compositor.is_none() {
            let bytes = self.font.resolve()?;
            self.compositor = Some(Compositor::new(bytes)?);
        }
        let Some(compositor) = self.compositor.as_mut() else {
            return Err(SubplateError::validation("caption compositor unavailable"));
        };

        let color = self.current.unwrap_or(Hsl::new(0.0, 0.0, 100.0));
        let frame = compositor.render(image, &self.caption, self.size, color)?;
        self.result = Some(encode_png(&frame)?);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/state.rs"]
mod tests;
