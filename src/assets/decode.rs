use std::{path::Path, sync::Arc};

use crate::foundation::error::{SubplateError, SubplateResult};

/// Largest accepted upload, in bytes (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// An uploaded file: raw bytes plus the media type the uploader declared.
#[derive(Clone, Debug)]
pub struct UploadBlob {
    /// Raw file bytes.
    pub bytes: Vec<u8>,
    /// Declared media type, e.g. `image/png`.
    pub media_type: String,
}

impl UploadBlob {
    /// Read a file from disk, declaring its media type from the extension.
    pub fn from_path(path: &Path) -> SubplateResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            SubplateError::file_read(format!("failed to read '{}': {e}", path.display()))
        })?;
        Ok(Self {
            bytes,
            media_type: media_type_for_path(path),
        })
    }
}

/// Immutable decoded raster in straight-alpha RGBA8 form.
///
/// Replaced wholesale on each upload, never mutated in place.
#[derive(Clone, Debug)]
pub struct SourceImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major straight-alpha RGBA8.
    pub rgba8: Arc<Vec<u8>>,
}

impl SourceImage {
    /// Read one pixel. `x` and `y` must be in bounds.
    pub fn rgba_at(&self, x: u32, y: u32) -> [u8; 4] {
        debug_assert!(x < self.width && y < self.height);
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.rgba8[idx..idx + 4];
        [px[0], px[1], px[2], px[3]]
    }
}

/// Validate and decode an upload into a [`SourceImage`].
///
/// Rejects non-image media types, blobs over [`MAX_UPLOAD_BYTES`], and bytes
/// that fail to decode. Never touches session state; callers commit the
/// result only on success.
pub fn ingest_image(blob: &UploadBlob) -> SubplateResult<SourceImage> {
    if !blob.media_type.starts_with("image/") {
        return Err(SubplateError::InvalidFileType(blob.media_type.clone()));
    }
    if blob.bytes.len() > MAX_UPLOAD_BYTES {
        return Err(SubplateError::FileTooLarge {
            actual: blob.bytes.len(),
            limit: MAX_UPLOAD_BYTES,
        });
    }

    let dyn_img = image::load_from_memory(&blob.bytes)
        .map_err(|e| SubplateError::image_decode(e.to_string()))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(SourceImage {
        width,
        height,
        rgba8: Arc::new(rgba.into_raw()),
    })
}

/// Map a file extension to a declared media type.
///
/// Unknown extensions map to `application/octet-stream`, which ingestion
/// rejects as a non-image.
pub fn media_type_for_path(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("tif") | Some("tiff") => "image/tiff",
        _ => "application/octet-stream",
    }
    .to_string()
}
