//! Subplate composites wrapped caption text onto still images.
//!
//! The pipeline is small and fully synchronous:
//!
//! 1. **Ingest**: validate an upload (media type, size) and decode it into a
//!    [`SourceImage`] (straight RGBA8).
//! 2. **Analyze**: sample the image center and derive a high-contrast
//!    recommended caption color ([`analyze`]).
//! 3. **Wrap**: break caption text into display lines at character
//!    granularity against an injected measurer ([`wrap_caption`]).
//! 4. **Composite**: draw the source, per-line background plates, and
//!    stroke+fill text with `vello_cpu`, then encode PNG bytes
//!    ([`Compositor`], [`encode_png`]).
//!
//! [`Session`] ties these together: every accepted mutation re-renders
//! before returning, so the cached render result always matches the state.
#![forbid(unsafe_code)]

mod assets;
mod color;
mod foundation;
mod layout;
mod render;
mod session;
mod text;

pub use assets::decode::{
    MAX_UPLOAD_BYTES, SourceImage, UploadBlob, ingest_image, media_type_for_path,
};
pub use assets::fonts::{FontSource, find_caption_font};
pub use color::analyze::{ColorAnalysis, SAMPLE_GRID, analyze, recommend};
pub use color::model::Hsl;
pub use foundation::core::FontSizePx;
pub use foundation::error::{SubplateError, SubplateResult};
pub use layout::wrap::{MeasureText, SIDE_MARGIN_PX, wrap_caption};
pub use render::compositor::{BOTTOM_MARGIN_PX, Compositor, LINE_SPACING_PX, RenderedFrame};
pub use render::encode::{encode_png, export_file_name};
pub use session::state::Session;
pub use text::engine::{TextBrushRgba8, TextEngine};
