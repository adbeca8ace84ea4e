/// Convenience result type used across Subplate.
pub type SubplateResult<T> = Result<T, SubplateError>;

/// Top-level error taxonomy used by engine and session APIs.
#[derive(thiserror::Error, Debug)]
pub enum SubplateError {
    /// Invalid user-provided or internal data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Upload declared a media type that is not an image.
    #[error("invalid file type '{0}': expected an image")]
    InvalidFileType(String),

    /// Upload exceeds the per-file size limit.
    #[error("file too large: {actual} bytes exceeds the {limit} byte limit")]
    FileTooLarge {
        /// Size of the rejected upload in bytes.
        actual: usize,
        /// Enforced upper bound in bytes.
        limit: usize,
    },

    /// Upload bytes failed to decode into a raster image.
    #[error("image decode error: {0}")]
    ImageDecode(String),

    /// Errors while reading bytes from the filesystem.
    #[error("file read error: {0}")]
    FileRead(String),

    /// Export was requested before any composite was rendered.
    #[error("nothing to export: no rendered image is available")]
    NothingToExport,

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SubplateError {
    /// Build a [`SubplateError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SubplateError::ImageDecode`] value.
    pub fn image_decode(msg: impl Into<String>) -> Self {
        Self::ImageDecode(msg.into())
    }

    /// Build a [`SubplateError::FileRead`] value.
    pub fn file_read(msg: impl Into<String>) -> Self {
        Self::FileRead(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
