use crate::foundation::error::{SubplateError, SubplateResult};

/// Caption font size in pixels, bounded to the range the compositor supports.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct FontSizePx(u32);

impl FontSizePx {
    /// Smallest accepted size.
    pub const MIN: u32 = 24;
    /// Largest accepted size.
    pub const MAX: u32 = 60;
    /// Size used when the caller never sets one.
    pub const DEFAULT: u32 = 40;

    /// Construct a size, returning `None` when `px` is out of range.
    pub fn new(px: u32) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&px).then_some(Self(px))
    }

    /// Construct a size, rejecting out-of-range values with a validation error.
    pub fn try_new(px: u32) -> SubplateResult<Self> {
        Self::new(px).ok_or_else(|| {
            SubplateError::validation(format!(
                "font size {px} is outside [{}, {}]",
                Self::MIN,
                Self::MAX
            ))
        })
    }

    /// Raw pixel value.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Height of one caption band: `round(size * 1.8)`.
    pub fn line_height_px(self) -> u32 {
        (f64::from(self.0) * 1.8).round() as u32
    }

    /// Outline stroke width: `max(2, size * 0.1)`.
    pub fn stroke_width_px(self) -> f64 {
        (f64::from(self.0) * 0.1).max(2.0)
    }
}

impl Default for FontSizePx {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}
