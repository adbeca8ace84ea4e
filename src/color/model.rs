use crate::foundation::error::{SubplateError, SubplateResult};

/// Caption color in HSL form: hue in degrees `0..360`, saturation and
/// lightness as percentages `0..=100`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Hsl {
    /// Hue in degrees.
    pub h: f64,
    /// Saturation percent.
    pub s: f64,
    /// Lightness percent.
    pub l: f64,
}

impl Hsl {
    /// Build an HSL triple without normalization.
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Parse a 6-digit hex color, with or without a leading `#`.
    pub fn from_hex(s: &str) -> SubplateResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 {
            return Err(SubplateError::validation(
                "hex color must be #RRGGBB (case-insensitive)",
            ));
        }

        fn hex_byte(pair: &str) -> SubplateResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| SubplateError::validation(format!("invalid hex byte \"{pair}\"")))
        }

        let r = hex_byte(&s[0..2])?;
        let g = hex_byte(&s[2..4])?;
        let b = hex_byte(&s[4..6])?;
        Ok(Self::from_rgb8(r, g, b))
    }

    /// Serialize as lowercase `#rrggbb`, quantizing through 8-bit channels.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Convert 8-bit RGB to HSL using the standard max/min formulation.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        let r = f64::from(r) / 255.0;
        let g = f64::from(g) / 255.0;
        let b = f64::from(b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            // Achromatic: hue is degenerate, report 0.
            return Self::new(0.0, 0.0, l * 100.0);
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Self::new(h * 60.0, s * 100.0, l * 100.0)
    }

    /// Convert to 8-bit RGB via the piecewise hue function (six 60-degree
    /// segments), clamping each channel to `[0, 255]`.
    pub fn to_rgb8(self) -> [u8; 3] {
        let h = ((self.h % 360.0) + 360.0) % 360.0;
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let l = (self.l / 100.0).clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let hp = h / 60.0;
        let x = c * (1.0 - (hp % 2.0 - 1.0).abs());

        let (r1, g1, b1) = match hp {
            v if v < 1.0 => (c, x, 0.0),
            v if v < 2.0 => (x, c, 0.0),
            v if v < 3.0 => (0.0, c, x),
            v if v < 4.0 => (0.0, x, c),
            v if v < 5.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let m = l - c / 2.0;
        let to_u8 = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        [to_u8(r1), to_u8(g1), to_u8(b1)]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/model.rs"]
mod tests;
