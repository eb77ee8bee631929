//! 24-bit RGB color value with canonical `#rrggbb` formatting.

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// A 24-bit RGB color.
///
/// The canonical text form is a lower-case, zero-padded `#rrggbb` string.
/// Channels are bytes, so every value is in range by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorValue {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl ColorValue {
    /// Create a color from its three channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a byte array [R, G, B].
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array [R, G, B].
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Squared Euclidean distance in RGB space.
    ///
    /// Orders colors exactly like [`ColorValue::distance`] without the
    /// square root, so palette scans compare these.
    #[inline]
    pub fn distance_squared(self, other: ColorValue) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Euclidean distance in RGB space: `sqrt(dr² + dg² + db²)`.
    ///
    /// No perceptual weighting is applied.
    ///
    /// ```
    /// use pixel_cells::ColorValue;
    ///
    /// let black = ColorValue::new(0, 0, 0);
    /// let grey = ColorValue::new(3, 4, 0);
    /// assert_eq!(black.distance(grey), 5.0);
    /// ```
    #[inline]
    pub fn distance(self, other: ColorValue) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for ColorValue {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl FromStr for ColorValue {
    type Err = ParseColorError;

    /// Parse a color from a hex or CSS functional string.
    ///
    /// Supports the following formats:
    /// - `#RRGGBB` / `RRGGBB` - standard 6-digit hex
    /// - `#RGB` / `RGB` - shorthand 3-digit hex (expands to RRGGBB)
    /// - `rgb(r, g, b)` / `rgba(r, g, b, a)` - the form browsers report for
    ///   computed background colors; alpha is ignored here, see
    ///   [`parse_with_alpha`] when it matters.
    ///
    /// Parsing is case-insensitive. Leading and trailing whitespace is trimmed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_with_alpha(s).map(|(color, _)| color)
    }
}

/// Parse a color string, also returning its alpha in `0.0..=1.0`.
///
/// Hex colors are always opaque (alpha `1.0`).
///
/// ```
/// use pixel_cells::{parse_with_alpha, ColorValue};
///
/// let (color, alpha) = parse_with_alpha("rgba(0, 0, 0, 0)").unwrap();
/// assert_eq!(color, ColorValue::new(0, 0, 0));
/// assert_eq!(alpha, 0.0);
/// ```
pub fn parse_with_alpha(s: &str) -> Result<(ColorValue, f32), ParseColorError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ParseColorError::Empty);
    }

    let lower = s.to_ascii_lowercase();
    if let Some(args) = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
    {
        let args = args
            .strip_suffix(')')
            .ok_or_else(|| ParseColorError::InvalidFunction(s.to_string()))?;
        return parse_function_args(args)
            .ok_or_else(|| ParseColorError::InvalidFunction(s.to_string()));
    }

    parse_hex(&lower).map(|color| (color, 1.0))
}

fn parse_hex(s: &str) -> Result<ColorValue, ParseColorError> {
    let s = s.strip_prefix('#').unwrap_or(s);
    if !s.is_ascii() {
        return Err(ParseColorError::InvalidLength);
    }

    match s.len() {
        3 => {
            // Shorthand: expand each digit by multiplying by 17 (0xF -> 0xFF)
            let r = u8::from_str_radix(&s[0..1], 16)? * 17;
            let g = u8::from_str_radix(&s[1..2], 16)? * 17;
            let b = u8::from_str_radix(&s[2..3], 16)? * 17;
            Ok(ColorValue::new(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&s[0..2], 16)?;
            let g = u8::from_str_radix(&s[2..4], 16)?;
            let b = u8::from_str_radix(&s[4..6], 16)?;
            Ok(ColorValue::new(r, g, b))
        }
        _ => Err(ParseColorError::InvalidLength),
    }
}

/// Parse the comma or whitespace separated arguments of `rgb()`/`rgba()`.
fn parse_function_args(args: &str) -> Option<(ColorValue, f32)> {
    let parts: Vec<&str> = args
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();

    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }

    let channel = |p: &str| -> Option<u8> {
        let v: f32 = p.parse().ok()?;
        if (0.0..=255.0).contains(&v) {
            Some(v.round() as u8)
        } else {
            None
        }
    };

    let color = ColorValue::new(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?);
    let alpha = match parts.get(3) {
        Some(a) => {
            let a = match a.strip_suffix('%') {
                Some(pct) => pct.parse::<f32>().ok()? / 100.0,
                None => a.parse::<f32>().ok()?,
            };
            a.clamp(0.0, 1.0)
        }
        None => 1.0,
    };

    Some((color, alpha))
}

#[cfg(feature = "serde")]
impl serde::Serialize for ColorValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ColorValue {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
