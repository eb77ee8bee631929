//! Placement cells

use crate::color::ColorValue;

/// One coordinate + color unit to place.
///
/// `x`/`y` are offsets relative to the drawing origin; the scheduler adds
/// its origin when placing. Cell lists are placement-ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelCell {
    pub x: u32,
    pub y: u32,
    pub color: ColorValue,
}

impl PixelCell {
    #[inline]
    pub const fn new(x: u32, y: u32, color: ColorValue) -> Self {
        Self { x, y, color }
    }
}
