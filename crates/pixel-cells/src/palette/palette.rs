//! Discovered palette with nearest-color matching.
//!
//! A palette is whatever set of swatches the drawing surface offers. Each
//! entry pairs a color with an opaque handle `H` that the surface adapter
//! uses to select that swatch; this crate never looks inside the handle.

use crate::color::ColorValue;

/// One selectable color option on the drawing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaletteEntry<H> {
    /// The swatch color
    pub color: ColorValue,
    /// Opaque reference used to select the swatch
    pub handle: H,
}

impl<H> PaletteEntry<H> {
    pub fn new(color: ColorValue, handle: H) -> Self {
        Self { color, handle }
    }
}

/// A set of discovered swatches, kept in discovery order.
///
/// Duplicate colors are allowed. Matching scans in discovery order and only
/// replaces the current best on a strictly smaller distance, so the first
/// discovered of several equidistant entries wins.
///
/// # Example
///
/// ```
/// use pixel_cells::{ColorValue, Palette, PaletteEntry};
///
/// let palette = Palette::from_entries(vec![
///     PaletteEntry::new(ColorValue::new(0, 0, 0), "black"),
///     PaletteEntry::new(ColorValue::new(255, 255, 255), "white"),
/// ]);
///
/// let nearest = palette.find_nearest(ColorValue::new(10, 10, 10)).unwrap();
/// assert_eq!(nearest.handle, "black");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette<H> {
    entries: Vec<PaletteEntry<H>>,
}

impl<H> Palette<H> {
    /// Create an empty palette. Matching against it always yields `None`.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Create a palette holding `entries` in the given (discovery) order.
    pub fn from_entries(entries: Vec<PaletteEntry<H>>) -> Self {
        Self { entries }
    }

    /// Replace the whole palette with a fresh discovery result.
    ///
    /// Entries are not merged with the previous set; callers that want
    /// append semantics must build the combined list themselves.
    pub fn register_discovered(&mut self, entries: Vec<PaletteEntry<H>>) {
        self.entries = entries;
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no swatch has been discovered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in discovery order.
    #[inline]
    pub fn entries(&self) -> &[PaletteEntry<H>] {
        &self.entries
    }

    /// Find the entry closest to `target` by Euclidean RGB distance.
    ///
    /// Returns `None` only when the palette is empty.
    pub fn find_nearest(&self, target: ColorValue) -> Option<&PaletteEntry<H>> {
        let mut best: Option<(&PaletteEntry<H>, u32)> = None;

        for entry in &self.entries {
            let dist = target.distance_squared(entry.color);
            match best {
                Some((_, best_dist)) if dist >= best_dist => {}
                _ => best = Some((entry, dist)),
            }
        }

        best.map(|(entry, _)| entry)
    }
}

impl<H> Default for Palette<H> {
    fn default() -> Self {
        Self::new()
    }
}
