//! pixel-cells: turn images into placeable color cells
//!
//! This library holds the pure, synchronous core of pixel placement:
//!
//! - [`ColorValue`]: 24-bit RGB with canonical `#rrggbb` text form
//! - [`quantize`]: nearest-neighbor resampling of an RGBA8 [`Raster`] into a
//!   bounded, row-major list of opaque [`PixelCell`]s
//! - [`Palette`]: the swatches a drawing surface offers, with
//!   [`Palette::find_nearest`] picking the closest one for a cell
//!
//! Nothing here performs I/O or waits; scheduling and surface interaction
//! live in the `pixbot` crate.
//!
//! # Example
//!
//! ```
//! use pixel_cells::{quantize, ColorValue, Palette, PaletteEntry, Raster};
//!
//! // 2x2 image: red, green / blue, transparent
//! let pixels: [u8; 16] = [
//!     255, 0, 0, 255,   0, 255, 0, 255,
//!     0, 0, 255, 255,   0, 0, 0, 0,
//! ];
//! let raster = Raster::new(2, 2, &pixels).unwrap();
//! let cells = quantize(&raster, 2, 2);
//! assert_eq!(cells.len(), 3);
//!
//! let palette = Palette::from_entries(vec![
//!     PaletteEntry::new(ColorValue::new(200, 0, 0), "dark-red"),
//!     PaletteEntry::new(ColorValue::new(0, 0, 200), "dark-blue"),
//! ]);
//! let swatch = palette.find_nearest(cells[0].color).unwrap();
//! assert_eq!(swatch.handle, "dark-red");
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`ColorValue`] (as its
//!   canonical string), [`PixelCell`] and [`PaletteEntry`].

pub mod cell;
pub mod color;
pub mod palette;
pub mod quantize;

#[cfg(test)]
mod domain_tests;

pub use cell::PixelCell;
pub use color::{parse_with_alpha, ColorValue};
pub use palette::{Palette, PaletteEntry, ParseColorError};
pub use quantize::{
    quantize, scaled_dimensions, DecodedRaster, Raster, RasterError, ALPHA_THRESHOLD,
};
