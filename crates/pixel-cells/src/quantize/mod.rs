//! Raster to cell quantization
//!
//! Turns an RGBA8 raster into a bounded grid of opaque [`PixelCell`]s
//! using nearest-neighbor resampling.
//!
//! [`PixelCell`]: crate::PixelCell

mod quantizer;
mod raster;

pub use quantizer::{quantize, scaled_dimensions, ALPHA_THRESHOLD};
pub use raster::{DecodedRaster, Raster, RasterError};
