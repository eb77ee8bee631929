//! Nearest-neighbor quantizer.
//!
//! Resampling never blends: every destination pixel copies exactly one
//! source pixel, so the output only contains colors present in the source.
//! Blended edges would produce colors the palette was never meant to match.

use super::raster::Raster;
use crate::cell::PixelCell;
use crate::color::ColorValue;

/// Source pixels with alpha below this (0-255 scale) are left transparent.
pub const ALPHA_THRESHOLD: u8 = 128;

/// Output grid size for a `width`x`height` image fitted into the bounds.
///
/// A single uniform scale `min(max_width / width, max_height / height)` is
/// applied to both axes, so the aspect ratio is preserved. Images smaller
/// than the bounds are scaled up. Each output side is `floor(side * scale)`.
///
/// ```
/// use pixel_cells::scaled_dimensions;
///
/// assert_eq!(scaled_dimensions(200, 100, 50, 50), (50, 25));
/// assert_eq!(scaled_dimensions(10, 20, 50, 50), (25, 50));
/// ```
pub fn scaled_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let scale = f64::min(
        max_width as f64 / width as f64,
        max_height as f64 / height as f64,
    );

    // The epsilon absorbs representation error on the limiting axis
    // (7 * (50 / 7) must come out as 50, not 49).
    let fit = |side: u32| ((side as f64 * scale) + 1e-9).floor() as u32;
    (fit(width), fit(height))
}

/// Source coordinate sampled for destination coordinate `dst` (pixel centers).
#[inline]
fn source_index(dst: u32, dst_len: u32, src_len: u32) -> u32 {
    let idx = ((2 * dst as u64 + 1) * src_len as u64) / (2 * dst_len as u64);
    (idx as u32).min(src_len - 1)
}

/// Resample `raster` into at most `max_width`x`max_height` cells.
///
/// Cells come out row-major (y ascending, then x ascending), which is the
/// order they will be placed in. Pixels with alpha below
/// [`ALPHA_THRESHOLD`] produce no cell at all.
///
/// ```
/// use pixel_cells::{quantize, Raster};
///
/// // 2x1 image: opaque red, fully transparent blue
/// let pixels: [u8; 8] = [255, 0, 0, 255, 0, 0, 255, 0];
/// let raster = Raster::new(2, 1, &pixels).unwrap();
///
/// let cells = quantize(&raster, 2, 2);
/// assert_eq!(cells.len(), 1);
/// assert_eq!(cells[0].color.to_string(), "#ff0000");
/// ```
pub fn quantize(raster: &Raster<'_>, max_width: u32, max_height: u32) -> Vec<PixelCell> {
    let (src_w, src_h) = (raster.width(), raster.height());
    let (out_w, out_h) = scaled_dimensions(src_w, src_h, max_width, max_height);
    if out_w == 0 || out_h == 0 {
        return Vec::new();
    }

    let src_xs: Vec<u32> = (0..out_w).map(|x| source_index(x, out_w, src_w)).collect();
    // Upscaled output can be far larger than the source; only trust the
    // source pixel count as an allocation hint.
    let capacity = (out_w as usize)
        .saturating_mul(out_h as usize)
        .min(src_w as usize * src_h as usize);
    let mut cells = Vec::with_capacity(capacity);

    for y in 0..out_h {
        let sy = source_index(y, out_h, src_h);
        for (x, &sx) in src_xs.iter().enumerate() {
            let [r, g, b, a] = raster.rgba(sx, sy);
            if a < ALPHA_THRESHOLD {
                continue;
            }
            cells.push(PixelCell::new(x as u32, y, ColorValue::new(r, g, b)));
        }
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
        rgba.repeat((width * height) as usize)
    }

    #[test]
    fn test_scaled_dimensions_downscale() {
        assert_eq!(scaled_dimensions(100, 100, 50, 50), (50, 50));
        assert_eq!(scaled_dimensions(100, 50, 50, 50), (50, 25));
        assert_eq!(scaled_dimensions(30, 90, 50, 50), (16, 50));
    }

    #[test]
    fn test_scaled_dimensions_upscale_accepted() {
        assert_eq!(scaled_dimensions(7, 7, 50, 50), (50, 50));
        assert_eq!(scaled_dimensions(2, 1, 10, 10), (10, 5));
    }

    #[test]
    fn test_scaled_dimensions_zero() {
        assert_eq!(scaled_dimensions(0, 10, 50, 50), (0, 0));
        assert_eq!(scaled_dimensions(10, 10, 0, 50), (0, 0));
    }

    #[test]
    fn test_source_index_identity() {
        for i in 0..10 {
            assert_eq!(source_index(i, 10, 10), i);
        }
    }

    #[test]
    fn test_source_index_halving_and_doubling() {
        // 4 -> 2 samples source pixels 1 and 3 (centers at 1.0 and 3.0)
        assert_eq!(source_index(0, 2, 4), 1);
        assert_eq!(source_index(1, 2, 4), 3);
        // 2 -> 4 repeats each source pixel twice
        let xs: Vec<u32> = (0..4).map(|x| source_index(x, 4, 2)).collect();
        assert_eq!(xs, vec![0, 0, 1, 1]);
    }

    #[test]
    fn test_quantize_upscale_does_not_preallocate_output() {
        let pixels = solid(1, 1, [9, 9, 9, 0]);
        let raster = Raster::new(1, 1, &pixels).unwrap();

        let cells = quantize(&raster, 2000, 2000);
        assert!(cells.is_empty());
        assert!(cells.capacity() < 1024);
    }

    #[test]
    fn test_quantize_empty_bounds() {
        let pixels = solid(3, 3, [1, 2, 3, 255]);
        let raster = Raster::new(3, 3, &pixels).unwrap();
        assert!(quantize(&raster, 0, 0).is_empty());
    }

    #[test]
    fn test_quantize_no_blending_on_downscale() {
        // Checkerboard 4x4 of black/white downscaled to 2x2 must only
        // contain black or white, never grey.
        let mut pixels = Vec::new();
        for y in 0..4 {
            for x in 0..4 {
                let v = if (x + y) % 2 == 0 { 0 } else { 255 };
                pixels.extend_from_slice(&[v, v, v, 255]);
            }
        }
        let raster = Raster::new(4, 4, &pixels).unwrap();
        let cells = quantize(&raster, 2, 2);
        assert_eq!(cells.len(), 4);
        for cell in cells {
            let c = cell.color.to_string();
            assert!(c == "#000000" || c == "#ffffff", "unexpected color {c}");
        }
    }

    #[test]
    fn test_quantize_alpha_threshold_boundary() {
        let pixels: [u8; 8] = [
            10, 10, 10, 127, // dropped
            20, 20, 20, 128, // kept
        ];
        let raster = Raster::new(2, 1, &pixels).unwrap();
        let cells = quantize(&raster, 2, 1);
        assert_eq!(cells, vec![PixelCell::new(1, 0, ColorValue::new(20, 20, 20))]);
    }

    #[test]
    fn test_quantize_upscale_repeats_pixels() {
        let pixels: [u8; 8] = [255, 0, 0, 255, 0, 0, 255, 255];
        let raster = Raster::new(2, 1, &pixels).unwrap();
        let cells = quantize(&raster, 4, 4);
        // scale 2 -> 4x2 output
        assert_eq!(cells.len(), 8);
        let row0: Vec<String> = cells[..4].iter().map(|c| c.color.to_string()).collect();
        assert_eq!(row0, vec!["#ff0000", "#ff0000", "#0000ff", "#0000ff"]);
    }
}
