//! Behavioural tests for the quantizer and matcher working together.

use crate::{quantize, scaled_dimensions, ColorValue, Palette, PaletteEntry, PixelCell, Raster};

fn rgba_image(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 4]) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(&f(x, y));
        }
    }
    pixels
}

fn hex(s: &str) -> ColorValue {
    s.parse().unwrap()
}

#[test]
fn aspect_ratio_preserved_within_rounding() {
    let sizes = [(1, 1), (3, 7), (640, 480), (17, 1000), (999, 3), (50, 50), (51, 49)];
    let bounds = [(50, 50), (10, 30), (1, 1), (64, 16)];

    for &(w, h) in &sizes {
        for &(mw, mh) in &bounds {
            let (ow, oh) = scaled_dimensions(w, h, mw, mh);
            assert!(ow <= mw && oh <= mh, "{w}x{h} in {mw}x{mh} gave {ow}x{oh}");

            let scale = f64::min(mw as f64 / w as f64, mh as f64 / h as f64);
            let exact_w = w as f64 * scale;
            let exact_h = h as f64 * scale;
            assert!((exact_w - ow as f64).abs() < 1.0, "{w}x{h} -> {ow}");
            assert!((exact_h - oh as f64).abs() < 1.0, "{w}x{h} -> {oh}");
        }
    }
}

#[test]
fn low_alpha_pixel_is_dropped_high_alpha_kept() {
    let pixels = rgba_image(2, 1, |x, _| if x == 0 { [9, 9, 9, 50] } else { [7, 7, 7, 200] });
    let raster = Raster::new(2, 1, &pixels).unwrap();
    let cells = quantize(&raster, 2, 1);

    assert_eq!(cells, vec![PixelCell::new(1, 0, ColorValue::new(7, 7, 7))]);
}

#[test]
fn two_by_two_output_is_row_major() {
    let pixels = rgba_image(2, 2, |x, y| [x as u8, y as u8, 0, 255]);
    let raster = Raster::new(2, 2, &pixels).unwrap();
    let coords: Vec<(u32, u32)> = quantize(&raster, 2, 2).iter().map(|c| (c.x, c.y)).collect();

    assert_eq!(coords, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
}

#[test]
fn quantized_colors_are_canonical_hex() {
    let pixels = rgba_image(1, 1, |_, _| [0x0a, 0xb0, 0x0c, 255]);
    let raster = Raster::new(1, 1, &pixels).unwrap();
    let cells = quantize(&raster, 1, 1);

    assert_eq!(cells[0].color.to_string(), "#0ab00c");
}

#[test]
fn black_white_palette_matching() {
    let palette = Palette::from_entries(vec![
        PaletteEntry::new(hex("#000000"), "black"),
        PaletteEntry::new(hex("#FFFFFF"), "white"),
    ]);

    assert_eq!(palette.find_nearest(hex("#0A0A0A")).unwrap().handle, "black");
    assert_eq!(palette.find_nearest(hex("#F5F5F5")).unwrap().handle, "white");
}

#[test]
fn empty_palette_never_matches() {
    let palette: Palette<()> = Palette::new();
    for target in ["#000000", "#ffffff", "#123456"] {
        assert!(palette.find_nearest(hex(target)).is_none());
    }
}

#[test]
fn every_quantized_cell_matches_some_swatch() {
    let pixels = rgba_image(8, 8, |x, y| [(x * 32) as u8, (y * 32) as u8, 128, 255]);
    let raster = Raster::new(8, 8, &pixels).unwrap();
    let palette = Palette::from_entries(vec![
        PaletteEntry::new(hex("#000000"), 0),
        PaletteEntry::new(hex("#ff0000"), 1),
        PaletteEntry::new(hex("#00ff00"), 2),
        PaletteEntry::new(hex("#0000ff"), 3),
    ]);

    let cells = quantize(&raster, 4, 4);
    assert_eq!(cells.len(), 16);
    for cell in &cells {
        let hit = palette.find_nearest(cell.color).unwrap();
        // No other entry may be strictly closer
        for other in palette.entries() {
            assert!(cell.color.distance(hit.color) <= cell.color.distance(other.color));
        }
    }
}
