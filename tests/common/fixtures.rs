//! Test fixtures and constants.

use base64::Engine;
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

use pixbot::models::{AppConfig, CellQueue};
use pixel_cells::{ColorValue, PixelCell};

/// Palette configured for test apps, in discovery order
pub const TEST_PALETTE: &[&str] = &["#000000", "#ffffff", "#ff0000", "#ffff00"];

/// Config with fast pacing so runs finish in real time
pub fn fast_config() -> AppConfig {
    AppConfig {
        delay_ms: 1,
        settle_ms: 0,
        palette: TEST_PALETTE.iter().map(|c| c.to_string()).collect(),
        ..AppConfig::default()
    }
}

/// Encode an RGBA image as PNG
pub fn png_bytes(width: u32, height: u32, pixel: impl Fn(u32, u32) -> [u8; 4]) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| Rgba(pixel(x, y)));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .expect("Failed to encode PNG");
    out.into_inner()
}

/// 4x4 checkerboard of opaque red and transparent pixels
pub fn checkerboard_png() -> Vec<u8> {
    png_bytes(4, 4, |x, y| {
        if (x + y) % 2 == 0 {
            [255, 0, 0, 255]
        } else {
            [0, 0, 255, 0]
        }
    })
}

pub fn data_url(bytes: &[u8]) -> String {
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// A single row of `len` cells at y = 0
pub fn row_queue(name: &str, len: u32, color: &str) -> CellQueue {
    let color: ColorValue = color.parse().expect("Invalid test color");
    CellQueue::new(
        name,
        (0..len).map(|x| PixelCell::new(x, 0, color)).collect(),
    )
}
