//! RGBA8 raster buffers

use std::fmt;

/// Error returned when a pixel buffer does not match its dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    /// Buffer length is not `width * height * 4`
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RasterError::BufferSize {
                width,
                height,
                expected,
                actual,
            } => write!(
                f,
                "pixel buffer for {}x{} raster must be {} bytes, got {}",
                width, height, expected, actual
            ),
        }
    }
}

impl std::error::Error for RasterError {}

fn check_len(width: u32, height: u32, actual: usize) -> Result<(), RasterError> {
    let expected = width as usize * height as usize * 4;
    if expected != actual {
        return Err(RasterError::BufferSize {
            width,
            height,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Borrowed view of a row-major RGBA8 pixel buffer.
#[derive(Debug, Clone, Copy)]
pub struct Raster<'a> {
    width: u32,
    height: u32,
    pixels: &'a [u8],
}

impl<'a> Raster<'a> {
    /// Wrap `pixels` (4 bytes per pixel, row-major, no padding).
    pub fn new(width: u32, height: u32, pixels: &'a [u8]) -> Result<Self, RasterError> {
        check_len(width, height, pixels.len())?;
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA bytes of the pixel at (`x`, `y`).
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the raster.
    #[inline]
    pub fn rgba(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }
}

/// Owned RGBA8 raster, as produced by an image decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRaster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl DecodedRaster {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, RasterError> {
        check_len(width, height, pixels.len())?;
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Borrow the pixels as a [`Raster`].
    pub fn view(&self) -> Raster<'_> {
        Raster {
            width: self.width,
            height: self.height,
            pixels: &self.pixels,
        }
    }
}
