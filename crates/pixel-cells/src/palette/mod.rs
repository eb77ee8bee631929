//! Palette types and nearest-color matching
//!
//! This module provides the discovered-swatch palette and the error type
//! for color parsing.

mod error;
mod palette;

pub use error::ParseColorError;
pub use palette::{Palette, PaletteEntry};
