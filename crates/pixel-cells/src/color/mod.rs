//! Color types
//!
//! Cells and palette entries carry plain 24-bit RGB colors. There is no
//! gamma handling anywhere in this crate: distances are measured directly
//! on the 8-bit channels, which is what the drawing surfaces we target
//! expose through their swatches.
//!
//! # Example
//!
//! ```
//! use pixel_cells::ColorValue;
//!
//! let red: ColorValue = "#F00".parse().unwrap();
//! assert_eq!(red.to_string(), "#ff0000");
//! ```

mod value;

pub use value::{parse_with_alpha, ColorValue};
