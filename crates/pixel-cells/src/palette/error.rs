//! Error types for color parsing

use std::fmt;
use std::num::ParseIntError;

/// Error type for parsing color strings.
///
/// Returned when a hex color has the wrong length or bad digits, or when a
/// CSS `rgb()`/`rgba()` string cannot be read.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseColorError {
    /// Empty (or all-whitespace) input
    Empty,
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    InvalidLength,
    /// Invalid hexadecimal character encountered
    InvalidHex(ParseIntError),
    /// Malformed `rgb()`/`rgba()` string or a channel outside 0..=255
    InvalidFunction(String),
}

impl From<ParseIntError> for ParseColorError {
    fn from(err: ParseIntError) -> Self {
        ParseColorError::InvalidHex(err)
    }
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::Empty => write!(f, "empty color string"),
            ParseColorError::InvalidLength => {
                write!(f, "invalid hex color length (expected 3 or 6 characters)")
            }
            ParseColorError::InvalidHex(err) => {
                write!(f, "invalid hex character: {}", err)
            }
            ParseColorError::InvalidFunction(s) => {
                write!(f, "invalid rgb() color: {}", s)
            }
        }
    }
}

impl std::error::Error for ParseColorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseColorError::InvalidHex(err) => Some(err),
            _ => None,
        }
    }
}
