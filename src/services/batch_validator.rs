//! Validation of externally supplied pixel lists.
//!
//! A batch is all-or-nothing: one malformed element rejects the whole list.

use pixel_cells::{ColorValue, PixelCell};
use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::error::ValidationError;
use crate::models::{bounding_box, BatchDiagnostics, CellQueue};

/// A batch that passed validation, in its original order.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedBatch {
    pub cells: Vec<PixelCell>,
    pub diagnostics: BatchDiagnostics,
}

impl ValidatedBatch {
    pub fn into_queue(self, name: impl Into<String>) -> CellQueue {
        CellQueue::with_diagnostics(name, self.cells, self.diagnostics)
    }
}

/// Validate a JSON list of `{x, y, color}` objects.
///
/// `x` and `y` must be non-negative integers and `color` a string that
/// parses as a color. Other keys are ignored. The distinct-color count in
/// the diagnostics is taken over the raw `color` strings as supplied.
pub fn validate(batch: &Value) -> Result<ValidatedBatch, ValidationError> {
    let items = batch.as_array().ok_or(ValidationError::NotAList)?;

    let mut cells = Vec::with_capacity(items.len());
    let mut raw_colors = HashSet::new();

    for (index, item) in items.iter().enumerate() {
        let obj = item
            .as_object()
            .ok_or(ValidationError::NotAnObject { index })?;

        let x = coordinate(obj, index, "x")?;
        let y = coordinate(obj, index, "y")?;
        let raw = obj
            .get("color")
            .and_then(Value::as_str)
            .ok_or_else(|| invalid(index, "color", "expected a string"))?;
        let color: ColorValue = raw
            .parse()
            .map_err(|e| invalid(index, "color", format!("{e}")))?;

        raw_colors.insert(raw);
        cells.push(PixelCell::new(x, y, color));
    }

    let (width, height) = bounding_box(&cells);
    let diagnostics = BatchDiagnostics {
        width,
        height,
        distinct_colors: raw_colors.len(),
    };

    Ok(ValidatedBatch { cells, diagnostics })
}

fn coordinate(
    obj: &Map<String, Value>,
    index: usize,
    field: &'static str,
) -> Result<u32, ValidationError> {
    let number = match obj.get(field) {
        Some(Value::Number(n)) => n,
        Some(_) => return Err(invalid(index, field, "expected a number")),
        None => return Err(invalid(index, field, "missing")),
    };

    // 3.0 is accepted as 3; fractions and negatives are not cell coordinates
    let as_int = number.as_u64().or_else(|| {
        number
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 0.0)
            .map(|f| f as u64)
    });

    as_int
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| {
            invalid(
                index,
                field,
                format!("{number} is not a non-negative integer"),
            )
        })
}

fn invalid(index: usize, field: &'static str, reason: impl Into<String>) -> ValidationError {
    ValidationError::InvalidField {
        index,
        field,
        reason: reason.into(),
    }
}

/// Lay a flat, row-major color list out on a `width`-wide grid.
///
/// Colors beyond `width * height` are ignored; a short list simply yields
/// fewer cells.
pub fn cells_from_grid(colors: &[ColorValue], width: u32, height: u32) -> Vec<PixelCell> {
    let mut cells = Vec::with_capacity(colors.len());
    for y in 0..height {
        for x in 0..width {
            let index = (y * width + x) as usize;
            if let Some(&color) = colors.get(index) {
                cells.push(PixelCell::new(x, y, color));
            }
        }
    }
    cells
}
