//! Loaded cell queues and their load diagnostics.

use pixel_cells::PixelCell;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

/// Summary of a loaded cell list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BatchDiagnostics {
    /// `max x + 1` over all cells (0 when empty)
    pub width: u32,
    /// `max y + 1` over all cells (0 when empty)
    pub height: u32,
    /// Number of distinct colors
    pub distinct_colors: usize,
}

impl BatchDiagnostics {
    /// Bounding box and distinct colors of `cells`.
    pub fn from_cells(cells: &[PixelCell]) -> Self {
        let (width, height) = bounding_box(cells);
        let distinct_colors = cells
            .iter()
            .map(|c| c.color)
            .collect::<HashSet<_>>()
            .len();
        Self {
            width,
            height,
            distinct_colors,
        }
    }
}

/// `(max x + 1, max y + 1)`, or `(0, 0)` for no cells.
pub fn bounding_box(cells: &[PixelCell]) -> (u32, u32) {
    cells.iter().fold((0, 0), |(w, h), c| {
        (w.max(c.x.saturating_add(1)), h.max(c.y.saturating_add(1)))
    })
}

/// An ordered, immutable list of cells ready for placement.
///
/// Cloning is cheap and shares the cells. A queue is never edited; loading
/// something new replaces it as a whole.
#[derive(Debug, Clone)]
pub struct CellQueue {
    name: String,
    cells: Arc<[PixelCell]>,
    diagnostics: BatchDiagnostics,
}

impl CellQueue {
    pub fn new(name: impl Into<String>, cells: Vec<PixelCell>) -> Self {
        let diagnostics = BatchDiagnostics::from_cells(&cells);
        Self::with_diagnostics(name, cells, diagnostics)
    }

    /// Build a queue whose diagnostics were computed elsewhere
    /// (the batch validator counts raw color strings, not parsed colors).
    pub fn with_diagnostics(
        name: impl Into<String>,
        cells: Vec<PixelCell>,
        diagnostics: BatchDiagnostics,
    ) -> Self {
        Self {
            name: name.into(),
            cells: cells.into(),
            diagnostics,
        }
    }

    pub fn empty() -> Self {
        Self::new("empty", Vec::new())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cells(&self) -> &[PixelCell] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<&PixelCell> {
        self.cells.get(index)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn diagnostics(&self) -> BatchDiagnostics {
        self.diagnostics
    }
}

impl Default for CellQueue {
    fn default() -> Self {
        Self::empty()
    }
}
