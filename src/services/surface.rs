//! Drawing surface abstraction.
//!
//! The surface is owned by a third-party application; all we can do is
//! locate it, click a swatch, and send pointer signals at a coordinate.
//! None of these calls report success: a surface may ignore or reject any
//! of them and the scheduler will never know.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Mutex;

use crate::models::{SurfaceHandle, SwatchHandle};

/// Signals emitted, in order, for one placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerSignal {
    Down,
    Up,
    Click,
}

/// The press/release/click sequence sent for every placement.
pub const POINTER_SEQUENCE: [PointerSignal; 3] =
    [PointerSignal::Down, PointerSignal::Up, PointerSignal::Click];

/// Adapter to an external drawing surface
#[async_trait]
pub trait SurfaceAdapter: Send + Sync {
    /// Find the drawing surface, if it is currently available
    async fn locate(&self) -> Option<SurfaceHandle>;

    /// Trigger selection of a palette swatch
    async fn select_swatch(&self, swatch: &SwatchHandle);

    /// Send [`POINTER_SEQUENCE`] at (`x`, `y`) relative to the surface's own origin
    async fn emit_pointer_sequence(&self, surface: &SurfaceHandle, x: i64, y: i64);
}

/// Side effect observed by a [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SurfaceEvent {
    Selected { swatch: SwatchHandle },
    Pointer { x: i64, y: i64 },
}

/// In-process surface that logs and records what it is asked to do.
///
/// Used for dry runs when no bridge is configured, and by tests.
pub struct RecordingSurface {
    surface: Option<SurfaceHandle>,
    events: Mutex<Vec<SurfaceEvent>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            surface: Some(SurfaceHandle::new("dry-run")),
            events: Mutex::new(Vec::new()),
        }
    }

    /// A surface that can never be located
    pub fn unavailable() -> Self {
        Self {
            surface: None,
            events: Mutex::new(Vec::new()),
        }
    }

    /// Everything recorded so far, oldest first
    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.lock().clone()
    }

    /// Recorded pointer placements as (x, y)
    pub fn placements(&self) -> Vec<(i64, i64)> {
        self.lock()
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::Pointer { x, y } => Some((*x, *y)),
                SurfaceEvent::Selected { .. } => None,
            })
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<SurfaceEvent>> {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SurfaceAdapter for RecordingSurface {
    async fn locate(&self) -> Option<SurfaceHandle> {
        self.surface.clone()
    }

    async fn select_swatch(&self, swatch: &SwatchHandle) {
        tracing::debug!(swatch = %swatch, "Swatch selected");
        self.lock().push(SurfaceEvent::Selected {
            swatch: swatch.clone(),
        });
    }

    async fn emit_pointer_sequence(&self, surface: &SurfaceHandle, x: i64, y: i64) {
        tracing::debug!(surface = %surface, x, y, signals = ?POINTER_SEQUENCE, "Pointer sequence");
        self.lock().push(SurfaceEvent::Pointer { x, y });
    }
}
