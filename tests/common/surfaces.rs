//! Surface adapters for driving the scheduler in tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use pixbot::models::{SurfaceHandle, SwatchHandle};
use pixbot::services::{RecordingSurface, SurfaceAdapter, SurfaceEvent};

type Hook = Box<dyn Fn(usize) + Send + Sync>;

/// Recording surface that calls a hook after every pointer sequence.
///
/// The hook receives the 1-based count of sequences emitted so far, which
/// lets a test act at an exact point in a run.
pub struct HookSurface {
    recorder: RecordingSurface,
    hook: Mutex<Option<Hook>>,
    emitted: AtomicUsize,
}

impl HookSurface {
    pub fn new() -> Self {
        Self {
            recorder: RecordingSurface::new(),
            hook: Mutex::new(None),
            emitted: AtomicUsize::new(0),
        }
    }

    pub fn on_emit(&self, hook: impl Fn(usize) + Send + Sync + 'static) {
        *self.hook.lock().unwrap() = Some(Box::new(hook));
    }

    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.recorder.events()
    }

    pub fn placements(&self) -> Vec<(i64, i64)> {
        self.recorder.placements()
    }

    /// Handles of selected swatches, oldest first
    pub fn selections(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SurfaceEvent::Selected { swatch } => Some(swatch.to_string()),
                SurfaceEvent::Pointer { .. } => None,
            })
            .collect()
    }
}

#[async_trait]
impl SurfaceAdapter for HookSurface {
    async fn locate(&self) -> Option<SurfaceHandle> {
        self.recorder.locate().await
    }

    async fn select_swatch(&self, swatch: &SwatchHandle) {
        self.recorder.select_swatch(swatch).await;
    }

    async fn emit_pointer_sequence(&self, surface: &SurfaceHandle, x: i64, y: i64) {
        self.recorder.emit_pointer_sequence(surface, x, y).await;
        let count = self.emitted.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(hook) = self.hook.lock().unwrap().as_ref() {
            hook(count);
        }
    }
}
