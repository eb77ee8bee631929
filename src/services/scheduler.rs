//! Placement scheduler.
//!
//! Replays a [`CellQueue`] against a [`SurfaceAdapter`], one cell at a
//! time, choosing each cell's swatch from the shared palette.
//!
//! # Pacing and cancellation
//!
//! Each iteration suspends twice: once for the settle delay after a swatch
//! is selected (the surface acknowledges selection asynchronously) and once
//! for the inter-pixel delay before the next cell. Those two sleeps are the
//! only places a run yields. [`PlacementScheduler::stop`] only clears the
//! running flag; the loop notices after the sleep it is currently in, so a
//! stop takes effect within one settle delay plus one inter-pixel delay and
//! no pointer sequence is sent after it is observed.

use chrono::{DateTime, Utc};
use pixel_cells::{Palette, PixelCell};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::RwLock;

use crate::models::{CellQueue, SwatchHandle};
use crate::services::surface::SurfaceAdapter;

/// Pause between selecting a swatch and placing
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 200;

/// Pause between consecutive placements
pub const DEFAULT_INTER_PIXEL_DELAY_MS: u64 = 1000;

/// Palette shared between discovery and the scheduler
pub type SharedPalette = Arc<RwLock<Palette<SwatchHandle>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerOptions {
    pub origin: (i64, i64),
    pub inter_pixel_delay: Duration,
    pub settle_delay: Duration,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self {
            origin: (0, 0),
            inter_pixel_delay: Duration::from_millis(DEFAULT_INTER_PIXEL_DELAY_MS),
            settle_delay: Duration::from_millis(DEFAULT_SETTLE_DELAY_MS),
        }
    }
}

/// Mutable run state of one scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SchedulerState {
    pub running: bool,
    /// Index of the next cell to process
    pub cursor: usize,
    pub origin_x: i64,
    pub origin_y: i64,
    pub inter_pixel_delay_ms: u64,
}

/// Counters for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Cells the cursor moved past
    pub processed: usize,
    /// Cells for which a pointer sequence was sent
    pub placed: usize,
    /// Cells skipped because the palette was empty
    pub skipped_no_match: usize,
    /// Cells skipped because the surface could not be located
    pub skipped_no_surface: usize,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

/// Result of [`PlacementScheduler::start`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// A run was already in progress; nothing changed
    AlreadyRunning,
    /// No cells are loaded
    EmptyQueue,
    /// Every cell was processed
    Finished(RunReport),
    /// The run was stopped before the end of the queue
    Stopped(RunReport),
}

impl StartOutcome {
    pub fn report(&self) -> Option<&RunReport> {
        match self {
            StartOutcome::Finished(report) | StartOutcome::Stopped(report) => Some(report),
            StartOutcome::AlreadyRunning | StartOutcome::EmptyQueue => None,
        }
    }
}

/// Snapshot for status displays
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchedulerStatus {
    #[serde(flatten)]
    pub state: SchedulerState,
    pub queue: String,
    pub total: usize,
    pub last_run: Option<RunReport>,
}

/// A claimed run, handed from [`PlacementScheduler::claim`] to
/// [`PlacementScheduler::run`]
#[must_use = "a claimed run stays marked as running until it is run"]
#[derive(Debug)]
pub struct RunTicket {
    queue: CellQueue,
    generation: u64,
}

struct Inner {
    state: SchedulerState,
    /// Bumped on every start so a run that was stopped and then superseded
    /// by a newer one can tell it is stale
    generation: u64,
    queue: CellQueue,
    last_run: Option<RunReport>,
}

impl Inner {
    fn is_current(&self, generation: u64) -> bool {
        self.state.running && self.generation == generation
    }
}

enum Step {
    Place { index: usize, cell: PixelCell, origin: (i64, i64) },
    Done,
    Stopped,
}

/// Sequential, cancellable placement executor.
///
/// Clones share the same state, so one clone can run [`start`] on a task
/// while another calls [`stop`] or changes the pacing.
///
/// [`start`]: PlacementScheduler::start
/// [`stop`]: PlacementScheduler::stop
#[derive(Clone)]
pub struct PlacementScheduler {
    inner: Arc<Mutex<Inner>>,
    surface: Arc<dyn SurfaceAdapter>,
    palette: SharedPalette,
    settle_delay: Duration,
}

impl PlacementScheduler {
    pub fn new(
        surface: Arc<dyn SurfaceAdapter>,
        palette: SharedPalette,
        options: SchedulerOptions,
    ) -> Self {
        let state = SchedulerState {
            running: false,
            cursor: 0,
            origin_x: options.origin.0,
            origin_y: options.origin.1,
            inter_pixel_delay_ms: options.inter_pixel_delay.as_millis() as u64,
        };

        Self {
            inner: Arc::new(Mutex::new(Inner {
                state,
                generation: 0,
                queue: CellQueue::empty(),
                last_run: None,
            })),
            surface,
            palette,
            settle_delay: options.settle_delay,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Install a new queue, replacing the previous one.
    ///
    /// A run already in progress keeps placing the queue it started with.
    pub fn load(&self, queue: CellQueue) {
        let diagnostics = queue.diagnostics();
        tracing::info!(
            name = queue.name(),
            cells = queue.len(),
            width = diagnostics.width,
            height = diagnostics.height,
            colors = diagnostics.distinct_colors,
            "Cells loaded"
        );

        let mut inner = self.lock();
        if inner.state.running {
            tracing::debug!("Placement in progress, new cells apply from the next start");
        }
        inner.queue = queue;
    }

    /// Run the current queue to completion or until stopped.
    ///
    /// Returns immediately with [`StartOutcome::AlreadyRunning`] if a run is
    /// in progress (the cursor is left alone), or
    /// [`StartOutcome::EmptyQueue`] if nothing is loaded. Never fails:
    /// missing swatches and a missing surface are counted in the report.
    pub async fn start(&self) -> StartOutcome {
        match self.claim() {
            Ok(ticket) => self.run(ticket).await,
            Err(outcome) => outcome,
        }
    }

    /// Mark a run as started without placing anything yet.
    ///
    /// The running flag is set before this returns, so a [`stop`] issued
    /// right after a successful claim is seen by the run. Drive the claimed
    /// run with [`run`].
    ///
    /// [`stop`]: PlacementScheduler::stop
    /// [`run`]: PlacementScheduler::run
    pub fn claim(&self) -> Result<RunTicket, StartOutcome> {
        let mut inner = self.lock();
        if inner.state.running {
            tracing::warn!("Placement is already running");
            return Err(StartOutcome::AlreadyRunning);
        }
        if inner.queue.is_empty() {
            tracing::warn!("Nothing to place, load an image first");
            return Err(StartOutcome::EmptyQueue);
        }
        inner.state.running = true;
        inner.state.cursor = 0;
        inner.generation += 1;
        Ok(RunTicket {
            queue: inner.queue.clone(),
            generation: inner.generation,
        })
    }

    /// Place the cells of a claimed run.
    pub async fn run(&self, ticket: RunTicket) -> StartOutcome {
        let RunTicket { queue, generation } = ticket;

        let mut report = RunReport {
            started_at: Some(Utc::now()),
            ..Default::default()
        };
        tracing::info!(queue = queue.name(), cells = queue.len(), "Placement started");

        let surface = self.surface.locate().await;
        if surface.is_none() {
            tracing::warn!("Drawing surface not found, placements will be skipped");
        }

        let finished = loop {
            let step = {
                let inner = self.lock();
                if !inner.is_current(generation) {
                    Step::Stopped
                } else {
                    match queue.get(inner.state.cursor) {
                        Some(&cell) => Step::Place {
                            index: inner.state.cursor,
                            cell,
                            origin: (inner.state.origin_x, inner.state.origin_y),
                        },
                        None => Step::Done,
                    }
                }
            };

            let (index, cell, origin) = match step {
                Step::Place {
                    index,
                    cell,
                    origin,
                } => (index, cell, origin),
                Step::Done => break true,
                Step::Stopped => break false,
            };

            let x = origin.0 + cell.x as i64;
            let y = origin.1 + cell.y as i64;

            let swatch = self
                .palette
                .read()
                .await
                .find_nearest(cell.color)
                .map(|entry| entry.handle.clone());

            match swatch {
                Some(swatch) => {
                    self.surface.select_swatch(&swatch).await;
                    tokio::time::sleep(self.settle_delay).await;

                    if !self.lock().is_current(generation) {
                        break false;
                    }

                    match &surface {
                        Some(handle) => {
                            self.surface.emit_pointer_sequence(handle, x, y).await;
                            report.placed += 1;
                            tracing::debug!(
                                cell = index + 1,
                                total = queue.len(),
                                x,
                                y,
                                color = %cell.color,
                                swatch = %swatch,
                                "Pixel placed"
                            );
                        }
                        None => report.skipped_no_surface += 1,
                    }
                }
                None => {
                    report.skipped_no_match += 1;
                    tracing::debug!(cell = index + 1, color = %cell.color, "No palette match, cell skipped");
                }
            }

            let delay = {
                let mut inner = self.lock();
                if inner.generation != generation {
                    break false;
                }
                inner.state.cursor += 1;
                report.processed = inner.state.cursor;
                Duration::from_millis(inner.state.inter_pixel_delay_ms)
            };

            tokio::time::sleep(delay).await;
        };

        report.finished_at = Some(Utc::now());

        {
            let mut inner = self.lock();
            if inner.generation == generation {
                inner.state.running = false;
                inner.last_run = Some(report.clone());
            }
        }

        tracing::info!(
            queue = queue.name(),
            processed = report.processed,
            placed = report.placed,
            skipped_no_match = report.skipped_no_match,
            skipped_no_surface = report.skipped_no_surface,
            finished,
            "Placement ended"
        );

        if finished {
            StartOutcome::Finished(report)
        } else {
            StartOutcome::Stopped(report)
        }
    }

    /// Ask a running placement to stop.
    ///
    /// Returns whether a run was in progress. The loop exits at its next
    /// check; this does not interrupt a sleep or an in-flight signal.
    pub fn stop(&self) -> bool {
        let mut inner = self.lock();
        let was_running = inner.state.running;
        inner.state.running = false;
        if was_running {
            tracing::info!(cursor = inner.state.cursor, "Placement stop requested");
        }
        was_running
    }

    /// Move the origin that cell offsets are added to.
    ///
    /// Applies from the next cell; a coordinate already computed is kept.
    pub fn set_origin(&self, x: i64, y: i64) {
        let mut inner = self.lock();
        inner.state.origin_x = x;
        inner.state.origin_y = y;
        tracing::info!(x, y, "Origin set");
    }

    /// Change the pause between placements, from the next wait on.
    pub fn set_inter_pixel_delay(&self, ms: u64) {
        self.lock().state.inter_pixel_delay_ms = ms;
        tracing::info!(delay_ms = ms, "Inter-pixel delay set");
    }

    pub fn state(&self) -> SchedulerState {
        self.lock().state
    }

    pub fn is_running(&self) -> bool {
        self.lock().state.running
    }

    /// The currently loaded queue
    pub fn queue(&self) -> CellQueue {
        self.lock().queue.clone()
    }

    pub fn palette(&self) -> &SharedPalette {
        &self.palette
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    pub fn status(&self) -> SchedulerStatus {
        let inner = self.lock();
        SchedulerStatus {
            state: inner.state,
            queue: inner.queue.name().to_string(),
            total: inner.queue.len(),
            last_run: inner.last_run.clone(),
        }
    }
}
