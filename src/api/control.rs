use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Json as JsonExtractor,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::server::AppState;
use crate::services::{RunReport, SchedulerStatus, StartOutcome};

/// Scheduler state snapshot
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct StatusResponse {
    /// Whether a placement run is in progress
    pub running: bool,
    /// Index of the next cell to place
    pub cursor: usize,
    /// Number of cells in the loaded queue
    pub total: usize,
    /// Name of the loaded queue
    pub queue: String,
    pub origin_x: i64,
    pub origin_y: i64,
    /// Pause between placements in milliseconds
    pub delay_ms: u64,
    /// Counters of the most recent finished or stopped run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_run: Option<RunSummary>,
}

/// Counters of one placement run
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RunSummary {
    pub processed: usize,
    pub placed: usize,
    pub skipped_no_match: usize,
    pub skipped_no_surface: usize,
    /// RFC 3339 timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<String>,
}

impl From<&RunReport> for RunSummary {
    fn from(report: &RunReport) -> Self {
        Self {
            processed: report.processed,
            placed: report.placed,
            skipped_no_match: report.skipped_no_match,
            skipped_no_surface: report.skipped_no_surface,
            finished_at: report.finished_at.map(|t| t.to_rfc3339()),
        }
    }
}

impl From<SchedulerStatus> for StatusResponse {
    fn from(status: SchedulerStatus) -> Self {
        Self {
            running: status.state.running,
            cursor: status.state.cursor,
            total: status.total,
            queue: status.queue,
            origin_x: status.state.origin_x,
            origin_y: status.state.origin_y,
            delay_ms: status.state.inter_pixel_delay_ms,
            last_run: status.last_run.as_ref().map(RunSummary::from),
        }
    }
}

/// Reply to a start request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StartResponse {
    /// Whether a new run was launched
    pub started: bool,
    pub message: String,
}

/// Reply to a stop request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StopResponse {
    /// Whether a run was in progress
    pub stopped: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct OriginRequest {
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DelayRequest {
    /// Pause between placements in milliseconds
    pub delay_ms: u64,
}

/// Current scheduler state
#[utoipa::path(
    get,
    path = "/api/status",
    responses(
        (status = 200, description = "Scheduler state", body = StatusResponse),
    ),
    tag = "Control"
)]
pub async fn handle_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(state.scheduler.status().into())
}

/// Start placing the loaded queue
///
/// The run continues in the background; poll `/api/status` for progress.
/// Starting while a run is in progress, or with nothing loaded, changes
/// nothing.
#[utoipa::path(
    post,
    path = "/api/start",
    responses(
        (status = 202, description = "Run launched", body = StartResponse),
        (status = 409, description = "Already running or nothing loaded", body = StartResponse),
    ),
    tag = "Control"
)]
pub async fn handle_start(State(state): State<AppState>) -> impl IntoResponse {
    let scheduler = state.scheduler.clone();

    let ticket = match scheduler.claim() {
        Ok(ticket) => ticket,
        Err(outcome) => {
            tracing::debug!(?outcome, "Start request rejected");
            let message = match outcome {
                StartOutcome::EmptyQueue => "Nothing to place, load an image first",
                _ => "Placement is already running",
            };
            return (
                StatusCode::CONFLICT,
                Json(StartResponse {
                    started: false,
                    message: message.to_string(),
                }),
            );
        }
    };

    tokio::spawn(async move {
        let outcome = scheduler.run(ticket).await;
        tracing::debug!(?outcome, "Background placement ended");
    });

    (
        StatusCode::ACCEPTED,
        Json(StartResponse {
            started: true,
            message: "Placement started".to_string(),
        }),
    )
}

/// Stop the current run
///
/// Takes effect at the scheduler's next check, within one settle delay
/// plus one inter-pixel delay.
#[utoipa::path(
    post,
    path = "/api/stop",
    responses(
        (status = 200, description = "Stop requested", body = StopResponse),
    ),
    tag = "Control"
)]
pub async fn handle_stop(State(state): State<AppState>) -> Json<StopResponse> {
    Json(StopResponse {
        stopped: state.scheduler.stop(),
    })
}

/// Move the placement origin
#[utoipa::path(
    put,
    path = "/api/origin",
    request_body = OriginRequest,
    responses(
        (status = 200, description = "Origin updated", body = StatusResponse),
    ),
    tag = "Control"
)]
pub async fn handle_origin(
    State(state): State<AppState>,
    JsonExtractor(request): JsonExtractor<OriginRequest>,
) -> Json<StatusResponse> {
    state.scheduler.set_origin(request.x, request.y);
    Json(state.scheduler.status().into())
}

/// Change the pause between placements
#[utoipa::path(
    put,
    path = "/api/delay",
    request_body = DelayRequest,
    responses(
        (status = 200, description = "Delay updated", body = StatusResponse),
    ),
    tag = "Control"
)]
pub async fn handle_delay(
    State(state): State<AppState>,
    JsonExtractor(request): JsonExtractor<DelayRequest>,
) -> Json<StatusResponse> {
    state.scheduler.set_inter_pixel_delay(request.delay_ms);
    Json(state.scheduler.status().into())
}
