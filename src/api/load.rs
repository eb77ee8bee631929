use axum::{
    extract::{Path, State},
    response::Json,
    Json as JsonExtractor,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::CellQueue;
use crate::server::AppState;
use crate::services::{batch_validator, samples, ImageSource};

/// Summary of a newly loaded queue
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct LoadResponse {
    pub name: String,
    /// Number of cells queued
    pub cells: usize,
    /// Bounding box width (`max x + 1`)
    pub width: u32,
    /// Bounding box height (`max y + 1`)
    pub height: u32,
    pub distinct_colors: usize,
}

impl From<&CellQueue> for LoadResponse {
    fn from(queue: &CellQueue) -> Self {
        let diagnostics = queue.diagnostics();
        Self {
            name: queue.name().to_string(),
            cells: queue.len(),
            width: diagnostics.width,
            height: diagnostics.height,
            distinct_colors: diagnostics.distinct_colors,
        }
    }
}

/// One element of a manual pixel batch. Extra keys are ignored.
#[derive(Debug, Deserialize, ToSchema)]
pub struct BatchCell {
    /// Non-negative offset from the origin
    pub x: u32,
    pub y: u32,
    /// `#rrggbb`, `#rgb` or `rgb()`
    pub color: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ImageLoadRequest {
    /// File path, http(s) URL or `data:` URL
    pub source: String,
    /// Overrides the configured bounding box width
    #[serde(default)]
    pub max_width: Option<u32>,
    /// Overrides the configured bounding box height
    #[serde(default)]
    pub max_height: Option<u32>,
}

fn install(state: &AppState, queue: CellQueue) -> Json<LoadResponse> {
    let response = LoadResponse::from(&queue);
    state.scheduler.load(queue);
    Json(response)
}

/// Load a manual pixel batch
///
/// The body is a JSON list of `{x, y, color}` objects, placed in list
/// order. A batch with any invalid element is rejected as a whole and the
/// previously loaded queue is kept.
#[utoipa::path(
    post,
    path = "/api/load/batch",
    request_body = Vec<BatchCell>,
    responses(
        (status = 200, description = "Batch loaded", body = LoadResponse),
        (status = 400, description = "Invalid batch"),
    ),
    tag = "Load"
)]
pub async fn handle_load_batch(
    State(state): State<AppState>,
    JsonExtractor(batch): JsonExtractor<Value>,
) -> Result<Json<LoadResponse>, ApiError> {
    let validated = batch_validator::validate(&batch)?;
    Ok(install(&state, validated.into_queue("batch")))
}

/// Load and quantize an image
#[utoipa::path(
    post,
    path = "/api/load/image",
    request_body = ImageLoadRequest,
    responses(
        (status = 200, description = "Image loaded", body = LoadResponse),
        (status = 400, description = "Bounds above the configured limit"),
        (status = 422, description = "Image could not be read or decoded"),
    ),
    tag = "Load"
)]
pub async fn handle_load_image(
    State(state): State<AppState>,
    JsonExtractor(request): JsonExtractor<ImageLoadRequest>,
) -> Result<Json<LoadResponse>, ApiError> {
    let source = ImageSource::parse(&request.source);
    let (max_width, max_height) = state
        .config
        .image_bounds(request.max_width, request.max_height)?;

    let queue = state
        .loader
        .load_cells(&source, max_width, max_height)
        .await?;
    Ok(install(&state, queue))
}

/// Load a built-in sample image
#[utoipa::path(
    post,
    path = "/api/load/sample/{name}",
    responses(
        (status = 200, description = "Sample loaded", body = LoadResponse),
        (status = 404, description = "No sample with that name"),
    ),
    params(
        ("name" = String, Path, description = "Sample name ('heart' or 'smiley')"),
    ),
    tag = "Load"
)]
pub async fn handle_load_sample(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<LoadResponse>, ApiError> {
    let sample = samples::find(&name).ok_or_else(|| {
        ApiError::UnknownSample(format!("{name} (available: {})", samples::names()))
    })?;
    Ok(install(&state, sample.queue()))
}
