use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::server::AppState;

/// One selectable swatch
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct SwatchResponse {
    /// Canonical `#rrggbb`
    pub color: String,
    pub handle: String,
}

/// Palette in discovery order
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaletteResponse {
    pub swatches: Vec<SwatchResponse>,
}

async fn snapshot(state: &AppState) -> PaletteResponse {
    let palette = state.scheduler.palette().read().await;
    PaletteResponse {
        swatches: palette
            .entries()
            .iter()
            .map(|entry| SwatchResponse {
                color: entry.color.to_string(),
                handle: entry.handle.to_string(),
            })
            .collect(),
    }
}

/// Current palette
#[utoipa::path(
    get,
    path = "/api/palette",
    responses(
        (status = 200, description = "Known swatches", body = PaletteResponse),
    ),
    tag = "Palette"
)]
pub async fn handle_palette(State(state): State<AppState>) -> Json<PaletteResponse> {
    Json(snapshot(&state).await)
}

/// Rediscover the palette
///
/// Replaces the palette with whatever discovery finds now. An empty result
/// leaves the palette empty and every cell will be skipped until the next
/// refresh.
#[utoipa::path(
    post,
    path = "/api/palette/refresh",
    responses(
        (status = 200, description = "Palette rediscovered", body = PaletteResponse),
    ),
    tag = "Palette"
)]
pub async fn handle_palette_refresh(State(state): State<AppState>) -> Json<PaletteResponse> {
    state.refresh_palette().await;
    Json(snapshot(&state).await)
}
