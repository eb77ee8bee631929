//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    routing::{get, post, put},
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::api;
use crate::models::AppConfig;
use crate::services::{
    refresh_palette, shared_palette, DiscoveryChain, HttpBridge, ImageLoader, PaletteDiscovery,
    PlacementScheduler, RecordingSurface, StaticDiscovery, SurfaceAdapter,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub scheduler: PlacementScheduler,
    pub discovery: Arc<dyn PaletteDiscovery>,
    pub loader: Arc<ImageLoader>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Rediscover swatches into the scheduler's palette
    pub async fn refresh_palette(&self) -> usize {
        refresh_palette(self.discovery.as_ref(), self.scheduler.palette()).await
    }
}

/// Create application state from configuration.
///
/// With a `bridge_url` the bridge drives the surface and is asked for the
/// palette first, falling back to the configured colors. Without one,
/// placements go to a [`RecordingSurface`] (dry run).
pub fn create_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let fallback: Arc<dyn PaletteDiscovery> = Arc::new(StaticDiscovery::from_colors(&config.palette));

    let (surface, discovery): (Arc<dyn SurfaceAdapter>, Arc<dyn PaletteDiscovery>) =
        match &config.bridge_url {
            Some(url) => {
                let bridge = Arc::new(
                    HttpBridge::new(url.as_str())
                        .map_err(|e| anyhow::anyhow!("Failed to create bridge client: {e}"))?,
                );
                tracing::info!(url = %bridge.base_url(), "Using surface bridge");
                let surface: Arc<dyn SurfaceAdapter> = bridge.clone();
                let chain = DiscoveryChain::new(vec![bridge as Arc<dyn PaletteDiscovery>, fallback]);
                (surface, Arc::new(chain) as Arc<dyn PaletteDiscovery>)
            }
            None => {
                tracing::info!("No bridge configured, placements are recorded only (dry run)");
                (Arc::new(RecordingSurface::new()) as Arc<dyn SurfaceAdapter>, fallback)
            }
        };

    create_app_state_with(config, surface, discovery)
}

/// Create application state around an explicit surface and discovery.
pub fn create_app_state_with(
    config: AppConfig,
    surface: Arc<dyn SurfaceAdapter>,
    discovery: Arc<dyn PaletteDiscovery>,
) -> anyhow::Result<AppState> {
    let loader = Arc::new(
        ImageLoader::new().map_err(|e| anyhow::anyhow!("Failed to create image loader: {e}"))?,
    );
    let scheduler = PlacementScheduler::new(surface, shared_palette(), config.scheduler_options());

    Ok(AppState {
        scheduler,
        discovery,
        loader,
        config: Arc::new(config),
    })
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Control
        .route("/api/status", get(api::handle_status))
        .route("/api/start", post(api::handle_start))
        .route("/api/stop", post(api::handle_stop))
        .route("/api/origin", put(api::handle_origin))
        .route("/api/delay", put(api::handle_delay))
        // Loading
        .route("/api/load/batch", post(api::handle_load_batch))
        .route("/api/load/image", post(api::handle_load_image))
        .route("/api/load/sample/:name", post(api::handle_load_sample))
        // Palette
        .route("/api/palette", get(api::handle_palette))
        .route("/api/palette/refresh", post(api::handle_palette_refresh))
        // Health check and API description
        .route("/health", get(|| async { "OK" }))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(api::ApiDoc::openapi()) }),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
