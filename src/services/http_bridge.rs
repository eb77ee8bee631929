//! HTTP bridge to a page-side agent.
//!
//! The drawing surface lives inside a browser page we do not control. A
//! small agent injected into that page exposes it over HTTP:
//!
//! | Method | Path       | Body                                  | Reply                     |
//! |--------|------------|---------------------------------------|---------------------------|
//! | GET    | `/surface` |                                       | `{"id": "..."}` or 404    |
//! | GET    | `/palette` |                                       | `[{"color", "handle"}]`   |
//! | POST   | `/select`  | `{"handle"}`                          | ignored                   |
//! | POST   | `/pointer` | `{"surface", "x", "y", "signals"}`    | ignored                   |
//!
//! Every failure is logged and swallowed: the surface may reject anything
//! silently, so a failed request is no different from an ignored one.

use async_trait::async_trait;
use pixel_cells::PaletteEntry;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::models::{SurfaceHandle, SwatchHandle};
use crate::services::discovery::{entries_from_raw, PaletteDiscovery, RawSwatch};
use crate::services::surface::{PointerSignal, SurfaceAdapter, POINTER_SEQUENCE};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct SurfaceReply {
    id: String,
}

#[derive(Debug, Serialize)]
struct SelectRequest<'a> {
    handle: &'a str,
}

#[derive(Debug, Serialize)]
struct PointerRequest<'a> {
    surface: &'a str,
    x: i64,
    y: i64,
    signals: &'a [PointerSignal],
}

pub struct HttpBridge {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBridge {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) {
        let url = self.url(path);
        match self.client.post(&url).json(body).send().await {
            Ok(response) if !response.status().is_success() => {
                tracing::warn!(url = %url, status = %response.status(), "Bridge rejected request");
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(url = %url, error = %e, "Bridge request failed"),
        }
    }
}

#[async_trait]
impl SurfaceAdapter for HttpBridge {
    async fn locate(&self) -> Option<SurfaceHandle> {
        let url = self.url("surface");
        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Bridge unreachable");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "Bridge reports no surface");
            return None;
        }

        match response.json::<SurfaceReply>().await {
            Ok(reply) => Some(SurfaceHandle::new(reply.id)),
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Invalid surface reply");
                None
            }
        }
    }

    async fn select_swatch(&self, swatch: &SwatchHandle) {
        self.post(
            "select",
            &SelectRequest {
                handle: swatch.as_str(),
            },
        )
        .await;
    }

    async fn emit_pointer_sequence(&self, surface: &SurfaceHandle, x: i64, y: i64) {
        self.post(
            "pointer",
            &PointerRequest {
                surface: surface.as_str(),
                x,
                y,
                signals: &POINTER_SEQUENCE,
            },
        )
        .await;
    }
}

#[async_trait]
impl PaletteDiscovery for HttpBridge {
    fn name(&self) -> &str {
        "bridge"
    }

    async fn scan(&self) -> Vec<PaletteEntry<SwatchHandle>> {
        let url = self.url("palette");
        let response = match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                tracing::warn!(url = %url, status = %response.status(), "Palette scan rejected");
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Palette scan failed");
                return Vec::new();
            }
        };

        match response.json::<Vec<RawSwatch>>().await {
            Ok(raw) => entries_from_raw(raw),
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Invalid palette reply");
                Vec::new()
            }
        }
    }
}
