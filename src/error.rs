use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid pixel batch: {0}")]
    InvalidBatch(#[from] ValidationError),

    #[error("Image load failed: {0}")]
    Decode(#[from] DecodeFailure),

    #[error("Unknown sample: {0}")]
    UnknownSample(String),

    #[error(transparent)]
    Bounds(#[from] BoundsError),
}

/// Requested image bounds larger than the configured per-side limit
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Bounds {width}x{height} exceed the limit of {limit} cells per side")]
pub struct BoundsError {
    pub width: u32,
    pub height: u32,
    pub limit: u32,
}

/// Rejection of a manually supplied pixel batch.
///
/// The whole batch is rejected; nothing already loaded is touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("pixel data must be a list of {{x, y, color}} objects")]
    NotAList,

    #[error("element {index} is not an object")]
    NotAnObject { index: usize },

    #[error("element {index} has invalid `{field}`: {reason}")]
    InvalidField {
        index: usize,
        field: &'static str,
        reason: String,
    },
}

/// Failure to obtain a decoded raster from an image source.
#[derive(Debug, Error)]
pub enum DecodeFailure {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Fetching {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    #[error("Image decode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Decoded image is unusable: {0}")]
    Raster(#[from] pixel_cells::RasterError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidBatch(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Decode(_) => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            ApiError::UnknownSample(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Bounds(_) => (StatusCode::BAD_REQUEST, self.to_string()),
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": message,
        }));

        (status, body).into_response()
    }
}
