//! Image sources and decoding.
//!
//! Accepts a local path, an http(s) URL or a `data:` URL, decodes the bytes
//! with the `image` crate and hands an RGBA raster to the quantizer.

use base64::Engine;
use pixel_cells::{quantize, DecodedRaster};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::DecodeFailure;
use crate::models::CellQueue;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Where image bytes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Path(PathBuf),
    Url(String),
    /// Full `data:` URL including the prefix
    DataUrl(String),
}

impl ImageSource {
    /// Classify a user-supplied location.
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        if trimmed.starts_with("data:") {
            ImageSource::DataUrl(trimmed.to_string())
        } else if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            ImageSource::Url(trimmed.to_string())
        } else {
            ImageSource::Path(PathBuf::from(trimmed))
        }
    }

    /// Short label for logs and queue names; data URLs are not echoed.
    pub fn label(&self) -> String {
        match self {
            ImageSource::Path(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            ImageSource::Url(url) => url.clone(),
            ImageSource::DataUrl(_) => "data-url".to_string(),
        }
    }
}

/// Loads images into rasters and cell queues
pub struct ImageLoader {
    client: reqwest::Client,
}

impl ImageLoader {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self { client })
    }

    /// Read and decode `source` into an RGBA raster.
    pub async fn load(&self, source: &ImageSource) -> Result<DecodedRaster, DecodeFailure> {
        let bytes = match source {
            ImageSource::Path(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|source| DecodeFailure::Read {
                        path: path.display().to_string(),
                        source,
                    })?
            }
            ImageSource::Url(url) => self.fetch(url).await?,
            ImageSource::DataUrl(url) => decode_data_url(url)?,
        };

        let raster = decode_bytes(&bytes)?;
        tracing::debug!(
            source = %source.label(),
            bytes = bytes.len(),
            width = raster.width(),
            height = raster.height(),
            "Image decoded"
        );
        Ok(raster)
    }

    /// Load `source` and quantize it into a queue fitting
    /// `max_width` x `max_height`.
    pub async fn load_cells(
        &self,
        source: &ImageSource,
        max_width: u32,
        max_height: u32,
    ) -> Result<CellQueue, DecodeFailure> {
        let raster = self.load(source).await?;
        let cells = quantize(&raster.view(), max_width, max_height);
        Ok(CellQueue::new(source.label(), cells))
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DecodeFailure> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DecodeFailure::Fetch {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DecodeFailure::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| DecodeFailure::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(bytes.to_vec())
    }
}

/// Decode encoded image bytes (PNG, JPEG, GIF, WebP, BMP) to RGBA.
pub fn decode_bytes(bytes: &[u8]) -> Result<DecodedRaster, DecodeFailure> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(DecodedRaster::new(width, height, rgba.into_raw())?)
}

/// Extract the payload of a `data:[<mime>][;base64],<data>` URL.
///
/// Only base64 payloads are accepted; image bytes are never plain text.
pub fn decode_data_url(url: &str) -> Result<Vec<u8>, DecodeFailure> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| DecodeFailure::InvalidDataUrl("missing data: prefix".to_string()))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| DecodeFailure::InvalidDataUrl("missing comma".to_string()))?;

    if !meta.split(';').any(|part| part.eq_ignore_ascii_case("base64")) {
        return Err(DecodeFailure::InvalidDataUrl(
            "payload is not base64 encoded".to_string(),
        ));
    }

    let payload: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| DecodeFailure::InvalidDataUrl(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32, pixel: impl Fn(u32, u32) -> [u8; 4]) -> Vec<u8> {
        let img = RgbaImage::from_fn(width, height, |x, y| Rgba(pixel(x, y)));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_parse_source() {
        assert_eq!(
            ImageSource::parse("https://example.test/a.png"),
            ImageSource::Url("https://example.test/a.png".to_string())
        );
        assert!(matches!(
            ImageSource::parse("data:image/png;base64,AAAA"),
            ImageSource::DataUrl(_)
        ));
        assert_eq!(
            ImageSource::parse(" ./art/heart.png "),
            ImageSource::Path(PathBuf::from("./art/heart.png"))
        );
    }

    #[test]
    fn test_label() {
        assert_eq!(ImageSource::parse("/tmp/x/heart.png").label(), "heart.png");
        assert_eq!(ImageSource::parse("data:image/png;base64,AAAA").label(), "data-url");
    }

    #[test]
    fn test_decode_bytes_png() {
        let bytes = png_bytes(3, 2, |x, _| [x as u8 * 100, 0, 0, 255]);
        let raster = decode_bytes(&bytes).unwrap();

        assert_eq!((raster.width(), raster.height()), (3, 2));
        assert_eq!(raster.view().rgba(2, 1), [200, 0, 0, 255]);
    }

    #[test]
    fn test_decode_bytes_garbage() {
        assert!(matches!(
            decode_bytes(b"definitely not an image"),
            Err(DecodeFailure::Image(_))
        ));
    }

    #[test]
    fn test_data_url_round_trip() {
        let bytes = png_bytes(1, 1, |_, _| [1, 2, 3, 255]);
        let url = format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&bytes)
        );
        assert_eq!(decode_data_url(&url).unwrap(), bytes);
    }

    #[test]
    fn test_data_url_errors() {
        assert!(decode_data_url("data:image/png;base64").is_err());
        assert!(decode_data_url("data:text/plain,hello").is_err());
        assert!(decode_data_url("data:image/png;base64,@@@").is_err());
    }

    #[tokio::test]
    async fn test_load_cells_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stripes.png");
        let bytes = png_bytes(4, 2, |x, _| {
            if x % 2 == 0 {
                [255, 0, 0, 255]
            } else {
                [0, 0, 0, 0]
            }
        });
        std::fs::write(&path, bytes).unwrap();

        let loader = ImageLoader::new().unwrap();
        let queue = loader
            .load_cells(&ImageSource::Path(path), 4, 2)
            .await
            .unwrap();

        assert_eq!(queue.name(), "stripes.png");
        assert_eq!(queue.len(), 4);
        assert!(queue.cells().iter().all(|c| c.x % 2 == 0));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let loader = ImageLoader::new().unwrap();
        let err = loader
            .load(&ImageSource::Path(PathBuf::from("/nonexistent/pixbot.png")))
            .await
            .unwrap_err();
        assert!(matches!(err, DecodeFailure::Read { .. }));
    }
}
