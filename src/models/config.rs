//! Application configuration read from YAML.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::error::BoundsError;
use crate::services::scheduler::{SchedulerOptions, DEFAULT_SETTLE_DELAY_MS};

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Surface coordinate that cell (0, 0) is placed at
    #[serde(default)]
    pub origin: OriginConfig,

    /// Pause between placements in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Pause between selecting a swatch and placing, in milliseconds
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    /// Bounding box that loaded images are scaled into
    #[serde(default = "default_max_side")]
    pub max_width: u32,
    #[serde(default = "default_max_side")]
    pub max_height: u32,

    /// Largest bounding box side accepted from a request or the CLI
    #[serde(default = "default_max_side_limit")]
    pub max_side_limit: u32,

    /// Fallback swatch colors (hex or rgb() strings), in discovery order
    #[serde(default)]
    pub palette: Vec<String>,

    /// Base URL of a page-side bridge agent; without it placements are
    /// only recorded and logged (dry run)
    #[serde(default)]
    pub bridge_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct OriginConfig {
    pub x: i64,
    pub y: i64,
}

impl Default for OriginConfig {
    fn default() -> Self {
        Self { x: 100, y: 100 }
    }
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_settle_ms() -> u64 {
    DEFAULT_SETTLE_DELAY_MS
}

fn default_max_side() -> u32 {
    50
}

fn default_max_side_limit() -> u32 {
    1000
}

impl AppConfig {
    /// Load configuration from a YAML file, falling back to defaults.
    ///
    /// A missing path, unreadable file or invalid YAML is logged and
    /// replaced by [`AppConfig::default`].
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No config file configured, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        palette = config.palette.len(),
                        bridge = config.bridge_url.is_some(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Bounding box for an image load, falling back to the configured one.
    ///
    /// Either side above `max_side_limit` is rejected; the quantizer scales
    /// small images up, so the bounds alone decide how many cells come out.
    pub fn image_bounds(
        &self,
        max_width: Option<u32>,
        max_height: Option<u32>,
    ) -> Result<(u32, u32), BoundsError> {
        let width = max_width.unwrap_or(self.max_width);
        let height = max_height.unwrap_or(self.max_height);
        if width > self.max_side_limit || height > self.max_side_limit {
            return Err(BoundsError {
                width,
                height,
                limit: self.max_side_limit,
            });
        }
        Ok((width, height))
    }

    /// Scheduler settings derived from this configuration
    pub fn scheduler_options(&self) -> SchedulerOptions {
        SchedulerOptions {
            origin: (self.origin.x, self.origin.y),
            inter_pixel_delay: Duration::from_millis(self.delay_ms),
            settle_delay: Duration::from_millis(self.settle_ms),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            origin: OriginConfig::default(),
            delay_ms: default_delay_ms(),
            settle_ms: default_settle_ms(),
            max_width: default_max_side(),
            max_height: default_max_side(),
            max_side_limit: default_max_side_limit(),
            palette: Vec::new(),
            bridge_url: None,
        }
    }
}
