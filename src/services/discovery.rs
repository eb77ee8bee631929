//! Palette discovery strategies.

use async_trait::async_trait;
use pixel_cells::{parse_with_alpha, PaletteEntry};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::SwatchHandle;
use crate::services::scheduler::SharedPalette;

/// Source of selectable swatches
#[async_trait]
pub trait PaletteDiscovery: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Scan for swatches; an empty list means nothing was found
    async fn scan(&self) -> Vec<PaletteEntry<SwatchHandle>>;
}

/// A swatch as reported by an external scanner, color still unparsed.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RawSwatch {
    pub color: String,
    pub handle: String,
}

/// Parse raw swatches, keeping discovery order.
///
/// Fully transparent colors (what a browser reports for elements without a
/// background) are not swatches and are dropped. Unparseable colors are
/// skipped with a warning.
pub fn entries_from_raw(
    raw: impl IntoIterator<Item = RawSwatch>,
) -> Vec<PaletteEntry<SwatchHandle>> {
    raw.into_iter()
        .filter_map(|swatch| match parse_with_alpha(&swatch.color) {
            Ok((_, alpha)) if alpha <= 0.0 => None,
            Ok((color, _)) => Some(PaletteEntry::new(
                color,
                SwatchHandle::new(swatch.handle),
            )),
            Err(e) => {
                tracing::warn!(
                    color = %swatch.color,
                    handle = %swatch.handle,
                    %e,
                    "Skipping swatch with unreadable color"
                );
                None
            }
        })
        .collect()
}

/// Fixed palette, typically from configuration.
///
/// Handles are `swatch-<index>` in list order.
pub struct StaticDiscovery {
    entries: Vec<PaletteEntry<SwatchHandle>>,
}

impl StaticDiscovery {
    pub fn from_colors<S: AsRef<str>>(colors: &[S]) -> Self {
        let raw = colors.iter().enumerate().map(|(i, c)| RawSwatch {
            color: c.as_ref().to_string(),
            handle: format!("swatch-{i}"),
        });
        Self {
            entries: entries_from_raw(raw),
        }
    }
}

#[async_trait]
impl PaletteDiscovery for StaticDiscovery {
    fn name(&self) -> &str {
        "static"
    }

    async fn scan(&self) -> Vec<PaletteEntry<SwatchHandle>> {
        self.entries.clone()
    }
}

/// Strategies tried in priority order; the first non-empty result wins.
pub struct DiscoveryChain {
    strategies: Vec<Arc<dyn PaletteDiscovery>>,
}

impl DiscoveryChain {
    pub fn new(strategies: Vec<Arc<dyn PaletteDiscovery>>) -> Self {
        Self { strategies }
    }
}

#[async_trait]
impl PaletteDiscovery for DiscoveryChain {
    fn name(&self) -> &str {
        "chain"
    }

    async fn scan(&self) -> Vec<PaletteEntry<SwatchHandle>> {
        for strategy in &self.strategies {
            let entries = strategy.scan().await;
            if !entries.is_empty() {
                tracing::debug!(
                    strategy = strategy.name(),
                    swatches = entries.len(),
                    "Palette strategy matched"
                );
                return entries;
            }
            tracing::debug!(strategy = strategy.name(), "Palette strategy found nothing");
        }
        Vec::new()
    }
}

/// Run `discovery` and install its result as the current palette.
///
/// Returns the number of swatches now in the palette.
pub async fn refresh_palette(
    discovery: &dyn PaletteDiscovery,
    palette: &SharedPalette,
) -> usize {
    let entries = discovery.scan().await;
    let count = entries.len();
    palette.write().await.register_discovered(entries);

    if count == 0 {
        tracing::warn!(strategy = discovery.name(), "No palette colors found");
    } else {
        tracing::info!(
            strategy = discovery.name(),
            swatches = count,
            "Palette discovered"
        );
    }
    count
}

/// Empty shared palette
pub fn shared_palette() -> SharedPalette {
    Arc::new(RwLock::new(Default::default()))
}
