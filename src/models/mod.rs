pub mod config;
pub mod handles;
pub mod queue;

pub use config::{AppConfig, OriginConfig};
pub use handles::{SurfaceHandle, SwatchHandle};
pub use queue::{bounding_box, BatchDiagnostics, CellQueue};
