pub mod batch_validator;
pub mod discovery;
pub mod http_bridge;
pub mod image_loader;
pub mod samples;
pub mod scheduler;
pub mod surface;

pub use batch_validator::{cells_from_grid, validate, ValidatedBatch};
pub use discovery::{
    entries_from_raw, refresh_palette, shared_palette, DiscoveryChain, PaletteDiscovery,
    RawSwatch, StaticDiscovery,
};
pub use http_bridge::HttpBridge;
pub use image_loader::{ImageLoader, ImageSource};
pub use scheduler::{
    PlacementScheduler, RunReport, RunTicket, SchedulerOptions, SchedulerState, SchedulerStatus,
    SharedPalette, StartOutcome,
};
pub use surface::{PointerSignal, RecordingSurface, SurfaceAdapter, SurfaceEvent};
