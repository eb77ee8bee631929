pub mod control;
pub mod load;
pub mod palette;

pub use control::{
    handle_delay, handle_origin, handle_start, handle_status, handle_stop, DelayRequest,
    OriginRequest, RunSummary, StartResponse, StatusResponse, StopResponse,
};
pub use control::{
    __path_handle_delay, __path_handle_origin, __path_handle_start, __path_handle_status,
    __path_handle_stop,
};
pub use load::{
    handle_load_batch, handle_load_image, handle_load_sample, BatchCell, ImageLoadRequest,
    LoadResponse,
};
pub use load::{__path_handle_load_batch, __path_handle_load_image, __path_handle_load_sample};
pub use palette::{
    handle_palette, handle_palette_refresh, PaletteResponse, SwatchResponse,
    __path_handle_palette, __path_handle_palette_refresh,
};

use utoipa::OpenApi;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "pixbot API",
        description = "Control API for the pixel placement bot",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        handle_status,
        handle_start,
        handle_stop,
        handle_origin,
        handle_delay,
        handle_load_batch,
        handle_load_image,
        handle_load_sample,
        handle_palette,
        handle_palette_refresh,
    ),
    components(schemas(
        StatusResponse,
        RunSummary,
        StartResponse,
        StopResponse,
        OriginRequest,
        DelayRequest,
        LoadResponse,
        BatchCell,
        ImageLoadRequest,
        PaletteResponse,
        SwatchResponse,
    )),
    tags(
        (name = "Control", description = "Start, stop and pace placement"),
        (name = "Load", description = "Load images, samples and pixel batches"),
        (name = "Palette", description = "Swatch discovery")
    )
)]
pub struct ApiDoc;
