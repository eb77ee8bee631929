//! pixbot - places images pixel by pixel on a shared drawing surface.
//!
//! Images are quantized into cells, matched against the swatches the
//! surface offers, and replayed one placement at a time at a configurable
//! pace. This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
