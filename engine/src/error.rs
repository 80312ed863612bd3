//! Error Types
//!
//! Failures the viewer reports to its host. "Nothing under the pointer" is
//! not an error; picking returns an empty result instead.

use std::path::PathBuf;

use glam::Vec2;

/// Errors raised by the wall viewer.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// A wall whose endpoints coincide (or nearly so) was submitted.
    #[error("wall from {start} to {end} is degenerate (length {length})")]
    DegenerateWall { start: Vec2, end: Vec2, length: f32 },

    /// The configuration file could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for `ViewerConfig`.
    #[error("failed to parse config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The host page has no element with the expected id.
    #[error("container element `{0}` not found")]
    ContainerNotFound(String),

    /// Adapter, device, or surface setup failed.
    #[error("GPU initialization failed: {0}")]
    Gpu(String),
}
