//! Compositing and encoding errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::plan::TileRequest;

/// Fatal failures while building or writing the output raster.
#[derive(Debug, Error)]
pub enum CompositeError {
    /// The canvas would exceed the configured pixel budget.
    #[error("Canvas of {width}×{height} pixels exceeds the limit of {limit} pixels")]
    CanvasTooLarge { width: u32, height: u32, limit: u64 },

    /// A fetched tile could not be decoded as an image.
    #[error("Failed to decode tile {request}: {reason}")]
    Decode { request: TileRequest, reason: String },

    /// The output path has no recognised image extension.
    #[error("Cannot determine an image format from {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// Encoding or writing the output file failed.
    #[error("Failed to write {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The blocking compositing task panicked.
    #[error("Compositing task failed: {0}")]
    Task(String),
}
