//! Canvas compositor
//!
//! Builds the whole-tile canvas from fetched tiles, crops it to the exact
//! output size, and writes the result. Decoding and compositing are CPU-bound
//! and run on tokio's blocking pool.

mod canvas;
mod error;

pub use canvas::{composite, output_format, save, DEFAULT_MAX_CANVAS_PIXELS};
pub use error::CompositeError;

use std::path::PathBuf;

use image::RgbaImage;
use tracing::{debug, instrument};

use crate::pipeline::PlacedTile;
use crate::plan::TilePlan;

/// Runs [`composite`] on a blocking thread.
#[instrument(skip_all, fields(tiles = tiles.len()))]
pub async fn composite_stage(
    plan: TilePlan,
    tiles: Vec<PlacedTile>,
    max_canvas_pixels: u64,
) -> Result<RgbaImage, CompositeError> {
    let image = tokio::task::spawn_blocking(move || composite(&plan, tiles, max_canvas_pixels))
        .await
        .map_err(|e| CompositeError::Task(e.to_string()))??;

    debug!(
        width = image.width(),
        height = image.height(),
        "Composite stage complete"
    );

    Ok(image)
}

/// Runs [`save`] on a blocking thread.
pub async fn save_stage(image: RgbaImage, path: PathBuf) -> Result<(), CompositeError> {
    tokio::task::spawn_blocking(move || save(&image, &path))
        .await
        .map_err(|e| CompositeError::Task(e.to_string()))?
}
