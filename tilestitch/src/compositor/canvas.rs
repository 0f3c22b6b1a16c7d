//! Canvas assembly, cropping, and output encoding.

use std::path::Path;

use image::{imageops, DynamicImage, ImageFormat, RgbaImage};
use tracing::{debug, warn};

use super::error::CompositeError;
use crate::pipeline::PlacedTile;
use crate::plan::TilePlan;

/// Default canvas pixel budget (16384²).
pub const DEFAULT_MAX_CANVAS_PIXELS: u64 = 16384 * 16384;

/// Places `tiles` on a transparent canvas and crops it to the plan's output size.
///
/// Tiles are copied, not blended, and clipped at the canvas edges. Any tile
/// that fails to decode aborts compositing.
pub fn composite(
    plan: &TilePlan,
    tiles: Vec<PlacedTile>,
    max_canvas_pixels: u64,
) -> Result<RgbaImage, CompositeError> {
    let pixels = plan.canvas_width as u64 * plan.canvas_height as u64;
    if pixels > max_canvas_pixels {
        return Err(CompositeError::CanvasTooLarge {
            width: plan.canvas_width,
            height: plan.canvas_height,
            limit: max_canvas_pixels,
        });
    }

    let mut canvas = RgbaImage::new(plan.canvas_width, plan.canvas_height);
    let placed = tiles.len();

    for tile in tiles {
        let image = decode_tile(&tile)?;
        if image.width() != plan.tile_size || image.height() != plan.tile_size {
            warn!(
                tile = %tile.request,
                width = image.width(),
                height = image.height(),
                expected = plan.tile_size,
                "Tile size does not match plan"
            );
        }
        imageops::replace(&mut canvas, &image, tile.left, tile.top);
    }

    debug!(
        placed,
        canvas_width = plan.canvas_width,
        canvas_height = plan.canvas_height,
        output_width = plan.output_width,
        output_height = plan.output_height,
        "Canvas composited"
    );

    Ok(imageops::crop_imm(&canvas, 0, 0, plan.output_width, plan.output_height).to_image())
}

fn decode_tile(tile: &PlacedTile) -> Result<RgbaImage, CompositeError> {
    let image = image::load_from_memory(&tile.data).map_err(|e| CompositeError::Decode {
        request: tile.request,
        reason: e.to_string(),
    })?;
    Ok(image.to_rgba8())
}

/// Resolves the output format from the path's extension.
pub fn output_format(path: &Path) -> Result<ImageFormat, CompositeError> {
    ImageFormat::from_path(path).map_err(|_| CompositeError::UnsupportedFormat {
        path: path.to_path_buf(),
    })
}

/// Writes `image` to `path` in the format implied by its extension.
///
/// JPEG has no alpha channel, so it is written as RGB.
pub fn save(image: &RgbaImage, path: &Path) -> Result<(), CompositeError> {
    let format = output_format(path)?;

    let result = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgba8(image.clone())
            .to_rgb8()
            .save_with_format(path, format),
        _ => image.save_with_format(path, format),
    };

    result.map_err(|source| CompositeError::Encode {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), ?format, "Output written");
    Ok(())
}
