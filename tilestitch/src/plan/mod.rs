//! Tile grid planning
//!
//! Turns a bounding box and zoom into the set of tiles to fetch, where each
//! tile lands on the canvas, and the exact size of the cropped output.
//!
//! All alignment math is done on fixed-point tile coordinates at
//! [`PRECISION_BITS`](crate::coord::PRECISION_BITS) so that tile indices,
//! sub-tile offsets, and output size are derived from the same integers and
//! agree pixel-for-pixel.

mod error;
mod types;

pub use error::InvalidGeometryError;
pub use types::{BoundingBox, TilePlan, TileRequest, TileRequestIter};

use tracing::debug;

use crate::coord::{self, MAX_LAT, MAX_LON, MAX_ZOOM, MIN_LAT, MIN_LON, SUBPIXEL_BITS};

/// Default tile edge length in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 256;

/// Computes the tile plan for `bbox` at `zoom` with `tile_size` pixel tiles.
///
/// Zero-area boxes are accepted and yield a single-tile plan with an empty
/// raster; callers that need pixels should check
/// [`TilePlan::is_empty_raster`].
pub fn plan(
    bbox: &BoundingBox,
    zoom: u8,
    tile_size: u32,
) -> Result<TilePlan, InvalidGeometryError> {
    validate(bbox)?;
    if zoom > MAX_ZOOM {
        return Err(InvalidGeometryError::InvalidZoom {
            zoom,
            max: MAX_ZOOM,
        });
    }
    if tile_size == 0 {
        return Err(InvalidGeometryError::ZeroTileSize);
    }

    let nw = coord::to_fixed_point(bbox.northwest());
    let se = coord::to_fixed_point(bbox.southeast());

    let (tx1, ty1) = nw.tile_index(zoom);
    let (tx2, ty2) = se.tile_index(zoom);

    let tiles_width = tx2 - tx1 + 1;
    let tiles_height = ty2 - ty1 + 1;

    // Sub-tile steps are 1/256 of a tile, scaled to the requested tile size
    let scale = tile_size as f64 / (1u32 << SUBPIXEL_BITS) as f64;

    let (offset_x, offset_y) = nw.subtile_offset(zoom);
    let pixel_offset_x = offset_x as f64 * scale;
    let pixel_offset_y = offset_y as f64 * scale;

    let (sx1, sy1) = nw.subdivision(zoom);
    let (sx2, sy2) = se.subdivision(zoom);
    let output_width = (sx2.saturating_sub(sx1) as f64 * scale).round() as u32;
    let output_height = (sy2.saturating_sub(sy1) as f64 * scale).round() as u32;

    let too_large = || InvalidGeometryError::RasterTooLarge {
        tiles_width,
        tiles_height,
        tile_size,
    };
    let canvas_width = tiles_width.checked_mul(tile_size).ok_or_else(too_large)?;
    let canvas_height = tiles_height.checked_mul(tile_size).ok_or_else(too_large)?;

    let plan = TilePlan {
        bbox: *bbox,
        zoom,
        tile_size,
        tx1,
        ty1,
        tx2,
        ty2,
        pixel_offset_x,
        pixel_offset_y,
        output_width: output_width.min(canvas_width),
        output_height: output_height.min(canvas_height),
        canvas_width,
        canvas_height,
    };

    debug!(
        zoom,
        tile_size,
        tx1,
        ty1,
        tx2,
        ty2,
        offset_x = pixel_offset_x,
        offset_y = pixel_offset_y,
        output_width = plan.output_width,
        output_height = plan.output_height,
        "Tile plan computed"
    );

    Ok(plan)
}

fn validate(bbox: &BoundingBox) -> Result<(), InvalidGeometryError> {
    let coords = [
        ("minlat", bbox.min_lat),
        ("minlon", bbox.min_lon),
        ("maxlat", bbox.max_lat),
        ("maxlon", bbox.max_lon),
    ];
    for (name, value) in coords {
        if !value.is_finite() {
            return Err(InvalidGeometryError::NonFinite { name });
        }
    }

    for lat in [bbox.min_lat, bbox.max_lat] {
        if !(MIN_LAT..=MAX_LAT).contains(&lat) {
            return Err(InvalidGeometryError::InvalidLatitude(lat));
        }
    }
    for lon in [bbox.min_lon, bbox.max_lon] {
        if !(MIN_LON..=MAX_LON).contains(&lon) {
            return Err(InvalidGeometryError::InvalidLongitude(lon));
        }
    }

    if bbox.min_lat > bbox.max_lat {
        return Err(InvalidGeometryError::Inverted {
            axis: "latitude",
            min: bbox.min_lat,
            max: bbox.max_lat,
        });
    }
    if bbox.min_lon > bbox.max_lon {
        return Err(InvalidGeometryError::Inverted {
            axis: "longitude",
            min: bbox.min_lon,
            max: bbox.max_lon,
        });
    }

    Ok(())
}
