//! Coordinate conversion module
//!
//! Provides conversions between geographic coordinates (latitude/longitude),
//! slippy-map tile space, and spherical Web Mercator meters.

mod types;

#[cfg(test)]
mod tests;

pub use types::{
    FixedTileCoord, GeoPoint, ProjectedPoint, TileCoordinate, MAX_LAT, MAX_LON, MAX_ZOOM, MIN_LAT,
    MIN_LON, ORIGIN_SHIFT, PRECISION_BITS, SUBPIXEL_BITS,
};

use std::f64::consts::PI;

/// Converts geographic coordinates to continuous tile coordinates.
///
/// Uses the standard slippy-map forward projection with `2^precision_bits`
/// tiles per axis. The result is not clamped; latitudes of ±90° hit the
/// projection singularity and must be avoided by the caller.
#[inline]
pub fn to_tile_coordinate(point: GeoPoint, precision_bits: u8) -> TileCoordinate {
    let n = 2.0_f64.powi(precision_bits as i32);

    let x = n * (point.longitude + 180.0) / 360.0;

    let lat_rad = point.latitude * PI / 180.0;
    let y = n * (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0;

    TileCoordinate { x, y }
}

/// Converts continuous tile coordinates back to geographic coordinates.
///
/// Inverse of [`to_tile_coordinate`] at the same `precision_bits`.
#[inline]
pub fn tile_coordinate_to_geo(coord: TileCoordinate, precision_bits: u8) -> GeoPoint {
    let n = 2.0_f64.powi(precision_bits as i32);

    let longitude = coord.x / n * 360.0 - 180.0;

    let lat_rad = (PI * (1.0 - 2.0 * coord.y / n)).sinh().atan();
    let latitude = lat_rad * 180.0 / PI;

    GeoPoint {
        latitude,
        longitude,
    }
}

/// Converts geographic coordinates to fixed-point tile coordinates at
/// [`PRECISION_BITS`].
///
/// Values are floored and clamped into `[0, 2^PRECISION_BITS]`, the world
/// edges inclusive, so that the latitude limits round onto the edge instead
/// of slightly past it.
#[inline]
pub fn to_fixed_point(point: GeoPoint) -> FixedTileCoord {
    let coord = to_tile_coordinate(point, PRECISION_BITS);
    let max = 1u64 << PRECISION_BITS;

    let clamp = |v: f64| -> u64 {
        if v <= 0.0 {
            0
        } else {
            (v.floor() as u64).min(max)
        }
    };

    FixedTileCoord {
        x: clamp(coord.x),
        y: clamp(coord.y),
    }
}

/// Converts geographic coordinates to spherical Web Mercator meters.
#[inline]
pub fn to_projected(point: GeoPoint) -> ProjectedPoint {
    let x = point.longitude * ORIGIN_SHIFT / 180.0;
    let y = ((90.0 + point.latitude) * PI / 360.0).tan().ln() / (PI / 180.0);
    let y = y * ORIGIN_SHIFT / 180.0;

    ProjectedPoint { x, y }
}
