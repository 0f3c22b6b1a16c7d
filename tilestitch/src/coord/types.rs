//! Coordinate type definitions

use std::fmt;

/// Web Mercator valid latitude range
pub const MIN_LAT: f64 = -85.05112878;
pub const MAX_LAT: f64 = 85.05112878;

/// Valid longitude range
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Internal zoom used for fixed-point tile coordinates.
///
/// Coordinates are computed once at this resolution; tile indices and
/// sub-tile offsets at any display zoom are then derived by shifting.
pub const PRECISION_BITS: u8 = 32;

/// Sub-tile resolution used for pixel alignment (2^8 = 256 steps per tile).
pub const SUBPIXEL_BITS: u8 = 8;

/// Highest display zoom that still leaves room for [`SUBPIXEL_BITS`].
pub const MAX_ZOOM: u8 = PRECISION_BITS - SUBPIXEL_BITS;

/// Half the Web Mercator world width in meters (EPSG:3857).
pub const ORIGIN_SHIFT: f64 = 20037508.342789244;

/// A geographic point in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// Continuous tile-space coordinates.
///
/// Only meaningful relative to the precision (zoom) it was computed at.
/// The integer part is the tile index, the fractional part the position
/// inside that tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileCoordinate {
    /// East-west position, 0 at the antimeridian
    pub x: f64,
    /// North-south position, 0 at the northern Web Mercator limit
    pub y: f64,
}

/// Tile coordinates at [`PRECISION_BITS`] resolution, floored to integers.
///
/// Stored as `u64` so that the far world edge (`2^PRECISION_BITS`) and shifts
/// by the full precision (zoom 0) are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedTileCoord {
    pub x: u64,
    pub y: u64,
}

impl FixedTileCoord {
    /// Returns the integer tile index containing this point at `zoom`.
    ///
    /// A point on the far world edge belongs to the last tile.
    #[inline]
    pub fn tile_index(&self, zoom: u8) -> (u32, u32) {
        let shift = PRECISION_BITS - zoom;
        let last = (1u64 << zoom) - 1;
        (
            (self.x >> shift).min(last) as u32,
            (self.y >> shift).min(last) as u32,
        )
    }

    /// Returns this point at `zoom` + [`SUBPIXEL_BITS`] resolution.
    ///
    /// The low [`SUBPIXEL_BITS`] bits are the position inside the tile in
    /// 1/256 tile steps, the remaining bits are the tile index.
    #[inline]
    pub fn subdivision(&self, zoom: u8) -> (u64, u64) {
        let shift = PRECISION_BITS - zoom - SUBPIXEL_BITS;
        (self.x >> shift, self.y >> shift)
    }

    /// Returns the position inside the containing tile in 1/256 tile steps.
    #[inline]
    pub fn subtile_offset(&self, zoom: u8) -> (u64, u64) {
        let mask = (1u64 << SUBPIXEL_BITS) - 1;
        let (x, y) = self.subdivision(zoom);
        (x & mask, y & mask)
    }
}

/// A point in spherical Web Mercator meters (EPSG:3857).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
}

impl fmt::Display for ProjectedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}
