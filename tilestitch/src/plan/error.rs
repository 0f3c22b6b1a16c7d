//! Geometry validation errors.

use thiserror::Error;

/// Reasons a bounding box, zoom, or tile size cannot be planned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidGeometryError {
    /// A coordinate is NaN or infinite.
    #[error("Coordinate {name} is not a finite number")]
    NonFinite { name: &'static str },

    /// Latitude outside the Web Mercator range.
    #[error("Latitude {0} is outside the Web Mercator range (±85.05112878)")]
    InvalidLatitude(f64),

    /// Longitude outside [-180, 180].
    #[error("Longitude {0} is outside the range -180..180")]
    InvalidLongitude(f64),

    /// Minimum is greater than maximum on one axis.
    #[error("Inverted bounding box: min {axis} {min} is greater than max {axis} {max}")]
    Inverted {
        axis: &'static str,
        min: f64,
        max: f64,
    },

    /// Zoom is too deep for the fixed-point precision.
    #[error("Zoom level {zoom} exceeds the maximum of {max}")]
    InvalidZoom { zoom: u8, max: u8 },

    /// Tile size of zero pixels.
    #[error("Tile size must be at least one pixel")]
    ZeroTileSize,

    /// Canvas dimensions do not fit in a raster.
    #[error("Canvas of {tiles_width}×{tiles_height} tiles at {tile_size}px is too large")]
    RasterTooLarge {
        tiles_width: u32,
        tiles_height: u32,
        tile_size: u32,
    },

    /// The box rounds to an output raster with no pixels.
    #[error("Bounding box produces an empty {width}×{height} raster at this zoom")]
    EmptyRaster { width: u32, height: u32 },
}
