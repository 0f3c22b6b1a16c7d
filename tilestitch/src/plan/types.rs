//! Plan type definitions

use std::fmt;

use crate::coord::{self, GeoPoint, ProjectedPoint};

/// Geographic bounding box in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Creates a bounding box from `minlat minlon maxlat maxlon`.
    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    /// Northwest corner; the smallest x and y in tile space.
    pub fn northwest(&self) -> GeoPoint {
        GeoPoint::new(self.max_lat, self.min_lon)
    }

    /// Southeast corner; the largest x and y in tile space.
    pub fn southeast(&self) -> GeoPoint {
        GeoPoint::new(self.min_lat, self.max_lon)
    }

    /// Returns the box corners in Web Mercator meters as `(min, max)`.
    pub fn projected(&self) -> (ProjectedPoint, ProjectedPoint) {
        (
            coord::to_projected(GeoPoint::new(self.min_lat, self.min_lon)),
            coord::to_projected(GeoPoint::new(self.max_lat, self.max_lon)),
        )
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.6},{:.6} .. {:.6},{:.6}",
            self.min_lat, self.min_lon, self.max_lat, self.max_lon
        )
    }
}

/// A single tile to fetch, addressed by its integer index at the plan's zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileRequest {
    pub x: u32,
    pub y: u32,
}

impl fmt::Display for TileRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.x, self.y)
    }
}

/// Geometry of a stitch run, computed once by [`super::plan`].
///
/// Invariants:
/// - `canvas_width == (tx2 - tx1 + 1) * tile_size`
/// - `canvas_height == (ty2 - ty1 + 1) * tile_size`
/// - `output_width <= canvas_width` and `output_height <= canvas_height`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilePlan {
    pub bbox: BoundingBox,
    pub zoom: u8,
    pub tile_size: u32,
    /// First tile column (inclusive)
    pub tx1: u32,
    /// First tile row (inclusive)
    pub ty1: u32,
    /// Last tile column (inclusive)
    pub tx2: u32,
    /// Last tile row (inclusive)
    pub ty2: u32,
    /// Horizontal shift of the requested corner inside the first tile, in pixels
    pub pixel_offset_x: f64,
    /// Vertical shift of the requested corner inside the first tile, in pixels
    pub pixel_offset_y: f64,
    pub output_width: u32,
    pub output_height: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl TilePlan {
    /// Number of tile columns in the plan.
    #[inline]
    pub fn tiles_width(&self) -> u32 {
        self.tx2 - self.tx1 + 1
    }

    /// Number of tile rows in the plan.
    #[inline]
    pub fn tiles_height(&self) -> u32 {
        self.ty2 - self.ty1 + 1
    }

    /// Total number of tiles to fetch.
    #[inline]
    pub fn tile_count(&self) -> usize {
        self.tiles_width() as usize * self.tiles_height() as usize
    }

    /// Returns true when the cropped output would have no pixels.
    pub fn is_empty_raster(&self) -> bool {
        self.output_width == 0 || self.output_height == 0
    }

    /// Returns an iterator over every tile in the plan, in row-major order.
    pub fn requests(&self) -> TileRequestIter {
        TileRequestIter {
            tx1: self.tx1,
            ty1: self.ty1,
            width: self.tiles_width(),
            total: self.tile_count(),
            current: 0,
        }
    }

    /// Returns where `request` lands on the canvas as `(left, top)`.
    ///
    /// The alignment offset is subtracted here so that the crop window
    /// `[0, 0, output_width, output_height]` starts at the requested corner.
    /// Tiles in the first row/column therefore have negative positions.
    #[inline]
    pub fn placement(&self, request: TileRequest) -> (i64, i64) {
        let size = self.tile_size as i64;
        let left = (request.x as i64 - self.tx1 as i64) * size - self.pixel_offset_x.floor() as i64;
        let top = (request.y as i64 - self.ty1 as i64) * size - self.pixel_offset_y.floor() as i64;
        (left, top)
    }

    /// Ground resolution of the output raster in projected meters per pixel.
    ///
    /// Returns `None` for an empty raster.
    pub fn pixel_size_meters(&self) -> Option<(f64, f64)> {
        if self.is_empty_raster() {
            return None;
        }
        let (min, max) = self.bbox.projected();
        Some((
            (max.x - min.x) / self.output_width as f64,
            (max.y - min.y) / self.output_height as f64,
        ))
    }
}

/// Iterator over the tiles of a [`TilePlan`].
///
/// Yields tiles in row-major order (row `ty1` columns `tx1..=tx2`, then the next row).
#[derive(Debug, Clone)]
pub struct TileRequestIter {
    tx1: u32,
    ty1: u32,
    width: u32,
    total: usize,
    current: usize,
}

impl Iterator for TileRequestIter {
    type Item = TileRequest;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.total {
            return None;
        }

        let row = (self.current / self.width as usize) as u32;
        let col = (self.current % self.width as usize) as u32;

        self.current += 1;

        Some(TileRequest {
            x: self.tx1 + col,
            y: self.ty1 + row,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.current;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TileRequestIter {
    fn len(&self) -> usize {
        self.total - self.current
    }
}
