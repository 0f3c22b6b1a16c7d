//! tilestitch - Stitch slippy-map tiles into a single raster
//!
//! Given a WGS84 bounding box, a zoom level, and a tile server URL template,
//! this library fetches every covering Web Mercator tile with bounded
//! concurrency, places the tiles on a whole-tile canvas, and crops it to
//! exactly the requested box.
//!
//! ```ignore
//! use tilestitch::config::StitchConfig;
//! use tilestitch::pipeline::TracingObserver;
//! use tilestitch::plan::BoundingBox;
//! use tilestitch::provider::UrlTemplate;
//! use tilestitch::stitch::{StitchRequest, Stitcher};
//!
//! let stitcher = Stitcher::from_config(StitchConfig::default())?;
//! let request = StitchRequest::new(
//!     BoundingBox::new(40.70, -74.02, 40.72, -74.00),
//!     15,
//!     UrlTemplate::new("https://tile.openstreetmap.org/{z}/{x}/{y}.png")?,
//!     "manhattan.png",
//! );
//! let report = stitcher.run(&request, &TracingObserver, &CancellationToken::new()).await?;
//! ```

pub mod compositor;
pub mod config;
pub mod coord;
pub mod logging;
pub mod pipeline;
pub mod plan;
pub mod provider;
pub mod stitch;
