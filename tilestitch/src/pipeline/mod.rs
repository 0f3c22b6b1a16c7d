//! Concurrent tile fetching
//!
//! Tiles are fetched through a fixed-width pool of HTTP permits. Every
//! finished tile, fetched or failed, is reported to a [`FetchObserver`].
//! Failed tiles are collected and skipped; they never abort the run.
//!
//! ```ignore
//! let limiter = Arc::new(HttpConcurrencyLimiter::new(25));
//! let results = fetch_tiles(client, &template, &plan, limiter, &TracingObserver, &token).await;
//! println!("{} of {} tiles", results.success_count(), plan.tile_count());
//! ```

mod error;
mod fetch;
mod http_limiter;
mod progress;

pub use error::TileFetchError;
pub use fetch::{fetch_tiles, FetchResults, PlacedTile};
pub use http_limiter::{HttpConcurrencyLimiter, HttpPermit, DEFAULT_PARALLEL_DOWNLOADS};
pub use progress::{
    FetchEvent, FetchObserver, FetchOutcome, FetchProgress, NoopObserver, TracingObserver,
};
