//! Stitch run orchestration
//!
//! A [`Stitcher`] owns an HTTP client and a [`StitchConfig`] and drives one
//! run end to end:
//!
//! 1. plan the tile grid, rejecting invalid or empty geometry
//! 2. fetch every tile through the bounded pool, skipping failures
//! 3. composite and crop on a blocking thread
//! 4. write the output file
//!
//! Compositing starts only after every fetch has finished. A cancelled run
//! writes nothing.

mod error;
mod types;

pub use error::StitchError;
pub use types::{StitchReport, StitchRequest};

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use crate::compositor;
use crate::config::StitchConfig;
use crate::pipeline::{fetch_tiles, FetchObserver, HttpConcurrencyLimiter};
use crate::plan::{self, InvalidGeometryError, TilePlan};
use crate::provider::{AsyncHttpClient, AsyncReqwestClient};

/// Runs stitch requests against a tile server.
pub struct Stitcher<C: AsyncHttpClient> {
    client: Arc<C>,
    config: StitchConfig,
}

impl Stitcher<AsyncReqwestClient> {
    /// Creates a stitcher with a reqwest client built from `config`.
    pub fn from_config(config: StitchConfig) -> Result<Self, StitchError> {
        let client = AsyncReqwestClient::new(config.timeout(), config.user_agent())
            .map_err(|e| StitchError::Runtime(e.to_string()))?;
        Ok(Self::new(Arc::new(client), config))
    }
}

impl<C: AsyncHttpClient> Stitcher<C> {
    pub fn new(client: Arc<C>, config: StitchConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &StitchConfig {
        &self.config
    }

    /// Computes the plan for `request` without fetching anything.
    ///
    /// Fails if the geometry is invalid or the output raster would be empty.
    pub fn plan(&self, request: &StitchRequest) -> Result<TilePlan, StitchError> {
        let plan = plan::plan(&request.bbox, request.zoom, self.config.tile_size())?;
        if plan.is_empty_raster() {
            return Err(InvalidGeometryError::EmptyRaster {
                width: plan.output_width,
                height: plan.output_height,
            }
            .into());
        }
        Ok(plan)
    }

    /// Runs `request` to completion.
    ///
    /// Tiles that fail to fetch are left transparent and listed in the
    /// report. Cancelling `cancellation_token` aborts outstanding fetches and
    /// returns [`StitchError::Cancelled`] without writing the output.
    #[instrument(skip_all, fields(zoom = request.zoom, output = %request.output.display()))]
    pub async fn run<O>(
        &self,
        request: &StitchRequest,
        observer: &O,
        cancellation_token: &CancellationToken,
    ) -> Result<StitchReport, StitchError>
    where
        O: FetchObserver + ?Sized,
    {
        let plan = self.plan(request)?;
        // Fail on a bad extension before any network traffic
        compositor::output_format(&request.output)?;

        let total = plan.tile_count();
        info!(
            tiles = total,
            width = plan.output_width,
            height = plan.output_height,
            "Fetching tiles"
        );

        let limiter = Arc::new(HttpConcurrencyLimiter::new(
            self.config.parallel_downloads(),
        ));
        let results = fetch_tiles(
            Arc::clone(&self.client),
            &request.template,
            &plan,
            limiter,
            observer,
            cancellation_token,
        )
        .await;

        if results.is_cancelled() {
            return Err(StitchError::Cancelled {
                completed: results.total_count(),
                total,
            });
        }

        let (placed, failures) = results.into_parts();
        let fetched = placed.len();
        info!(fetched, failed = failures.len(), "Fetch complete");

        let image =
            compositor::composite_stage(plan, placed, self.config.max_canvas_pixels()).await?;

        if cancellation_token.is_cancelled() {
            return Err(StitchError::Cancelled {
                completed: total,
                total,
            });
        }

        compositor::save_stage(image, request.output.clone()).await?;
        info!(path = %request.output.display(), "Output written");

        Ok(StitchReport::new(
            plan,
            fetched,
            failures,
            request.output.clone(),
        ))
    }
}
