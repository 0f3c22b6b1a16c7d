//! Permit-bounded tile fetch stage.
//!
//! Tasks are only spawned once an HTTP permit is held, so the number of live
//! tasks never exceeds the limiter width and queued tiles cost nothing but a
//! `VecDeque` slot.
//!
//! Each task returns `Result<PlacedTile, TileFetchError>`; the driving loop
//! is the single aggregation point that sorts successes from failures and
//! reports progress. No state is shared between tasks.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use bytes::Bytes;
use tokio::task::{Id, JoinError, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::error::TileFetchError;
use super::http_limiter::{HttpConcurrencyLimiter, HttpPermit};
use super::progress::{FetchEvent, FetchObserver, FetchOutcome, FetchProgress};
use crate::plan::{TilePlan, TileRequest};
use crate::provider::{AsyncHttpClient, UrlTemplate};

/// HTTP status accepted as a usable tile.
const STATUS_OK: u16 = 200;

type FetchTaskResult = Result<PlacedTile, TileFetchError>;

/// A fetched tile and where it goes on the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedTile {
    pub request: TileRequest,
    /// Encoded image bytes as served
    pub data: Bytes,
    /// Canvas x of the tile's left edge; may be negative
    pub left: i64,
    /// Canvas y of the tile's top edge; may be negative
    pub top: i64,
}

/// Outcome of a fetch run.
#[derive(Debug, Default)]
pub struct FetchResults {
    placed: Vec<PlacedTile>,
    failures: Vec<TileFetchError>,
    cancelled: bool,
}

impl FetchResults {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            placed: Vec::with_capacity(capacity),
            failures: Vec::new(),
            cancelled: false,
        }
    }

    pub fn success_count(&self) -> usize {
        self.placed.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn total_count(&self) -> usize {
        self.placed.len() + self.failures.len()
    }

    pub fn placed(&self) -> &[PlacedTile] {
        &self.placed
    }

    pub fn failures(&self) -> &[TileFetchError] {
        &self.failures
    }

    /// True if the run stopped early because of cancellation.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Splits the results into successes and failures.
    pub fn into_parts(self) -> (Vec<PlacedTile>, Vec<TileFetchError>) {
        (self.placed, self.failures)
    }

    fn record(&mut self, result: FetchTaskResult) {
        match result {
            Ok(tile) => self.placed.push(tile),
            Err(e) => self.failures.push(e),
        }
    }
}

/// Fetches every tile in `plan`, at most `limiter.max_permits()` at a time.
///
/// Failed tiles are collected, not retried. `observer` is called once per
/// finished tile. If `cancellation_token` fires, in-flight fetches are
/// aborted and the returned results are marked cancelled.
pub async fn fetch_tiles<C, O>(
    client: Arc<C>,
    template: &UrlTemplate,
    plan: &TilePlan,
    limiter: Arc<HttpConcurrencyLimiter>,
    observer: &O,
    cancellation_token: &CancellationToken,
) -> FetchResults
where
    C: AsyncHttpClient,
    O: FetchObserver + ?Sized,
{
    let total = plan.tile_count();
    let mut pending: VecDeque<TileRequest> = plan.requests().collect();
    let mut downloads: JoinSet<FetchTaskResult> = JoinSet::new();
    let mut running: HashMap<Id, TileRequest> = HashMap::new();
    let mut results = FetchResults::with_capacity(total);

    let spawn = |downloads: &mut JoinSet<FetchTaskResult>,
                 running: &mut HashMap<Id, TileRequest>,
                 request: TileRequest,
                 permit: HttpPermit| {
        let url = template.render(plan.zoom, request);
        let (left, top) = plan.placement(request);
        let client = Arc::clone(&client);

        let handle = downloads
            .spawn(async move { fetch_tile(client, url, request, left, top, permit).await });
        running.insert(handle.id(), request);
    };

    debug!(
        total,
        width = limiter.max_permits(),
        zoom = plan.zoom,
        "Fetch stage starting"
    );

    while !pending.is_empty() || !downloads.is_empty() {
        if cancellation_token.is_cancelled() {
            debug!(
                completed = results.total_count(),
                pending = pending.len(),
                active = downloads.len(),
                "Fetch stage cancelled - aborting remaining fetches"
            );
            downloads.abort_all();
            results.cancelled = true;
            break;
        }

        // Spawn as many fetches as there are free permits
        while !pending.is_empty() {
            let Some(permit) = limiter.try_acquire() else {
                break;
            };
            if let Some(request) = pending.pop_front() {
                spawn(&mut downloads, &mut running, request, permit);
            }
        }

        if downloads.is_empty() {
            // Permits are held outside this run; wait for one
            tokio::select! {
                biased;

                _ = cancellation_token.cancelled() => {}

                permit = limiter.acquire() => {
                    if let Some(request) = pending.pop_front() {
                        spawn(&mut downloads, &mut running, request, permit);
                    }
                }
            }
            continue;
        }

        tokio::select! {
            biased;

            _ = cancellation_token.cancelled() => {}

            joined = downloads.join_next_with_id() => {
                let result = match joined {
                    Some(Ok((id, result))) => {
                        running.remove(&id);
                        result
                    }
                    Some(Err(join_err)) => task_failure(&mut running, join_err),
                    None => continue,
                };

                let event = completion_event(&result, results.total_count() + 1, total);
                results.record(result);
                observer.on_tile_complete(&event);
            }
        }
    }

    debug!(
        success = results.success_count(),
        failed = results.failure_count(),
        cancelled = results.cancelled,
        peak_in_flight = limiter.peak_in_flight(),
        "Fetch stage complete"
    );

    results
}

/// Fetches one tile and releases its permit as soon as the response is in.
async fn fetch_tile<C: AsyncHttpClient>(
    client: Arc<C>,
    url: String,
    request: TileRequest,
    left: i64,
    top: i64,
    permit: HttpPermit,
) -> FetchTaskResult {
    let response = client.get(&url).await;
    drop(permit);

    match response {
        Ok(response) if response.status == STATUS_OK => Ok(PlacedTile {
            request,
            data: response.body,
            left,
            top,
        }),
        Ok(response) => Err(TileFetchError::Status {
            request,
            url,
            status: response.status,
        }),
        Err(source) => Err(TileFetchError::Transport {
            request,
            url,
            source,
        }),
    }
}

fn task_failure(
    running: &mut HashMap<Id, TileRequest>,
    join_err: JoinError,
) -> FetchTaskResult {
    let request = running
        .remove(&join_err.id())
        .unwrap_or(TileRequest { x: 0, y: 0 });

    Err(TileFetchError::Task {
        request,
        reason: join_err.to_string(),
    })
}

fn completion_event(
    result: &FetchTaskResult,
    completed: usize,
    total: usize,
) -> FetchEvent {
    let (request, outcome) = match result {
        Ok(tile) => (
            tile.request,
            FetchOutcome::Fetched {
                bytes: tile.data.len(),
            },
        ),
        Err(e) => (
            e.request(),
            FetchOutcome::Failed {
                reason: e.to_string(),
            },
        ),
    };

    FetchEvent {
        request,
        outcome,
        progress: FetchProgress { completed, total },
    }
}
