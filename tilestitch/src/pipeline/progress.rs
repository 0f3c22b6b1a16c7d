//! Progress reporting for tile fetches.
//!
//! The fetch stage emits one [`FetchEvent`] per finished tile, success or
//! failure, to a [`FetchObserver`]. Logging and progress display are
//! observers; the fetch stage itself never logs progress.

use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

use crate::plan::TileRequest;

/// Completion count for a fetch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchProgress {
    /// Tiles finished so far (fetched or failed)
    pub completed: usize,
    /// Tiles in the plan
    pub total: usize,
}

impl FetchProgress {
    /// Percentage complete; each finished tile adds `100 / total`.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.completed as f64 * 100.0 / self.total as f64
    }

    pub fn is_complete(&self) -> bool {
        self.completed >= self.total
    }
}

/// How a single tile fetch ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Tile bytes received with the given size.
    Fetched { bytes: usize },
    /// Tile skipped; the message describes why.
    Failed { reason: String },
}

/// Emitted once per finished tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchEvent {
    pub request: TileRequest,
    pub outcome: FetchOutcome,
    pub progress: FetchProgress,
}

/// Receives fetch completion events.
///
/// Called from the fetch stage's aggregation loop, so implementations
/// should return quickly.
pub trait FetchObserver: Send + Sync {
    fn on_tile_complete(&self, event: &FetchEvent);
}

/// Observer that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl FetchObserver for NoopObserver {
    #[inline]
    fn on_tile_complete(&self, _event: &FetchEvent) {}
}

/// Observer that writes a structured log line per tile.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl FetchObserver for TracingObserver {
    fn on_tile_complete(&self, event: &FetchEvent) {
        let percent = format!("{:.1}%", event.progress.percent());
        match &event.outcome {
            FetchOutcome::Fetched { bytes } => info!(
                tile = %event.request,
                bytes,
                completed = event.progress.completed,
                total = event.progress.total,
                percent = %percent,
                "Tile fetched"
            ),
            FetchOutcome::Failed { reason } => warn!(
                tile = %event.request,
                reason = %reason,
                completed = event.progress.completed,
                total = event.progress.total,
                percent = %percent,
                "Tile skipped"
            ),
        }
    }
}

/// Forwards events over a channel; a closed receiver is ignored.
impl FetchObserver for UnboundedSender<FetchEvent> {
    fn on_tile_complete(&self, event: &FetchEvent) {
        let _ = self.send(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn event(completed: usize, total: usize) -> FetchEvent {
        FetchEvent {
            request: TileRequest { x: 1, y: 2 },
            outcome: FetchOutcome::Fetched { bytes: 10 },
            progress: FetchProgress { completed, total },
        }
    }

    #[test]
    fn test_percent_accounting() {
        let progress = FetchProgress {
            completed: 1,
            total: 4,
        };
        assert_eq!(progress.percent(), 25.0);
        assert!(!progress.is_complete());

        let done = FetchProgress {
            completed: 4,
            total: 4,
        };
        assert_eq!(done.percent(), 100.0);
        assert!(done.is_complete());
    }

    #[test]
    fn test_percent_for_empty_run() {
        let progress = FetchProgress {
            completed: 0,
            total: 0,
        };
        assert_eq!(progress.percent(), 100.0);
    }

    #[test]
    fn test_channel_observer_forwards() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.on_tile_complete(&event(1, 3));

        let received = rx.try_recv().unwrap();
        assert_eq!(received.progress.completed, 1);
        assert_eq!(received.request, TileRequest { x: 1, y: 2 });
    }

    #[test]
    fn test_channel_observer_ignores_closed_receiver() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        tx.on_tile_complete(&event(1, 1));
    }

    #[test]
    fn test_observers_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NoopObserver>();
        assert_send_sync::<TracingObserver>();
        assert_send_sync::<UnboundedSender<FetchEvent>>();
    }
}
