//! HTTP concurrency limiter for tile fetches.
//!
//! A fixed-width semaphore that bounds the number of tile requests in flight
//! against the tile server. Permits are owned so they can move into spawned
//! tasks and are released when the task drops them.
//!
//! ```ignore
//! let limiter = Arc::new(HttpConcurrencyLimiter::new(25));
//!
//! let permit = limiter.acquire().await;
//! tasks.spawn(async move {
//!     let _permit = permit;
//!     // HTTP request happens here...
//! });
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Default number of concurrent tile fetches.
pub const DEFAULT_PARALLEL_DOWNLOADS: usize = 25;

/// Limiter for concurrent HTTP requests.
#[derive(Debug)]
pub struct HttpConcurrencyLimiter {
    semaphore: Arc<Semaphore>,

    /// Maximum permits (for stats/debugging)
    max_permits: usize,

    /// Current number of in-flight requests.
    /// Uses Arc so permits can be 'static and move into spawned tasks.
    in_flight: Arc<AtomicUsize>,

    /// Peak concurrent requests observed
    peak_in_flight: Arc<AtomicUsize>,
}

impl HttpConcurrencyLimiter {
    /// Creates a new limiter with the specified maximum concurrent requests.
    ///
    /// # Panics
    ///
    /// Panics if `max_concurrent` is 0.
    pub fn new(max_concurrent: usize) -> Self {
        assert!(max_concurrent > 0, "max_concurrent must be > 0");

        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent)),
            max_permits: max_concurrent,
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Acquires a permit, waiting until one is available.
    ///
    /// The semaphore is never closed, so this always yields a permit.
    pub async fn acquire(&self) -> HttpPermit {
        let permit = loop {
            // acquire_owned only fails on a closed semaphore
            if let Ok(permit) = Arc::clone(&self.semaphore).acquire_owned().await {
                break permit;
            }
        };
        self.track(permit)
    }

    /// Tries to acquire a permit without waiting.
    ///
    /// Returns `None` if no permits are available.
    pub fn try_acquire(&self) -> Option<HttpPermit> {
        let permit = Arc::clone(&self.semaphore).try_acquire_owned().ok()?;
        Some(self.track(permit))
    }

    fn track(&self, permit: OwnedSemaphorePermit) -> HttpPermit {
        let current = self.in_flight.fetch_add(1, Ordering::Relaxed) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::Relaxed);

        HttpPermit {
            _permit: permit,
            in_flight: Arc::clone(&self.in_flight),
        }
    }

    /// Maximum number of concurrent requests.
    pub fn max_permits(&self) -> usize {
        self.max_permits
    }

    /// Number of permits currently held.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Highest number of permits held at once since creation.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::Relaxed)
    }

    /// Number of permits that can be acquired without waiting.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}

impl Default for HttpConcurrencyLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_PARALLEL_DOWNLOADS)
    }
}

/// Permit for one in-flight HTTP request; released on drop.
#[derive(Debug)]
pub struct HttpPermit {
    _permit: OwnedSemaphorePermit,
    in_flight: Arc<AtomicUsize>,
}

impl Drop for HttpPermit {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_default_width() {
        let limiter = HttpConcurrencyLimiter::default();
        assert_eq!(limiter.max_permits(), 25);
        assert_eq!(limiter.available(), 25);
    }

    #[test]
    #[should_panic(expected = "max_concurrent must be > 0")]
    fn test_zero_permits_panics() {
        let _ = HttpConcurrencyLimiter::new(0);
    }

    #[test]
    fn test_try_acquire_exhausts() {
        let limiter = HttpConcurrencyLimiter::new(2);

        let a = limiter.try_acquire();
        let b = limiter.try_acquire();
        assert!(a.is_some());
        assert!(b.is_some());
        assert!(limiter.try_acquire().is_none());
        assert_eq!(limiter.in_flight(), 2);

        drop(a);
        assert_eq!(limiter.in_flight(), 1);
        assert!(limiter.try_acquire().is_some());
    }

    #[test]
    fn test_peak_tracks_high_water_mark() {
        let limiter = HttpConcurrencyLimiter::new(4);

        let permits: Vec<_> = (0..3).filter_map(|_| limiter.try_acquire()).collect();
        drop(permits);

        assert_eq!(limiter.in_flight(), 0);
        assert_eq!(limiter.peak_in_flight(), 3);
    }

    #[tokio::test]
    async fn test_acquire_waits_for_release() {
        let limiter = Arc::new(HttpConcurrencyLimiter::new(1));
        let held = limiter.acquire().await;

        let waiter = {
            let limiter = Arc::clone(&limiter);
            tokio::spawn(async move {
                let _permit = limiter.acquire().await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished(), "second acquire should be waiting");

        drop(held);
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should finish after release")
            .unwrap();
        assert_eq!(limiter.peak_in_flight(), 1);
    }
}
