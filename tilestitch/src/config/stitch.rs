//! Run configuration.

use std::time::Duration;

use super::defaults::{
    default_user_agent, DEFAULT_DOWNLOAD_TIMEOUT_SECS, DEFAULT_MAX_CANVAS_PIXELS,
    DEFAULT_PARALLEL_DOWNLOADS, DEFAULT_TILE_SIZE,
};

/// Settings for a stitch run.
///
/// # Example
///
/// ```
/// use tilestitch::config::StitchConfig;
///
/// let config = StitchConfig::new()
///     .with_tile_size(512)
///     .with_parallel_downloads(8);
/// assert_eq!(config.tile_size(), 512);
/// assert_eq!(config.timeout_secs(), 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StitchConfig {
    /// Tile edge length in pixels
    tile_size: u32,
    /// Maximum number of concurrent tile requests
    parallel_downloads: usize,
    /// Per-request timeout in seconds
    timeout_secs: u64,
    user_agent: String,
    /// Largest canvas, in pixels, the compositor will allocate
    max_canvas_pixels: u64,
}

impl StitchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Values below one are raised to one.
    pub fn with_parallel_downloads(mut self, parallel: usize) -> Self {
        self.parallel_downloads = parallel.max(1);
        self
    }

    pub fn with_timeout_secs(mut self, timeout: u64) -> Self {
        self.timeout_secs = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_max_canvas_pixels(mut self, pixels: u64) -> Self {
        self.max_canvas_pixels = pixels;
        self
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn parallel_downloads(&self) -> usize {
        self.parallel_downloads
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn max_canvas_pixels(&self) -> u64 {
        self.max_canvas_pixels
    }
}

impl Default for StitchConfig {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            parallel_downloads: DEFAULT_PARALLEL_DOWNLOADS,
            timeout_secs: DEFAULT_DOWNLOAD_TIMEOUT_SECS,
            user_agent: default_user_agent(),
            max_canvas_pixels: DEFAULT_MAX_CANVAS_PIXELS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StitchConfig::default();
        assert_eq!(config.tile_size(), 256);
        assert_eq!(config.parallel_downloads(), 25);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.user_agent().starts_with("tilestitch/"));
        assert_eq!(config.max_canvas_pixels(), 16384 * 16384);
    }

    #[test]
    fn test_builder_overrides_only_what_it_sets() {
        let config = StitchConfig::new()
            .with_timeout_secs(5)
            .with_user_agent("test-agent");

        assert_eq!(config.timeout_secs(), 5);
        assert_eq!(config.user_agent(), "test-agent");
        assert_eq!(config.tile_size(), DEFAULT_TILE_SIZE);
        assert_eq!(config.parallel_downloads(), DEFAULT_PARALLEL_DOWNLOADS);
    }

    #[test]
    fn test_zero_parallel_is_raised() {
        let config = StitchConfig::new().with_parallel_downloads(0);
        assert_eq!(config.parallel_downloads(), 1);
    }
}
