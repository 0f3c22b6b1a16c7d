//! Built-in configuration defaults.

pub use crate::compositor::DEFAULT_MAX_CANVAS_PIXELS;
pub use crate::pipeline::DEFAULT_PARALLEL_DOWNLOADS;
pub use crate::plan::DEFAULT_TILE_SIZE;

/// Per-request HTTP timeout in seconds.
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 30;

/// Config directory name under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "tilestitch";

/// Config file name.
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// `User-Agent` sent with tile requests, e.g. `tilestitch/0.1.0`.
pub fn default_user_agent() -> String {
    format!("tilestitch/{}", env!("CARGO_PKG_VERSION"))
}
