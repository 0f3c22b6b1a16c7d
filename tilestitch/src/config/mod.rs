//! Configuration
//!
//! [`StitchConfig`] holds the settings for one run. [`ConfigFile`] reads the
//! optional INI file that supplies defaults for them; command-line flags
//! take precedence over both.

mod defaults;
mod file;
mod stitch;

pub use defaults::{
    default_user_agent, DEFAULT_DOWNLOAD_TIMEOUT_SECS, DEFAULT_MAX_CANVAS_PIXELS,
    DEFAULT_PARALLEL_DOWNLOADS, DEFAULT_TILE_SIZE,
};
pub use file::{
    config_directory, config_file_path, ConfigFile, ConfigFileError, DownloadSettings,
    LoggingSettings, OutputSettings,
};
pub use stitch::StitchConfig;
