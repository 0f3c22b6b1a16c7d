//! Configuration file handling for `<config_dir>/tilestitch/config.ini`.
//!
//! ```ini
//! [download]
//! parallel = 25
//! timeout = 30
//! user_agent = tilestitch/0.1.0
//!
//! [output]
//! tile_size = 256
//! max_canvas_pixels = 268435456
//!
//! [logging]
//! file = /var/log/tilestitch.log
//! ```
//!
//! A missing file yields defaults; any key may be omitted.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::Ini;
use thiserror::Error;

use super::defaults::{
    default_user_agent, CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_DOWNLOAD_TIMEOUT_SECS,
    DEFAULT_MAX_CANVAS_PIXELS, DEFAULT_PARALLEL_DOWNLOADS, DEFAULT_TILE_SIZE,
};
use super::stitch::StitchConfig;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read or parse the config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },
}

/// `[download]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSettings {
    pub parallel: usize,
    pub timeout: u64,
    pub user_agent: String,
}

/// `[output]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSettings {
    pub tile_size: u32,
    pub max_canvas_pixels: u64,
}

/// `[logging]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingSettings {
    pub file: Option<PathBuf>,
}

/// Contents of a config file, with defaults for anything it omits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub download: DownloadSettings,
    pub output: OutputSettings,
    pub logging: LoggingSettings,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            download: DownloadSettings {
                parallel: DEFAULT_PARALLEL_DOWNLOADS,
                timeout: DEFAULT_DOWNLOAD_TIMEOUT_SECS,
                user_agent: default_user_agent(),
            },
            output: OutputSettings {
                tile_size: DEFAULT_TILE_SIZE,
                max_canvas_pixels: DEFAULT_MAX_CANVAS_PIXELS,
            },
            logging: LoggingSettings::default(),
        }
    }
}

impl ConfigFile {
    /// Load configuration from the default path.
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        parse_ini(&ini)
    }

    /// Builds the run configuration described by this file.
    pub fn to_stitch_config(&self) -> StitchConfig {
        StitchConfig::new()
            .with_tile_size(self.output.tile_size)
            .with_parallel_downloads(self.download.parallel)
            .with_timeout_secs(self.download.timeout)
            .with_user_agent(self.download.user_agent.clone())
            .with_max_canvas_pixels(self.output.max_canvas_pixels)
    }
}

/// Path to the config directory (`<config_dir>/tilestitch`).
pub fn config_directory() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// Path to the default config file.
pub fn config_file_path() -> PathBuf {
    config_directory().join(CONFIG_FILE_NAME)
}

fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    if let Some(section) = ini.section(Some("download")) {
        if let Some(v) = section.get("parallel") {
            config.download.parallel = parse_positive("download", "parallel", v)?;
        }
        if let Some(v) = section.get("timeout") {
            config.download.timeout = parse_positive("download", "timeout", v)?;
        }
        if let Some(v) = section.get("user_agent") {
            let v = v.trim();
            if !v.is_empty() {
                config.download.user_agent = v.to_string();
            }
        }
    }

    if let Some(section) = ini.section(Some("output")) {
        if let Some(v) = section.get("tile_size") {
            config.output.tile_size = parse_positive("output", "tile_size", v)?;
        }
        if let Some(v) = section.get("max_canvas_pixels") {
            config.output.max_canvas_pixels = parse_positive("output", "max_canvas_pixels", v)?;
        }
    }

    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = Some(PathBuf::from(v));
            }
        }
    }

    Ok(config)
}

fn parse_positive<T>(section: &str, key: &str, value: &str) -> Result<T, ConfigFileError>
where
    T: FromStr + PartialOrd + Default,
{
    let invalid = || ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: "must be a positive integer".to_string(),
    };

    let parsed: T = value.trim().parse().map_err(|_| invalid())?;
    if parsed <= T::default() {
        return Err(invalid());
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.ini");

        let config = ConfigFile::load_from(&config_path).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_load_overrides_given_keys() {
        let (_dir, path) = write_config(
            "[download]\nparallel = 8\nuser_agent = my-agent/1.0\n\n[output]\ntile_size = 512\n\n[logging]\nfile = /tmp/stitch.log\n",
        );

        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.download.parallel, 8);
        assert_eq!(config.download.timeout, DEFAULT_DOWNLOAD_TIMEOUT_SECS);
        assert_eq!(config.download.user_agent, "my-agent/1.0");
        assert_eq!(config.output.tile_size, 512);
        assert_eq!(config.output.max_canvas_pixels, DEFAULT_MAX_CANVAS_PIXELS);
        assert_eq!(config.logging.file, Some(PathBuf::from("/tmp/stitch.log")));
    }

    #[test]
    fn test_to_stitch_config() {
        let (_dir, path) = write_config("[download]\ntimeout = 5\n[output]\ntile_size = 512\n");

        let config = ConfigFile::load_from(&path).unwrap().to_stitch_config();
        assert_eq!(config.timeout_secs(), 5);
        assert_eq!(config.tile_size(), 512);
        assert_eq!(config.parallel_downloads(), DEFAULT_PARALLEL_DOWNLOADS);
    }

    #[test]
    fn test_invalid_number_rejected() {
        let (_dir, path) = write_config("[download]\nparallel = lots\n");

        match ConfigFile::load_from(&path) {
            Err(ConfigFileError::InvalidValue {
                section, key, value, ..
            }) => {
                assert_eq!(section, "download");
                assert_eq!(key, "parallel");
                assert_eq!(value, "lots");
            }
            other => panic!("expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_rejected() {
        let (_dir, path) = write_config("[output]\ntile_size = 0\n");
        assert!(matches!(
            ConfigFile::load_from(&path),
            Err(ConfigFileError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_empty_user_agent_keeps_default() {
        let (_dir, path) = write_config("[download]\nuser_agent =\n");
        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.download.user_agent, default_user_agent());
    }

    #[test]
    fn test_default_path_ends_with_config_ini() {
        let path = config_file_path();
        assert!(path.ends_with("tilestitch/config.ini"));
    }
}
