//! Logging setup.
//!
//! Installs a `tracing` subscriber that writes to stdout and, optionally, to
//! a log file through a non-blocking writer. The level comes from the
//! verbosity flag when one is given, else `RUST_LOG`, else `info`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Logging options supplied by the binary.
#[derive(Debug, Clone, Default)]
pub struct LoggingOptions {
    /// Number of `-v` flags
    pub verbosity: u8,
    /// Also append logs to this file
    pub file: Option<PathBuf>,
}

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard flushes and closes the log file writer.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize the global subscriber.
///
/// # Errors
///
/// Returns an error if the log file's directory cannot be created or a
/// global subscriber is already installed.
pub fn init_logging(options: &LoggingOptions) -> Result<LoggingGuard, io::Error> {
    let (file_layer, file_guard) = match &options.file {
        Some(path) => {
            let (directory, file_name) = split_log_path(path)?;
            fs::create_dir_all(&directory)?;

            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .with_target(false);

    tracing_subscriber::registry()
        .with(build_filter(options.verbosity))
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(io::Error::other)?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Filter directive forced by `-v` flags, if any.
pub fn verbosity_directive(verbosity: u8) -> Option<&'static str> {
    match verbosity {
        0 => None,
        1 => Some("tilestitch=debug,info"),
        _ => Some("trace"),
    }
}

fn build_filter(verbosity: u8) -> EnvFilter {
    match verbosity_directive(verbosity) {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    }
}

fn split_log_path(path: &Path) -> Result<(PathBuf, PathBuf), io::Error> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("log file path has no file name: {}", path.display()),
        )
    })?;

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    Ok((directory, PathBuf::from(file_name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_directives() {
        assert_eq!(verbosity_directive(0), None);
        assert_eq!(verbosity_directive(1), Some("tilestitch=debug,info"));
        assert_eq!(verbosity_directive(2), Some("trace"));
        assert_eq!(verbosity_directive(9), Some("trace"));
    }

    #[test]
    fn test_split_log_path() {
        let (dir, file) = split_log_path(Path::new("/var/log/tilestitch.log")).unwrap();
        assert_eq!(dir, PathBuf::from("/var/log"));
        assert_eq!(file, PathBuf::from("tilestitch.log"));
    }

    #[test]
    fn test_split_bare_file_name_uses_current_dir() {
        let (dir, file) = split_log_path(Path::new("stitch.log")).unwrap();
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(file, PathBuf::from("stitch.log"));
    }

    #[test]
    fn test_split_rejects_directory_only() {
        assert!(split_log_path(Path::new("/")).is_err());
    }
}
