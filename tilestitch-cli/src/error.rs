//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and exit codes.

use std::fmt;
use std::process;

use tilestitch::config::ConfigFileError;
use tilestitch::provider::TemplateError;
use tilestitch::stitch::StitchError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Config file could not be loaded
    Config(ConfigFileError),
    /// URL template is malformed
    Template(TemplateError),
    /// Failed to install the Ctrl-C handler
    Signal(String),
    /// Failed to start the async runtime
    Runtime(std::io::Error),
    /// The stitch run failed
    Stitch(StitchError),
}

impl CliError {
    /// Exit the process with an error message and status 1.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        if let CliError::Template(_) = self {
            eprintln!();
            eprintln!("The URL must contain {{z}}, {{x}} and {{y}}, for example:");
            eprintln!("  https://tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png");
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Template(e) => write!(f, "{}", e),
            CliError::Signal(msg) => write!(f, "Failed to set signal handler: {}", msg),
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
            CliError::Stitch(e) => write!(f, "Stitch failed: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Template(e) => Some(e),
            CliError::Runtime(e) => Some(e),
            CliError::Stitch(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}

impl From<TemplateError> for CliError {
    fn from(e: TemplateError) -> Self {
        CliError::Template(e)
    }
}

impl From<StitchError> for CliError {
    fn from(e: StitchError) -> Self {
        CliError::Stitch(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use tilestitch::plan::InvalidGeometryError;

    #[test]
    fn test_stitch_error_display_and_source() {
        let err = CliError::from(StitchError::from(InvalidGeometryError::ZeroTileSize));
        assert_eq!(
            err.to_string(),
            "Stitch failed: Tile size must be at least one pixel"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_signal_has_no_source() {
        let err = CliError::Signal("busy".to_string());
        assert_eq!(err.to_string(), "Failed to set signal handler: busy");
        assert!(err.source().is_none());
    }
}
