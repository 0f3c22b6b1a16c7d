//! Run-level errors.

use thiserror::Error;

use crate::compositor::CompositeError;
use crate::plan::InvalidGeometryError;

/// Why a stitch run produced no output.
///
/// Per-tile fetch failures are not in here; they are reported in
/// [`StitchReport`](super::StitchReport) and leave transparent gaps.
#[derive(Debug, Error)]
pub enum StitchError {
    #[error(transparent)]
    InvalidGeometry(#[from] InvalidGeometryError),

    #[error(transparent)]
    Composite(#[from] CompositeError),

    /// The run was cancelled; no output was written.
    #[error("Stitch cancelled after {completed} of {total} tiles")]
    Cancelled { completed: usize, total: usize },

    /// The run could not be set up.
    #[error("Failed to start stitch: {0}")]
    Runtime(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_error_is_transparent() {
        let err: StitchError = InvalidGeometryError::ZeroTileSize.into();
        assert_eq!(err.to_string(), "Tile size must be at least one pixel");
    }

    #[test]
    fn test_cancelled_display() {
        let err = StitchError::Cancelled {
            completed: 3,
            total: 9,
        };
        assert_eq!(err.to_string(), "Stitch cancelled after 3 of 9 tiles");
    }
}
