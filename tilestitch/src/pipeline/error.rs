//! Per-tile fetch errors.

use thiserror::Error;

use crate::plan::TileRequest;
use crate::provider::TransportError;

/// Why a single tile is missing from the output.
///
/// These are recovered locally: the tile is dropped and its footprint stays
/// transparent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileFetchError {
    /// The server answered with something other than 200.
    #[error("Tile {request} returned HTTP {status} from {url}")]
    Status {
        request: TileRequest,
        url: String,
        status: u16,
    },

    /// The request failed before a status code was received.
    #[error("Tile {request} failed from {url}: {source}")]
    Transport {
        request: TileRequest,
        url: String,
        #[source]
        source: TransportError,
    },

    /// The fetch task panicked or was aborted.
    #[error("Tile {request} fetch task did not complete: {reason}")]
    Task {
        request: TileRequest,
        reason: String,
    },
}

impl TileFetchError {
    /// The tile this error belongs to.
    pub fn request(&self) -> TileRequest {
        match self {
            TileFetchError::Status { request, .. }
            | TileFetchError::Transport { request, .. }
            | TileFetchError::Task { request, .. } => *request,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = TileFetchError::Status {
            request: TileRequest { x: 3, y: 4 },
            url: "http://x/5/3/4.png".to_string(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "Tile 3/4 returned HTTP 404 from http://x/5/3/4.png"
        );
        assert_eq!(err.request(), TileRequest { x: 3, y: 4 });
    }

    #[test]
    fn test_transport_has_source() {
        use std::error::Error;

        let err = TileFetchError::Transport {
            request: TileRequest { x: 1, y: 1 },
            url: "http://x".to_string(),
            source: TransportError::Request("refused".to_string()),
        };
        assert!(err.source().is_some());
    }
}
