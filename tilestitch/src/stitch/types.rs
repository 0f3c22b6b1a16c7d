//! Stitch request and report types.

use std::path::{Path, PathBuf};

use crate::pipeline::TileFetchError;
use crate::plan::{BoundingBox, TilePlan};
use crate::provider::UrlTemplate;

/// What to stitch and where to write it.
#[derive(Debug, Clone)]
pub struct StitchRequest {
    pub bbox: BoundingBox,
    pub zoom: u8,
    pub template: UrlTemplate,
    /// Output file; its extension picks the image format
    pub output: PathBuf,
}

impl StitchRequest {
    pub fn new(
        bbox: BoundingBox,
        zoom: u8,
        template: UrlTemplate,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            bbox,
            zoom,
            template,
            output: output.into(),
        }
    }
}

/// Result of a completed run.
#[derive(Debug)]
pub struct StitchReport {
    plan: TilePlan,
    fetched: usize,
    failures: Vec<TileFetchError>,
    output: PathBuf,
}

impl StitchReport {
    pub(super) fn new(
        plan: TilePlan,
        fetched: usize,
        failures: Vec<TileFetchError>,
        output: PathBuf,
    ) -> Self {
        Self {
            plan,
            fetched,
            failures,
            output,
        }
    }

    pub fn plan(&self) -> &TilePlan {
        &self.plan
    }

    /// Tiles placed on the canvas.
    pub fn fetched_count(&self) -> usize {
        self.fetched
    }

    /// Tiles left transparent.
    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    pub fn failures(&self) -> &[TileFetchError] {
        &self.failures
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// True if every planned tile was placed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
