//! Terminal progress bar for tile fetches.

use indicatif::{ProgressBar, ProgressStyle};
use tilestitch::pipeline::{FetchEvent, FetchObserver, FetchOutcome};

const TEMPLATE: &str = "{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} tiles ({percent}%) {msg}";

/// Shows fetch progress as an `indicatif` bar.
pub struct ProgressBarObserver {
    bar: ProgressBar,
}

impl ProgressBarObserver {
    pub fn new(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
            bar.set_style(style.progress_chars("=> "));
        }
        Self { bar }
    }
}

impl FetchObserver for ProgressBarObserver {
    fn on_tile_complete(&self, event: &FetchEvent) {
        self.bar.set_position(event.progress.completed as u64);

        if let FetchOutcome::Failed { reason } = &event.outcome {
            self.bar.println(format!("skipped {}: {}", event.request, reason));
        }

        if event.progress.is_complete() {
            self.bar.finish_with_message("done");
        }
    }
}

impl Drop for ProgressBarObserver {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.abandon_with_message("interrupted");
        }
    }
}
