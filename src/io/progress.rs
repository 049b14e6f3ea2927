//! Progress display for the chunk-shuffling phase

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static CHUNK_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Chunks: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar tracking accepted chunks for one generation run
pub struct ShuffleProgress {
    bar: ProgressBar,
}

impl ShuffleProgress {
    /// Create a progress bar sized to the run's chunk count
    pub fn new(chunk_count: usize) -> Self {
        let bar = ProgressBar::new(chunk_count as u64);
        bar.set_style(CHUNK_STYLE.clone());
        Self { bar }
    }

    /// Record one accepted chunk
    pub fn chunk_accepted(&self) {
        self.bar.inc(1);
    }

    /// Complete the bar after a successful run
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    /// Leave the bar at its current position after a failed run
    pub fn abandon(&self) {
        self.bar.abandon();
    }
}
