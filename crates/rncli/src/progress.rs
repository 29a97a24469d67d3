//! Progress bar adapter for the batch engine.

use indicatif::{ProgressBar, ProgressStyle};
use renamo::{Phase, ProgressSink};

pub struct BarSink {
    bar: ProgressBar,
}

impl BarSink {
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::default_bar()
            .template("{msg:12} [{bar:40.green/dim}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░ ");
        bar.set_style(style);
        BarSink { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressSink for BarSink {
    fn notify(&self, phase: Phase, done: usize, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(done as u64);
        self.bar.set_message(phase.to_string());
    }
}
