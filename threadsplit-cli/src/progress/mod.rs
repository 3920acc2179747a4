//! Progress reporting for multi-file runs

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress reporter for splitting several inputs
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    quiet: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
        }
    }

    /// Show a progress bar when more than one input will be split
    pub fn init_inputs(&mut self, total_inputs: u64) {
        if self.quiet || total_inputs < 2 {
            return;
        }

        let pb = ProgressBar::new(total_inputs);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} inputs {msg}")
        {
            pb.set_style(style.progress_chars("##-"));
        }
        pb.enable_steady_tick(Duration::from_millis(100));

        self.progress_bar = Some(pb);
    }

    /// Record one split input
    pub fn input_completed(&self, name: &str) {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!("Split: {name}"));
            pb.inc(1);
        }
    }

    /// Whether a progress bar is shown
    pub fn is_active(&self) -> bool {
        self.progress_bar.is_some()
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_or_single_input_has_no_bar() {
        let mut quiet = ProgressReporter::new(true);
        quiet.init_inputs(10);
        assert!(!quiet.is_active());

        let mut single = ProgressReporter::new(false);
        single.init_inputs(1);
        assert!(!single.is_active());
        single.input_completed("post.txt");
        single.finish();
    }

    #[test]
    fn test_multiple_inputs_show_bar() {
        let mut reporter = ProgressReporter::new(false);
        reporter.init_inputs(3);
        assert!(reporter.is_active());

        reporter.input_completed("a.txt");
        reporter.finish();
    }
}
