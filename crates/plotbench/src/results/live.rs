//! Live progress reporting while a pattern iterates.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress bar shown while a pattern runs its iterations.
///
/// ```text
///   ⠋ Grouped scan  last: 5.84 ms  ████░░░░  3/8
/// ```
///
/// Drawn on stderr and hidden automatically when stderr is not a terminal.
pub struct LiveProgressReporter {
    progress: ProgressBar,
}

impl LiveProgressReporter {
    /// Start a progress bar for `iterations` runs of `name`.
    pub fn new(name: &str, iterations: usize, color: bool) -> Self {
        let progress = ProgressBar::new(iterations as u64);

        let template = if color {
            "  {spinner:.cyan} {prefix:<18} last: {msg:<12}  {bar:20.cyan/dim} {pos}/{len}"
        } else {
            "  {spinner} {prefix:<18} last: {msg:<12}  {bar:20} {pos}/{len}"
        };
        let style = ProgressStyle::default_bar()
            .template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░")
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);

        progress.set_style(style);
        progress.set_prefix(name.to_string());
        progress.set_message("measuring...");
        progress.enable_steady_tick(Duration::from_millis(100));

        Self { progress }
    }

    /// Called after each iteration with the time it took.
    pub fn tick(&self, iteration_time: Duration) {
        self.progress
            .set_message(super::format::format_duration(iteration_time));
        self.progress.inc(1);
    }

    /// Remove the bar so the result line prints cleanly.
    pub fn finish(self) {
        self.progress.finish_and_clear();
    }
}
