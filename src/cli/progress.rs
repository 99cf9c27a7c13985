//! Search progress bar using indicatif
//!
//! The controller reports progress as a percentage with sub-percent steps, so
//! the bar runs over tenths of a percent.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

use crate::services::LoadingState;

const SEARCH_TEMPLATE: &str = "{spinner:.green} {bar:40.cyan/blue} {msg}";
const PROGRESS_CHARS: &str = "█▓▒░ ";
const SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ";

/// Bar positions per percent.
const SCALE: f64 = 10.0;

/// Progress bar for one profile search.
pub struct SearchProgress {
    bar: ProgressBar,
}

impl SearchProgress {
    /// Bar drawn to stderr, labelled with the searched name.
    pub fn new(subject: &str) -> Self {
        Self::with_target(subject, ProgressDrawTarget::stderr())
    }

    /// Bar that draws nothing (for tests and `--json`).
    pub fn hidden() -> Self {
        Self::with_target("", ProgressDrawTarget::hidden())
    }

    fn with_target(subject: &str, target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(100 * SCALE as u64), target);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(SEARCH_TEMPLATE)
                .expect("Invalid progress bar template")
                .progress_chars(PROGRESS_CHARS)
                .tick_chars(SPINNER_CHARS),
        );
        bar.set_prefix(subject.to_string());
        bar.set_message(format!("Analyzing {subject}... 0.0%"));
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    /// Mirror the controller's loading state.
    pub fn update(&self, loading: &LoadingState) {
        let progress = loading.progress();
        self.bar.set_position(to_position(progress));
        self.bar
            .set_message(format!("Analyzing {}... {progress:.1}%", self.bar.prefix()));
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for SearchProgress {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_position(progress: f64) -> u64 {
    (progress.clamp(0.0, 100.0) * SCALE).round() as u64
}
