//! Synthetic progress for the loading indicator.
//!
//! Progress is not derived from transferred bytes. A ticker nudges it towards
//! a ceiling below 100; only a confirmed success takes it to 100.

use serde::Serialize;

use crate::domain::models::SearchConfig;

/// Value reported once a fetch has succeeded.
pub const COMPLETE: f64 = 100.0;

/// Loading phase of the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadingState {
    #[default]
    Idle,
    Loading { progress: f64 },
}

impl LoadingState {
    /// Start of a new loading phase.
    pub const fn started() -> Self {
        Self::Loading { progress: 0.0 }
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// Current progress; 0 while idle.
    pub const fn progress(&self) -> f64 {
        match self {
            Self::Idle => 0.0,
            Self::Loading { progress } => *progress,
        }
    }
}

/// Step function applied on every ticker period.
#[derive(Debug, Clone, Copy)]
pub struct ProgressModel {
    increment: f64,
    ceiling: f64,
}

impl ProgressModel {
    pub const fn new(increment: f64, ceiling: f64) -> Self {
        Self { increment, ceiling }
    }

    pub const fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.progress_increment, config.progress_ceiling)
    }

    /// Next value. Never exceeds the ceiling on its own and never goes down,
    /// so a value already at [`COMPLETE`] stays there.
    pub fn advance(&self, current: f64) -> f64 {
        (current + self.increment).min(self.ceiling).max(current)
    }
}

impl Default for ProgressModel {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}
