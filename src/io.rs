//! File input/output.

pub mod input;
pub mod report;
pub mod utils;

use indicatif::{ProgressBar, ProgressStyle};

/// How much non-critical status information to present.
#[derive(Clone)]
pub enum Verbosity {
    Quiet,
    Messages,
    Progress(ProgressStyle),
}

impl Verbosity {
    pub fn print_messages(&self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Creates a progress bar with the given length, hidden unless progress
    /// should be shown.
    pub fn create_progress_bar(&self, len: usize) -> ProgressBar {
        match self {
            Self::Progress(style) => ProgressBar::new(len as u64).with_style(style.clone()),
            _ => ProgressBar::hidden(),
        }
    }
}

impl Default for Verbosity {
    fn default() -> Self {
        Self::Quiet
    }
}
