//! Progress bar utilities for the CLI.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::io::Write;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use user_backup_copy::ProgressEvent;

/// Progress bar for a running backup.
#[derive(Clone)]
pub struct BackupProgress {
    bar: ProgressBar,
}

impl BackupProgress {
    /// Create a progress bar going from 0 to 100 percent.
    ///
    /// If progress is disabled, the bar is hidden.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        if !enabled {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }

        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("  Backing up [{bar:30.green/dim}] {pos:>3}% {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("━━─"),
        );
        Self { bar }
    }

    /// Show a progress event.
    pub fn update(&self, event: &ProgressEvent) {
        self.bar.set_position(u64::from(event.percent));
        self.bar.set_message(format!(
            "{}/{} files",
            event.files_copied, event.files_total
        ));
    }

    /// Note that cancellation was requested.
    pub fn cancelling(&self) {
        self.bar
            .println(format!(
            "{} finishing current file, press Ctrl-C again to quit now",
            "Cancelling:".yellow()
        ));
    }

    /// Remove the bar.
    pub fn clear(&self) {
        self.bar.finish_and_clear();
        let _ = std::io::stdout().flush();
    }
}
