//! Progress accounting for copy jobs.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

/// File counts of a running job.
///
/// Owned by the executor; observers only ever see copies of it.
/// `copied_files` never exceeds `total_files`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressState {
    total_files: u64,
    copied_files: u64,
}

impl ProgressState {
    /// Start counting towards `total_files`.
    #[must_use]
    pub const fn new(total_files: u64) -> Self {
        Self {
            total_files,
            copied_files: 0,
        }
    }

    /// Total number of files to copy.
    #[must_use]
    pub const fn total_files(&self) -> u64 {
        self.total_files
    }

    /// Number of files copied so far.
    #[must_use]
    pub const fn copied_files(&self) -> u64 {
        self.copied_files
    }

    /// Record one copied file.
    ///
    /// If the tree grew after counting, the total is raised along with the
    /// copied count.
    pub const fn record_copied(&mut self) {
        self.copied_files += 1;
        if self.copied_files > self.total_files {
            self.total_files = self.copied_files;
        }
    }

    /// Settle the counts of a job that copied everything it found.
    ///
    /// If files vanished after counting, the total is lowered to what was
    /// actually copied.
    pub const fn finish(&mut self) {
        if self.copied_files < self.total_files {
            self.total_files = self.copied_files;
        }
    }

    /// Progress as `floor(copied / total * 100)`, 100 when there is nothing to copy.
    #[must_use]
    pub fn percent(&self) -> u8 {
        if self.total_files == 0 {
            return 100;
        }
        let percent = (u128::from(self.copied_files) * 100) / u128::from(self.total_files);
        u8::try_from(percent.min(100)).unwrap_or(100)
    }

    /// Build an event describing the current state.
    #[must_use]
    pub fn snapshot(&self, current_file: Option<PathBuf>) -> ProgressEvent {
        ProgressEvent {
            percent: self.percent(),
            files_copied: self.copied_files,
            files_total: self.total_files,
            current_file,
        }
    }
}

/// Progress snapshot delivered to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    /// Percentage complete, 0 to 100.
    pub percent: u8,
    /// Number of files copied so far.
    pub files_copied: u64,
    /// Total number of files to copy.
    pub files_total: u64,
    /// Source path of the file just copied, if any.
    pub current_file: Option<PathBuf>,
}
