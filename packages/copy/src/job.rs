//! Backup job description and the values a running job reports.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::error::SetupError;
use crate::progress::{ProgressEvent, ProgressState};

/// A request to copy a fixed set of source roots into a destination root.
///
/// Each root is mirrored to `destination_root/<root basename>`. A job is
/// immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyJob {
    source_roots: Vec<PathBuf>,
    destination_root: PathBuf,
}

impl CopyJob {
    /// Build a job.
    ///
    /// # Arguments
    ///
    /// * `source_roots` - Directories (or single files) to back up, in copy order
    /// * `destination_root` - Directory the per-source folders are created in
    ///
    /// # Errors
    ///
    /// * If `source_roots` is empty
    /// * If a source root does not exist
    /// * If a source root has no final path component (e.g. `/` or `..`)
    pub fn new(
        source_roots: Vec<PathBuf>,
        destination_root: impl Into<PathBuf>,
    ) -> Result<Self, SetupError> {
        if source_roots.is_empty() {
            return Err(SetupError::NoSources);
        }

        for root in &source_roots {
            if root.file_name().is_none() {
                return Err(SetupError::InvalidSourceRoot { path: root.clone() });
            }
            if !root.exists() {
                return Err(SetupError::SourceNotFound { path: root.clone() });
            }
        }

        let destination_root = destination_root.into();

        for (i, root) in source_roots.iter().enumerate() {
            if source_roots[..i]
                .iter()
                .any(|other| other.file_name() == root.file_name())
            {
                log::warn!(
                    "{} shares its folder name with an earlier source; their contents will be merged",
                    root.display()
                );
            }
        }

        Ok(Self {
            source_roots,
            destination_root,
        })
    }

    /// Source roots in copy order.
    #[must_use]
    pub fn source_roots(&self) -> &[PathBuf] {
        &self.source_roots
    }

    /// Destination root.
    #[must_use]
    pub fn destination_root(&self) -> &Path {
        &self.destination_root
    }

    /// Where a source root is mirrored to.
    ///
    /// Returns `None` for a root without a final path component, which
    /// [`CopyJob::new`] rejects.
    #[must_use]
    pub fn target_for(&self, source_root: &Path) -> Option<PathBuf> {
        source_root
            .file_name()
            .map(|name: &OsStr| self.destination_root.join(name))
    }
}

/// Terminal result of a job. Produced exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Every counted file was copied.
    Completed,
    /// An I/O error stopped the job. Files copied before it remain on disk.
    Failed(String),
    /// The job stopped at a cancellation request. Nothing was rolled back.
    Cancelled,
}

impl CopyOutcome {
    /// Whether the job finished without error or cancellation.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl std::fmt::Display for CopyOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::Failed(message) => write!(f, "failed: {message}"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// The outcome of a job together with how far it got.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport {
    /// Terminal outcome.
    pub outcome: CopyOutcome,
    /// Final file counts.
    pub progress: ProgressState,
}

/// Message sent from a job worker to its observers.
///
/// `Finished` is always the last message of a job.
#[derive(Debug, Clone)]
pub enum JobEvent {
    /// A file was copied.
    Progress(ProgressEvent),
    /// The job reached a terminal state.
    Finished(JobReport),
}
