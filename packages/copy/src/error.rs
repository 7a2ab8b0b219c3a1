//! Error types for backup jobs.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

/// Errors that prevent a job from starting.
///
/// These are surfaced before any file is written, so no partial state exists
/// under the destination when one of them is returned.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// The job has no source roots.
    #[error("No source directories were selected")]
    NoSources,

    /// A source root does not exist.
    #[error("Source does not exist: {}", path.display())]
    SourceNotFound {
        /// The missing source path.
        path: PathBuf,
    },

    /// A source root has no final path component to name its backup folder.
    #[error("Source has no usable name: {}", path.display())]
    InvalidSourceRoot {
        /// The offending source path.
        path: PathBuf,
    },

    /// Failed to create the destination root.
    #[error("Failed to create destination {}: {io_error}", path.display())]
    CreateDestination {
        /// The destination path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to start the worker thread.
    #[error("Failed to start copy worker: {0}")]
    SpawnWorker(std::io::Error),
}

/// Errors that can occur while copying. Any of these ends the job.
#[derive(Debug, thiserror::Error)]
pub enum CopyError {
    /// Failed to read source metadata.
    #[error("Failed to read {}: {io_error}", path.display())]
    ReadDirError {
        /// The source path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to create target directory.
    #[error("Failed to create directory {}: {io_error}", path.display())]
    CreateDirError {
        /// The directory path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to copy a file.
    #[error("Failed to copy {} to {}: {io_error}", source_path.display(), target_path.display())]
    FileCopyError {
        /// Source file path.
        source_path: PathBuf,
        /// Target file path.
        target_path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to get file metadata.
    #[error("Failed to get metadata for {}: {io_error}", path.display())]
    MetadataError {
        /// The file path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Directory enumeration failed.
    #[error("Failed to enumerate directory {}: {message}", path.display())]
    EnumerationError {
        /// The directory path.
        path: PathBuf,
        /// Error message.
        message: String,
    },
}
