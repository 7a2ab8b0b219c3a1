//! Ordered traversal of a source root into copy units.
//!
//! The walk only decides *what* to copy and where it goes. Copying and
//! progress accounting happen in the executor, one unit at a time.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CopyError;

/// One step of a backup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyUnit {
    /// Make sure a directory exists in the destination.
    Directory {
        /// Target directory path.
        target: PathBuf,
    },
    /// Copy a regular file. The only unit that counts towards progress.
    File {
        /// Source path.
        source: PathBuf,
        /// Target path.
        target: PathBuf,
    },
    /// Recreate a symlink.
    Symlink {
        /// Source path.
        source: PathBuf,
        /// Target path.
        target: PathBuf,
    },
}

/// Stream of units for one source root.
pub type Units = Box<dyn Iterator<Item = Result<CopyUnit, CopyError>>>;

/// Walk a source root.
///
/// Directories are walked depth-first with entries sorted by name, so the
/// order is the same on every run. A directory is yielded before its
/// contents. A root that is a regular file yields a single `File` unit.
/// Entries that are neither files, directories nor symlinks are skipped.
///
/// # Arguments
///
/// * `root` - Source root (file or directory)
/// * `target` - Where the root is mirrored to
///
/// # Errors
///
/// * If the root cannot be read
/// * Each yielded item may be an `EnumerationError` for an entry that could not be read
pub fn source_units(root: &Path, target: &Path) -> Result<Units, CopyError> {
    let metadata = fs::metadata(root).map_err(|e| CopyError::ReadDirError {
        path: root.to_path_buf(),
        io_error: e,
    })?;

    if metadata.is_file() {
        return Ok(Box::new(std::iter::once(Ok(CopyUnit::File {
            source: root.to_path_buf(),
            target: target.to_path_buf(),
        }))));
    }

    if !metadata.is_dir() {
        return Err(CopyError::EnumerationError {
            path: root.to_path_buf(),
            message: "Not a file or directory".to_string(),
        });
    }

    let walk_root = fs::canonicalize(root).map_err(|e| CopyError::ReadDirError {
        path: root.to_path_buf(),
        io_error: e,
    })?;
    let target = target.to_path_buf();

    let walk = jwalk::WalkDir::new(&walk_root)
        .skip_hidden(false)
        .follow_links(false)
        .sort(true)
        .parallelism(jwalk::Parallelism::Serial)
        .into_iter();

    Ok(Box::new(walk.filter_map(move |entry| {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                return Some(Err(CopyError::EnumerationError {
                    path: walk_root.clone(),
                    message: e.to_string(),
                }));
            }
        };

        let source = entry.path();
        let rel_path = match source.strip_prefix(&walk_root) {
            Ok(rel_path) => rel_path,
            Err(_) => {
                return Some(Err(CopyError::EnumerationError {
                    path: source.clone(),
                    message: "Failed to strip prefix".to_string(),
                }));
            }
        };
        let target = if rel_path.as_os_str().is_empty() {
            target.clone()
        } else {
            target.join(rel_path)
        };

        let file_type = entry.file_type();
        if file_type.is_dir() {
            Some(Ok(CopyUnit::Directory { target }))
        } else if file_type.is_symlink() {
            Some(Ok(CopyUnit::Symlink { source, target }))
        } else if file_type.is_file() {
            Some(Ok(CopyUnit::File { source, target }))
        } else {
            log::debug!("Skipping special file {}", source.display());
            None
        }
    })))
}
