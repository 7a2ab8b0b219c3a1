//! File counting for progress denominators.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::path::Path;

use crate::job::CopyJob;

/// Count regular files in a path.
///
/// - If path is a regular file: returns 1
/// - If path is a directory: returns count of all regular files recursively
/// - If path doesn't exist or can't be read: returns 0
///
/// Symlinks below the root are never followed, so a linked directory is not
/// counted twice. A root that is itself a link to a directory is resolved once.
/// Counting is advisory; unreadable entries are skipped rather than reported.
#[must_use]
pub fn count_files(path: &Path) -> u64 {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) => {
            log::debug!("Not counting {}: {e}", path.display());
            return 0;
        }
    };

    if metadata.is_file() {
        return 1;
    }

    if !metadata.is_dir() {
        return 0;
    }

    let root = match fs::canonicalize(path) {
        Ok(root) => root,
        Err(e) => {
            log::debug!("Not counting {}: {e}", path.display());
            return 0;
        }
    };

    jwalk::WalkDir::new(root)
        .skip_hidden(false)
        .follow_links(false)
        .sort(false)
        .parallelism(jwalk::Parallelism::Serial)
        .into_iter()
        .filter_map(|entry| {
            entry
                .map_err(|e| log::debug!("Skipping entry while counting: {e}"))
                .ok()
        })
        .filter(|e| e.file_type().is_file())
        .count() as u64
}

/// Count the files of every source root in a job.
///
/// This is the job's progress denominator.
#[must_use]
pub fn count_job_files(job: &CopyJob) -> u64 {
    let total = job
        .source_roots()
        .iter()
        .map(|root| {
            let count = count_files(root);
            log::debug!("{}: {count} files", root.display());
            count
        })
        .sum();

    log::debug!("Job total: {total} files");
    total
}
