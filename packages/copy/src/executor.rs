//! Sequential execution of a copy job.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use crate::cancel::CancelToken;
use crate::copy::{CopyOptions, copy_symlink, ensure_dir, overwrite_file};
use crate::error::CopyError;
use crate::job::{CopyJob, CopyOutcome, JobReport};
use crate::progress::{ProgressEvent, ProgressState};
use crate::walk::{CopyUnit, source_units};

/// Runs copy jobs one file at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct Executor {
    options: CopyOptions,
}

/// Why the unit loop stopped early.
enum Stop {
    Cancelled,
    Failed(CopyError),
}

impl Executor {
    /// Create an executor.
    #[must_use]
    pub const fn new(options: CopyOptions) -> Self {
        Self { options }
    }

    /// Copy every source root of `job` into its destination folder.
    ///
    /// `on_progress` is called after each copied file with a snapshot of the
    /// counts. When `total_files` is 0 it is called once with 100% and nothing
    /// is copied.
    ///
    /// The cancel token is checked before every unit, never in the middle of
    /// a file. The first I/O error ends the job with [`CopyOutcome::Failed`];
    /// files already copied stay where they are in both cases.
    ///
    /// # Arguments
    ///
    /// * `job` - The job to run
    /// * `total_files` - Progress denominator, usually from [`crate::count_job_files`]
    /// * `cancel` - Cancellation flag
    /// * `on_progress` - Callback for progress updates
    pub fn execute<F>(
        &self,
        job: &CopyJob,
        total_files: u64,
        cancel: &CancelToken,
        mut on_progress: F,
    ) -> JobReport
    where
        F: FnMut(ProgressEvent),
    {
        let mut state = ProgressState::new(total_files);

        if total_files == 0 {
            log::debug!("Nothing to copy");
            on_progress(state.snapshot(None));
            return JobReport {
                outcome: CopyOutcome::Completed,
                progress: state,
            };
        }

        let outcome = match self.copy_roots(job, &mut state, cancel, &mut on_progress) {
            Ok(()) => {
                state.finish();
                CopyOutcome::Completed
            }
            Err(Stop::Cancelled) => CopyOutcome::Cancelled,
            Err(Stop::Failed(e)) => {
                log::error!("{e}");
                CopyOutcome::Failed(e.to_string())
            }
        };

        log::debug!(
            "Job {outcome} after {}/{} files",
            state.copied_files(),
            state.total_files()
        );

        JobReport {
            outcome,
            progress: state,
        }
    }

    fn copy_roots<F>(
        &self,
        job: &CopyJob,
        state: &mut ProgressState,
        cancel: &CancelToken,
        on_progress: &mut F,
    ) -> Result<(), Stop>
    where
        F: FnMut(ProgressEvent),
    {
        for root in job.source_roots() {
            let Some(target) = job.target_for(root) else {
                return Err(Stop::Failed(CopyError::EnumerationError {
                    path: root.clone(),
                    message: "Source has no usable name".to_string(),
                }));
            };

            log::debug!("Backing up {} -> {}", root.display(), target.display());

            let units = source_units(root, &target).map_err(Stop::Failed)?;

            for unit in units {
                if cancel.is_cancelled() {
                    log::debug!("Stopping at cancellation request");
                    return Err(Stop::Cancelled);
                }

                match unit.map_err(Stop::Failed)? {
                    CopyUnit::Directory { target } => {
                        ensure_dir(&target).map_err(Stop::Failed)?;
                    }
                    CopyUnit::Symlink { source, target } => copy_symlink(&source, &target),
                    CopyUnit::File { source, target } => {
                        overwrite_file(&source, &target, self.options).map_err(Stop::Failed)?;
                        state.record_copied();
                        on_progress(state.snapshot(Some(source)));
                    }
                }
            }
        }

        Ok(())
    }
}
