//! Running a job on its own thread.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::cancel::CancelToken;
use crate::copy::CopyOptions;
use crate::count::count_job_files;
use crate::error::SetupError;
use crate::executor::Executor;
use crate::job::{CopyJob, CopyOutcome, JobEvent, JobReport};
use crate::progress::ProgressState;

/// Handle to a job running on a worker thread.
///
/// Events arrive on [`JobHandle::events`]; the last one is always
/// [`JobEvent::Finished`].
#[derive(Debug)]
pub struct JobHandle {
    events: Receiver<JobEvent>,
    cancel: CancelToken,
    worker: Option<JoinHandle<JobReport>>,
}

/// Start a job on a dedicated worker thread.
///
/// The destination root is created before the worker starts. The worker
/// counts the files of every source root, then copies them one at a time.
///
/// # Errors
///
/// * If the destination root cannot be created
/// * If the worker thread cannot be spawned
pub fn spawn_job(job: CopyJob, options: CopyOptions) -> Result<JobHandle, SetupError> {
    fs::create_dir_all(job.destination_root()).map_err(|e| SetupError::CreateDestination {
        path: job.destination_root().to_path_buf(),
        io_error: e,
    })?;

    let (tx, rx) = unbounded();
    let cancel = CancelToken::new();
    let worker_cancel = cancel.clone();

    let worker = thread::Builder::new()
        .name("backup-copy".to_string())
        .spawn(move || run_job(&job, options, &worker_cancel, &tx))
        .map_err(SetupError::SpawnWorker)?;

    Ok(JobHandle {
        events: rx,
        cancel,
        worker: Some(worker),
    })
}

fn run_job(
    job: &CopyJob,
    options: CopyOptions,
    cancel: &CancelToken,
    tx: &Sender<JobEvent>,
) -> JobReport {
    log::debug!(
        "Starting backup of {} sources into {}",
        job.source_roots().len(),
        job.destination_root().display()
    );

    let total_files = count_job_files(job);

    let report = Executor::new(options).execute(job, total_files, cancel, |event| {
        // Nobody listening is not a reason to stop copying.
        let _ = tx.send(JobEvent::Progress(event));
    });

    let _ = tx.send(JobEvent::Finished(report.clone()));
    report
}

impl JobHandle {
    /// Receiver for the job's events. Safe to use from any thread.
    #[must_use]
    pub const fn events(&self) -> &Receiver<JobEvent> {
        &self.events
    }

    /// A token that cancels this job, for handing to other threads.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Request cancellation.
    ///
    /// The worker finishes the file it is copying, then stops. Calling this
    /// again, or after the job finished, does nothing.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Block until the job finishes, discarding events not yet received.
    #[must_use]
    pub fn wait(mut self) -> JobReport {
        let finished = self.events.iter().find_map(|event| match event {
            JobEvent::Finished(report) => Some(report),
            JobEvent::Progress(_) => None,
        });
        let joined = self.join();

        // No `Finished` event and no report from the thread: the worker died.
        finished.or(joined).unwrap_or_else(|| JobReport {
            outcome: CopyOutcome::Failed("copy worker panicked".to_string()),
            progress: ProgressState::default(),
        })
    }

    fn join(&mut self) -> Option<JobReport> {
        let worker = self.worker.take()?;
        match worker.join() {
            Ok(report) => Some(report),
            Err(_) => {
                log::error!("Copy worker panicked");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_files(root: &Path, count: usize) {
        fs::create_dir_all(root).unwrap();
        for i in 0..count {
            fs::write(root.join(format!("file{i:03}.txt")), "x".repeat(64)).unwrap();
        }
    }

    fn count_copied(root: &Path) -> usize {
        jwalk::WalkDir::new(root)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .count()
    }

    #[test]
    fn test_spawn_job_streams_events_then_finishes() {
        let dir = TempDir::new().unwrap();
        let alice = dir.path().join("alice");
        write_files(&alice, 4);
        let dest = dir.path().join("dest");

        let job = CopyJob::new(vec![alice], &dest).unwrap();
        let handle = spawn_job(job, CopyOptions::default()).unwrap();

        let events: Vec<JobEvent> = handle.events().iter().collect();
        let report = handle.wait();

        let percents: Vec<u8> = events
            .iter()
            .filter_map(|e| match e {
                JobEvent::Progress(p) => Some(p.percent),
                JobEvent::Finished(_) => None,
            })
            .collect();
        assert_eq!(percents, vec![25, 50, 75, 100]);
        assert!(matches!(events.last(), Some(JobEvent::Finished(r)) if r.outcome.is_completed()));
        assert_eq!(report.outcome, CopyOutcome::Completed);
        assert_eq!(count_copied(&dest), 4);
    }

    #[test]
    fn test_events_consumed_on_another_thread() {
        let dir = TempDir::new().unwrap();
        let alice = dir.path().join("alice");
        write_files(&alice, 3);

        let job = CopyJob::new(vec![alice], dir.path().join("dest")).unwrap();
        let handle = spawn_job(job, CopyOptions::default()).unwrap();
        let events = handle.events().clone();

        let observer = thread::spawn(move || events.iter().collect::<Vec<_>>());

        // The worker drops its sender when done, which ends the observer's loop.
        let observed = observer.join().unwrap();
        let report = handle.wait();

        let percents: Vec<u8> = observed
            .iter()
            .filter_map(|e| match e {
                JobEvent::Progress(p) => Some(p.percent),
                JobEvent::Finished(_) => None,
            })
            .collect();
        assert_eq!(percents, vec![33, 66, 100]);
        assert_eq!(observed.len(), 4);
        assert!(matches!(observed.last(), Some(JobEvent::Finished(r)) if r.outcome.is_completed()));
        assert_eq!(report.outcome, CopyOutcome::Completed);
        assert_eq!(report.progress.copied_files(), 3);
    }

    #[test]
    fn test_cancel_leaves_reported_prefix() {
        let dir = TempDir::new().unwrap();
        let alice = dir.path().join("alice");
        write_files(&alice, 200);
        let dest = dir.path().join("dest");

        let job = CopyJob::new(vec![alice], &dest).unwrap();
        let handle = spawn_job(job, CopyOptions::default()).unwrap();

        let mut progress_events = 0_u64;
        let mut finished = None;
        for event in handle.events() {
            match event {
                JobEvent::Progress(p) => {
                    assert!(finished.is_none(), "progress after finish");
                    progress_events += 1;
                    assert_eq!(p.files_copied, progress_events);
                    handle.cancel();
                }
                JobEvent::Finished(report) => finished = Some(report),
            }
        }
        handle.cancel();
        let report = handle.wait();

        assert_eq!(finished.as_ref(), Some(&report));
        assert_eq!(report.progress.copied_files(), progress_events);
        assert_eq!(count_copied(&dest) as u64, progress_events);
        if report.outcome == CopyOutcome::Cancelled {
            assert!(progress_events < 200);
        }
    }

    #[test]
    fn test_wait_without_reading_events() {
        let dir = TempDir::new().unwrap();
        let alice = dir.path().join("alice");
        write_files(&alice, 2);

        let job = CopyJob::new(vec![alice], dir.path().join("dest")).unwrap();
        let report = spawn_job(job, CopyOptions::default()).unwrap().wait();

        assert_eq!(report.outcome, CopyOutcome::Completed);
        assert_eq!(report.progress.copied_files(), 2);
    }

    #[test]
    fn test_destination_that_cannot_be_created() {
        let dir = TempDir::new().unwrap();
        let alice = dir.path().join("alice");
        write_files(&alice, 1);
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let job = CopyJob::new(vec![alice], blocker.join("dest")).unwrap();
        let result = spawn_job(job, CopyOptions::default());

        assert!(matches!(
            result,
            Err(SetupError::CreateDestination { .. })
        ));
    }
}
