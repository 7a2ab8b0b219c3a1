//! Backup copy engine with progress events and cooperative cancellation.
//!
//! This crate copies a set of source directories into per-source folders
//! under a destination root:
//!
//! * File counting using `jwalk`, used as the progress denominator
//! * Deterministic, sorted tree walk yielding one copy unit at a time
//! * Strictly sequential copying, so progress accounting stays exact
//! * Copy-on-write support via `reflink-copy` (APFS, Btrfs, `ReFS`)
//! * Best-effort preservation of permission bits and modification times
//! * Cancellation checked between files, never in the middle of one
//!
//! # Example
//!
//! ```rust,ignore
//! use user_backup_copy::{CopyJob, CopyOptions, JobEvent, spawn_job};
//!
//! let job = CopyJob::new(vec!["/home/alice".into(), "/home/bob".into()], "/mnt/usb/Backup_X")?;
//! let handle = spawn_job(job, CopyOptions::default())?;
//!
//! for event in handle.events() {
//!     match event {
//!         JobEvent::Progress(p) => println!("{}%", p.percent),
//!         JobEvent::Finished(report) => println!("{}", report.outcome),
//!     }
//! }
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod cancel;
mod copy;
mod count;
mod error;
mod executor;
mod job;
mod progress;
mod walk;
mod worker;

pub use cancel::CancelToken;
pub use copy::{CopyOptions, copy_symlink, ensure_dir, overwrite_file};
pub use count::{count_files, count_job_files};
pub use error::{CopyError, SetupError};
pub use executor::Executor;
pub use job::{CopyJob, CopyOutcome, JobEvent, JobReport};
pub use progress::{ProgressEvent, ProgressState};
pub use walk::{CopyUnit, Units, source_units};
pub use worker::{JobHandle, spawn_job};
