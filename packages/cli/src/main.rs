//! user-backup CLI entry point.
//!
//! Backs up selected user directories into a timestamped folder on a
//! destination volume.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod args;
mod interactive;
mod naming;
mod output;
mod progress;

use std::env;
use std::path::PathBuf;

use clap::Parser;

use args::Args;
use progress::BackupProgress;
use user_backup_config::{Config, default_users_root, list_accounts, load_config};
use user_backup_copy::{CancelToken, CopyJob, CopyOptions, CopyOutcome, JobEvent, spawn_job};

/// Exit code for a backup stopped by the user.
const EXIT_CANCELLED: i32 = 130;

fn main() {
    let args = Args::parse();

    // Set up logging
    if args.verbose {
        // SAFETY: We're setting this before any other threads are spawned
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    pretty_env_logger::init();

    match run(&args) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            output::print_error(&e.to_string());
            std::process::exit(1);
        }
    }
}

/// Main application logic. Returns the process exit code.
fn run(args: &Args) -> Result<i32, Box<dyn std::error::Error>> {
    let loaded = load_config(args.config.as_deref())?;
    if let Some(path) = &loaded.config_path {
        log::debug!("Using config {}", path.display());
    }
    let config = loaded.config;

    let interactive = !args.non_interactive && console::user_attended();

    if args.list_users {
        let users_root = resolve_users_root(args, &config)?;
        let accounts = list_accounts(&users_root, &config.excluded_users)?;
        output::print_account_list(&accounts);
        return Ok(0);
    }

    output::print_header("User Backup");

    // Select sources
    let sources = if !args.sources.is_empty() {
        args.sources.clone()
    } else if !config.sources.is_empty() {
        config.sources.clone()
    } else if interactive {
        let users_root = resolve_users_root(args, &config)?;
        let accounts = list_accounts(&users_root, &config.excluded_users)?;
        if accounts.is_empty() {
            output::print_warning(&format!(
                "No accounts found in {}",
                users_root.display()
            ));
            return Ok(0);
        }
        interactive::select_accounts(&accounts)?
    } else {
        return Err("No sources given. Pass directories or set `sources` in the config.".into());
    };

    if sources.is_empty() {
        println!("No accounts selected. Exiting.");
        return Ok(0);
    }

    // Select destination volume
    let volume = if let Some(dest) = &args.dest {
        dest.clone()
    } else if let Some(dest) = &config.destination {
        dest.clone()
    } else if interactive {
        interactive::prompt_destination()?
    } else {
        return Err("No destination given. Pass --dest or set `destination` in the config.".into());
    };

    let folder_name = match &args.name {
        Some(name) => name.clone(),
        None => naming::backup_folder_name(
            &config.folder_prefix,
            &config.timestamp_format,
            &chrono::Local::now().naive_local(),
        )
        .ok_or_else(|| format!("Invalid timestamp format: {}", config.timestamp_format))?,
    };
    let backup_dir = volume.join(folder_name);

    let job = CopyJob::new(sources, &backup_dir)?;
    output::print_plan(job.source_roots(), job.destination_root());

    if interactive && !interactive::confirm_start()? {
        println!("Backup not started.");
        return Ok(0);
    }

    let options = CopyOptions {
        preserve_metadata: args.preserve_metadata(config.preserve_metadata),
        reflink: args.reflink(config.reflink),
    };

    let handle = spawn_job(job, options)?;
    let progress = BackupProgress::new(args.should_show_progress());

    // First Ctrl-C stops after the current file, the second one quits
    let cancel = handle.cancel_token();
    let handler_progress = progress.clone();
    ctrlc::set_handler(move || match interrupt(&cancel) {
        Interrupt::FinishCurrentFile => handler_progress.cancelling(),
        Interrupt::Quit => {
            handler_progress.clear();
            output::print_warning("Backup interrupted. The file being copied may be incomplete.");
            std::process::exit(EXIT_CANCELLED);
        }
    })?;

    for event in handle.events() {
        match event {
            JobEvent::Progress(event) => progress.update(&event),
            JobEvent::Finished(_) => break,
        }
    }

    let report = handle.wait();
    progress.clear();

    let copied = report.progress.copied_files();
    match report.outcome {
        CopyOutcome::Completed => {
            output::print_success(copied, &backup_dir);
            Ok(0)
        }
        CopyOutcome::Cancelled => {
            output::print_cancelled(copied, &backup_dir);
            Ok(EXIT_CANCELLED)
        }
        CopyOutcome::Failed(message) => {
            output::print_error(&format!(
                "Backup failed after {copied} files: {message}"
            ));
            Ok(1)
        }
    }
}

/// Reaction to a Ctrl-C press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Interrupt {
    /// Let the worker finish the file it is copying, then stop.
    FinishCurrentFile,
    /// Cancellation was already requested; exit right away.
    Quit,
}

fn interrupt(cancel: &CancelToken) -> Interrupt {
    if cancel.cancel() {
        Interrupt::FinishCurrentFile
    } else {
        Interrupt::Quit
    }
}

/// Directory to enumerate accounts in: flag, then config, then the parent of
/// the current home directory.
fn resolve_users_root(args: &Args, config: &Config) -> Result<PathBuf, Box<dyn std::error::Error>> {
    args.users_root
        .clone()
        .or_else(|| config.users_root.clone())
        .or_else(default_users_root)
        .ok_or_else(|| "Could not determine where user accounts live; pass --users-root".into())
}
