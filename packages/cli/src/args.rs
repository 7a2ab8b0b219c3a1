//! CLI argument definitions.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use clap::Parser;

/// CLI arguments for user-backup.
#[derive(Debug, Parser)]
#[command(
    name = "user-backup",
    about = "Back up user directories to a destination volume",
    version
)]
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// Directories to back up (defaults to the configured sources, or a prompt).
    #[arg(index = 1)]
    pub sources: Vec<PathBuf>,

    /// Volume or directory the backup folder is created in.
    #[arg(long, short = 'd')]
    pub dest: Option<PathBuf>,

    /// Name of the backup folder (defaults to `<prefix>_<timestamp>`).
    #[arg(long)]
    pub name: Option<String>,

    /// Configuration file to use instead of the default one.
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Directory whose subdirectories are offered as accounts.
    #[arg(long)]
    pub users_root: Option<PathBuf>,

    /// List the accounts that can be backed up and exit.
    #[arg(long)]
    pub list_users: bool,

    /// Run without prompts (requires sources and a destination).
    #[arg(long)]
    pub non_interactive: bool,

    /// Disable progress bars (useful for CI environments).
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Do not carry permissions and modification times over.
    #[arg(long = "no-metadata")]
    pub no_metadata: bool,

    /// Always use regular copies instead of copy-on-write clones.
    #[arg(long = "no-reflink")]
    pub no_reflink: bool,

    /// Enable verbose output.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Args {
    /// Determine if we should show progress bars.
    #[must_use]
    pub const fn should_show_progress(&self) -> bool {
        !self.no_progress
    }

    /// Whether metadata should be preserved, given the configured default.
    #[must_use]
    pub const fn preserve_metadata(&self, configured: bool) -> bool {
        configured && !self.no_metadata
    }

    /// Whether reflinks should be attempted, given the configured default.
    #[must_use]
    pub const fn reflink(&self, configured: bool) -> bool {
        configured && !self.no_reflink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sources_and_dest() {
        let args = Args::parse_from([
            "user-backup",
            "/home/alice",
            "/home/bob",
            "--dest",
            "/mnt/usb",
            "--no-progress",
        ]);

        assert_eq!(
            args.sources,
            vec![PathBuf::from("/home/alice"), PathBuf::from("/home/bob")]
        );
        assert_eq!(args.dest, Some(PathBuf::from("/mnt/usb")));
        assert!(!args.should_show_progress());
        assert!(!args.non_interactive);
    }

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from(["user-backup", "--no-metadata"]);

        assert!(!args.preserve_metadata(true));
        assert!(args.reflink(true));
        assert!(!args.reflink(false));
    }
}
