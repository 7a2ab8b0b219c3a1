//! Configuration types for user-backup.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default name of the per-run backup folder prefix.
pub const DEFAULT_FOLDER_PREFIX: &str = "Backup";

/// Default `chrono` format for the backup folder timestamp.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Backup configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Directories to back up when none are given on the command line.
    pub sources: Vec<PathBuf>,

    /// Volume the backup folder is created on.
    pub destination: Option<PathBuf>,

    /// Prefix of the backup folder name (`<prefix>_<timestamp>`).
    pub folder_prefix: String,

    /// `chrono` format string for the folder timestamp.
    pub timestamp_format: String,

    /// Directory whose subdirectories are offered as accounts to back up.
    pub users_root: Option<PathBuf>,

    /// Account names never offered for backup.
    pub excluded_users: Vec<String>,

    /// Carry permission bits and modification times over.
    pub preserve_metadata: bool,

    /// Try copy-on-write clones before regular copies.
    pub reflink: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            destination: None,
            folder_prefix: DEFAULT_FOLDER_PREFIX.to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            users_root: None,
            excluded_users: vec!["Public".to_string(), "Default".to_string()],
            preserve_metadata: true,
            reflink: true,
        }
    }
}

/// A loaded configuration with metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The parsed configuration.
    pub config: Config,
    /// Path the configuration was read from, if a file was found.
    pub config_path: Option<PathBuf>,
}
