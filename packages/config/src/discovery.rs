//! Locating the configuration file and the accounts directory.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use crate::error::ConfigError;

/// Directory name used under the platform configuration directory.
pub const APP_DIR_NAME: &str = "user-backup";

/// File name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Path of the default configuration file, e.g. `~/.config/user-backup/config.toml`.
///
/// The file may not exist.
///
/// # Errors
///
/// * If the platform has no configuration directory
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Directory that holds the home directories of local accounts.
///
/// This is the parent of the current user's home directory (`/home`,
/// `/Users`, `C:\Users`).
#[must_use]
pub fn default_users_root() -> Option<PathBuf> {
    dirs::home_dir().and_then(|home| home.parent().map(PathBuf::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_path_ends_with_app_file() {
        if let Ok(path) = default_config_path() {
            assert!(path.ends_with("user-backup/config.toml"));
        }
    }

    #[test]
    fn test_default_users_root_is_home_parent() {
        if let (Some(root), Some(home)) = (default_users_root(), dirs::home_dir()) {
            assert_eq!(home.parent(), Some(root.as_path()));
        }
    }
}
