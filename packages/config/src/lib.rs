//! Configuration loading for user-backup.
//!
//! This crate provides the configuration types and loading used by the
//! user-backup CLI, plus enumeration of the local accounts a backup can be
//! taken from.
//!
//! # Example
//!
//! ```rust,ignore
//! use user_backup_config::{list_accounts, load_config};
//!
//! let loaded = load_config(None)?;
//! if let Some(root) = &loaded.config.users_root {
//!     for account in list_accounts(root, &loaded.config.excluded_users)? {
//!         println!("{}", account.name);
//!     }
//! }
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod accounts;
mod discovery;
mod error;
mod toml_loader;
mod types;

pub use accounts::{Account, list_accounts};
pub use discovery::{APP_DIR_NAME, CONFIG_FILE_NAME, default_config_path, default_users_root};
pub use error::ConfigError;
pub use toml_loader::load_toml_config;
pub use types::{Config, DEFAULT_FOLDER_PREFIX, DEFAULT_TIMESTAMP_FORMAT, LoadedConfig};

use std::path::Path;

/// Load the configuration.
///
/// An explicit path must exist. Without one, the default location is tried
/// and built-in defaults are used when no file is there.
///
/// # Arguments
///
/// * `path` - Explicit configuration file, if one was given
///
/// # Errors
///
/// * If an explicit file cannot be read
/// * If a file cannot be parsed
pub fn load_config(path: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Ok(path) if path.is_file() => path,
            Ok(path) => {
                log::debug!("No config at {}, using defaults", path.display());
                return Ok(LoadedConfig {
                    config: Config::default(),
                    config_path: None,
                });
            }
            Err(e) => {
                log::debug!("{e}, using defaults");
                return Ok(LoadedConfig {
                    config: Config::default(),
                    config_path: None,
                });
            }
        },
    };

    let config = load_toml_config(&path)?;

    Ok(LoadedConfig {
        config,
        config_path: Some(path),
    })
}
