//! Enumeration of local accounts that can be backed up.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// A local account and its home directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Account (directory) name.
    pub name: String,
    /// Home directory.
    pub path: PathBuf,
}

/// List the account directories under `users_root`, sorted by name.
///
/// Plain files and names in `excluded` are skipped. Names are compared
/// case-insensitively, since `Public` and `public` are the same account on
/// some platforms.
///
/// # Errors
///
/// * If `users_root` cannot be read
pub fn list_accounts(users_root: &Path, excluded: &[String]) -> Result<Vec<Account>, ConfigError> {
    log::debug!("Listing accounts in {}", users_root.display());

    let entries = fs::read_dir(users_root).map_err(|e| ConfigError::AccountsError {
        path: users_root.to_path_buf(),
        source: e,
    })?;

    let mut accounts: Vec<Account> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().to_string();
            if excluded.iter().any(|x| x.eq_ignore_ascii_case(&name)) {
                log::debug!("Skipping excluded account {name}");
                return None;
            }
            Some(Account {
                name,
                path: entry.path(),
            })
        })
        .collect();

    accounts.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(accounts)
}
