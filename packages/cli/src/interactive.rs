//! Interactive prompts using dialoguer.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::io;
use std::path::PathBuf;

use dialoguer::{Confirm, Input, MultiSelect};
use user_backup_config::Account;

/// Select which accounts to back up.
///
/// # Errors
///
/// * If the user cancels the selection
pub fn select_accounts(accounts: &[Account]) -> io::Result<Vec<PathBuf>> {
    let items: Vec<String> = accounts
        .iter()
        .map(|a| format!("{} ({})", a.name, a.path.display()))
        .collect();

    let selections = MultiSelect::new()
        .with_prompt("Select the accounts to back up")
        .items(&items)
        .interact()?;

    Ok(selections
        .into_iter()
        .map(|i| accounts[i].path.clone())
        .collect())
}

/// Prompt for the destination volume.
///
/// # Errors
///
/// * If the user cancels the input
pub fn prompt_destination() -> io::Result<PathBuf> {
    let path: String = Input::new()
        .with_prompt("Enter the destination drive or directory")
        .interact_text()?;

    Ok(PathBuf::from(path))
}

/// Ask for confirmation before starting the backup.
///
/// # Errors
///
/// * If the user cancels the prompt
pub fn confirm_start() -> io::Result<bool> {
    Ok(Confirm::new()
        .with_prompt("Start the backup?")
        .default(true)
        .interact()?)
}
