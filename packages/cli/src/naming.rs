//! Backup folder naming.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fmt::Write;

use chrono::NaiveDateTime;
use chrono::format::{Item, StrftimeItems};

/// Build a folder name like `Backup_2024-05-01_13-45-00`.
///
/// Returns `None` if `format` is not a valid `chrono` format string.
#[must_use]
pub fn backup_folder_name(prefix: &str, format: &str, now: &NaiveDateTime) -> Option<String> {
    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return None;
    }

    let mut name = format!("{prefix}_");
    write!(name, "{}", now.format_with_items(items.iter())).ok()?;
    Some(name)
}
