//! Terminal output formatting.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;

use colored::Colorize;
use user_backup_config::Account;

/// Print a header message.
pub fn print_header(message: &str) {
    println!("\n{} {}\n", "💾", message.bold());
}

/// Print the list of accounts that can be backed up.
pub fn print_account_list(accounts: &[Account]) {
    println!(
        "Found {} account{}:",
        accounts.len(),
        if accounts.len() == 1 { "" } else { "s" }
    );
    for account in accounts {
        println!(
            "  {} {} - {}",
            "•".dimmed(),
            account.name.yellow(),
            account.path.display()
        );
    }
    println!();
}

/// Print the plan of a backup about to start.
pub fn print_plan(sources: &[impl AsRef<Path>], destination: &Path) {
    println!("Destination: {}", destination.display().to_string().cyan());
    for source in sources {
        println!("  {} {}", "•".dimmed(), source.as_ref().display());
    }
    println!();
}

/// Print success message.
pub fn print_success(files: u64, destination: &Path) {
    println!(
        "{} Backup complete: {} files copied to {}",
        "✅",
        files,
        destination.display()
    );
}

/// Print the result of a cancelled backup.
pub fn print_cancelled(files: u64, destination: &Path) {
    println!(
        "{} Backup cancelled after {} files. Partial copy left in {}",
        "Cancelled:".yellow().bold(),
        files,
        destination.display()
    );
}

/// Print error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", "Warning:".yellow().bold(), message);
}
