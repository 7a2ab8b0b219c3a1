//! Single-unit copy primitives.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::path::Path;

use crate::error::CopyError;

/// How individual files are copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyOptions {
    /// Carry permission bits and modification time over (best-effort).
    pub preserve_metadata: bool,
    /// Try a copy-on-write clone before a regular copy.
    pub reflink: bool,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            preserve_metadata: true,
            reflink: true,
        }
    }
}

/// Create a target directory and any missing parents.
///
/// # Errors
///
/// * If the directory cannot be created
pub fn ensure_dir(target: &Path) -> Result<(), CopyError> {
    fs::create_dir_all(target).map_err(|e| CopyError::CreateDirError {
        path: target.to_path_buf(),
        io_error: e,
    })
}

/// Copy one file, replacing whatever file is at the target.
///
/// Missing parent directories are created.
///
/// # Arguments
///
/// * `source` - Source file path
/// * `target` - Target file path
/// * `options` - Copy behaviour
///
/// # Errors
///
/// * If the parent directory cannot be created
/// * If the copy operation fails
pub fn overwrite_file(source: &Path, target: &Path, options: CopyOptions) -> Result<(), CopyError> {
    log::trace!("Copying file: {} -> {}", source.display(), target.display());

    if let Some(parent) = target.parent() {
        ensure_dir(parent)?;
    }

    remove_stale_target(source, target)?;

    if options.reflink {
        copy_file_with_reflink(source, target)?;
    } else {
        copy_file_plain(source, target)?;
    }

    if options.preserve_metadata {
        preserve_metadata(source, target);
    }

    Ok(())
}

/// Remove a target that a copy must not write into.
///
/// A symlink would be followed, writing outside the backup tree, and a
/// read-only file (from an earlier run that preserved permissions) cannot be
/// opened for writing.
fn remove_stale_target(source: &Path, target: &Path) -> Result<(), CopyError> {
    let Ok(metadata) = fs::symlink_metadata(target) else {
        return Ok(());
    };

    let is_symlink = metadata.file_type().is_symlink();
    let is_read_only_file = metadata.is_file() && metadata.permissions().readonly();
    if !is_symlink && !is_read_only_file {
        return Ok(());
    }

    log::debug!("Removing existing {} before copying", target.display());
    fs::remove_file(target).map_err(|e| CopyError::FileCopyError {
        source_path: source.to_path_buf(),
        target_path: target.to_path_buf(),
        io_error: e,
    })
}

/// Copy a single file, trying reflink first then falling back to regular copy.
fn copy_file_with_reflink(source: &Path, target: &Path) -> Result<(), CopyError> {
    // A clone refuses to replace an existing file; the regular copy below does.
    if fs::symlink_metadata(target).is_err() {
        match reflink_copy::reflink(source, target) {
            Ok(()) => {
                log::trace!("Reflinked {} -> {}", source.display(), target.display());
                return Ok(());
            }
            Err(e) => {
                log::trace!("Reflink unavailable for {}: {e}", source.display());
            }
        }
    }

    copy_file_plain(source, target)
}

fn copy_file_plain(source: &Path, target: &Path) -> Result<(), CopyError> {
    fs::copy(source, target).map_err(|e| CopyError::FileCopyError {
        source_path: source.to_path_buf(),
        target_path: target.to_path_buf(),
        io_error: e,
    })?;
    log::trace!("Copied {} -> {}", source.display(), target.display());
    Ok(())
}

/// Apply the source's permission bits and modification time to the target.
///
/// Failures are logged and otherwise ignored.
fn preserve_metadata(source: &Path, target: &Path) {
    let metadata = match fs::metadata(source) {
        Ok(metadata) => metadata,
        Err(e) => {
            log::warn!("Could not read metadata of {}: {e}", source.display());
            return;
        }
    };

    if let Err(e) = fs::set_permissions(target, metadata.permissions()) {
        log::warn!("Could not set permissions on {}: {e}", target.display());
    }

    let mtime = filetime::FileTime::from_last_modification_time(&metadata);
    if let Err(e) = filetime::set_file_mtime(target, mtime) {
        log::warn!(
            "Could not set modification time on {}: {e}",
            target.display()
        );
    }
}

/// Recreate a symlink at the target, replacing an existing link or file.
///
/// An existing directory at the target is left alone. Links are not part of
/// the file count, so failures are logged rather than returned.
pub fn copy_symlink(source: &Path, target: &Path) {
    let link_target = match fs::read_link(source) {
        Ok(link_target) => link_target,
        Err(e) => {
            log::warn!("Failed to read symlink {}: {e}", source.display());
            return;
        }
    };

    if let Some(parent) = target.parent() {
        if let Err(e) = ensure_dir(parent) {
            log::warn!("{e}");
            return;
        }
    }

    // Try creating the link; if something is already there, remove it and try again
    let mut result = create_symlink(source, &link_target, target);
    if let Err(e) = &result {
        if e.kind() == std::io::ErrorKind::AlreadyExists {
            let is_dir = fs::symlink_metadata(target).is_ok_and(|m| m.is_dir());
            if is_dir {
                log::warn!(
                    "Not replacing directory {} with a symlink",
                    target.display()
                );
                return;
            }
            log::debug!("Replacing existing {}", target.display());
            result = fs::remove_file(target)
                .and_then(|()| create_symlink(source, &link_target, target));
        }
    }

    match result {
        Ok(()) => log::trace!(
            "Symlinked {} -> {} (target: {})",
            source.display(),
            target.display(),
            link_target.display()
        ),
        Err(e) => log::warn!("Failed to create symlink {}: {e}", target.display()),
    }
}

#[cfg(unix)]
fn create_symlink(_source: &Path, link_target: &Path, target: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(link_target, target)
}

#[cfg(windows)]
fn create_symlink(source: &Path, link_target: &Path, target: &Path) -> std::io::Result<()> {
    if source.is_dir() {
        std::os::windows::fs::symlink_dir(link_target, target)
    } else {
        std::os::windows::fs::symlink_file(link_target, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_overwrite_file_creates_parents() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source.txt");
        let target = dir.path().join("a/b/target.txt");
        fs::write(&source, "hello world").unwrap();

        overwrite_file(&source, &target, CopyOptions::default()).unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "hello world");
    }

    #[test]
    fn test_overwrite_file_replaces_existing() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source.txt");
        let target = dir.path().join("target.txt");
        fs::write(&source, "new content").unwrap();
        fs::write(&target, "old content that is longer").unwrap();

        overwrite_file(&source, &target, CopyOptions::default()).unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "new content");
    }

    #[test]
    fn test_overwrite_file_without_reflink() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source.txt");
        let target = dir.path().join("target.txt");
        fs::write(&source, "plain").unwrap();

        let options = CopyOptions {
            preserve_metadata: false,
            reflink: false,
        };
        overwrite_file(&source, &target, options).unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "plain");
    }

    #[test]
    fn test_overwrite_file_onto_directory_fails() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source.txt");
        let target = dir.path().join("target.txt");
        fs::write(&source, "x").unwrap();
        fs::create_dir(&target).unwrap();

        let result = overwrite_file(&source, &target, CopyOptions::default());

        assert!(matches!(result, Err(CopyError::FileCopyError { .. })));
    }

    #[test]
    fn test_overwrite_file_preserves_mtime() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source.txt");
        let target = dir.path().join("target.txt");
        fs::write(&source, "x").unwrap();
        let old = filetime::FileTime::from_unix_time(1_000_000_000, 0);
        filetime::set_file_mtime(&source, old).unwrap();

        overwrite_file(&source, &target, CopyOptions::default()).unwrap();

        let copied = filetime::FileTime::from_last_modification_time(&fs::metadata(&target).unwrap());
        assert_eq!(copied.unix_seconds(), 1_000_000_000);
    }

    #[cfg(unix)]
    #[test]
    fn test_overwrite_file_preserves_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let source = dir.path().join("script.sh");
        let target = dir.path().join("copy.sh");
        fs::write(&source, "#!/bin/sh").unwrap();
        fs::set_permissions(&source, fs::Permissions::from_mode(0o750)).unwrap();

        overwrite_file(&source, &target, CopyOptions::default()).unwrap();

        let mode = fs::metadata(&target).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o750);
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_symlink() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("link");
        let target = dir.path().join("out/link");
        std::os::unix::fs::symlink("somewhere", &source).unwrap();

        copy_symlink(&source, &target);
        // Replacing an existing link works too.
        copy_symlink(&source, &target);

        assert_eq!(
            fs::read_link(&target).unwrap(),
            std::path::PathBuf::from("somewhere")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_symlink_replaces_regular_file() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("link");
        let target = dir.path().join("out/link");
        std::os::unix::fs::symlink("somewhere", &source).unwrap();
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        fs::write(&target, "stale file").unwrap();

        copy_symlink(&source, &target);

        assert!(target.is_symlink());
        assert_eq!(
            fs::read_link(&target).unwrap(),
            std::path::PathBuf::from("somewhere")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_overwrite_file_replaces_read_only_copy() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let source = dir.path().join("object");
        let target = dir.path().join("backup/object");
        fs::write(&source, "first").unwrap();
        fs::set_permissions(&source, fs::Permissions::from_mode(0o444)).unwrap();

        overwrite_file(&source, &target, CopyOptions::default()).unwrap();
        assert!(fs::metadata(&target).unwrap().permissions().readonly());

        fs::set_permissions(&source, fs::Permissions::from_mode(0o644)).unwrap();
        fs::write(&source, "second").unwrap();
        fs::set_permissions(&source, fs::Permissions::from_mode(0o444)).unwrap();

        overwrite_file(&source, &target, CopyOptions::default()).unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "second");
        let mode = fs::metadata(&target).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o444);
    }

    #[cfg(unix)]
    #[test]
    fn test_overwrite_file_does_not_follow_symlink_in_destination() {
        let dir = TempDir::new().unwrap();
        let outside = dir.path().join("outside.txt");
        fs::write(&outside, "precious").unwrap();
        let source = dir.path().join("alice/f.txt");
        fs::create_dir_all(source.parent().unwrap()).unwrap();
        fs::write(&source, "from source").unwrap();
        let target = dir.path().join("dest/alice/f.txt");
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        std::os::unix::fs::symlink("../../outside.txt", &target).unwrap();

        overwrite_file(&source, &target, CopyOptions::default()).unwrap();

        assert_eq!(fs::read_to_string(&outside).unwrap(), "precious");
        assert!(!target.is_symlink());
        assert_eq!(fs::read_to_string(&target).unwrap(), "from source");
    }
}
