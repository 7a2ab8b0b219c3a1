//! TOML configuration file loader.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::types::Config;

/// Load a TOML configuration file.
///
/// Keys missing from the file keep their default values.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// * If the file cannot be read
/// * If the file cannot be parsed as TOML
pub fn load_toml_config(path: &Path) -> Result<Config, ConfigError> {
    log::debug!("Loading TOML config from {}", path.display());

    let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    log::debug!("Loaded config with {} sources", config.sources.len());

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_toml_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
sources = ["/home/alice", "/home/bob"]
destination = "/mnt/usb"
folderPrefix = "Snapshot"
timestampFormat = "%Y%m%d"
usersRoot = "/home"
excludedUsers = ["guest"]
preserveMetadata = false
reflink = false
"#
        )
        .unwrap();

        let config = load_toml_config(file.path()).unwrap();

        assert_eq!(
            config.sources,
            vec![PathBuf::from("/home/alice"), PathBuf::from("/home/bob")]
        );
        assert_eq!(config.destination, Some(PathBuf::from("/mnt/usb")));
        assert_eq!(config.folder_prefix, "Snapshot");
        assert_eq!(config.timestamp_format, "%Y%m%d");
        assert_eq!(config.users_root, Some(PathBuf::from("/home")));
        assert_eq!(config.excluded_users, vec!["guest"]);
        assert!(!config.preserve_metadata);
        assert!(!config.reflink);
    }

    #[test]
    fn test_load_minimal_toml_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"destination = "/media/backup""#).unwrap();

        let config = load_toml_config(file.path()).unwrap();

        assert_eq!(config.destination, Some(PathBuf::from("/media/backup")));
        assert!(config.sources.is_empty());
        assert_eq!(config.folder_prefix, "Backup");
        assert_eq!(config.excluded_users, vec!["Public", "Default"]);
        assert!(config.preserve_metadata);
        assert!(config.reflink);
    }

    #[test]
    fn test_load_invalid_toml_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "sources = 42").unwrap();

        let result = load_toml_config(file.path());

        assert!(matches!(result, Err(ConfigError::TomlParseError { .. })));
    }
}
