// src/store.rs

//! Local installation store
//!
//! The store is a flat directory with one record file per installed
//! package: the file name is the package name, the first line of its
//! contents is the installed version. Absence of a file means "not
//! installed", not an error.
//!
//! Individual malformed records are skipped so one bad file cannot hide
//! the rest of the installation; a missing or unreadable store directory
//! is fatal, since every category view depends on install status.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Read every installation record under `dir`
///
/// Returns a name → version map. Records that cannot be read, are not
/// plain files, or carry an empty version line are skipped with a
/// warning and treated as not installed.
pub fn read_installed(dir: &Path) -> Result<BTreeMap<String, String>> {
    let entries = fs::read_dir(dir).map_err(|_| Error::StoreUnavailable(dir.to_path_buf()))?;

    let mut installed = BTreeMap::new();

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable store entry: {}", e);
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() {
            warn!("Skipping non-file store entry: {}", path.display());
            continue;
        }

        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => {
                warn!("Skipping store entry with non-UTF-8 name: {}", path.display());
                continue;
            }
        };

        let version = match fs::read_to_string(&path) {
            Ok(contents) => contents.lines().next().unwrap_or("").trim().to_string(),
            Err(e) => {
                warn!("Skipping unreadable record for '{}': {}", name, e);
                continue;
            }
        };

        if version.is_empty() {
            warn!("Skipping record for '{}': empty version", name);
            continue;
        }

        installed.insert(name, version);
    }

    debug!("Read {} installation records from {}", installed.len(), dir.display());
    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_installed_records() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("alpha"), "1.0\n").unwrap();
        fs::write(dir.path().join("zlib"), "1.3.1").unwrap();

        let installed = read_installed(dir.path()).unwrap();
        assert_eq!(installed.len(), 2);
        assert_eq!(installed.get("alpha"), Some(&"1.0".to_string()));
        assert_eq!(installed.get("zlib"), Some(&"1.3.1".to_string()));
    }

    #[test]
    fn test_only_first_line_is_the_version() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("alpha"), "2.1\ninstalled by hand\n").unwrap();

        let installed = read_installed(dir.path()).unwrap();
        assert_eq!(installed.get("alpha"), Some(&"2.1".to_string()));
    }

    #[test]
    fn test_malformed_record_is_skipped() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("alpha"), "1.0\n").unwrap();
        fs::write(dir.path().join("broken"), "\n\n").unwrap();
        fs::create_dir(dir.path().join("subdir")).unwrap();

        let installed = read_installed(dir.path()).unwrap();
        assert_eq!(installed.len(), 1);
        assert!(installed.contains_key("alpha"));
        assert!(!installed.contains_key("broken"));
        assert!(!installed.contains_key("subdir"));
    }

    #[test]
    fn test_empty_store_is_not_an_error() {
        let dir = tempdir().unwrap();
        let installed = read_installed(dir.path()).unwrap();
        assert!(installed.is_empty());
    }

    #[test]
    fn test_missing_store_is_fatal() {
        let result = read_installed(Path::new("/nonexistent/stocktake/installed"));
        assert!(matches!(result, Err(Error::StoreUnavailable(_))));
    }
}
