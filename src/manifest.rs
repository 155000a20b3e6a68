// src/manifest.rs

//! Static package manifest
//!
//! The manifest is the authoritative name → category table for every
//! package the distribution knows about. It is loaded once per
//! invocation and treated as immutable for the operation's duration;
//! nothing in this crate writes it back.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Manifests older than this many days trigger a staleness warning
const STALE_AFTER_DAYS: i64 = 30;

/// Distribution tier a package is published under
///
/// Every manifest entry carries exactly one category. "Installed" is a
/// derived view over the installation store, never a stored category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Shipped with every installation
    Standard,

    /// Supported but opt-in
    Optional,

    /// No stability guarantees
    Experimental,

    /// Sourced from the pip ecosystem rather than our own builds
    Pip,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Standard => "standard",
            Category::Optional => "optional",
            Category::Experimental => "experimental",
            Category::Pip => "pip",
        };
        write!(f, "{}", name)
    }
}

/// Category argument accepted by a resolution request
///
/// Extends [`Category`] with the derived `installed` view, which is
/// sourced from the installation store's keys instead of the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryFilter {
    Standard,
    Optional,
    Experimental,
    Pip,
    Installed,
}

impl CategoryFilter {
    /// The stored category this filter selects, if any
    pub fn as_category(&self) -> Option<Category> {
        match self {
            CategoryFilter::Standard => Some(Category::Standard),
            CategoryFilter::Optional => Some(Category::Optional),
            CategoryFilter::Experimental => Some(Category::Experimental),
            CategoryFilter::Pip => Some(Category::Pip),
            CategoryFilter::Installed => None,
        }
    }
}

/// Package manifest: category table plus provenance metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// When the manifest was generated upstream, if recorded
    #[serde(default)]
    pub generated: Option<DateTime<Utc>>,

    /// Name → category table; BTreeMap keeps candidate sets ordered
    pub packages: BTreeMap<String, Category>,
}

impl Manifest {
    /// Load the manifest from a JSON file
    ///
    /// Any failure (missing file, unreadable, malformed JSON) is fatal:
    /// without the category table there is no candidate set to resolve.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| Error::ManifestUnavailable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let manifest: Manifest =
            serde_json::from_str(&raw).map_err(|e| Error::ManifestUnavailable {
                path: path.to_path_buf(),
                reason: format!("invalid JSON: {}", e),
            })?;

        debug!("Loaded manifest with {} packages", manifest.packages.len());

        if let Some(generated) = manifest.generated {
            let age = Utc::now().signed_duration_since(generated);
            if age.num_days() > STALE_AFTER_DAYS {
                warn!(
                    "Manifest was generated {} days ago; consider refreshing it",
                    age.num_days()
                );
            }
        }

        Ok(manifest)
    }

    /// All package names in the given stored category, in name order
    pub fn names_in(&self, category: Category) -> Vec<String> {
        self.packages
            .iter()
            .filter(|(_, cat)| **cat == category)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Stored category for one name, if the manifest knows it
    pub fn category_of(&self, name: &str) -> Option<Category> {
        self.packages.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_manifest(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_manifest() {
        let file = write_manifest(
            r#"{
                "generated": "2026-08-01T00:00:00Z",
                "packages": {
                    "alpha": "standard",
                    "beta": "optional",
                    "gamma": "experimental",
                    "delta": "pip"
                }
            }"#,
        );

        let manifest = Manifest::load(file.path()).unwrap();
        assert_eq!(manifest.packages.len(), 4);
        assert_eq!(manifest.category_of("alpha"), Some(Category::Standard));
        assert_eq!(manifest.category_of("delta"), Some(Category::Pip));
        assert_eq!(manifest.category_of("missing"), None);
    }

    #[test]
    fn test_load_without_generated_timestamp() {
        let file = write_manifest(r#"{"packages": {"alpha": "standard"}}"#);

        let manifest = Manifest::load(file.path()).unwrap();
        assert!(manifest.generated.is_none());
        assert_eq!(manifest.packages.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Manifest::load(Path::new("/nonexistent/manifest.json"));
        assert!(matches!(result, Err(Error::ManifestUnavailable { .. })));
    }

    #[test]
    fn test_load_malformed_json() {
        let file = write_manifest("{ not json");
        let result = Manifest::load(file.path());
        assert!(matches!(result, Err(Error::ManifestUnavailable { .. })));
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let file = write_manifest(r#"{"packages": {"alpha": "bleeding-edge"}}"#);
        let result = Manifest::load(file.path());
        assert!(matches!(result, Err(Error::ManifestUnavailable { .. })));
    }

    #[test]
    fn test_names_in_filters_and_sorts() {
        let file = write_manifest(
            r#"{
                "packages": {
                    "zlib": "standard",
                    "arpack": "standard",
                    "beta": "optional"
                }
            }"#,
        );

        let manifest = Manifest::load(file.path()).unwrap();
        let names = manifest.names_in(Category::Standard);
        assert_eq!(names, vec!["arpack".to_string(), "zlib".to_string()]);
        assert_eq!(manifest.names_in(Category::Pip), Vec::<String>::new());
    }

    #[test]
    fn test_filter_maps_to_category() {
        assert_eq!(
            CategoryFilter::Standard.as_category(),
            Some(Category::Standard)
        );
        assert_eq!(CategoryFilter::Installed.as_category(), None);
    }

    #[test]
    fn test_category_display_matches_serde_names() {
        for (category, expected) in [
            (Category::Standard, "standard"),
            (Category::Optional, "optional"),
            (Category::Experimental, "experimental"),
            (Category::Pip, "pip"),
        ] {
            assert_eq!(category.to_string(), expected);
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", expected));
        }
    }
}
