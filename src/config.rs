// src/config.rs

//! Process-wide configuration
//!
//! All paths hang off a single root directory identified by the
//! `STOCKTAKE_ROOT` environment variable. The variable is checked once
//! at startup, before any resolution logic runs; a missing root is a
//! fatal startup error, not something individual readers discover later.

use crate::error::{Error, Result};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming the installation root
pub const ROOT_ENV: &str = "STOCKTAKE_ROOT";

/// Environment variable overriding the catalog base URL
pub const CATALOG_URL_ENV: &str = "STOCKTAKE_CATALOG_URL";

/// Default catalog base URL when no override is set
const DEFAULT_CATALOG_URL: &str = "https://catalog.stocktake.dev";

/// Resolved configuration for one invocation
#[derive(Debug, Clone)]
pub struct Config {
    /// Installation root; manifest and install records live below it
    pub root: PathBuf,

    /// Base URL of the remote package catalog
    pub catalog_url: String,
}

impl Config {
    /// Build configuration from the process environment
    ///
    /// Fails with [`Error::RootNotSet`] when `STOCKTAKE_ROOT` is missing
    /// or empty. The root directory itself is not validated here; the
    /// store and manifest readers surface their own errors.
    pub fn from_env() -> Result<Self> {
        let root = match env::var(ROOT_ENV) {
            Ok(value) if !value.trim().is_empty() => PathBuf::from(value),
            _ => return Err(Error::RootNotSet),
        };

        let catalog_url = env::var(CATALOG_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string());

        debug!("Using root {} and catalog {}", root.display(), catalog_url);

        Ok(Self { root, catalog_url })
    }

    /// Construct a configuration rooted at an explicit directory
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
        }
    }

    /// Path of the static name → category manifest
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join("etc").join("manifest.json")
    }

    /// Directory holding one record file per installed package
    pub fn installed_dir(&self) -> PathBuf {
        self.root.join("var").join("installed")
    }

    /// Root directory accessor for callers that only need the base path
    pub fn root(&self) -> &Path {
        &self.root
    }
}
