// src/resolver.rs

//! Package inventory resolver
//!
//! Merges the installation store and the remote catalog into one sorted
//! view per request. The store is authoritative and required: if it
//! cannot be read, resolution fails before any network traffic. The
//! catalog is best-effort: missing remote data degrades individual
//! records, never the request.

use crate::catalog::{CatalogFetcher, RemoteVersion};
use crate::config::Config;
use crate::error::Result;
use crate::manifest::{Category, CategoryFilter, Manifest};
use crate::store;
use tracing::{debug, info};

/// One resolution request
#[derive(Debug, Clone, Copy)]
pub struct ResolutionRequest {
    /// Which packages to report on
    pub filter: CategoryFilter,

    /// Skip the remote catalog entirely
    pub local_only: bool,
}

/// One package's merged inventory state
///
/// Constructed fresh per invocation and read-only after the merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    /// Unique package name, the merge key
    pub name: String,

    /// Stored category; `None` only for installed packages whose
    /// manifest entry has since been removed
    pub category: Option<Category>,

    /// Version recorded by the installation store, if installed
    pub installed_version: Option<String>,

    /// Catalog lookup outcome; `Unknown` in local-only mode since no
    /// lookup was attempted
    pub remote_version: RemoteVersion,
}

/// Resolve a request into an ordered sequence of package records
///
/// The candidate set comes from the manifest for stored categories and
/// from the installation store's keys for the `installed` view, where
/// the manifest's table is ignored for candidacy (a user may still have
/// packages installed whose manifest entry was removed upstream).
pub fn resolve(
    request: &ResolutionRequest,
    config: &Config,
    manifest: &Manifest,
    fetcher: &dyn CatalogFetcher,
) -> Result<Vec<PackageRecord>> {
    // Install state is needed for every view, so a dead store fails the
    // request here, before any remote lookups start.
    let installed = store::read_installed(&config.installed_dir())?;

    let candidates: Vec<String> = match request.filter.as_category() {
        Some(category) => manifest.names_in(category),
        None => installed.keys().cloned().collect(),
    };

    debug!(
        "Resolving {} candidates for {:?} (local_only: {})",
        candidates.len(),
        request.filter,
        request.local_only
    );

    let mut remote = if request.local_only {
        None
    } else {
        Some(fetcher.fetch(&candidates))
    };

    // Candidates come from ordered maps, so this iteration already
    // yields strictly ascending unique names.
    let records: Vec<PackageRecord> = candidates
        .into_iter()
        .map(|name| {
            let remote_version = remote
                .as_mut()
                .and_then(|map| map.remove(&name))
                .unwrap_or(RemoteVersion::Unknown);

            PackageRecord {
                category: manifest.category_of(&name),
                installed_version: installed.get(&name).cloned(),
                remote_version,
                name,
            }
        })
        .collect();

    info!("Resolved {} package records", records.len());
    Ok(records)
}
