// src/catalog.rs

//! Remote package catalog
//!
//! Resolves published versions for names the resolver already knows
//! about; the catalog never introduces new names. Lookup failures are
//! absorbed here and reported per name, so an unreachable catalog can
//! never block reporting on installed packages.

use rayon::prelude::*;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Timeout for a single catalog lookup (10 seconds)
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum attempts per name for transport-level failures
const MAX_RETRIES: u32 = 2;

/// Retry delay in milliseconds
const RETRY_DELAY_MS: u64 = 500;

/// Outcome of one catalog lookup
///
/// `NotFound` and `Unknown` both render as absent in default output,
/// but the distinction is kept: a name the catalog has genuinely never
/// heard of is a different fact from a lookup the network ate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteVersion {
    /// Catalog resolved the name to this published version
    Available(String),

    /// Catalog was reachable and does not carry this name
    NotFound,

    /// Could not determine: network, timeout, or protocol failure
    Unknown,
}

impl RemoteVersion {
    /// The published version, when the lookup succeeded
    pub fn version(&self) -> Option<&str> {
        match self {
            RemoteVersion::Available(v) => Some(v),
            RemoteVersion::NotFound | RemoteVersion::Unknown => None,
        }
    }
}

/// Version-resolution seam between the resolver and the network
///
/// Implementations absorb their own errors: the returned map carries an
/// entry for every requested name, with failures expressed as
/// [`RemoteVersion::Unknown`] rather than propagated.
pub trait CatalogFetcher {
    /// Resolve published versions for every requested name
    fn fetch(&self, names: &[String]) -> HashMap<String, RemoteVersion>;
}

/// Catalog wire format for a single package lookup
#[derive(Debug, Deserialize)]
struct CatalogEntry {
    #[allow(dead_code)]
    name: String,
    version: String,
}

/// HTTP-backed catalog client
pub struct HttpCatalog {
    client: Option<Client>,
    base_url: String,
}

impl HttpCatalog {
    /// Create a catalog client against the given base URL
    ///
    /// A client that cannot be constructed degrades every lookup to
    /// `Unknown` instead of failing the invocation.
    pub fn new(base_url: &str) -> Self {
        let client = match Client::builder().timeout(HTTP_TIMEOUT).build() {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("Failed to create HTTP client, catalog lookups disabled: {}", e);
                None
            }
        };

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn lookup_url(&self, name: &str) -> String {
        format!("{}/packages/{}", self.base_url, name)
    }

    /// Look up one name, retrying transport-level failures
    fn lookup(&self, name: &str) -> RemoteVersion {
        let Some(client) = &self.client else {
            return RemoteVersion::Unknown;
        };

        let url = self.lookup_url(name);

        let mut attempt = 0;
        loop {
            attempt += 1;
            match client.get(&url).send() {
                Ok(response) => {
                    if response.status() == StatusCode::NOT_FOUND {
                        debug!("Catalog has no entry for '{}'", name);
                        return RemoteVersion::NotFound;
                    }
                    if !response.status().is_success() {
                        warn!("Catalog returned HTTP {} for '{}'", response.status(), name);
                        return RemoteVersion::Unknown;
                    }
                    match response.json::<CatalogEntry>() {
                        Ok(entry) => return RemoteVersion::Available(entry.version),
                        Err(e) => {
                            warn!("Malformed catalog entry for '{}': {}", name, e);
                            return RemoteVersion::Unknown;
                        }
                    }
                }
                Err(e) => {
                    if attempt >= MAX_RETRIES {
                        warn!(
                            "Catalog lookup for '{}' failed after {} attempts: {}",
                            name, attempt, e
                        );
                        return RemoteVersion::Unknown;
                    }
                    warn!("Catalog lookup attempt {} for '{}' failed: {}, retrying...", attempt, name, e);
                    std::thread::sleep(Duration::from_millis(RETRY_DELAY_MS * attempt as u64));
                }
            }
        }
    }
}

impl CatalogFetcher for HttpCatalog {
    fn fetch(&self, names: &[String]) -> HashMap<String, RemoteVersion> {
        info!("Resolving {} names against {}", names.len(), self.base_url);

        // Lookups are independent; run them in parallel and join before
        // returning so the resolver always sees a complete mapping.
        let results: HashMap<String, RemoteVersion> = names
            .par_iter()
            .map(|name| (name.clone(), self.lookup(name)))
            .collect();

        let resolved = results
            .values()
            .filter(|v| matches!(v, RemoteVersion::Available(_)))
            .count();
        info!("Resolved {} of {} names", resolved, names.len());

        results
    }
}
