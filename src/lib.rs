// src/lib.rs

//! Stocktake Package Inventory
//!
//! Reports, for every package known to the distribution, whether it is
//! installed locally, which version is installed, and which version the
//! remote catalog currently publishes.
//!
//! # Architecture
//!
//! - Two independent sources: a filesystem-backed installation store and
//!   an HTTP package catalog
//! - The resolver merges both into one sorted view per request; remote
//!   unavailability degrades individual records, never the whole run
//! - No state survives an invocation: manifest, store, and catalog are
//!   read fresh each time

pub mod builder;
pub mod catalog;
pub mod config;
mod error;
pub mod manifest;
pub mod render;
pub mod resolver;
pub mod store;

pub use error::{Error, Result};
