// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Core error types for Stocktake
#[derive(Error, Debug)]
pub enum Error {
    /// Required root environment variable is missing or empty
    #[error("STOCKTAKE_ROOT is not set; point it at the installation root")]
    RootNotSet,

    /// Package manifest could not be loaded
    #[error("Failed to load package manifest at {}: {reason}", path.display())]
    ManifestUnavailable { path: PathBuf, reason: String },

    /// Local installation store is wholly unreadable
    #[error("Installation store unavailable at {}", .0.display())]
    StoreUnavailable(PathBuf),

    /// A build orchestration step failed
    #[error("Build step '{step}' failed: {reason}")]
    BuildStep { step: String, reason: String },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using Stocktake's Error type
pub type Result<T> = std::result::Result<T, Error>;
