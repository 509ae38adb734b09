// crates/runfiles-locator/src/error.rs
// ============================================================================
// Module: Locator Errors
// Description: Failure kinds for runfile resolution.
// Purpose: Carry the logical path and search context into diagnostics.
// Dependencies: thiserror
// ============================================================================

//! Error type shared by every resolution strategy.

use std::path::PathBuf;

use thiserror::Error;

use crate::env::EnvError;

/// Runfile resolution failures.
#[derive(Debug, Error)]
pub enum LocatorError {
    /// The logical path is empty, escapes its root, or is malformed.
    #[error("invalid logical path '{raw}': {reason}")]
    InvalidLogicalPath {
        /// Raw input as supplied by the caller.
        raw: String,
        /// Short description of the violation.
        reason: &'static str,
    },
    /// No strategy produced an existing file.
    #[error("runfile {logical} not found in runfiles search (tried: {})", .tried.join(", "))]
    AssetNotFound {
        /// Logical path that was requested.
        logical: String,
        /// Labels of the strategies consulted, in order.
        tried: Vec<String>,
    },
    /// The recursive search found more than one candidate.
    #[error(
        "runfile {logical} is ambiguous: {} matches under the search root (first: {})",
        .matches.len(),
        .matches.first().map(|path| path.display().to_string()).unwrap_or_default()
    )]
    AmbiguousAsset {
        /// Logical path that was requested.
        logical: String,
        /// All matching paths in traversal order.
        matches: Vec<PathBuf>,
    },
    /// The runfiles manifest could not be read.
    #[error("failed to read runfiles manifest {}: {source}", .path.display())]
    Manifest {
        /// Manifest file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Environment configuration was invalid.
    #[error(transparent)]
    Env(#[from] EnvError),
}
