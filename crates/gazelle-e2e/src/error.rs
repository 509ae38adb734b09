// crates/gazelle-e2e/src/error.rs
// ============================================================================
// Module: Runner Errors
// Description: Fatal outcomes of a fixture run.
// Purpose: Keep captured generator output attached to execution failures.
// Dependencies: runfiles-locator, thiserror
// ============================================================================

//! ## Overview
//! Every variant aborts the scenario. A golden mismatch is not an error; it
//! is reported through [`crate::Comparison::Mismatch`].

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

use runfiles_locator::LocatorError;
use thiserror::Error;

use crate::manifest::ManifestError;

/// Fixture run failures.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The generator or a fixture input could not be located.
    #[error("asset resolution failed: {0}")]
    AssetNotFound(#[from] LocatorError),
    /// The scenario manifest was unreadable or invalid.
    #[error(transparent)]
    Scenario(#[from] ManifestError),
    /// Workspace creation, fixture copy, or generator spawn failed.
    #[error("fixture setup failed: {context}: {source}")]
    Setup {
        /// Step that failed.
        context: String,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The generator exited unsuccessfully.
    #[error("generator failed with {status}")]
    GeneratorExecution {
        /// Exit status reported by the OS.
        status: ExitStatus,
        /// Captured standard output.
        stdout: String,
        /// Captured standard error.
        stderr: String,
    },
    /// The generator exceeded the configured bounded wait and was killed.
    #[error("generator did not finish within {}s and was terminated", .timeout.as_secs())]
    Timeout {
        /// Configured limit.
        timeout: Duration,
    },
    /// The generator exited successfully without writing the build file.
    #[error("generator produced no output at {}", .path.display())]
    OutputMissing {
        /// Expected output location.
        path: PathBuf,
    },
    /// Reading a workspace file failed.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The workspace could not be removed.
    #[error("failed to remove workspace {}: {source}", .path.display())]
    Cleanup {
        /// Workspace root.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

impl RunnerError {
    /// Builds a [`RunnerError::Setup`] for `context`.
    pub(crate) fn setup(context: impl Into<String>, source: io::Error) -> Self {
        Self::Setup {
            context: context.into(),
            source,
        }
    }
}
