// crates/runfiles-locator/src/env.rs
// ============================================================================
// Module: Runfiles Environment
// Description: Environment-backed discovery inputs for runfile resolution.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 and empty values fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

use thiserror::Error;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys consulted when discovering the runfiles index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunfilesEnv {
    /// Path to a runfiles manifest file.
    ManifestFile,
    /// Runfiles root directory; also the recursive-search root.
    RunfilesDir,
    /// Test source directory set by test runners.
    TestSrcdir,
}

impl RunfilesEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ManifestFile => "RUNFILES_MANIFEST_FILE",
            Self::RunfilesDir => "RUNFILES_DIR",
            Self::TestSrcdir => "TEST_SRCDIR",
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Environment parsing failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    /// The variable is set but is not valid UTF-8.
    #[error("{name} must be valid UTF-8")]
    NotUnicode {
        /// Variable name.
        name: String,
    },
    /// The variable is set but empty or whitespace.
    #[error("{name} must not be empty")]
    Empty {
        /// Variable name.
        name: String,
    },
}

// ============================================================================
// SECTION: Runfiles Variables
// ============================================================================

/// Runfiles-related environment values captured at startup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunfilesVars {
    /// `RUNFILES_MANIFEST_FILE`, when set.
    pub manifest_file: Option<PathBuf>,
    /// `RUNFILES_DIR`, when set.
    pub runfiles_dir: Option<PathBuf>,
    /// `TEST_SRCDIR`, when set.
    pub test_srcdir: Option<PathBuf>,
}

impl RunfilesVars {
    /// Loads runfiles variables from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError`] when a variable is set to invalid UTF-8 or to an
    /// empty value.
    pub fn load() -> Result<Self, EnvError> {
        Ok(Self {
            manifest_file: read_env_nonempty(RunfilesEnv::ManifestFile.as_str())?
                .map(PathBuf::from),
            runfiles_dir: read_env_nonempty(RunfilesEnv::RunfilesDir.as_str())?.map(PathBuf::from),
            test_srcdir: read_env_nonempty(RunfilesEnv::TestSrcdir.as_str())?.map(PathBuf::from),
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns [`EnvError::NotUnicode`] when the variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, EnvError> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| EnvError::NotUnicode {
            name: name.to_string(),
        })
    })
}

/// Reads an environment variable and rejects empty values.
///
/// # Errors
///
/// Returns [`EnvError`] when the variable is invalid UTF-8, or set but empty
/// or whitespace.
pub fn read_env_nonempty(name: &str) -> Result<Option<String>, EnvError> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => Err(EnvError::Empty {
            name: name.to_string(),
        }),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}
