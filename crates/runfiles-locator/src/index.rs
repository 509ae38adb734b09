// crates/runfiles-locator/src/index.rs
// ============================================================================
// Module: Runfiles Index
// Description: Manifest- and directory-backed runfile lookup tables.
// Purpose: Map candidate strings to physical files provided by the packager.
// Dependencies: tracing
// ============================================================================

//! ## Overview
//! The packager exposes runfiles either as a manifest (one `logical physical`
//! pair per line) or as a directory tree mirroring logical paths.
//! [`RunfilesIndex`] covers both and only ever answers with files that exist.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;

use crate::env::RunfilesVars;
use crate::error::LocatorError;

// ============================================================================
// SECTION: Index
// ============================================================================

/// Runtime asset index populated by the packaging system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunfilesIndex {
    /// Manifest-backed index.
    Manifest {
        /// Logical-to-physical entries. Empty physical paths are placeholders.
        entries: BTreeMap<String, PathBuf>,
    },
    /// Directory-backed index rooted at an absolute path.
    Directory {
        /// Runfiles root directory.
        root: PathBuf,
    },
}

impl RunfilesIndex {
    /// Parses manifest text. Each line is split at its first space; the last
    /// entry for a logical path wins.
    #[must_use]
    pub fn from_manifest_str(text: &str) -> Self {
        let mut entries = BTreeMap::new();
        for line in text.lines() {
            if line.is_empty() {
                continue;
            }
            let (logical, physical) = line.split_once(' ').unwrap_or((line, ""));
            entries.insert(logical.to_string(), PathBuf::from(physical));
        }
        Self::Manifest {
            entries,
        }
    }

    /// Reads and parses a manifest file.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::Manifest`] when the file cannot be read.
    pub fn from_manifest_file(path: &Path) -> Result<Self, LocatorError> {
        let text = fs::read_to_string(path).map_err(|source| LocatorError::Manifest {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_manifest_str(&text))
    }

    /// Builds a directory-backed index.
    #[must_use]
    pub fn from_directory(root: &Path) -> Self {
        Self::Directory {
            root: absolutize(root),
        }
    }

    /// Discovers an index from runfiles variables, then from files next to
    /// `executable`. Returns `None` when nothing is available.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::Manifest`] when a discovered manifest cannot be
    /// read.
    pub fn discover(
        vars: &RunfilesVars,
        executable: Option<&Path>,
    ) -> Result<Option<Self>, LocatorError> {
        if let Some(manifest) = &vars.manifest_file {
            debug!(manifest = %manifest.display(), "using runfiles manifest from environment");
            return Self::from_manifest_file(manifest).map(Some);
        }
        if let Some(root) = vars.runfiles_dir.as_ref().or(vars.test_srcdir.as_ref()) {
            debug!(root = %root.display(), "using runfiles directory from environment");
            return Ok(Some(Self::from_directory(root)));
        }
        let Some(executable) = executable else {
            return Ok(None);
        };
        let manifest = with_suffix(executable, ".runfiles_manifest");
        if manifest.is_file() {
            return Self::from_manifest_file(&manifest).map(Some);
        }
        let runfiles_dir = with_suffix(executable, ".runfiles");
        let nested_manifest = runfiles_dir.join("MANIFEST");
        if nested_manifest.is_file() {
            return Self::from_manifest_file(&nested_manifest).map(Some);
        }
        if runfiles_dir.is_dir() {
            return Ok(Some(Self::from_directory(&runfiles_dir)));
        }
        debug!(executable = %executable.display(), "no runfiles index discovered");
        Ok(None)
    }

    /// Maps a candidate string to an existing physical file. Directories
    /// never resolve.
    #[must_use]
    pub fn rlocation(&self, candidate: &str) -> Option<PathBuf> {
        let physical = match self {
            Self::Manifest {
                entries,
            } => entries.get(candidate).filter(|path| !path.as_os_str().is_empty())?.clone(),
            Self::Directory {
                root,
            } => root.join(candidate),
        };
        physical.is_file().then(|| absolutize(&physical))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns an absolute form of `path`, leaving it unchanged on failure.
pub(crate) fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Appends a raw suffix to the final path component.
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw = OsString::from(path.as_os_str());
    raw.push(suffix);
    PathBuf::from(raw)
}
