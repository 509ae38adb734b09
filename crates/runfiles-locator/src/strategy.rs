// crates/runfiles-locator/src/strategy.rs
// ============================================================================
// Module: Resolution Strategies
// Description: Pluggable lookups tried in order by the asset locator.
// Purpose: Add packaging schemes by appending a strategy, not by branching.
// Dependencies: tracing, walkdir
// ============================================================================

//! ## Overview
//! Each [`ResolveStrategy`] maps a logical path to an optional physical path.
//! [`IndexLookup`] checks one candidate spelling against a [`RunfilesIndex`];
//! [`RecursiveSearch`] is the last resort and walks a directory tree.
//!
//! Invariants:
//! - Strategies return `Ok(None)` when they do not apply or find nothing.
//! - [`RecursiveSearch`] walks in file-name order and reports duplicates as
//!   [`LocatorError::AmbiguousAsset`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;
use walkdir::WalkDir;

use crate::error::LocatorError;
use crate::index::RunfilesIndex;
use crate::index::absolutize;
use crate::path::CandidateForm;
use crate::path::LogicalPath;

// ============================================================================
// SECTION: Trait
// ============================================================================

/// A single resolution step.
pub trait ResolveStrategy: Send + Sync {
    /// Returns a stable label used in logs and diagnostics.
    fn label(&self) -> &'static str;

    /// Returns false when this strategy has nothing to look up for `logical`;
    /// the locator then skips it and leaves it out of diagnostics.
    fn applies(&self, _logical: &LogicalPath, _hint: Option<&str>) -> bool {
        true
    }

    /// Resolves `logical` to an existing path, if this strategy can.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError`] when the strategy fails in a way that must not
    /// fall through to later strategies.
    fn resolve(
        &self,
        logical: &LogicalPath,
        hint: Option<&str>,
    ) -> Result<Option<PathBuf>, LocatorError>;
}

// ============================================================================
// SECTION: Index Lookup
// ============================================================================

/// Checks one candidate form against a shared runfiles index.
#[derive(Debug, Clone)]
pub struct IndexLookup {
    /// Shared index.
    index: Arc<RunfilesIndex>,
    /// Candidate spelling this lookup tries.
    form: CandidateForm,
}

impl IndexLookup {
    /// Creates a lookup for `form` against `index`.
    #[must_use]
    pub const fn new(index: Arc<RunfilesIndex>, form: CandidateForm) -> Self {
        Self {
            index,
            form,
        }
    }
}

impl ResolveStrategy for IndexLookup {
    fn label(&self) -> &'static str {
        self.form.label()
    }

    fn applies(&self, logical: &LogicalPath, hint: Option<&str>) -> bool {
        !logical.is_absolute() && self.form.candidate(logical, hint).is_some()
    }

    fn resolve(
        &self,
        logical: &LogicalPath,
        hint: Option<&str>,
    ) -> Result<Option<PathBuf>, LocatorError> {
        if !self.applies(logical, hint) {
            return Ok(None);
        }
        let Some(candidate) = self.form.candidate(logical, hint) else {
            return Ok(None);
        };
        let resolved = self.index.rlocation(&candidate);
        debug!(candidate, found = resolved.is_some(), "runfiles index lookup");
        Ok(resolved)
    }
}

// ============================================================================
// SECTION: Recursive Search
// ============================================================================

/// Suffix search (`**/<logical>`) under a root directory.
#[derive(Debug, Clone)]
pub struct RecursiveSearch {
    /// Directory to walk.
    root: PathBuf,
}

impl RecursiveSearch {
    /// Creates a search rooted at `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self {
            root: absolutize(&root),
        }
    }
}

impl ResolveStrategy for RecursiveSearch {
    fn label(&self) -> &'static str {
        "recursive-search"
    }

    fn applies(&self, logical: &LogicalPath, _hint: Option<&str>) -> bool {
        !logical.is_absolute()
    }

    fn resolve(
        &self,
        logical: &LogicalPath,
        hint: Option<&str>,
    ) -> Result<Option<PathBuf>, LocatorError> {
        if !self.applies(logical, hint) {
            return Ok(None);
        }
        let suffix = logical.as_path();
        let mut matches = Vec::new();
        for entry in WalkDir::new(&self.root).follow_links(true).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    debug!(root = %self.root.display(), error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            if entry.depth() == 0 || entry.file_type().is_dir() {
                continue;
            }
            if entry.path().ends_with(suffix) {
                matches.push(entry.into_path());
            }
        }
        if matches.len() > 1 {
            return Err(LocatorError::AmbiguousAsset {
                logical: logical.to_string(),
                matches,
            });
        }
        Ok(matches.pop())
    }
}
