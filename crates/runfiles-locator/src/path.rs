// crates/runfiles-locator/src/path.rs
// ============================================================================
// Module: Logical Paths
// Description: Validated runfile identifiers and candidate path expansion.
// Purpose: Reject malformed lookups and derive the ordered candidate list.
// Dependencies: std
// ============================================================================

//! ## Overview
//! A [`LogicalPath`] names a file relative to the project, independent of the
//! packaging layout. [`CandidateForm`] turns it into the concrete strings that
//! are checked against a runfiles index, in priority order.
//!
//! Invariants:
//! - Relative logical paths never contain `.`, `..`, or empty segments.
//! - Absolute paths are passed through untouched; the locator accepts them
//!   only when the file already exists.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::path::Path;

use crate::error::LocatorError;

// ============================================================================
// SECTION: Logical Path
// ============================================================================

/// A validated logical runfile path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogicalPath {
    /// Normalized textual form.
    raw: String,
    /// True when the input was an absolute filesystem path.
    absolute: bool,
}

impl LogicalPath {
    /// Parses and validates a logical path.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::InvalidLogicalPath`] for empty input, `.` or
    /// `..` segments, empty segments, or backslash separators.
    pub fn parse(raw: &str) -> Result<Self, LocatorError> {
        let invalid = |reason| LocatorError::InvalidLogicalPath {
            raw: raw.to_string(),
            reason,
        };
        if raw.trim().is_empty() {
            return Err(invalid("path is empty"));
        }
        if Path::new(raw).is_absolute() {
            return Ok(Self {
                raw: raw.to_string(),
                absolute: true,
            });
        }
        if raw.contains('\\') {
            return Err(invalid("path must use '/' separators"));
        }
        for segment in raw.split('/') {
            match segment {
                "" => return Err(invalid("path contains an empty segment")),
                "." | ".." => return Err(invalid("path must not contain '.' or '..' segments")),
                _ => {}
            }
        }
        Ok(Self {
            raw: raw.to_string(),
            absolute: false,
        })
    }

    /// Returns the logical path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the logical path as a filesystem path.
    #[must_use]
    pub fn as_path(&self) -> &Path {
        Path::new(&self.raw)
    }

    /// Returns true when the input was an absolute filesystem path.
    #[must_use]
    pub const fn is_absolute(&self) -> bool {
        self.absolute
    }

    /// Prefixes the path with a namespace segment.
    #[must_use]
    pub fn in_namespace(&self, namespace: &str) -> String {
        format!("{}/{}", namespace.trim_end_matches('/'), self.raw)
    }
}

impl fmt::Display for LogicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

// ============================================================================
// SECTION: Candidate Forms
// ============================================================================

/// One way of spelling a logical path against a runfiles index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateForm {
    /// The logical path exactly as given.
    Verbatim,
    /// The logical path under the caller-supplied namespace hint.
    NamespaceHint,
    /// The logical path under a fixed namespace.
    Namespace(String),
}

impl CandidateForm {
    /// Returns a stable label used in logs and diagnostics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Verbatim => "runfiles-verbatim",
            Self::NamespaceHint => "runfiles-namespace-hint",
            Self::Namespace(_) => "runfiles-default-namespace",
        }
    }

    /// Spells the candidate for `logical`, or `None` when the form does not
    /// apply: no hint given, an absolute path under a namespace, or a fixed
    /// namespace equal to the hint (already covered by the hint form).
    #[must_use]
    pub fn candidate(&self, logical: &LogicalPath, hint: Option<&str>) -> Option<String> {
        match self {
            Self::Verbatim => Some(logical.as_str().to_string()),
            Self::NamespaceHint if !logical.is_absolute() => hint
                .map(str::trim)
                .filter(|hint| !hint.is_empty())
                .map(|hint| logical.in_namespace(hint)),
            Self::Namespace(namespace)
                if !logical.is_absolute() && hint.map(str::trim) != Some(namespace.as_str()) =>
            {
                Some(logical.in_namespace(namespace))
            }
            Self::NamespaceHint | Self::Namespace(_) => None,
        }
    }
}

/// Returns the candidate forms in priority order.
#[must_use]
pub fn standard_forms(default_namespace: &str) -> [CandidateForm; 3] {
    [
        CandidateForm::Verbatim,
        CandidateForm::NamespaceHint,
        CandidateForm::Namespace(default_namespace.to_string()),
    ]
}

/// Builds the ordered candidate list: exact path, hint-prefixed path, then
/// default-namespace-prefixed path. Duplicates keep their first position.
#[must_use]
pub fn candidate_paths(
    logical: &LogicalPath,
    hint: Option<&str>,
    default_namespace: &str,
) -> Vec<String> {
    let forms = standard_forms(default_namespace);
    let mut candidates: Vec<String> = Vec::with_capacity(forms.len());
    for form in &forms {
        if let Some(candidate) = form.candidate(logical, hint)
            && !candidates.contains(&candidate)
        {
            candidates.push(candidate);
        }
    }
    candidates
}
