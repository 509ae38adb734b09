// crates/gazelle-e2e/src/manifest.rs
// ============================================================================
// Module: Fixture Manifest
// Description: The ordered list of files a scenario copies into its workspace.
// Purpose: Describe one golden scenario, built in or loaded from TOML.
// Dependencies: runfiles-locator, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! A [`FixtureManifest`] names the fixture root, the files copied verbatim
//! into the workspace, the golden file, and the build file the generator is
//! expected to write. [`FixtureManifest::gazelle_app`] is the built-in
//! single-package Dart scenario.
//!
//! Invariants:
//! - Every file is a valid relative logical path.
//! - The golden file is one of the copied files.
//! - The build file name is a single path segment distinct from the golden.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use runfiles_locator::LogicalPath;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Scenario manifest failures.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest file could not be read.
    #[error("failed to read scenario manifest {}: {source}", .path.display())]
    Read {
        /// Manifest path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The manifest was not valid TOML for this schema.
    #[error("failed to parse scenario manifest: {0}")]
    Parse(#[from] toml::de::Error),
    /// The manifest violated a structural rule.
    #[error("invalid scenario manifest: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Manifest
// ============================================================================

/// Files and names that define one golden scenario.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureManifest {
    /// Logical directory holding the fixture; also the project directory name.
    pub fixture_root: String,
    /// Files copied into the workspace, relative to the fixture root.
    pub files: Vec<String>,
    /// Golden expected-output file, relative to the fixture root.
    pub golden_file: String,
    /// Build file the generator writes at the project root.
    pub build_file_name: String,
}

impl FixtureManifest {
    /// Returns the built-in `gazelle_app` scenario.
    #[must_use]
    pub fn gazelle_app() -> Self {
        Self {
            fixture_root: "gazelle_app".to_string(),
            files: [
                "BUILD.bazel.golden",
                "MODULE.bazel",
                "lib/main.dart",
                "pub_deps.json",
                "pubspec.yaml",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
            golden_file: "BUILD.bazel.golden".to_string(),
            build_file_name: "BUILD.bazel".to_string(),
        }
    }

    /// Parses and validates a TOML scenario manifest.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] when parsing or validation fails.
    pub fn from_toml_str(text: &str) -> Result<Self, ManifestError> {
        let manifest: Self = toml::from_str(text)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Reads, parses, and validates a TOML scenario manifest.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] when reading, parsing, or validation fails.
    pub fn from_toml_file(path: &Path) -> Result<Self, ManifestError> {
        let text = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks the structural invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Invalid`] describing the first violation.
    pub fn validate(&self) -> Result<(), ManifestError> {
        let invalid = |message: String| Err(ManifestError::Invalid(message));
        if self.files.is_empty() {
            return invalid("files must not be empty".to_string());
        }
        if !is_single_segment(&self.fixture_root) {
            return invalid(format!("fixture_root '{}' must be one path segment", self.fixture_root));
        }
        for file in &self.files {
            match LogicalPath::parse(file) {
                Ok(path) if !path.is_absolute() => {}
                Ok(_) => return invalid(format!("file '{file}' must be relative")),
                Err(err) => return invalid(err.to_string()),
            }
        }
        if !self.files.contains(&self.golden_file) {
            return invalid(format!("golden_file '{}' is not listed in files", self.golden_file));
        }
        if !is_single_segment(&self.build_file_name) {
            return invalid(format!(
                "build_file_name '{}' must be one path segment",
                self.build_file_name
            ));
        }
        if self.build_file_name == self.golden_file {
            return invalid("build_file_name must differ from golden_file".to_string());
        }
        Ok(())
    }

    /// Returns the logical path of a fixture file.
    #[must_use]
    pub fn logical_source(&self, rel: &str) -> String {
        format!("{}/{rel}", self.fixture_root)
    }
}

/// Returns true for a non-empty name with no separators or dot segments.
fn is_single_segment(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}
