// crates/gazelle-e2e/src/workspace.rs
// ============================================================================
// Module: Isolated Workspace
// Description: Uniquely named temporary project tree for one fixture run.
// Purpose: Give the generator a private repo root that is always removed.
// Dependencies: tempfile, tracing
// ============================================================================

//! ## Overview
//! [`IsolatedWorkspace`] owns a randomized temporary directory. The project
//! directory the generator treats as its repository root lives inside it.
//! Removal is tied to `Drop`, so every exit path (errors, early returns,
//! panics, and cancelled futures) releases the tree; [`IsolatedWorkspace::close`]
//! removes it eagerly and reports failures.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::fs::File;
use std::fs::FileTimes;
use std::path::Path;
use std::path::PathBuf;

use tempfile::TempDir;
use tracing::debug;

use crate::error::RunnerError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Prefix for workspace directory names.
pub const WORKSPACE_PREFIX: &str = "gazelle_fixture_";

// ============================================================================
// SECTION: Workspace
// ============================================================================

/// Exclusively owned temporary workspace for one scenario run.
#[derive(Debug)]
pub struct IsolatedWorkspace {
    /// Temporary root; removed on drop.
    temp: TempDir,
    /// Project directory inside the root.
    project_dir: PathBuf,
}

impl IsolatedWorkspace {
    /// Creates a workspace under the system temporary directory.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Setup`] when the directories cannot be created.
    pub fn create(project_name: &str) -> Result<Self, RunnerError> {
        Self::create_in(&std::env::temp_dir(), project_name)
    }

    /// Creates a workspace under `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Setup`] when the directories cannot be created.
    pub fn create_in(parent: &Path, project_name: &str) -> Result<Self, RunnerError> {
        let temp = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir_in(parent)
            .map_err(|err| {
                RunnerError::setup(format!("create workspace in {}", parent.display()), err)
            })?;
        let project_dir = temp.path().join(project_name);
        fs::create_dir_all(&project_dir)
            .map_err(|err| RunnerError::setup(format!("create {}", project_dir.display()), err))?;
        debug!(root = %temp.path().display(), "created isolated workspace");
        Ok(Self {
            temp,
            project_dir,
        })
    }

    /// Returns the workspace root.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// Returns the project directory handed to the generator.
    #[must_use]
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Copies `source` to `rel` under the project directory, creating parent
    /// directories. Content, permissions, and timestamps are preserved.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Setup`] when any copy step fails.
    pub fn install(&self, source: &Path, rel: &str) -> Result<PathBuf, RunnerError> {
        let dest = self.project_dir.join(rel);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| RunnerError::setup(format!("create {}", parent.display()), err))?;
        }
        let context = || format!("copy {} to {}", source.display(), dest.display());
        fs::copy(source, &dest).map_err(|err| RunnerError::setup(context(), err))?;
        copy_times(source, &dest).map_err(|err| RunnerError::setup(context(), err))?;
        debug!(rel, source = %source.display(), "installed fixture file");
        Ok(dest)
    }

    /// Removes the workspace now.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Cleanup`] when removal fails.
    pub fn close(self) -> Result<(), RunnerError> {
        let path = self.temp.path().to_path_buf();
        self.temp.close().map_err(|source| RunnerError::Cleanup {
            path: path.clone(),
            source,
        })?;
        debug!(root = %path.display(), "removed isolated workspace");
        Ok(())
    }
}

/// Copies access and modification times; the destination may be read-only.
fn copy_times(source: &Path, dest: &Path) -> std::io::Result<()> {
    let metadata = fs::metadata(source)?;
    let times = FileTimes::new().set_accessed(metadata.accessed()?).set_modified(metadata.modified()?);
    File::open(dest)?.set_times(times)
}
