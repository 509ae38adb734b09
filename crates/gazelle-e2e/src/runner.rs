// crates/gazelle-e2e/src/runner.rs
// ============================================================================
// Module: Fixture Runner
// Description: Orchestrates one golden scenario from resolution to diff.
// Purpose: Resolve, isolate, execute, compare, and always clean up.
// Dependencies: runfiles-locator, tokio, tracing
// ============================================================================

//! ## Overview
//! [`FixtureRunner::run`] performs the scenario in order:
//! 1. resolve the generator executable,
//! 2. create an [`IsolatedWorkspace`],
//! 3. resolve and install every manifest file,
//! 4. run the generator in fix mode,
//! 5. read the generated and golden build files,
//! 6. compare them exactly,
//! 7. remove the workspace.
//!
//! Invariants:
//! - Any fatal error aborts the scenario without retries.
//! - The workspace is removed before `run` returns, on every path.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use runfiles_locator::AssetLocator;
use runfiles_locator::ResolvedAsset;
use tracing::info;
use tracing::warn;

use crate::compare::Comparison;
use crate::compare::compare_outputs;
use crate::error::RunnerError;
use crate::generator::GeneratorInvocation;
use crate::generator::GeneratorMode;
use crate::generator::GeneratorOutput;
use crate::generator::run_generator;
use crate::manifest::FixtureManifest;
use crate::workspace::IsolatedWorkspace;

// ============================================================================
// SECTION: Options
// ============================================================================

/// Per-run settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunnerOptions {
    /// Namespace hint for every lookup.
    pub namespace: Option<String>,
    /// Bounded wait for the generator.
    pub timeout: Option<Duration>,
    /// Parent directory for the workspace (system temp dir when unset).
    pub temp_root: Option<PathBuf>,
}

// ============================================================================
// SECTION: Report
// ============================================================================

/// Result of a completed scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Match or mismatch with diff.
    pub comparison: Comparison,
    /// Root of the removed workspace, kept for diagnostics.
    pub workspace_root: PathBuf,
    /// Generator that was executed.
    pub generator: ResolvedAsset,
    /// Captured generator output.
    pub generator_output: GeneratorOutput,
}

// ============================================================================
// SECTION: Runner
// ============================================================================

/// Runs one fixture scenario against a generator.
pub struct FixtureRunner<'a> {
    /// Locator for the generator and fixture files.
    locator: &'a AssetLocator,
    /// Scenario definition.
    manifest: FixtureManifest,
    /// Per-run settings.
    options: RunnerOptions,
}

impl<'a> FixtureRunner<'a> {
    /// Creates a runner.
    #[must_use]
    pub const fn new(
        locator: &'a AssetLocator,
        manifest: FixtureManifest,
        options: RunnerOptions,
    ) -> Self {
        Self {
            locator,
            manifest,
            options,
        }
    }

    /// Returns the scenario definition.
    #[must_use]
    pub const fn manifest(&self) -> &FixtureManifest {
        &self.manifest
    }

    /// Runs the scenario against the generator named by `generator`.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] for resolution, setup, execution, timeout,
    /// missing output, read, and cleanup failures. A golden mismatch is
    /// reported through [`RunReport::comparison`].
    pub async fn run(&self, generator: &str) -> Result<RunReport, RunnerError> {
        let hint = self.options.namespace.as_deref();
        let generator = self.locator.locate(generator, hint)?;
        info!(generator = %generator.path.display(), strategy = generator.strategy, "resolved generator");

        let workspace = match &self.options.temp_root {
            Some(parent) => IsolatedWorkspace::create_in(parent, &self.manifest.fixture_root)?,
            None => IsolatedWorkspace::create(&self.manifest.fixture_root)?,
        };
        let workspace_root = workspace.root().to_path_buf();
        let outcome = self.execute(&workspace, &generator.path).await;
        match (outcome, workspace.close()) {
            (Ok((comparison, generator_output)), Ok(())) => Ok(RunReport {
                comparison,
                workspace_root,
                generator,
                generator_output,
            }),
            (Ok(_), Err(cleanup)) => Err(cleanup),
            (Err(err), cleanup) => {
                if let Err(cleanup) = cleanup {
                    warn!(error = %cleanup, "workspace cleanup failed after run error");
                }
                Err(err)
            }
        }
    }

    /// Installs the fixture, runs the generator, and compares outputs.
    async fn execute(
        &self,
        workspace: &IsolatedWorkspace,
        generator: &Path,
    ) -> Result<(Comparison, GeneratorOutput), RunnerError> {
        let hint = self.options.namespace.as_deref();
        for rel in &self.manifest.files {
            let asset = self.locator.locate(&self.manifest.logical_source(rel), hint)?;
            workspace.install(&asset.path, rel)?;
        }

        let invocation = GeneratorInvocation {
            executable: generator.to_path_buf(),
            repo_root: workspace.project_dir().to_path_buf(),
            build_file_name: self.manifest.build_file_name.clone(),
            mode: GeneratorMode::Fix,
        };
        let generator_output = run_generator(&invocation, self.options.timeout).await?;

        let generated_path = workspace.project_dir().join(&self.manifest.build_file_name);
        let generated = match fs::read(&generated_path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(RunnerError::OutputMissing {
                    path: generated_path,
                });
            }
            Err(source) => {
                return Err(RunnerError::Io {
                    path: generated_path,
                    source,
                });
            }
        };
        let golden_path = workspace.project_dir().join(&self.manifest.golden_file);
        let golden = fs::read(&golden_path).map_err(|source| RunnerError::Io {
            path: golden_path,
            source,
        })?;

        let comparison = compare_outputs(
            &golden,
            &generated,
            &self.manifest.golden_file,
            &self.manifest.build_file_name,
        );
        info!(matched = comparison.is_match(), "golden comparison complete");
        Ok((comparison, generator_output))
    }
}
