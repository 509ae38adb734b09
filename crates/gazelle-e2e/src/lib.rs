// crates/gazelle-e2e/src/lib.rs
// ============================================================================
// Module: Gazelle Generation E2E Library
// Description: Isolated fixture execution and golden comparison for Gazelle.
// Purpose: Catch generator regressions by diffing output against a golden file.
// Dependencies: runfiles-locator, similar, tempfile, tokio, tracing
// ============================================================================

//! ## Overview
//! The harness treats the build-file generator as a black box. A
//! [`FixtureRunner`] copies the fixture named by a [`FixtureManifest`] into an
//! [`IsolatedWorkspace`], runs the generator in fix mode, and compares the
//! produced build file with the golden file byte for byte.
//!
//! Invariants:
//! - The workspace is removed on every exit path, including errors and panics.
//! - A non-zero generator exit never reaches the comparison step.
//! - Comparison performs no normalization of whitespace or line endings.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod compare;
pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod manifest;
pub mod report;
pub mod runner;
pub mod workspace;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use compare::Comparison;
pub use compare::compare_outputs;
pub use config::ConfigError;
pub use config::HarnessConfig;
pub use config::HarnessEnv;
pub use error::RunnerError;
pub use generator::GeneratorInvocation;
pub use generator::GeneratorMode;
pub use generator::GeneratorOutput;
pub use generator::run_generator;
pub use manifest::FixtureManifest;
pub use manifest::ManifestError;
pub use report::RunReporter;
pub use report::RunStatus;
pub use runner::FixtureRunner;
pub use runner::RunReport;
pub use runner::RunnerOptions;
pub use workspace::IsolatedWorkspace;
