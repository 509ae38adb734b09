// crates/gazelle-e2e/src/generator.rs
// ============================================================================
// Module: Generator Invocation
// Description: Subprocess execution of the build-file generator under test.
// Purpose: Run to completion with captured output and explicit exit checks.
// Dependencies: tokio, tracing
// ============================================================================

//! ## Overview
//! The generator runs with the workspace project directory as both working
//! directory and `-repo_root`. Standard output and error are captured, never
//! streamed. An optional bounded wait kills the child on expiry.
//!
//! Invariants:
//! - A non-zero exit yields [`RunnerError::GeneratorExecution`] carrying the
//!   captured streams.
//! - Children are killed when the wait is abandoned.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::debug;
use tracing::info;

use crate::error::RunnerError;

// ============================================================================
// SECTION: Mode
// ============================================================================

/// Generator execution mode passed as `-mode=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeneratorMode {
    /// Apply fixes in place.
    #[default]
    Fix,
    /// Print generated files to stdout.
    Print,
    /// Print a diff of proposed changes.
    Diff,
}

impl GeneratorMode {
    /// Returns the flag value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fix => "fix",
            Self::Print => "print",
            Self::Diff => "diff",
        }
    }
}

// ============================================================================
// SECTION: Invocation
// ============================================================================

/// A fully specified generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorInvocation {
    /// Generator executable.
    pub executable: PathBuf,
    /// Repository root and working directory.
    pub repo_root: PathBuf,
    /// Build file name the generator writes.
    pub build_file_name: String,
    /// Execution mode.
    pub mode: GeneratorMode,
}

impl GeneratorInvocation {
    /// Returns the argument list: repo root, build file name, then mode.
    #[must_use]
    pub fn args(&self) -> Vec<OsString> {
        let mut repo_root = OsString::from("-repo_root=");
        repo_root.push(self.repo_root.as_os_str());
        vec![
            repo_root,
            OsString::from(format!("-build_file_name={}", self.build_file_name)),
            OsString::from(format!("-mode={}", self.mode.as_str())),
        ]
    }
}

/// Captured result of a successful generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOutput {
    /// Exit status.
    pub status: ExitStatus,
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
}

// ============================================================================
// SECTION: Execution
// ============================================================================

/// Runs the generator to completion, or until `timeout` expires.
///
/// # Errors
///
/// Returns [`RunnerError::Setup`] when the process cannot be spawned or
/// awaited, [`RunnerError::Timeout`] when the bounded wait expires, and
/// [`RunnerError::GeneratorExecution`] on a non-zero exit.
pub async fn run_generator(
    invocation: &GeneratorInvocation,
    timeout: Option<Duration>,
) -> Result<GeneratorOutput, RunnerError> {
    let executable = invocation.executable.display().to_string();
    let child = Command::new(&invocation.executable)
        .args(invocation.args())
        .current_dir(&invocation.repo_root)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|err| RunnerError::setup(format!("spawn generator {executable}"), err))?;
    debug!(executable = %executable, mode = invocation.mode.as_str(), "generator started");

    let waited = match timeout {
        Some(limit) => tokio::time::timeout(limit, child.wait_with_output()).await.map_err(|_| {
            RunnerError::Timeout {
                timeout: limit,
            }
        })?,
        None => child.wait_with_output().await,
    };
    let output = waited
        .map_err(|err| RunnerError::setup(format!("wait for generator {executable}"), err))?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    if !output.status.success() {
        return Err(RunnerError::GeneratorExecution {
            status: output.status,
            stdout,
            stderr,
        });
    }
    info!(executable = %executable, status = %output.status, "generator finished");
    Ok(GeneratorOutput {
        status: output.status,
        stdout,
        stderr,
    })
}
