// crates/gazelle-e2e/src/report.rs
// ============================================================================
// Module: Run Report Artifacts
// Description: Summary and diff artifacts for a harness run.
// Purpose: Leave a deterministic record of each run for CI inspection.
// Dependencies: serde, serde_jcs
// ============================================================================

//! ## Overview
//! [`RunReporter`] writes `summary.json` (canonical JSON), `summary.md`, and,
//! for a golden mismatch, `golden.diff` into a report directory. A reporter
//! dropped without an explicit outcome records an `error` summary.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Summary file name.
const SUMMARY_JSON: &str = "summary.json";
/// Markdown summary file name.
const SUMMARY_MD: &str = "summary.md";
/// Diff artifact file name.
const DIFF_FILE: &str = "golden.diff";

/// Outcome labels recorded in summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Generated output matched the golden file.
    Pass,
    /// Generated output differed from the golden file.
    Mismatch,
    /// The run aborted with an error.
    Error,
}

impl RunStatus {
    /// Returns the stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Mismatch => "mismatch",
            Self::Error => "error",
        }
    }
}

/// Serialized run summary.
#[derive(Debug, Serialize)]
struct RunSummary {
    /// Fixture root of the scenario.
    scenario: String,
    /// Logical path of the generator.
    generator: String,
    /// Outcome.
    status: RunStatus,
    /// Start time in milliseconds since the epoch.
    started_at_ms: u128,
    /// End time in milliseconds since the epoch.
    ended_at_ms: u128,
    /// Elapsed milliseconds.
    duration_ms: u128,
    /// Free-form notes.
    notes: Vec<String>,
    /// Artifact file names written alongside the summary.
    artifacts: Vec<String>,
}

/// Milliseconds since the Unix epoch.
fn now_millis() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

// ============================================================================
// SECTION: Reporter
// ============================================================================

/// Writes run artifacts into a report directory.
#[derive(Debug)]
pub struct RunReporter {
    /// Report directory.
    root: PathBuf,
    /// Fixture root of the scenario.
    scenario: String,
    /// Logical path of the generator.
    generator: String,
    /// Start time in milliseconds since the epoch.
    started_at_ms: u128,
    /// Whether an outcome has been recorded.
    finalized: bool,
}

impl RunReporter {
    /// Creates the report directory and starts the clock.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the directory cannot be created.
    pub fn new(root: &Path, scenario: &str, generator: &str) -> io::Result<Self> {
        fs::create_dir_all(root)?;
        Ok(Self {
            root: root.to_path_buf(),
            scenario: scenario.to_string(),
            generator: generator.to_string(),
            started_at_ms: now_millis(),
            finalized: false,
        })
    }

    /// Returns the report directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Records a golden match.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when an artifact cannot be written.
    pub fn record_pass(&mut self) -> io::Result<()> {
        self.finish(RunStatus::Pass, vec!["generated output matches golden".to_string()], Vec::new())
    }

    /// Records a golden mismatch and writes the diff.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when an artifact cannot be written.
    pub fn record_mismatch(&mut self, diff: &str) -> io::Result<()> {
        fs::write(self.root.join(DIFF_FILE), diff.as_bytes())?;
        self.finish(
            RunStatus::Mismatch,
            vec!["generated output did not match golden".to_string()],
            vec![DIFF_FILE.to_string()],
        )
    }

    /// Records a fatal error.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when an artifact cannot be written.
    pub fn record_error(&mut self, message: &str) -> io::Result<()> {
        self.finish(RunStatus::Error, vec![message.to_string()], Vec::new())
    }

    /// Writes the summary files.
    fn finish(
        &mut self,
        status: RunStatus,
        notes: Vec<String>,
        extra: Vec<String>,
    ) -> io::Result<()> {
        let ended_at_ms = now_millis();
        let mut artifacts = vec![SUMMARY_JSON.to_string(), SUMMARY_MD.to_string()];
        artifacts.extend(extra);
        let summary = RunSummary {
            scenario: self.scenario.clone(),
            generator: self.generator.clone(),
            status,
            started_at_ms: self.started_at_ms,
            ended_at_ms,
            duration_ms: ended_at_ms.saturating_sub(self.started_at_ms),
            notes,
            artifacts,
        };
        let bytes = serde_jcs::to_vec(&summary).map_err(io::Error::other)?;
        fs::write(self.root.join(SUMMARY_JSON), bytes)?;
        fs::write(self.root.join(SUMMARY_MD), summary_markdown(&summary))?;
        self.finalized = true;
        Ok(())
    }
}

impl Drop for RunReporter {
    fn drop(&mut self) {
        if self.finalized {
            return;
        }
        let note = if std::thread::panicking() {
            "harness panicked before recording an outcome"
        } else {
            "harness exited without recording an outcome"
        };
        let _ = self.finish(RunStatus::Error, vec![note.to_string()], Vec::new());
    }
}

/// Renders the Markdown summary.
fn summary_markdown(summary: &RunSummary) -> String {
    let mut out = String::new();
    out.push_str("# Gazelle Generation Summary\n\n");
    out.push_str("## Status\n\n");
    let _ = writeln!(out, "- Scenario: {}", summary.scenario);
    let _ = writeln!(out, "- Generator: {}", summary.generator);
    let _ = writeln!(out, "- Status: {}", summary.status.as_str());
    let _ = writeln!(out, "- Duration (ms): {}", summary.duration_ms);
    out.push_str("\n## Notes\n\n");
    if summary.notes.is_empty() {
        out.push_str("- None\n");
    }
    for note in &summary.notes {
        let _ = writeln!(out, "- {note}");
    }
    out.push_str("\n## Artifacts\n\n");
    for artifact in &summary.artifacts {
        let _ = writeln!(out, "- {artifact}");
    }
    out
}
