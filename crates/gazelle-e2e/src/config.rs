// crates/gazelle-e2e/src/config.rs
// ============================================================================
// Module: Harness Environment
// Description: Environment-backed configuration for the generation harness.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: runfiles-locator, thiserror
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8, empty values, and malformed timeouts fail
//! closed. Runfiles discovery variables are read by `runfiles-locator`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use runfiles_locator::DEFAULT_NAMESPACE;
use runfiles_locator::EnvError;
use runfiles_locator::env::read_env_nonempty;
use thiserror::Error;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for harness configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessEnv {
    /// Namespace hint for runfile resolution.
    TestWorkspace,
    /// Parent directory for isolated workspaces.
    TestTmpdir,
    /// Optional generator timeout in seconds (positive integer).
    TimeoutSeconds,
    /// Optional directory for run summaries and diffs.
    ReportDir,
    /// Optional logical path of a scenario manifest.
    Scenario,
    /// Optional tracing filter directive.
    Log,
}

impl HarnessEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TestWorkspace => "TEST_WORKSPACE",
            Self::TestTmpdir => "TEST_TMPDIR",
            Self::TimeoutSeconds => "GAZELLE_E2E_TIMEOUT_SEC",
            Self::ReportDir => "GAZELLE_E2E_REPORT_DIR",
            Self::Scenario => "GAZELLE_E2E_SCENARIO",
            Self::Log => "GAZELLE_E2E_LOG",
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Variable was not valid UTF-8 or was empty.
    #[error(transparent)]
    Env(#[from] EnvError),
    /// Timeout was not a positive integer number of seconds.
    #[error("{name} must be a positive integer number of seconds")]
    InvalidTimeout {
        /// Variable name.
        name: &'static str,
    },
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed harness configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Namespace hint passed to the locator.
    pub namespace: String,
    /// Parent directory for isolated workspaces (system temp dir when unset).
    pub temp_root: Option<PathBuf>,
    /// Bounded wait for the generator; unbounded when unset.
    pub timeout: Option<Duration>,
    /// Directory receiving run artifacts.
    pub report_dir: Option<PathBuf>,
    /// Logical path of a scenario manifest replacing the built-in one.
    pub scenario: Option<String>,
    /// Tracing filter directive.
    pub log_filter: Option<String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            temp_root: None,
            timeout: None,
            report_dir: None,
            scenario: None,
            log_filter: None,
        }
    }
}

impl HarnessConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an environment value is not valid UTF-8,
    /// is empty, or fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let namespace = read_env_nonempty(HarnessEnv::TestWorkspace.as_str())?
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
        let temp_root = read_env_nonempty(HarnessEnv::TestTmpdir.as_str())?.map(PathBuf::from);
        let timeout = read_env_nonempty(HarnessEnv::TimeoutSeconds.as_str())?
            .map(|value| parse_timeout_seconds(HarnessEnv::TimeoutSeconds.as_str(), &value))
            .transpose()?;
        let report_dir = read_env_nonempty(HarnessEnv::ReportDir.as_str())?.map(PathBuf::from);
        let scenario = read_env_nonempty(HarnessEnv::Scenario.as_str())?;
        let log_filter = read_env_nonempty(HarnessEnv::Log.as_str())?;
        Ok(Self {
            namespace,
            temp_root,
            timeout,
            report_dir,
            scenario,
            log_filter,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses a positive timeout value from an environment variable string.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidTimeout`] when the value is non-numeric or
/// zero.
fn parse_timeout_seconds(name: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidTimeout {
        name,
    })?;
    if secs == 0 {
        return Err(ConfigError::InvalidTimeout {
            name,
        });
    }
    Ok(Duration::from_secs(secs))
}
