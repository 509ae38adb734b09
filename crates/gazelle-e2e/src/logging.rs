// crates/gazelle-e2e/src/logging.rs
// ============================================================================
// Module: Harness Logging
// Description: tracing subscriber setup for the harness binary.
// Purpose: Route structured diagnostics to stderr behind an env filter.
// Dependencies: tracing-subscriber
// ============================================================================

//! Installs a stderr `fmt` subscriber. The filter comes from
//! `GAZELLE_E2E_LOG` and defaults to [`DEFAULT_LOG_FILTER`].

use tracing_subscriber::EnvFilter;

/// Filter used when no directive is configured.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns a message when the directive is invalid or a subscriber is
/// already installed.
pub fn init(directive: Option<&str>) -> Result<(), String> {
    let filter = EnvFilter::try_new(directive.unwrap_or(DEFAULT_LOG_FILTER))
        .map_err(|err| format!("invalid log filter: {err}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| format!("failed to install log subscriber: {err}"))
}
