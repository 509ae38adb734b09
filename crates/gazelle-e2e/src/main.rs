// crates/gazelle-e2e/src/main.rs
// ============================================================================
// Module: Gazelle Generation Test Entry Point
// Description: Command-line driver for the golden generation scenario.
// Purpose: Run one fixture against a generator and map the outcome to an exit code.
// Dependencies: clap, gazelle-e2e, runfiles-locator, tokio, tracing
// ============================================================================

//! ## Overview
//! `gazelle-generation-test <generator_executable>` resolves the generator
//! through the runfiles locator, runs the fixture scenario, and exits 0 on a
//! golden match. Mismatches, usage errors, and every failure exit 1 with
//! diagnostics on stderr. `SIGINT` and `SIGTERM` abort the run after the
//! workspace is removed and the generator is killed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ffi::OsString;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use gazelle_e2e::Comparison;
use gazelle_e2e::FixtureManifest;
use gazelle_e2e::FixtureRunner;
use gazelle_e2e::HarnessConfig;
use gazelle_e2e::RunReporter;
use gazelle_e2e::RunnerError;
use gazelle_e2e::RunnerOptions;
use gazelle_e2e::logging;
use runfiles_locator::AssetLocator;
use thiserror::Error;
#[cfg(unix)]
use tokio::signal::unix::Signal;
#[cfg(unix)]
use tokio::signal::unix::SignalKind;
#[cfg(unix)]
use tokio::signal::unix::signal;
use tracing::warn;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Fallback program name for usage text.
const DEFAULT_PROGRAM: &str = "gazelle-generation-test";

/// Header printed before a golden diff.
const MISMATCH_HEADER: &str = "Gazelle output did not match golden BUILD file:";

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "gazelle-generation-test", disable_version_flag = true)]
struct Cli {
    /// Logical runfiles path of the generator executable under test.
    generator_executable: String,
}

/// CLI error wrapper for user-facing messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.kind() == ErrorKind::DisplayHelp => {
            let _ = write_stdout(&err.render().to_string());
            return ExitCode::SUCCESS;
        }
        Err(_) => return emit_error(&format!("usage: {} <generator_executable>", program_name())),
    };
    match run(cli).await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Loads configuration, runs the scenario, and reports the outcome.
async fn run(cli: Cli) -> CliResult<ExitCode> {
    let config = HarnessConfig::load().map_err(|err| CliError::new(err.to_string()))?;
    logging::init(config.log_filter.as_deref()).map_err(CliError::new)?;
    let locator = AssetLocator::from_env().map_err(|err| CliError::new(err.to_string()))?;
    let manifest = load_manifest(&locator, &config)?;

    let runner = FixtureRunner::new(
        &locator,
        manifest,
        RunnerOptions {
            namespace: Some(config.namespace.clone()),
            timeout: config.timeout,
            temp_root: config.temp_root.clone(),
        },
    );
    let mut reporter = config.report_dir.as_deref().and_then(|dir| {
        RunReporter::new(dir, &runner.manifest().fixture_root, &cli.generator_executable)
            .inspect_err(|err| warn!(error = %err, "report directory unavailable"))
            .ok()
    });

    let mut shutdown = ShutdownSignal::install()
        .map_err(|err| CliError::new(format!("failed to install signal handlers: {err}")))?;
    // Dropping the run future removes the workspace and kills the generator.
    let outcome = tokio::select! {
        outcome = runner.run(&cli.generator_executable) => outcome,
        name = shutdown.recv() => {
            let message = format!("interrupted by {name}; workspace removed");
            record(reporter.as_mut(), |reporter| reporter.record_error(&message));
            return Err(CliError::new(message));
        }
    };

    match outcome {
        Ok(report) => match report.comparison {
            Comparison::Match => {
                record(reporter.as_mut(), |reporter| reporter.record_pass());
                Ok(ExitCode::SUCCESS)
            }
            Comparison::Mismatch {
                diff,
            } => {
                write_stderr(&format!("{MISMATCH_HEADER}\n{diff}"))
                    .map_err(|err| CliError::new(format!("failed to write stderr: {err}")))?;
                record(reporter.as_mut(), |reporter| reporter.record_mismatch(&diff));
                Ok(ExitCode::FAILURE)
            }
        },
        Err(err) => {
            if let RunnerError::GeneratorExecution {
                stdout,
                stderr,
                ..
            } = &err
            {
                let _ = write_stderr(stdout);
                let _ = write_stderr(stderr);
            }
            let message = err.to_string();
            record(reporter.as_mut(), |reporter| reporter.record_error(&message));
            Err(CliError::new(message))
        }
    }
}

// ============================================================================
// SECTION: Signals
// ============================================================================

/// Termination signals that abort a run.
struct ShutdownSignal {
    /// `SIGINT` stream.
    #[cfg(unix)]
    interrupt: Signal,
    /// `SIGTERM` stream.
    #[cfg(unix)]
    terminate: Signal,
}

impl ShutdownSignal {
    /// Registers handlers before the run starts.
    fn install() -> std::io::Result<Self> {
        Ok(Self {
            #[cfg(unix)]
            interrupt: signal(SignalKind::interrupt())?,
            #[cfg(unix)]
            terminate: signal(SignalKind::terminate())?,
        })
    }

    /// Waits for the first termination signal and returns its name.
    #[cfg(unix)]
    async fn recv(&mut self) -> &'static str {
        tokio::select! {
            _ = self.interrupt.recv() => "SIGINT",
            _ = self.terminate.recv() => "SIGTERM",
        }
    }

    /// Waits for Ctrl-C; a failed registration never fires.
    #[cfg(not(unix))]
    async fn recv(&mut self) -> &'static str {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "Ctrl-C handler unavailable");
            std::future::pending::<()>().await;
        }
        "Ctrl-C"
    }
}

/// Resolves the scenario manifest, falling back to the built-in scenario.
fn load_manifest(locator: &AssetLocator, config: &HarnessConfig) -> CliResult<FixtureManifest> {
    let Some(scenario) = &config.scenario else {
        return Ok(FixtureManifest::gazelle_app());
    };
    let asset = locator
        .locate(scenario, Some(&config.namespace))
        .map_err(|err| CliError::new(RunnerError::from(err).to_string()))?;
    FixtureManifest::from_toml_file(&asset.path).map_err(|err| CliError::new(err.to_string()))
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Applies a reporter action, logging artifact failures without failing the run.
fn record(
    reporter: Option<&mut RunReporter>,
    action: impl FnOnce(&mut RunReporter) -> std::io::Result<()>,
) {
    if let Some(reporter) = reporter
        && let Err(err) = action(&mut *reporter)
    {
        warn!(root = %reporter.root().display(), error = %err, "failed to write run report");
    }
}

/// Returns the invoked program name for usage text.
fn program_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .and_then(|arg0| Path::new(arg0).file_name().map(OsString::from))
        .map_or_else(|| DEFAULT_PROGRAM.to_string(), |name| name.to_string_lossy().into_owned())
}

/// Writes raw text to stdout.
fn write_stdout(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(message.as_bytes())
}

/// Writes raw text to stderr.
fn write_stderr(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    stderr.write_all(message.as_bytes())
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
