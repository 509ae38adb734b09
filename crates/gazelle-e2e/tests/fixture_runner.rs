// crates/gazelle-e2e/tests/fixture_runner.rs
// ============================================================================
// Module: Fixture Runner Integration Tests
// Description: Full scenario runs against scripted generators.
// Purpose: Pin the outcome of every scenario path and the cleanup guarantee.
// Dependencies: gazelle-e2e, runfiles-locator, tempfile, tokio
// ============================================================================
//! ## Overview
//! Each test builds a runfiles tree with the real fixture, runs the scenario
//! inside a dedicated temp parent, and asserts the parent is empty afterwards.

#![cfg(unix)]
#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod helpers;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::time::Duration;

use gazelle_e2e::Comparison;
use gazelle_e2e::FixtureManifest;
use gazelle_e2e::FixtureRunner;
use gazelle_e2e::RunnerError;
use gazelle_e2e::RunnerOptions;
use helpers::RunfilesTree;
use helpers::fixture_dir;
use helpers::is_empty_dir;
use runfiles_locator::LocatorError;
use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn options(temp_root: &TempDir) -> RunnerOptions {
    RunnerOptions {
        namespace: Some("__main__".to_string()),
        timeout: Some(Duration::from_secs(20)),
        temp_root: Some(temp_root.path().to_path_buf()),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[tokio::test]
async fn golden_output_matches() {
    let tree = RunfilesTree::with_fixture();
    let generator = tree.golden_generator();
    let temp_root = TempDir::new().unwrap();
    let locator = tree.locator();
    let runner = FixtureRunner::new(&locator, FixtureManifest::gazelle_app(), options(&temp_root));

    let report = runner.run(&generator).await.unwrap();
    assert_eq!(report.comparison, Comparison::Match);
    assert!(report.generator_output.status.success());
    assert!(!report.workspace_root.exists());
    assert!(is_empty_dir(temp_root.path()));
}

#[tokio::test]
async fn generator_receives_repo_root_as_argument_and_cwd() {
    let tree = RunfilesTree::with_fixture();
    let log = tree.root().join("args.log");
    let generator = tree.recording_generator(&log);
    let temp_root = TempDir::new().unwrap();
    let locator = tree.locator();
    let runner = FixtureRunner::new(&locator, FixtureManifest::gazelle_app(), options(&temp_root));

    let report = runner.run(&generator).await.unwrap();
    let project_dir = report.workspace_root.join("gazelle_app");
    let recorded = fs::read_to_string(&log).unwrap();
    let lines: Vec<&str> = recorded.lines().collect();
    assert_eq!(lines.len(), 4, "{recorded}");
    assert_eq!(lines[0], format!("-repo_root={}", project_dir.display()));
    assert_eq!(lines[1], "-build_file_name=BUILD.bazel");
    assert_eq!(lines[2], "-mode=fix");
    assert!(!Path::new(lines[3]).exists(), "workspace must be gone after the run");
    assert!(lines[3].ends_with("/gazelle_app"));
}

#[tokio::test]
async fn changed_output_reports_a_diff() {
    let tree = RunfilesTree::with_fixture();
    let golden = fs::read_to_string(fixture_dir().join("BUILD.bazel.golden")).unwrap();
    let generator = tree.emitting_generator(&golden.replace("dart_library(\n", "dart_binary(\n"));
    let temp_root = TempDir::new().unwrap();
    let locator = tree.locator();
    let runner = FixtureRunner::new(&locator, FixtureManifest::gazelle_app(), options(&temp_root));

    let report = runner.run(&generator).await.unwrap();
    let diff = report.comparison.diff().expect("mismatch");
    assert!(diff.starts_with("--- BUILD.bazel.golden\n+++ BUILD.bazel\n"), "{diff}");
    assert!(diff.contains("-dart_library("), "{diff}");
    assert!(diff.contains("+dart_binary("), "{diff}");
    assert!(is_empty_dir(temp_root.path()));
}

#[tokio::test]
async fn missing_trailing_newline_is_a_mismatch() {
    let tree = RunfilesTree::with_fixture();
    let golden = fs::read_to_string(fixture_dir().join("BUILD.bazel.golden")).unwrap();
    let generator = tree.emitting_generator(golden.trim_end());
    let temp_root = TempDir::new().unwrap();
    let locator = tree.locator();
    let runner = FixtureRunner::new(&locator, FixtureManifest::gazelle_app(), options(&temp_root));

    let report = runner.run(&generator).await.unwrap();
    assert!(!report.comparison.is_match());
}

#[tokio::test]
async fn failing_generator_skips_comparison_and_keeps_streams() {
    let tree = RunfilesTree::with_fixture();
    let generator = tree.failing_generator();
    let temp_root = TempDir::new().unwrap();
    let locator = tree.locator();
    let runner = FixtureRunner::new(&locator, FixtureManifest::gazelle_app(), options(&temp_root));

    let err = runner.run(&generator).await.unwrap_err();
    match err {
        RunnerError::GeneratorExecution {
            status,
            stdout,
            stderr,
        } => {
            assert_eq!(status.code(), Some(3));
            assert_eq!(stdout, "partial stdout\n");
            assert_eq!(stderr, "fatal: bad pubspec\n");
        }
        other => panic!("expected generator failure, got {other:?}"),
    }
    assert!(is_empty_dir(temp_root.path()));
}

#[tokio::test]
async fn silent_generator_is_missing_output() {
    let tree = RunfilesTree::with_fixture();
    let generator = tree.silent_generator();
    let temp_root = TempDir::new().unwrap();
    let locator = tree.locator();
    let runner = FixtureRunner::new(&locator, FixtureManifest::gazelle_app(), options(&temp_root));

    let err = runner.run(&generator).await.unwrap_err();
    match &err {
        RunnerError::OutputMissing {
            path,
        } => assert!(path.ends_with("gazelle_app/BUILD.bazel")),
        other => panic!("expected missing output, got {other:?}"),
    }
    assert!(is_empty_dir(temp_root.path()));
}

#[tokio::test]
async fn hanging_generator_times_out() {
    let tree = RunfilesTree::with_fixture();
    let generator = tree.hanging_generator();
    let temp_root = TempDir::new().unwrap();
    let locator = tree.locator();
    let runner = FixtureRunner::new(
        &locator,
        FixtureManifest::gazelle_app(),
        RunnerOptions {
            timeout: Some(Duration::from_millis(300)),
            ..options(&temp_root)
        },
    );

    let err = runner.run(&generator).await.unwrap_err();
    assert!(matches!(err, RunnerError::Timeout { .. }), "{err:?}");
    assert!(is_empty_dir(temp_root.path()));
}

#[tokio::test]
async fn unknown_generator_fails_before_any_workspace_exists() {
    let tree = RunfilesTree::with_fixture();
    let temp_root = TempDir::new().unwrap();
    let locator = tree.locator();
    let runner = FixtureRunner::new(&locator, FixtureManifest::gazelle_app(), options(&temp_root));

    let err = runner.run("bin/no_such_gazelle").await.unwrap_err();
    match err {
        RunnerError::AssetNotFound(LocatorError::AssetNotFound {
            logical,
            ..
        }) => assert_eq!(logical, "bin/no_such_gazelle"),
        other => panic!("expected asset not found, got {other:?}"),
    }
    assert!(is_empty_dir(temp_root.path()));
}

#[tokio::test]
async fn missing_fixture_file_aborts_and_cleans_up() {
    let tree = RunfilesTree::with_fixture();
    let generator = tree.golden_generator();
    fs::remove_file(tree.main_path("gazelle_app/pub_deps.json")).unwrap();
    let temp_root = TempDir::new().unwrap();
    let locator = tree.locator();
    let runner = FixtureRunner::new(&locator, FixtureManifest::gazelle_app(), options(&temp_root));

    let err = runner.run(&generator).await.unwrap_err();
    assert!(err.to_string().contains("gazelle_app/pub_deps.json"), "{err}");
    assert!(is_empty_dir(temp_root.path()));
}

#[tokio::test]
async fn copied_fixture_is_byte_identical() {
    let tree = RunfilesTree::with_fixture();
    let snapshot = tree.root().join("snapshot");
    let generator = tree.script(
        "gazelle_snapshot",
        &format!(
            "for arg in \"$@\"; do case \"$arg\" in -repo_root=*) root=\"${{arg#-repo_root=}}\" ;; esac; done\ncp -R \"$root\" \"{snapshot}\"\ncp \"$root/BUILD.bazel.golden\" \"$root/BUILD.bazel\"\n",
            snapshot = snapshot.display()
        ),
    );
    let temp_root = TempDir::new().unwrap();
    let locator = tree.locator();
    let runner = FixtureRunner::new(&locator, FixtureManifest::gazelle_app(), options(&temp_root));

    runner.run(&generator).await.unwrap();
    for rel in helpers::FIXTURE_FILES {
        assert_eq!(
            fs::read(snapshot.join(rel)).unwrap(),
            fs::read(fixture_dir().join(rel)).unwrap(),
            "{rel}"
        );
    }
    assert!(!snapshot.join("BUILD.bazel").exists());
}
