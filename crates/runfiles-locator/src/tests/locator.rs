// crates/runfiles-locator/src/tests/locator.rs
// ============================================================================
// Module: Asset Locator Tests
// Description: Strategy ordering, fallbacks, and failure diagnostics.
// Purpose: Keep the first-hit-wins contract deterministic.
// Dependencies: runfiles-locator, tempfile
// ============================================================================

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::error::LocatorError;
use crate::index::RunfilesIndex;
use crate::locator::AssetLocator;
use crate::locator::LocatorConfig;
use crate::path::LogicalPath;
use crate::strategy::ResolveStrategy;

fn touch(root: &TempDir, rel: &str) -> PathBuf {
    let path = root.path().join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, rel.as_bytes()).unwrap();
    path
}

fn directory_locator(root: &TempDir, search: bool) -> AssetLocator {
    AssetLocator::new(LocatorConfig {
        index: Some(RunfilesIndex::from_directory(root.path())),
        search_root: search.then(|| root.path().to_path_buf()),
        ..LocatorConfig::default()
    })
}

#[test]
fn verbatim_match_beats_namespace_hint() {
    let dir = TempDir::new().unwrap();
    let verbatim = touch(&dir, "gazelle_app/pubspec.yaml");
    touch(&dir, "ws/gazelle_app/pubspec.yaml");
    let locator = directory_locator(&dir, false);
    let asset = locator.locate("gazelle_app/pubspec.yaml", Some("ws")).unwrap();
    assert_eq!(asset.path, verbatim);
    assert_eq!(asset.strategy, "runfiles-verbatim");
}

#[test]
fn namespace_hint_beats_default_namespace() {
    let dir = TempDir::new().unwrap();
    let hinted = touch(&dir, "ws/gazelle_app/pubspec.yaml");
    touch(&dir, "__main__/gazelle_app/pubspec.yaml");
    let locator = directory_locator(&dir, false);
    let asset = locator.locate("gazelle_app/pubspec.yaml", Some("ws")).unwrap();
    assert_eq!(asset.path, hinted);
    assert_eq!(asset.strategy, "runfiles-namespace-hint");
}

#[test]
fn default_namespace_is_tried_without_hint() {
    let dir = TempDir::new().unwrap();
    let fallback = touch(&dir, "__main__/gazelle_app/MODULE.bazel");
    let locator = directory_locator(&dir, false);
    let asset = locator.locate("gazelle_app/MODULE.bazel", None).unwrap();
    assert_eq!(asset.path, fallback);
    assert_eq!(asset.strategy, "runfiles-default-namespace");
    assert_eq!(asset.logical, "gazelle_app/MODULE.bazel");
}

#[test]
fn recursive_search_is_last_resort() {
    let dir = TempDir::new().unwrap();
    let nested = touch(&dir, "external/rules_flutter~/gazelle_app/lib/main.dart");
    let locator = directory_locator(&dir, true);
    let asset = locator.locate("gazelle_app/lib/main.dart", Some("ws")).unwrap();
    assert_eq!(asset.path, nested);
    assert_eq!(asset.strategy, "recursive-search");
}

#[test]
fn recursive_search_matches_whole_components() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "x/not_gazelle_app/pubspec.yaml");
    let locator = directory_locator(&dir, true);
    let err = locator.locate("gazelle_app/pubspec.yaml", None).unwrap_err();
    assert!(matches!(err, LocatorError::AssetNotFound { .. }));
}

#[test]
fn recursive_search_rejects_duplicates() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "a/gazelle_app/pubspec.yaml");
    touch(&dir, "b/gazelle_app/pubspec.yaml");
    let locator = directory_locator(&dir, true);
    match locator.locate("gazelle_app/pubspec.yaml", None).unwrap_err() {
        LocatorError::AmbiguousAsset {
            logical,
            matches,
        } => {
            assert_eq!(logical, "gazelle_app/pubspec.yaml");
            assert_eq!(matches.len(), 2);
            assert!(matches[0].starts_with(dir.path().join("a")));
        }
        other => panic!("expected ambiguity, got {other}"),
    }
}

#[test]
fn not_found_reports_logical_path_and_strategies() {
    let dir = TempDir::new().unwrap();
    let locator = directory_locator(&dir, true);
    match locator.locate("gazelle_app/pub_deps.json", Some("ws")).unwrap_err() {
        LocatorError::AssetNotFound {
            logical,
            tried,
        } => {
            assert_eq!(logical, "gazelle_app/pub_deps.json");
            assert_eq!(
                tried,
                vec![
                    "runfiles-verbatim",
                    "runfiles-namespace-hint",
                    "runfiles-default-namespace",
                    "recursive-search",
                ]
            );
        }
        other => panic!("expected not found, got {other}"),
    }
}

#[test]
fn hint_equal_to_default_namespace_is_tried_once() {
    let dir = TempDir::new().unwrap();
    let hinted = touch(&dir, "__main__/gazelle_app/MODULE.bazel");
    let locator = directory_locator(&dir, false);
    let asset = locator.locate("gazelle_app/MODULE.bazel", Some("__main__")).unwrap();
    assert_eq!(asset.path, hinted);
    assert_eq!(asset.strategy, "runfiles-namespace-hint");

    match locator.locate("gazelle_app/pub_deps.json", Some("__main__")).unwrap_err() {
        LocatorError::AssetNotFound {
            tried,
            ..
        } => assert_eq!(tried, vec!["runfiles-verbatim", "runfiles-namespace-hint"]),
        other => panic!("expected not found, got {other}"),
    }
}

#[test]
fn directories_are_never_resolved() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "__main__/gazelle_app/lib/main.dart");
    let locator = directory_locator(&dir, true);
    let err = locator.locate("gazelle_app/lib", Some("__main__")).unwrap_err();
    assert!(matches!(err, LocatorError::AssetNotFound { .. }), "{err}");
}

#[test]
fn empty_locator_only_accepts_existing_absolute_paths() {
    let dir = TempDir::new().unwrap();
    let real = touch(&dir, "tool");
    let locator = AssetLocator::new(LocatorConfig::default());
    assert!(locator.strategy_labels().is_empty());
    let asset = locator.locate(real.to_str().unwrap(), None).unwrap();
    assert_eq!(asset.path, real);
    let missing = dir.path().join("missing");
    assert!(locator.locate(missing.to_str().unwrap(), None).is_err());
}

struct FixedStrategy(PathBuf);

impl ResolveStrategy for FixedStrategy {
    fn label(&self) -> &'static str {
        "fixed"
    }

    fn resolve(
        &self,
        _logical: &LogicalPath,
        _hint: Option<&str>,
    ) -> Result<Option<PathBuf>, LocatorError> {
        Ok(Some(self.0.clone()))
    }
}

#[test]
fn appended_strategies_run_after_builtin_ones() {
    let dir = TempDir::new().unwrap();
    let verbatim = touch(&dir, "tool");
    let other = touch(&dir, "other/tool");
    let mut locator = directory_locator(&dir, false);
    locator.push_strategy(Box::new(FixedStrategy(other.clone())));
    assert_eq!(locator.locate("tool", None).unwrap().path, verbatim);
    assert_eq!(locator.locate("unknown", None).unwrap().path, other);
    assert_eq!(locator.strategy_labels().last(), Some(&"fixed"));
}
