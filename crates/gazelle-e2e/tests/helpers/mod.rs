// crates/gazelle-e2e/tests/helpers/mod.rs
// ============================================================================
// Module: Harness Test Helpers
// Description: Runfiles trees and scripted stand-in generators.
// Purpose: Exercise the harness end to end without a real Gazelle binary.
// Dependencies: runfiles-locator, tempfile
// ============================================================================

//! ## Overview
//! [`RunfilesTree`] lays out a directory-style runfiles tree holding the real
//! `gazelle_app` fixture under the `__main__` namespace, plus POSIX shell
//! scripts that play the generator.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::path::PathBuf;

use runfiles_locator::AssetLocator;
use runfiles_locator::DEFAULT_NAMESPACE;
use runfiles_locator::LocatorConfig;
use runfiles_locator::RunfilesIndex;
use tempfile::TempDir;

/// Files of the checked-in fixture.
pub const FIXTURE_FILES: [&str; 5] =
    ["BUILD.bazel.golden", "MODULE.bazel", "lib/main.dart", "pub_deps.json", "pubspec.yaml"];

/// Argument parsing shared by every fake generator.
const PARSE_ARGS: &str = r#"root=""
name=""
for arg in "$@"; do
  case "$arg" in
    -repo_root=*) root="${arg#-repo_root=}" ;;
    -build_file_name=*) name="${arg#-build_file_name=}" ;;
  esac
done
"#;

/// Returns the checked-in fixture directory.
pub fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/gazelle_app")
}

/// Directory-style runfiles tree for one test.
pub struct RunfilesTree {
    dir: TempDir,
}

impl RunfilesTree {
    /// Creates a tree holding the fixture at `__main__/gazelle_app/`.
    pub fn with_fixture() -> Self {
        let dir = TempDir::new().expect("runfiles tempdir");
        let tree = Self {
            dir,
        };
        for rel in FIXTURE_FILES {
            let dest = tree.main_path(&format!("gazelle_app/{rel}"));
            fs::create_dir_all(dest.parent().expect("parent")).expect("create fixture dir");
            fs::copy(fixture_dir().join(rel), &dest).expect("copy fixture file");
        }
        tree
    }

    /// Returns the runfiles root.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Returns the physical path of `rel` inside the `__main__` namespace.
    pub fn main_path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(DEFAULT_NAMESPACE).join(rel)
    }

    /// Builds a locator over the tree with the recursive fallback enabled.
    pub fn locator(&self) -> AssetLocator {
        AssetLocator::new(LocatorConfig {
            index: Some(RunfilesIndex::from_directory(self.root())),
            default_namespace: DEFAULT_NAMESPACE.to_string(),
            search_root: Some(self.root().to_path_buf()),
        })
    }

    /// Writes an executable script at `__main__/bin/<name>`; returns its
    /// logical path relative to the namespace.
    pub fn script(&self, name: &str, body: &str) -> String {
        let rel = format!("bin/{name}");
        let path = self.main_path(&rel);
        fs::create_dir_all(path.parent().expect("parent")).expect("create bin dir");
        fs::write(&path, format!("#!/bin/sh\n{body}")).expect("write script");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod script");
        rel
    }

    /// Generator that copies the golden file into the build file.
    pub fn golden_generator(&self) -> String {
        self.script(
            "gazelle_golden",
            &format!("{PARSE_ARGS}cp \"$root/BUILD.bazel.golden\" \"$root/$name\"\n"),
        )
    }

    /// Generator that writes `contents` into the build file.
    pub fn emitting_generator(&self, contents: &str) -> String {
        let source = self.root().join("emitted.txt");
        fs::write(&source, contents).expect("write emitted content");
        self.script(
            "gazelle_emit",
            &format!("{PARSE_ARGS}cat \"{}\" > \"$root/$name\"\n", source.display()),
        )
    }

    /// Generator that records its arguments and working directory to `log`.
    pub fn recording_generator(&self, log: &Path) -> String {
        self.script(
            "gazelle_record",
            &format!(
                "printf '%s\\n' \"$@\" > \"{log}\"\npwd >> \"{log}\"\n{PARSE_ARGS}cp \"$root/BUILD.bazel.golden\" \"$root/$name\"\n",
                log = log.display()
            ),
        )
    }

    /// Generator that prints to both streams and exits 3.
    pub fn failing_generator(&self) -> String {
        self.script("gazelle_fail", "echo 'partial stdout'\necho 'fatal: bad pubspec' >&2\nexit 3\n")
    }

    /// Generator that succeeds without writing anything.
    pub fn silent_generator(&self) -> String {
        self.script("gazelle_silent", "exit 0\n")
    }

    /// Generator that never finishes on its own. It touches
    /// [`RunfilesTree::started_marker`] before blocking.
    pub fn hanging_generator(&self) -> String {
        self.script(
            "gazelle_hang",
            &format!(": > \"{}\"\nexec sleep 30\n", self.started_marker().display()),
        )
    }

    /// File created once the hanging generator is running.
    pub fn started_marker(&self) -> PathBuf {
        self.root().join("generator_started")
    }
}

/// Returns true when `dir` has no entries.
pub fn is_empty_dir(dir: &Path) -> bool {
    fs::read_dir(dir).expect("read dir").next().is_none()
}
