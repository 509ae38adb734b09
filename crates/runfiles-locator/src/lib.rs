// crates/runfiles-locator/src/lib.rs
// ============================================================================
// Module: Runfiles Locator Library
// Description: Layered resolution of logical runfile paths to disk locations.
// Purpose: Find fixture and tool files regardless of how a test was packaged.
// Dependencies: thiserror, tracing, walkdir
// ============================================================================

//! ## Overview
//! Test rules expose their data files under different name-mangling schemes
//! depending on whether the test is a top-level target or lives in an
//! external repository. [`AssetLocator`] hides that by probing an ordered list
//! of [`ResolveStrategy`] implementations:
//!
//! 1. the logical path verbatim against the [`RunfilesIndex`],
//! 2. the path prefixed with the caller's namespace hint,
//! 3. the path prefixed with the default namespace,
//! 4. a recursive suffix search under the runfiles directory.
//!
//! Invariants:
//! - Resolution short-circuits on the first strategy that yields a path.
//! - Resolved paths are absolute and existed at lookup time.
//! - The recursive search never picks silently between duplicate matches.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod env;
pub mod error;
pub mod index;
pub mod locator;
pub mod path;
pub mod strategy;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use env::EnvError;
pub use env::RunfilesEnv;
pub use env::RunfilesVars;
pub use error::LocatorError;
pub use index::RunfilesIndex;
pub use locator::AssetLocator;
pub use locator::DEFAULT_NAMESPACE;
pub use locator::LocatorConfig;
pub use locator::ResolvedAsset;
pub use path::CandidateForm;
pub use path::LogicalPath;
pub use path::candidate_paths;
pub use path::standard_forms;
pub use strategy::IndexLookup;
pub use strategy::RecursiveSearch;
pub use strategy::ResolveStrategy;
