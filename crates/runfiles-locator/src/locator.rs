// crates/runfiles-locator/src/locator.rs
// ============================================================================
// Module: Asset Locator
// Description: Ordered fallback resolution from logical path to disk file.
// Purpose: Resolve runfiles without callers knowing the packaging scheme.
// Dependencies: tracing
// ============================================================================

//! ## Overview
//! [`AssetLocator`] owns an ordered list of [`ResolveStrategy`] values and
//! returns the first hit. [`LocatorConfig`] builds the standard list from the
//! environment: index lookups (verbatim, namespace hint, default namespace)
//! followed by the recursive search.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::env::RunfilesVars;
use crate::error::LocatorError;
use crate::index::RunfilesIndex;
use crate::index::absolutize;
use crate::path::LogicalPath;
use crate::path::standard_forms;
use crate::strategy::IndexLookup;
use crate::strategy::RecursiveSearch;
use crate::strategy::ResolveStrategy;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Namespace under which the main repository's runfiles live.
pub const DEFAULT_NAMESPACE: &str = "__main__";

/// Strategy label reported for absolute paths that already exist.
const ABSOLUTE_LABEL: &str = "absolute-path";

// ============================================================================
// SECTION: Config
// ============================================================================

/// Inputs for the standard strategy list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorConfig {
    /// Runtime asset index, when the packager provided one.
    pub index: Option<RunfilesIndex>,
    /// Namespace tried after the caller's hint.
    pub default_namespace: String,
    /// Root for the recursive-search fallback.
    pub search_root: Option<PathBuf>,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            index: None,
            default_namespace: DEFAULT_NAMESPACE.to_string(),
            search_root: None,
        }
    }
}

impl LocatorConfig {
    /// Builds a config from runfiles variables and the running executable.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError`] when a discovered manifest cannot be read.
    pub fn from_vars(
        vars: &RunfilesVars,
        executable: Option<&std::path::Path>,
    ) -> Result<Self, LocatorError> {
        Ok(Self {
            index: RunfilesIndex::discover(vars, executable)?,
            default_namespace: DEFAULT_NAMESPACE.to_string(),
            search_root: vars.runfiles_dir.clone(),
        })
    }

    /// Builds a config from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError`] when runfiles variables are invalid or a
    /// manifest cannot be read.
    pub fn from_env() -> Result<Self, LocatorError> {
        let vars = RunfilesVars::load()?;
        let executable = std::env::current_exe().ok();
        Self::from_vars(&vars, executable.as_deref())
    }
}

// ============================================================================
// SECTION: Resolved Asset
// ============================================================================

/// A logical path paired with the existing file that satisfies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAsset {
    /// Logical path requested by the caller.
    pub logical: String,
    /// Absolute physical path.
    pub path: PathBuf,
    /// Label of the strategy that produced the path.
    pub strategy: &'static str,
}

// ============================================================================
// SECTION: Locator
// ============================================================================

/// Ordered, short-circuiting runfile resolver.
pub struct AssetLocator {
    /// Strategies in priority order.
    strategies: Vec<Box<dyn ResolveStrategy>>,
}

impl AssetLocator {
    /// Builds the standard strategy list from `config`.
    #[must_use]
    pub fn new(config: LocatorConfig) -> Self {
        let mut strategies: Vec<Box<dyn ResolveStrategy>> = Vec::new();
        if let Some(index) = config.index {
            let index = Arc::new(index);
            for form in standard_forms(&config.default_namespace) {
                strategies.push(Box::new(IndexLookup::new(Arc::clone(&index), form)));
            }
        }
        if let Some(root) = config.search_root {
            strategies.push(Box::new(RecursiveSearch::new(root)));
        }
        Self::with_strategies(strategies)
    }

    /// Builds a locator from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError`] when the environment is invalid.
    pub fn from_env() -> Result<Self, LocatorError> {
        LocatorConfig::from_env().map(Self::new)
    }

    /// Builds a locator from an explicit strategy list.
    #[must_use]
    pub fn with_strategies(strategies: Vec<Box<dyn ResolveStrategy>>) -> Self {
        Self {
            strategies,
        }
    }

    /// Appends a strategy after the existing ones.
    pub fn push_strategy(&mut self, strategy: Box<dyn ResolveStrategy>) {
        self.strategies.push(strategy);
    }

    /// Returns strategy labels in priority order.
    #[must_use]
    pub fn strategy_labels(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|strategy| strategy.label()).collect()
    }

    /// Resolves `logical` using the optional namespace hint.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::InvalidLogicalPath`] for malformed input,
    /// [`LocatorError::AmbiguousAsset`] when the recursive search finds
    /// duplicates, and [`LocatorError::AssetNotFound`] when every strategy
    /// comes up empty.
    pub fn locate(&self, logical: &str, hint: Option<&str>) -> Result<ResolvedAsset, LocatorError> {
        let logical = LogicalPath::parse(logical)?;
        if logical.is_absolute() && logical.as_path().is_file() {
            return Ok(ResolvedAsset {
                logical: logical.to_string(),
                path: logical.as_path().to_path_buf(),
                strategy: ABSOLUTE_LABEL,
            });
        }
        let mut tried = Vec::with_capacity(self.strategies.len());
        for strategy in &self.strategies {
            if !strategy.applies(&logical, hint) {
                continue;
            }
            let label = strategy.label();
            tried.push(label.to_string());
            if let Some(path) = strategy.resolve(&logical, hint)? {
                debug!(logical = %logical, strategy = label, path = %path.display(), "runfile resolved");
                return Ok(ResolvedAsset {
                    logical: logical.to_string(),
                    path: absolutize(&path),
                    strategy: label,
                });
            }
        }
        Err(LocatorError::AssetNotFound {
            logical: logical.to_string(),
            tried,
        })
    }
}
