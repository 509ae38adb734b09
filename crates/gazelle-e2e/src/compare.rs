// crates/gazelle-e2e/src/compare.rs
// ============================================================================
// Module: Golden Comparison
// Description: Exact comparison of generated and golden build files.
// Purpose: Produce a unified diff when the generator output drifts.
// Dependencies: similar
// ============================================================================

//! ## Overview
//! Content is compared byte for byte with no whitespace, line-ending, or
//! trailing-newline normalization. On mismatch a unified diff is rendered
//! with the expected file labeled first.

use similar::TextDiff;

/// Lines of context around each hunk.
const CONTEXT_RADIUS: usize = 3;

/// Terminal outcome of a golden comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    /// Generated content equals the golden content.
    Match,
    /// Generated content differs from the golden content.
    Mismatch {
        /// Unified diff from expected to actual.
        diff: String,
    },
}

impl Comparison {
    /// Returns true for [`Comparison::Match`].
    #[must_use]
    pub const fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }

    /// Returns the diff text for a mismatch.
    #[must_use]
    pub fn diff(&self) -> Option<&str> {
        match self {
            Self::Match => None,
            Self::Mismatch {
                diff,
            } => Some(diff),
        }
    }
}

/// Compares `expected` with `actual` exactly.
#[must_use]
pub fn compare_outputs(
    expected: &[u8],
    actual: &[u8],
    expected_label: &str,
    actual_label: &str,
) -> Comparison {
    if expected == actual {
        return Comparison::Match;
    }
    let expected_text = String::from_utf8_lossy(expected);
    let actual_text = String::from_utf8_lossy(actual);
    let mut diff = TextDiff::from_lines(&*expected_text, &*actual_text)
        .unified_diff()
        .context_radius(CONTEXT_RADIUS)
        .header(expected_label, actual_label)
        .to_string();
    if diff.is_empty() {
        // Differing bytes that decode to identical lossy text.
        diff = format!("--- {expected_label}\n+++ {actual_label}\nBinary contents differ\n");
    }
    Comparison::Mismatch {
        diff,
    }
}
