//! Text normalization for model output.
//!
//! Pure functions that flatten whatever the model produced into a single
//! plain paragraph and hold it to the character budget. None of these can
//! fail: empty input and a zero budget simply produce empty (or near-empty)
//! output.

use lazy_static::lazy_static;
use regex::Regex;

/// Lines containing any of these (case-insensitive) are model meta-commentary
const DISCLAIMER_MARKERS: [&str; 4] = ["rewrite", "rewriting", "disclaimer", "the article"];

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
    /// Bullet, enumeration or code fence at the very start of a line
    static ref LEADING_MARKER: Regex = Regex::new(r"^(?:[*-]\s?|\d+\.\s?|\d+\)\s?|```)").unwrap();
    /// Whole-text scan; deliberately not line-anchored
    static ref STRUCTURE_HINT: Regex = Regex::new(r"\*|-|\d\.").unwrap();
}

/// Whether a cleaned first-pass summary still looks like a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Structure {
    /// Bullets, dashes or enumerations found; ask the model again
    NeedsRewrite,
    AcceptableAsIs,
}

impl Structure {
    /// Scan the whole text for `*`, `-` or a digit followed by `.`.
    ///
    /// This is coarser than [`strip_structural_markup`]: an ordinary hyphen in
    /// prose ("state-of-the-art") or a decimal number is enough to trigger a
    /// rewrite.
    pub fn detect(text: &str) -> Self {
        if STRUCTURE_HINT.is_match(text) {
            Structure::NeedsRewrite
        } else {
            Structure::AcceptableAsIs
        }
    }
}

/// A character budget for the final summary.
///
/// Built from a signed count so that zero or negative input from the command
/// line degrades to an empty budget instead of wrapping around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SummaryBudget(usize);

impl SummaryBudget {
    pub fn new(chars: usize) -> Self {
        Self(chars)
    }

    pub fn chars(self) -> usize {
        self.0
    }
}

impl From<i64> for SummaryBudget {
    fn from(value: i64) -> Self {
        Self(usize::try_from(value).unwrap_or(0))
    }
}

impl std::fmt::Display for SummaryBudget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Drop every line that mentions rewriting, disclaimers or "the article",
/// then flatten what is left into one paragraph.
///
/// Whole lines are dropped; a marker inside a line that is otherwise kept is
/// not redacted.
pub fn remove_disclaimer_lines(text: &str) -> String {
    let kept: Vec<&str> = text
        .lines()
        .filter(|line| {
            let lower = line.trim().to_lowercase();
            !DISCLAIMER_MARKERS
                .iter()
                .any(|marker| lower.contains(marker))
        })
        .collect();

    collapse_whitespace(&kept.join(" "))
}

/// Remove line-leading bullets (`*`, `-`), enumerations (`1.`, `2)`) and code
/// fences, then flatten into one paragraph.
///
/// Markers in the middle of a line are left alone.
pub fn strip_structural_markup(text: &str) -> String {
    let kept: Vec<&str> = text
        .lines()
        .map(strip_leading_markers)
        .filter(|line| !line.is_empty())
        .collect();

    collapse_whitespace(&kept.join(" "))
}

/// Hold `text` to `budget` characters.
///
/// Text already within budget is returned untouched. Otherwise the text is
/// cut at `budget` characters, trailing whitespace removed, and a period
/// appended if the cut did not land on one, so the result may be one
/// character over budget.
pub fn enforce_character_limit(text: &str, budget: SummaryBudget) -> String {
    let limit = budget.chars();
    if text.chars().count() <= limit {
        return text.to_string();
    }

    let mut truncated: String = text.chars().take(limit).collect();
    truncated.truncate(truncated.trim_end().len());
    if !truncated.ends_with('.') {
        truncated.push('.');
    }
    truncated
}

/// Trim and strip leading markers until none is left (`"- 1. item"` -> `"item"`).
fn strip_leading_markers(line: &str) -> &str {
    let mut current = line.trim();
    while let Some(found) = LEADING_MARKER.find(current) {
        current = current[found.end()..].trim();
    }
    current
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}
