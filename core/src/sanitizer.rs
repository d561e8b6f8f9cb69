/// Key-segment sanitizer
/// Normalizes a raw segment into a safe identifier and reports whether
/// anything changed.
use crate::reserved::is_reserved;
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));
static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9_]").expect("valid disallowed-char regex"));
static UNDERSCORE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_{2,}").expect("valid underscore-run regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedSegment {
    pub result: String,
    /// True iff the result differs from the untouched input
    pub changed: bool,
}

/// Sanitize one key segment. Total: every input produces a result, an
/// empty input becomes `fix_`.
///
/// Steps, in fixed order: lowercase, whitespace runs to a single
/// underscore, strip characters outside `[a-z0-9_]`, collapse repeated
/// underscores, trim edge underscores. An empty or digit-leading result
/// gets a `fix_` prefix; a reserved identifier gets `common_fix_`.
pub fn sanitize(segment: &str) -> SanitizedSegment {
    let lowered = segment.to_lowercase();
    let underscored = WHITESPACE_RUN.replace_all(&lowered, "_");
    let stripped = DISALLOWED.replace_all(&underscored, "");
    let collapsed = UNDERSCORE_RUN.replace_all(&stripped, "_");
    let trimmed = collapsed.trim_matches('_');

    let mut result = if trimmed.is_empty() || trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        format!("fix_{}", trimmed)
    } else {
        trimmed.to_string()
    };
    if is_reserved(&result) {
        result = format!("common_fix_{}", result);
    }

    let changed = result != segment;
    SanitizedSegment { result, changed }
}
