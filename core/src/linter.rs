/// Key-path linting over the segment sanitizer.
/// Only the last path segment is checked; ancestor segments are kept
/// verbatim.
use crate::model::{FlatRow, KeyIssue};
use crate::sanitizer::sanitize;

/// Lint one dotted key path. Returns `None` when the last segment is
/// already safe.
pub fn analyze_key_path(key_path: &str) -> Option<KeyIssue> {
    let (parents, last) = match key_path.rfind('.') {
        Some(idx) => (&key_path[..idx], &key_path[idx + 1..]),
        None => ("", key_path),
    };

    let outcome = sanitize(last);
    if !outcome.changed {
        return None;
    }

    let fixed_path = if parents.is_empty() {
        outcome.result.clone()
    } else {
        format!("{}.{}", parents, outcome.result)
    };

    Some(KeyIssue {
        original: last.to_string(),
        suggested: outcome.result,
        key_path: fixed_path,
    })
}

/// Lint a row set, preserving row iteration order.
pub fn analyze_rows(rows: &[FlatRow]) -> Vec<KeyIssue> {
    rows.iter()
        .filter_map(|row| analyze_key_path(&row.key_path))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_path_yields_nothing() {
        assert!(analyze_key_path("a.b.brand_primary").is_none());
    }

    #[test]
    fn reserved_last_segment_is_flagged() {
        let issue = analyze_key_path("group.type").unwrap();
        assert_eq!(issue.original, "type");
        assert_eq!(issue.suggested, "common_fix_type");
        assert_eq!(issue.key_path, "group.common_fix_type");
    }

    #[test]
    fn ancestors_are_never_touched() {
        // "Theme Colors" would itself need fixing, but only the last
        // segment is in scope
        let issue = analyze_key_path("Theme Colors.Primary Color").unwrap();
        assert_eq!(issue.key_path, "Theme Colors.primary_color");
    }

    #[test]
    fn single_segment_path_is_supported() {
        let issue = analyze_key_path("Button Label").unwrap();
        assert_eq!(issue.original, "Button Label");
        assert_eq!(issue.key_path, "button_label");
    }

    #[test]
    fn rows_are_linted_in_iteration_order() {
        let rows = vec![
            FlatRow::new("a.ok_segment"),
            FlatRow::new("b.Bad Segment"),
            FlatRow::new("c.value"),
        ];
        let issues = analyze_rows(&rows);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].key_path, "b.bad_segment");
        assert_eq!(issues[1].key_path, "c.common_fix_value");
    }
}
