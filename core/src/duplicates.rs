/// Cross-row duplicate-value detection, per language.
/// Stateless: recomputed from scratch on every call.
use crate::model::{DuplicateGroup, FlatRow, Language};
use std::collections::{HashMap, HashSet};

/// Group rows sharing an identical value within one language. Empty and
/// whitespace-only values are ignored; matching is exact, with no
/// normalization. Groups come out in language order, then by first
/// occurrence of the value across row iteration order.
pub fn detect_duplicates(rows: &[FlatRow]) -> Vec<DuplicateGroup> {
    let mut groups = Vec::new();
    for language in Language::ALL {
        let mut first_seen: Vec<String> = Vec::new();
        let mut paths_by_value: HashMap<String, Vec<String>> = HashMap::new();

        for row in rows {
            let Some(value) = row.value(language) else {
                continue;
            };
            if value.trim().is_empty() {
                continue;
            }
            if !paths_by_value.contains_key(value) {
                first_seen.push(value.to_string());
            }
            paths_by_value
                .entry(value.to_string())
                .or_default()
                .push(row.key_path.clone());
        }

        for value in first_seen {
            if let Some(paths) = paths_by_value.remove(&value) {
                if paths.len() > 1 {
                    groups.push(DuplicateGroup {
                        language,
                        value,
                        key_paths: paths,
                    });
                }
            }
        }
    }
    groups
}

/// Caller-side suppression set for acknowledged duplicate groups,
/// keyed by (language, value). The detector itself never consults it.
#[derive(Debug, Clone, Default)]
pub struct DuplicateMute {
    entries: HashSet<(Language, String)>,
}

impl DuplicateMute {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mute(&mut self, language: Language, value: impl Into<String>) {
        self.entries.insert((language, value.into()));
    }

    pub fn unmute(&mut self, language: Language, value: &str) {
        self.entries.remove(&(language, value.to_string()));
    }

    pub fn is_muted(&self, language: Language, value: &str) -> bool {
        self.entries.contains(&(language, value.to_string()))
    }
}

/// Drop groups the caller has muted, preserving order.
pub fn filter_muted(groups: Vec<DuplicateGroup>, mute: &DuplicateMute) -> Vec<DuplicateGroup> {
    groups
        .into_iter()
        .filter(|group| !mute.is_muted(group.language, &group.value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_with(key_path: &str, language: Language, value: &str) -> FlatRow {
        let mut row = FlatRow::new(key_path);
        row.set_value(language, Some(value.to_string()));
        row
    }

    #[test]
    fn detects_shared_values_within_one_language() {
        let rows = vec![
            row_with("a", Language::En, "Hello"),
            row_with("b", Language::En, "Hello"),
            row_with("c", Language::En, "World"),
        ];
        let groups = detect_duplicates(&rows);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].language, Language::En);
        assert_eq!(groups[0].value, "Hello");
        assert_eq!(groups[0].key_paths, vec!["a", "b"]);
    }

    #[test]
    fn languages_never_mix() {
        let rows = vec![
            row_with("a", Language::Az, "Salam"),
            row_with("b", Language::En, "Salam"),
        ];
        assert!(detect_duplicates(&rows).is_empty());
    }

    #[test]
    fn groups_follow_language_then_first_occurrence_order() {
        let mut first = FlatRow::new("a");
        first.az_value = Some("dup-az".into());
        first.en_value = Some("dup-en".into());
        let mut second = FlatRow::new("b");
        second.az_value = Some("dup-az".into());
        second.en_value = Some("dup-en".into());
        let rows = vec![first, second];

        let groups = detect_duplicates(&rows);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].language, Language::Az);
        assert_eq!(groups[1].language, Language::En);
    }

    #[test]
    fn blank_values_are_ignored() {
        let rows = vec![
            row_with("a", Language::Ru, ""),
            row_with("b", Language::Ru, ""),
            row_with("c", Language::Ru, "   "),
            row_with("d", Language::Ru, "   "),
        ];
        assert!(detect_duplicates(&rows).is_empty());
    }

    #[test]
    fn matching_is_exact_without_normalization() {
        let rows = vec![
            row_with("a", Language::En, "Hello"),
            row_with("b", Language::En, "hello"),
            row_with("c", Language::En, "Hello "),
        ];
        assert!(detect_duplicates(&rows).is_empty());
    }

    #[test]
    fn muted_groups_are_filtered_out() {
        let rows = vec![
            row_with("a", Language::En, "Hello"),
            row_with("b", Language::En, "Hello"),
            row_with("c", Language::En, "World"),
            row_with("d", Language::En, "World"),
        ];
        let mut mute = DuplicateMute::new();
        mute.mute(Language::En, "Hello");

        let groups = filter_muted(detect_duplicates(&rows), &mute);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].value, "World");

        mute.unmute(Language::En, "Hello");
        assert!(!mute.is_muted(Language::En, "Hello"));
    }
}
