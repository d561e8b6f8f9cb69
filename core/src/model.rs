/// Shared data model for the token translation pipeline
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Translation languages handled by the project, in processing order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Az,
    En,
    Ru,
}

impl Language {
    /// Fixed processing order used by flattening, building, and
    /// duplicate detection.
    pub const ALL: [Language; 3] = [Language::Az, Language::En, Language::Ru];

    pub fn code(self) -> &'static str {
        match self {
            Language::Az => "az",
            Language::En => "en",
            Language::Ru => "ru",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "az" => Ok(Language::Az),
            "en" => Ok(Language::En),
            "ru" => Ok(Language::Ru),
            other => Err(format!("Unknown language code: {}", other)),
        }
    }
}

/// One token row, keyed by its dotted path and carrying the value for
/// every language plus leaf metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlatRow {
    /// Dotted path locating the token, unique per project
    pub key_path: String,

    pub az_value: Option<String>,
    pub en_value: Option<String>,
    pub ru_value: Option<String>,

    /// Semantic type tag from `$type` (e.g. "color", "string")
    #[serde(default)]
    pub token_type: Option<String>,

    /// Provenance link to an external Figma variable
    #[serde(default)]
    pub figma_variable_id: Option<String>,

    /// Pre-sanitization key path, set once on first rename
    #[serde(default)]
    pub original_key: Option<String>,
}

impl FlatRow {
    pub fn new(key_path: impl Into<String>) -> Self {
        Self {
            key_path: key_path.into(),
            az_value: None,
            en_value: None,
            ru_value: None,
            token_type: None,
            figma_variable_id: None,
            original_key: None,
        }
    }

    pub fn value(&self, language: Language) -> Option<&str> {
        match language {
            Language::Az => self.az_value.as_deref(),
            Language::En => self.en_value.as_deref(),
            Language::Ru => self.ru_value.as_deref(),
        }
    }

    pub fn set_value(&mut self, language: Language, value: Option<String>) {
        match language {
            Language::Az => self.az_value = value,
            Language::En => self.en_value = value,
            Language::Ru => self.ru_value = value,
        }
    }

    /// Move the row to a new key path. The first rename records the old
    /// path in `original_key`; later renames keep it untouched.
    pub fn apply_rename(&mut self, new_path: &str) {
        if self.original_key.is_none() {
            self.original_key = Some(self.key_path.clone());
        }
        self.key_path = new_path.to_string();
    }

    pub fn has_any_value(&self) -> bool {
        self.az_value.is_some() || self.en_value.is_some() || self.ru_value.is_some()
    }
}

/// Metadata object attached to a non-leaf path segment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupExtension {
    /// Dotted path of the group node, unique per project
    pub group_path: String,

    /// Arbitrary `$extensions` payload carried by the group
    pub extensions: serde_json::Value,
}

/// Lint finding for a key path whose last segment needs fixing.
/// Recomputed per view, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct KeyIssue {
    /// Last path segment before the fix
    pub original: String,

    /// Sanitized replacement segment
    pub suggested: String,

    /// Full path with only the last segment replaced
    pub key_path: String,
}

/// Rows sharing the same value in one language.
/// Recomputed per view, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateGroup {
    pub language: Language,
    pub value: String,
    /// Key paths in row iteration order
    pub key_paths: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_order_is_fixed() {
        let codes: Vec<&str> = Language::ALL.iter().map(|l| l.code()).collect();
        assert_eq!(codes, vec!["az", "en", "ru"]);
    }

    #[test]
    fn language_parses_case_insensitively() {
        assert_eq!("EN".parse::<Language>().unwrap(), Language::En);
        assert!("de".parse::<Language>().is_err());
    }

    #[test]
    fn rename_records_original_key_once() {
        let mut row = FlatRow::new("colors.Primary Color");
        row.apply_rename("colors.primary_color");
        assert_eq!(row.original_key.as_deref(), Some("colors.Primary Color"));

        row.apply_rename("colors.brand_primary");
        // First rename wins; later renames never overwrite the record
        assert_eq!(row.original_key.as_deref(), Some("colors.Primary Color"));
        assert_eq!(row.key_path, "colors.brand_primary");
    }

    #[test]
    fn value_accessors_cover_all_languages() {
        let mut row = FlatRow::new("a");
        row.set_value(Language::Ru, Some("Привет".into()));
        assert_eq!(row.value(Language::Ru), Some("Привет"));
        assert_eq!(row.value(Language::Az), None);
        assert!(row.has_any_value());
    }
}
