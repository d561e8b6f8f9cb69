/// Configuration for the token manager
use crate::model::Language;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOptions {
    /// Pretty-print output artifacts
    pub pretty: bool,

    /// File name for the merged developer export
    pub merged_file_name: String,

    /// File name template for per-language exports; `{lang}` is
    /// replaced by the language code
    pub language_file_template: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            merged_file_name: "tokens.merged.json".to_string(),
            language_file_template: "tokens.{lang}.json".to_string(),
        }
    }
}

impl ExportOptions {
    pub fn language_file_name(&self, language: Language) -> String {
        self.language_file_template.replace("{lang}", language.code())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LintOptions {
    /// Exit non-zero from batch runs when key issues are found
    #[serde(default)]
    pub fail_on_issues: bool,

    /// Append sweeps to this JSONL report file when set
    #[serde(default)]
    pub report_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ManagerConfig {
    #[serde(default)]
    pub project: String,

    #[serde(default)]
    pub export: ExportOptions,

    #[serde(default)]
    pub lint: LintOptions,
}

impl ManagerConfig {
    /// Load configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content =
            fs::read_to_string(path).map_err(|e| format!("Failed to read config file: {}", e))?;

        serde_json::from_str(&content).map_err(|e| format!("Failed to parse config: {}", e))
    }

    /// Save configuration to a JSON file
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(path, content).map_err(|e| format!("Failed to write config file: {}", e))
    }

    /// Load from a JSON string (for UI integration)
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse JSON config: {}", e))
    }

    /// Convert to a JSON string (for UI integration)
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("Failed to serialize to JSON: {}", e))
    }
}
