/// In-memory snapshot of the externally persisted row store.
///
/// The hosted backend keeps rows and group extensions as unordered
/// collections keyed by (project, path); this snapshot is the local
/// working copy the pipeline operates on, with a JSON round-trip for
/// hand-off at the process boundary.
use crate::flatten::FlattenOutput;
use crate::model::{FlatRow, GroupExtension, KeyIssue};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RowSnapshot {
    #[serde(default)]
    pub project: String,

    #[serde(default)]
    pub rows: Vec<FlatRow>,

    #[serde(default)]
    pub group_extensions: Vec<GroupExtension>,
}

impl RowSnapshot {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            rows: Vec::new(),
            group_extensions: Vec::new(),
        }
    }

    pub fn from_flatten(project: impl Into<String>, output: FlattenOutput) -> Self {
        Self {
            project: project.into(),
            rows: output.rows,
            group_extensions: output.group_extensions,
        }
    }

    pub fn row(&self, key_path: &str) -> Option<&FlatRow> {
        self.rows.iter().find(|row| row.key_path == key_path)
    }

    /// Insert or replace a row by key path; last write wins.
    pub fn upsert_row(&mut self, row: FlatRow) {
        match self.rows.iter_mut().find(|r| r.key_path == row.key_path) {
            Some(existing) => *existing = row,
            None => self.rows.push(row),
        }
    }

    /// Remove a row by key path. Group extensions under the removed
    /// path are left in place: they are independently keyed and never
    /// cascade-deleted.
    pub fn remove_row(&mut self, key_path: &str) -> Option<FlatRow> {
        let idx = self.rows.iter().position(|row| row.key_path == key_path)?;
        Some(self.rows.remove(idx))
    }

    /// Insert or replace a group extension by group path.
    pub fn upsert_group_extension(&mut self, extension: GroupExtension) {
        match self
            .group_extensions
            .iter_mut()
            .find(|e| e.group_path == extension.group_path)
        {
            Some(existing) => *existing = extension,
            None => self.group_extensions.push(extension),
        }
    }

    /// Accept a lint suggestion: rename the flagged row to the fixed
    /// path. Returns false when the flagged row no longer exists.
    pub fn accept_suggestion(&mut self, issue: &KeyIssue) -> bool {
        let old_path = replace_last_segment(&issue.key_path, &issue.original);
        match self.rows.iter_mut().find(|row| row.key_path == old_path) {
            Some(row) => {
                row.apply_rename(&issue.key_path);
                true
            }
            None => {
                warn!("no row at {} for suggested fix {}", old_path, issue.key_path);
                false
            }
        }
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize snapshot: {}", e))
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse snapshot: {}", e))
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content =
            fs::read_to_string(path).map_err(|e| format!("Failed to read snapshot file: {}", e))?;
        Self::from_json(&content)
    }

    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let content = self.to_json()?;
        fs::write(path, content).map_err(|e| format!("Failed to write snapshot file: {}", e))
    }
}

fn replace_last_segment(key_path: &str, segment: &str) -> String {
    match key_path.rfind('.') {
        Some(idx) => format!("{}.{}", &key_path[..idx], segment),
        None => segment.to_string(),
    }
}
