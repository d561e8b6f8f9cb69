/// Findings report for lint and duplicate sweeps
use crate::model::{DuplicateGroup, KeyIssue};
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// One sweep over a project's row set: what was scanned and what was
/// found. Serialized as a single JSONL line per sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindingsReport {
    pub generated_at: DateTime<Utc>,
    pub project: String,
    pub rows_scanned: usize,
    pub issue_count: usize,
    pub duplicate_group_count: usize,
    pub key_issues: Vec<KeyIssue>,
    pub duplicate_groups: Vec<DuplicateGroup>,
}

impl FindingsReport {
    pub fn new(
        project: impl Into<String>,
        rows_scanned: usize,
        key_issues: Vec<KeyIssue>,
        duplicate_groups: Vec<DuplicateGroup>,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            project: project.into(),
            rows_scanned,
            issue_count: key_issues.len(),
            duplicate_group_count: duplicate_groups.len(),
            key_issues,
            duplicate_groups,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.key_issues.is_empty() && self.duplicate_groups.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Appends reports to a JSONL file, one line per sweep.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    path: PathBuf,
}

impl ReportWriter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, report: &FindingsReport) -> Result<(), std::io::Error> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = BufWriter::new(file);
        let line = serde_json::to_string(report)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        writeln!(writer, "{}", line)?;
        writer.flush()?;
        info!(
            "findings report for {} appended to {} ({} issues, {} duplicate groups)",
            report.project,
            self.path.display(),
            report.issue_count,
            report.duplicate_group_count
        );
        Ok(())
    }
}
