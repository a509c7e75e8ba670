use std::path::PathBuf;
use std::process::ExitStatus;

use serde::Serialize;

/// Source paths in discovery order, exactly as listed in marker files.
pub type SourceFileList = Vec<String>;

/// Captured outcome of a single external tool run.
#[derive(Debug, Clone)]
pub struct ToolResult {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ToolResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Why a tool produced nothing usable for a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NotAFile,
    ToolFailed { code: Option<i32>, stderr: String },
}

impl SkipReason {
    pub fn tool_failed(result: &ToolResult) -> Self {
        SkipReason::ToolFailed {
            code: result.status.code(),
            stderr: result.stderr_lossy(),
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NotAFile => f.write_str("not a file"),
            SkipReason::ToolFailed { code: Some(c), .. } => write!(f, "tool exited with status {c}"),
            SkipReason::ToolFailed { code: None, .. } => f.write_str("tool terminated by signal"),
        }
    }
}

/// Formatter answer for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestion {
    Formatted(Vec<u8>),
    Declined(SkipReason),
}

/// Terminal state of one file in the format workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Unchanged,
    Changed,
    NotAFile,
    ToolFailed,
}

impl From<&SkipReason> for FileStatus {
    fn from(reason: &SkipReason) -> Self {
        match reason {
            SkipReason::NotAFile => FileStatus::NotAFile,
            SkipReason::ToolFailed { .. } => FileStatus::ToolFailed,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FormatReport {
    pub path: PathBuf,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
    pub fixed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl FormatReport {
    pub fn new(path: PathBuf, status: FileStatus) -> Self {
        FormatReport {
            path,
            status,
            diff: None,
            fixed: false,
            reason: None,
        }
    }
}
